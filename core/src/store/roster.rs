//! Store methods for the organizational tree.

use crate::{
    error::DeskResult,
    roster::{flatten_roster, OrgChart, Person},
};

use super::{DeskStore, ORG_CHART_DOC, ORG_COLLECTION};

impl DeskStore {
    /// The stored tree, or an empty one.
    pub fn load_org_chart(&self) -> DeskResult<OrgChart> {
        Ok(self.get_doc(ORG_COLLECTION, ORG_CHART_DOC)?.unwrap_or_default())
    }

    pub fn save_org_chart(&self, chart: &OrgChart) -> DeskResult<()> {
        self.set_doc(ORG_COLLECTION, ORG_CHART_DOC, chart)
    }

    pub fn load_roster(&self) -> DeskResult<Vec<Person>> {
        Ok(flatten_roster(&self.load_org_chart()?))
    }
}
