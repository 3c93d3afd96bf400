//! Store methods for monthly planning documents.

use crate::{
    error::DeskResult,
    staffing::{DerivedOutputs, MonthlyPlanningData, PlanningDocument},
    types::YearMonth,
};

use super::{DeskStore, PLANNING_COLLECTION};

impl DeskStore {
    pub fn load_planning(&self, ym: YearMonth) -> DeskResult<Option<PlanningDocument>> {
        self.get_doc(PLANNING_COLLECTION, &ym.key())
    }

    /// Merge new inputs into the month's document. Cached outputs stay
    /// until the next forecast overwrites them. Non-finite inputs are
    /// stored as 0.
    pub fn save_planning_inputs(&self, ym: YearMonth, inputs: &MonthlyPlanningData) -> DeskResult<()> {
        self.merge_doc(PLANNING_COLLECTION, &ym.key(), serde_json::to_value(inputs.sanitized())?)
    }

    pub fn cache_planning_outputs(&self, ym: YearMonth, derived: &DerivedOutputs) -> DeskResult<()> {
        let patch = serde_json::json!({ "derived": derived });
        self.merge_doc(PLANNING_COLLECTION, &ym.key(), patch)
    }
}
