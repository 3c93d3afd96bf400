//! Source traits — what the desk needs from the outside world.
//!
//! RULE: The desk reads rules, overrides, roster and planning data only
//! through these traits, and hands snapshots to the pure core.
//! `DeskStore` is the production implementation.

use crate::{
    error::DeskResult,
    recurrence::RecurrenceRule,
    roster::Person,
    schedule::MonthOverrides,
    staffing::{DerivedOutputs, PlanningDocument},
    store::DeskStore,
    types::YearMonth,
};

pub trait RosterSource {
    /// Flattened, deduplicated roster.
    fn roster(&self) -> DeskResult<Vec<Person>>;
}

pub trait RuleSource {
    /// Every rule in stored order.
    fn all_rules(&self) -> DeskResult<Vec<RecurrenceRule>>;

    fn rules_for_person(&self, person_id: &str) -> DeskResult<Vec<RecurrenceRule>> {
        Ok(self
            .all_rules()?
            .into_iter()
            .filter(|r| r.technician_id == person_id)
            .collect())
    }
}

pub trait OverrideSource {
    fn overrides_for_month(&self, ym: YearMonth) -> DeskResult<MonthOverrides>;
}

pub trait PlanningSource {
    fn planning_for_month(&self, ym: YearMonth) -> DeskResult<Option<PlanningDocument>>;

    /// Store the last computed outputs for display.
    fn cache_outputs(&self, ym: YearMonth, derived: &DerivedOutputs) -> DeskResult<()>;
}

impl RosterSource for DeskStore {
    fn roster(&self) -> DeskResult<Vec<Person>> {
        self.load_roster()
    }
}

impl RuleSource for DeskStore {
    fn all_rules(&self) -> DeskResult<Vec<RecurrenceRule>> {
        self.load_rules()
    }
}

impl OverrideSource for DeskStore {
    fn overrides_for_month(&self, ym: YearMonth) -> DeskResult<MonthOverrides> {
        self.load_month_overrides(ym)
    }
}

impl PlanningSource for DeskStore {
    fn planning_for_month(&self, ym: YearMonth) -> DeskResult<Option<PlanningDocument>> {
        self.load_planning(ym)
    }

    fn cache_outputs(&self, ym: YearMonth, derived: &DerivedOutputs) -> DeskResult<()> {
        self.cache_planning_outputs(ym, derived)
    }
}
