//! Day resolver — the default status of one person on one date.
//!
//! Precedence, lowest to highest:
//!   1. Weekday / weekend default (on Mon–Fri, off Sat–Sun)
//!   2. First applicable recurring rule, in stored order
//!   3. Specific override (applied by the schedule aggregator)
//!
//! Pure: the rule snapshot is passed in, nothing is read from ambient state.

use crate::{
    calendar::{is_weekend, iso_week_number, weekday_index},
    recurrence::{rules_for_person, RecurrenceRule, ShiftStatus},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which precedence level produced a resolved status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScheduleSource {
    #[serde(rename = "Weekday Default")]
    WeekdayDefault,
    #[serde(rename = "Weekend Default")]
    WeekendDefault,
    #[serde(rename = "Recurring Rule")]
    RecurringRule,
    #[serde(rename = "Specific Override")]
    SpecificOverride,
}

impl ScheduleSource {
    pub fn label(&self) -> &'static str {
        match self {
            ScheduleSource::WeekdayDefault   => "Weekday Default",
            ScheduleSource::WeekendDefault   => "Weekend Default",
            ScheduleSource::RecurringRule    => "Recurring Rule",
            ScheduleSource::SpecificOverride => "Specific Override",
        }
    }
}

impl fmt::Display for ScheduleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedStatus {
    pub status: ShiftStatus,
    pub hours:  String,
    pub source: ScheduleSource,
}

impl ResolvedStatus {
    pub fn baseline(date: NaiveDate) -> Self {
        if is_weekend(date) {
            Self { status: ShiftStatus::Off, hours: String::new(), source: ScheduleSource::WeekendDefault }
        } else {
            Self { status: ShiftStatus::On, hours: String::new(), source: ScheduleSource::WeekdayDefault }
        }
    }
}

/// Resolve `person_id`'s status on `date` from the weekday default and
/// their recurring rules. Rules owned by other people are ignored.
pub fn resolve_default_status(
    person_id: &str,
    date: NaiveDate,
    rules: &[RecurrenceRule],
) -> ResolvedStatus {
    let weekday = weekday_index(date);
    let week_number = iso_week_number(date);

    let applied = rules_for_person(rules, person_id)
        .filter(|rule| rule.window_contains(date))
        .find(|rule| rule.matches_weekday(weekday) && rule.matches_week_parity(week_number));

    match applied {
        Some(rule) => ResolvedStatus {
            status: rule.status,
            hours:  rule.hours.clone().unwrap_or_default(),
            source: ScheduleSource::RecurringRule,
        },
        None => ResolvedStatus::baseline(date),
    }
}
