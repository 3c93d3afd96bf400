//! Recurrence rules — per-person recurring availability.
//!
//! Rule order is significant. The resolver scans a person's rules in
//! stored order and the first applicable one wins; there is no
//! priority field.

use crate::{
    calendar::SATURDAY,
    error::{DeskError, DeskResult},
    types::{PersonId, RuleId},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Effective status of a person on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShiftStatus {
    On,
    Off,
    Sick,
    Vacation,
    NoCallNoShow,
}

impl ShiftStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftStatus::On           => "on",
            ShiftStatus::Off          => "off",
            ShiftStatus::Sick         => "sick",
            ShiftStatus::Vacation     => "vacation",
            ShiftStatus::NoCallNoShow => "no-call-no-show",
        }
    }
}

impl fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    #[default]
    Every,
    EveryOther,
}

fn default_anchor() -> u8 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRule {
    /// Empty until the store assigns one.
    #[serde(default)]
    pub id: RuleId,
    pub technician_id: PersonId,
    /// Weekday indices, Sunday = 0.
    #[serde(default)]
    pub days: Vec<u32>,
    pub status: ShiftStatus,
    #[serde(default)]
    pub hours: Option<String>,
    #[serde(default)]
    pub frequency: Frequency,
    /// 1 = odd ISO weeks, 2 = even ISO weeks. Only read for every-other.
    #[serde(default = "default_anchor")]
    pub week_anchor: u8,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl RecurrenceRule {
    /// An every-week rule with no validity window.
    pub fn weekly(technician_id: impl Into<PersonId>, days: &[u32], status: ShiftStatus) -> Self {
        Self {
            id: RuleId::new(),
            technician_id: technician_id.into(),
            days: days.to_vec(),
            status,
            hours: None,
            frequency: Frequency::Every,
            week_anchor: 1,
            start_date: None,
            end_date: None,
        }
    }

    /// An alternating-week rule anchored to odd (1) or even (2) weeks.
    pub fn every_other(
        technician_id: impl Into<PersonId>,
        days: &[u32],
        status: ShiftStatus,
        week_anchor: u8,
    ) -> Self {
        Self {
            frequency: Frequency::EveryOther,
            week_anchor,
            ..Self::weekly(technician_id, days, status)
        }
    }

    pub fn with_hours(mut self, hours: impl Into<String>) -> Self {
        self.hours = Some(hours.into());
        self
    }

    pub fn with_window(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Inclusive on both ends; an absent bound is open.
    pub fn window_contains(&self, date: NaiveDate) -> bool {
        self.start_date.map_or(true, |s| date >= s) && self.end_date.map_or(true, |e| date <= e)
    }

    pub fn matches_weekday(&self, weekday: u32) -> bool {
        self.days.contains(&weekday)
    }

    /// Alternating-week gate. Every-week rules always pass.
    pub fn matches_week_parity(&self, week_number: u32) -> bool {
        match self.frequency {
            Frequency::Every => true,
            Frequency::EveryOther => week_number % 2 == u32::from(self.week_anchor % 2),
        }
    }

    /// Boundary check applied before a rule is persisted.
    pub fn validate(&self) -> DeskResult<()> {
        let invalid = |reason: String| DeskError::InvalidRule {
            rule_id: self.id.clone(),
            reason,
        };
        if self.technician_id.trim().is_empty() {
            return Err(invalid("missing technician id".into()));
        }
        if let Some(day) = self.days.iter().find(|d| **d > SATURDAY) {
            return Err(invalid(format!("weekday {day} outside 0..=6")));
        }
        if self.frequency == Frequency::EveryOther && !matches!(self.week_anchor, 1 | 2) {
            return Err(invalid(format!("week anchor {} must be 1 or 2", self.week_anchor)));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(invalid(format!("start {start} is after end {end}")));
            }
        }
        Ok(())
    }
}

/// A person's rules in stored order, taken from a full rule snapshot.
pub fn rules_for_person<'a>(
    rules: &'a [RecurrenceRule],
    person_id: &'a str,
) -> impl Iterator<Item = &'a RecurrenceRule> + 'a {
    rules.iter().filter(move |r| r.technician_id == person_id)
}
