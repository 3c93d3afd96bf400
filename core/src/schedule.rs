//! Schedule aggregation — one resolved schedule per day for the full roster.
//!
//! Overrides live in one document per month, keyed by day of month.
//! A person without an override entry falls back to the day resolver.

use crate::{
    calendar::{date_range, month_dates, year_month_of},
    recurrence::{RecurrenceRule, ShiftStatus},
    resolver::{resolve_default_status, ScheduleSource},
    roster::{compare_names, is_eligible_route_runner, Person, Role},
    types::{PersonId, YearMonth},
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One person's correction for one specific date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffOverride {
    pub id:     PersonId,
    pub status: ShiftStatus,
    #[serde(default)]
    pub hours:  String,
}

impl StaffOverride {
    pub fn new(id: impl Into<PersonId>, status: ShiftStatus) -> Self {
        Self { id: id.into(), status, hours: String::new() }
    }

    pub fn with_hours(mut self, hours: impl Into<String>) -> Self {
        self.hours = hours.into();
        self
    }
}

/// Persisted override document for a single date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub staff: Vec<StaffOverride>,
}

impl DaySchedule {
    /// Replace the person's existing entry or append a new one.
    /// Keeps at most one entry per person.
    pub fn upsert(&mut self, entry: StaffOverride) {
        match self.staff.iter_mut().find(|s| s.id == entry.id) {
            Some(existing) => *existing = entry,
            None => self.staff.push(entry),
        }
    }

    /// Drop the person's entry so they fall back to rules/defaults.
    pub fn clear(&mut self, person_id: &str) -> bool {
        let before = self.staff.len();
        self.staff.retain(|s| s.id != person_id);
        before != self.staff.len()
    }

    pub fn entry_for(&self, person_id: &str) -> Option<&StaffOverride> {
        self.staff.iter().find(|s| s.id == person_id)
    }

    pub fn is_empty(&self) -> bool {
        self.staff.is_empty() && self.notes.as_deref().map_or(true, str::is_empty)
    }
}

/// All overrides of one month, keyed by day of month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthOverrides {
    #[serde(default)]
    pub specific: BTreeMap<u32, DaySchedule>,
}

impl MonthOverrides {
    pub fn day(&self, day_of_month: u32) -> Option<&DaySchedule> {
        self.specific.get(&day_of_month)
    }

    pub fn day_mut(&mut self, day_of_month: u32) -> &mut DaySchedule {
        self.specific.entry(day_of_month).or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedEntry {
    pub id:     PersonId,
    pub name:   String,
    pub role:   Role,
    pub status: ShiftStatus,
    pub hours:  String,
    pub source: ScheduleSource,
}

/// A day's schedule for the whole roster, sorted by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSchedule {
    pub date:  NaiveDate,
    pub notes: String,
    pub staff: Vec<ResolvedEntry>,
}

impl ResolvedSchedule {
    pub fn entry_for(&self, person_id: &str) -> Option<&ResolvedEntry> {
        self.staff.iter().find(|e| e.id == person_id)
    }

    pub fn tally(&self) -> DayTally {
        let mut tally = DayTally::default();
        for entry in &self.staff {
            tally.record(entry.status);
        }
        tally
    }
}

/// Head counts per status for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTally {
    pub on:              usize,
    pub off:             usize,
    pub sick:            usize,
    pub vacation:        usize,
    pub no_call_no_show: usize,
}

impl DayTally {
    fn record(&mut self, status: ShiftStatus) {
        match status {
            ShiftStatus::On           => self.on += 1,
            ShiftStatus::Off          => self.off += 1,
            ShiftStatus::Sick         => self.sick += 1,
            ShiftStatus::Vacation     => self.vacation += 1,
            ShiftStatus::NoCallNoShow => self.no_call_no_show += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.on + self.off + self.sick + self.vacation + self.no_call_no_show
    }
}

/// Resolve every roster person on `date`, then apply that day's
/// specific overrides. Override entries for ids not on the roster are
/// ignored; every roster person appears exactly once.
pub fn get_resolved_schedule_for_day(
    date: NaiveDate,
    month_overrides: &MonthOverrides,
    roster: &[Person],
    rules: &[RecurrenceRule],
) -> ResolvedSchedule {
    let day = month_overrides.day(date.day());

    let mut staff: Vec<ResolvedEntry> = roster
        .iter()
        .map(|person| {
            let mut resolved = resolve_default_status(&person.id, date, rules);
            if let Some(entry) = day.and_then(|d| d.entry_for(&person.id)) {
                resolved.status = entry.status;
                resolved.hours = entry.hours.clone();
                resolved.source = ScheduleSource::SpecificOverride;
            }
            ResolvedEntry {
                id:     person.id.clone(),
                name:   person.name.clone(),
                role:   person.role,
                status: resolved.status,
                hours:  resolved.hours,
                source: resolved.source,
            }
        })
        .collect();

    staff.sort_by(|a, b| compare_names(&a.name, &b.name).then_with(|| a.id.cmp(&b.id)));

    ResolvedSchedule {
        date,
        notes: day.and_then(|d| d.notes.clone()).unwrap_or_default(),
        staff,
    }
}

/// Every day of the month.
pub fn resolve_month(
    ym: YearMonth,
    month_overrides: &MonthOverrides,
    roster: &[Person],
    rules: &[RecurrenceRule],
) -> Vec<ResolvedSchedule> {
    month_dates(ym)
        .into_iter()
        .map(|date| get_resolved_schedule_for_day(date, month_overrides, roster, rules))
        .collect()
}

/// An inclusive date range that may straddle months (e.g. a week view).
/// Months missing from `overrides` resolve with no overrides.
pub fn resolve_range(
    start: NaiveDate,
    end: NaiveDate,
    overrides: &HashMap<YearMonth, MonthOverrides>,
    roster: &[Person],
    rules: &[RecurrenceRule],
) -> Vec<ResolvedSchedule> {
    let empty = MonthOverrides::default();
    date_range(start, end)
        .into_iter()
        .map(|date| {
            let month = overrides.get(&year_month_of(date)).unwrap_or(&empty);
            get_resolved_schedule_for_day(date, month, roster, rules)
        })
        .collect()
}

/// Route runners who are eligible on the schedule's date and resolved `on`.
pub fn on_duty_route_runners(schedule: &ResolvedSchedule, roster: &[Person]) -> usize {
    let by_id: HashMap<&str, &Person> = roster.iter().map(|p| (p.id.as_str(), p)).collect();
    schedule
        .staff
        .iter()
        .filter(|e| e.status == ShiftStatus::On)
        .filter_map(|e| by_id.get(e.id.as_str()))
        .filter(|p| p.is_route_runner() && is_eligible_route_runner(p, schedule.date))
        .count()
}
