//! Store methods for per-day overrides. One document per month.

use crate::{
    calendar::year_month_of,
    error::DeskResult,
    schedule::{MonthOverrides, StaffOverride},
    types::YearMonth,
};
use chrono::{Datelike, NaiveDate};

use super::{DeskStore, SCHEDULE_COLLECTION};

impl DeskStore {
    /// The month's overrides; empty when nothing was saved yet.
    pub fn load_month_overrides(&self, ym: YearMonth) -> DeskResult<MonthOverrides> {
        Ok(self.get_doc(SCHEDULE_COLLECTION, &ym.key())?.unwrap_or_default())
    }

    /// Replace the person's entry for `date`, or append one.
    pub fn save_override(&self, date: NaiveDate, entry: StaffOverride) -> DeskResult<()> {
        let ym = year_month_of(date);
        let mut month = self.load_month_overrides(ym)?;
        log::debug!("Override {date}: {} -> {}", entry.id, entry.status);
        month.day_mut(date.day()).upsert(entry);
        self.set_doc(SCHEDULE_COLLECTION, &ym.key(), &month)
    }

    /// Remove the person's entry for `date`. Returns false if there was none.
    pub fn clear_override(&self, date: NaiveDate, person_id: &str) -> DeskResult<bool> {
        let ym = year_month_of(date);
        let mut month = self.load_month_overrides(ym)?;
        let removed = month.day_mut(date.day()).clear(person_id);
        if month.day(date.day()).is_some_and(|d| d.is_empty()) {
            month.specific.remove(&date.day());
        }
        if removed {
            self.set_doc(SCHEDULE_COLLECTION, &ym.key(), &month)?;
        }
        Ok(removed)
    }

    /// Set the free-text notes for `date`; an empty string clears them.
    pub fn save_day_notes(&self, date: NaiveDate, notes: &str) -> DeskResult<()> {
        let ym = year_month_of(date);
        let mut month = self.load_month_overrides(ym)?;
        month.day_mut(date.day()).notes = if notes.is_empty() { None } else { Some(notes.to_string()) };
        self.set_doc(SCHEDULE_COLLECTION, &ym.key(), &month)
    }
}
