//! Calendar arithmetic — weekday indices, ISO week numbers, month spans.
//!
//! All dates are local calendar dates (no timezone). Weekday indices
//! count from Sunday = 0 to Saturday = 6, which is how rules store them.

use crate::types::YearMonth;
use chrono::{Datelike, Duration, NaiveDate};

pub const SUNDAY: u32 = 0;
pub const SATURDAY: u32 = 6;

/// Weekday index of `date`, Sunday = 0 .. Saturday = 6.
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(weekday_index(date), SUNDAY | SATURDAY)
}

/// ISO-8601 week number (1..=53).
///
/// Shifts the date to the Thursday of its Monday-based week and counts
/// whole weeks from January 1st of that Thursday's year. A Sunday belongs
/// to the week of the Monday before it.
pub fn iso_week_number(date: NaiveDate) -> u32 {
    let iso_dow = date.weekday().number_from_monday() as i64; // Mon=1 .. Sun=7
    match date.checked_add_signed(Duration::days(4 - iso_dow)) {
        Some(thursday) => thursday.ordinal0() / 7 + 1,
        None => date.iso_week().week(),
    }
}

pub fn first_of_month(ym: YearMonth) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(ym.year, ym.month, 1)
}

/// Last calendar day of the month. This is the reference date used for
/// monthly headcount eligibility.
pub fn last_day_of_month(ym: YearMonth) -> Option<NaiveDate> {
    let (y, m) = if ym.month == 12 { (ym.year + 1, 1) } else { (ym.year, ym.month + 1) };
    NaiveDate::from_ymd_opt(y, m, 1).and_then(|d| d.pred_opt())
}

/// Number of calendar days in the month, 0 for an invalid month.
pub fn days_in_month(ym: YearMonth) -> u32 {
    last_day_of_month(ym).map(|d| d.day()).unwrap_or(0)
}

/// Every date of the month in order.
pub fn month_dates(ym: YearMonth) -> Vec<NaiveDate> {
    match first_of_month(ym) {
        Some(first) => first.iter_days().take(days_in_month(ym) as usize).collect(),
        None => Vec::new(),
    }
}

/// Inclusive date range. Empty when `end < start`.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

pub fn year_month_of(date: NaiveDate) -> YearMonth {
    YearMonth::new(date.year(), date.month())
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}
