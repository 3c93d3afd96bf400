//! Shared primitive types used across the desk.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A stable, unique identifier for a person on the roster.
pub type PersonId = String;

/// Identifier of a stored recurrence rule.
pub type RuleId = String;

/// A calendar month. Used as the key for per-month documents
/// (overrides, planning inputs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year:  i32,
    pub month: u32, // 1..=12
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Parse `YYYY-MM`. Returns None for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        let (y, m) = s.trim().split_once('-')?;
        let year: i32 = y.parse().ok()?;
        let month: u32 = m.parse().ok()?;
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// Document key, e.g. `2024-03`.
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}
