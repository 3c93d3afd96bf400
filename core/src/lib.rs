//! Labor desk core — recurring-schedule resolution and staffing forecasts.
//!
//! The pure core (`calendar`, `recurrence`, `resolver`, `schedule`,
//! `roster`, `staffing`) never performs I/O. `desk` feeds it snapshots
//! from a `source`, with `store` as the SQLite-backed implementation.

pub mod calendar;
pub mod config;
pub mod demo;
pub mod desk;
pub mod error;
pub mod name_generator;
pub mod recurrence;
pub mod resolver;
pub mod rng;
pub mod roster;
pub mod schedule;
pub mod source;
pub mod staffing;
pub mod store;
pub mod types;
