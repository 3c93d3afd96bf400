//! Day resolver tests — defaults, rule precedence, alternating weeks.

use chrono::NaiveDate;
use labor_desk_core::{
    recurrence::{RecurrenceRule, ShiftStatus},
    resolver::{resolve_default_status, ScheduleSource},
};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

/// With no rules, weekdays are on and weekends are off.
#[test]
fn baseline_defaults_without_rules() {
    let sat = resolve_default_status("alice", d("2024-03-16"), &[]);
    assert_eq!(sat.status, ShiftStatus::Off);
    assert_eq!(sat.source, ScheduleSource::WeekendDefault);
    assert_eq!(sat.hours, "");

    let sun = resolve_default_status("alice", d("2024-03-17"), &[]);
    assert_eq!(sun.status, ShiftStatus::Off);
    assert_eq!(sun.source, ScheduleSource::WeekendDefault);

    let wed = resolve_default_status("alice", d("2024-03-13"), &[]);
    assert_eq!(wed.status, ShiftStatus::On);
    assert_eq!(wed.source, ScheduleSource::WeekdayDefault);
}

/// Same inputs, same output.
#[test]
fn resolution_is_idempotent() {
    let rules = vec![
        RecurrenceRule::every_other("alice", &[1, 3], ShiftStatus::Off, 2),
        RecurrenceRule::weekly("alice", &[6], ShiftStatus::On).with_hours("9-3"),
    ];
    for date in ["2024-03-04", "2024-03-06", "2024-03-09", "2024-03-11"] {
        let first = resolve_default_status("alice", d(date), &rules);
        let second = resolve_default_status("alice", d(date), &rules);
        assert_eq!(first, second, "resolution changed between calls on {date}");
    }
}

/// An every-other Monday rule anchored to odd weeks alternates across
/// four consecutive Mondays (ISO weeks 10..13 of 2024).
#[test]
fn every_other_rule_alternates_with_week_parity() {
    let rules = vec![RecurrenceRule::every_other("alice", &[1], ShiftStatus::Off, 1)];
    let expected = [
        ("2024-03-04", ShiftStatus::On),  // week 10, even: rule skipped
        ("2024-03-11", ShiftStatus::Off), // week 11, odd: applies
        ("2024-03-18", ShiftStatus::On),  // week 12
        ("2024-03-25", ShiftStatus::Off), // week 13
    ];
    for (date, status) in expected {
        let resolved = resolve_default_status("alice", d(date), &rules);
        assert_eq!(resolved.status, status, "wrong status on {date}");
    }
}

/// Anchor 2 means even weeks: week 10 applies, week 11 falls back.
#[test]
fn even_week_anchor_applies_on_even_weeks_only() {
    let rules = vec![RecurrenceRule::every_other("bob", &[1], ShiftStatus::Off, 2)];

    let week_10 = resolve_default_status("bob", d("2024-03-04"), &rules);
    assert_eq!(week_10.status, ShiftStatus::Off);
    assert_eq!(week_10.source, ScheduleSource::RecurringRule);

    let week_11 = resolve_default_status("bob", d("2024-03-11"), &rules);
    assert_eq!(week_11.status, ShiftStatus::On);
    assert_eq!(week_11.source, ScheduleSource::WeekdayDefault);
}

/// Week 53 and week 1 are both odd, so an odd-anchored rule fires on two
/// consecutive Mondays across the 2020/2021 boundary.
#[test]
fn parity_does_not_alternate_across_iso_year_boundary() {
    let rules = vec![RecurrenceRule::every_other("alice", &[1], ShiftStatus::Off, 1)];

    assert_eq!(resolve_default_status("alice", d("2020-12-21"), &rules).status, ShiftStatus::On); // W52
    assert_eq!(resolve_default_status("alice", d("2020-12-28"), &rules).status, ShiftStatus::Off); // W53
    assert_eq!(resolve_default_status("alice", d("2021-01-04"), &rules).status, ShiftStatus::Off); // W1
    assert_eq!(resolve_default_status("alice", d("2021-01-11"), &rules).status, ShiftStatus::On); // W2
}

/// Sunday belongs to the week of the Monday before it.
#[test]
fn sunday_uses_preceding_week_parity() {
    let rules = vec![RecurrenceRule::every_other("alice", &[0], ShiftStatus::On, 2)];
    // 2024-03-10 is the Sunday of ISO week 10.
    let resolved = resolve_default_status("alice", d("2024-03-10"), &rules);
    assert_eq!(resolved.status, ShiftStatus::On);
    assert_eq!(resolved.source, ScheduleSource::RecurringRule);
    // 2024-03-17 is in week 11.
    let resolved = resolve_default_status("alice", d("2024-03-17"), &rules);
    assert_eq!(resolved.source, ScheduleSource::WeekendDefault);
}

/// A rule ending on D does not apply after D.
#[test]
fn rule_window_end_is_inclusive() {
    let rules = vec![RecurrenceRule::weekly("alice", &[1, 2, 3, 4, 5], ShiftStatus::Vacation)
        .with_window(None, Some(d("2024-03-13")))];

    let last_day = resolve_default_status("alice", d("2024-03-13"), &rules);
    assert_eq!(last_day.status, ShiftStatus::Vacation);

    for date in ["2024-03-14", "2024-03-15", "2024-03-18", "2025-01-06"] {
        let resolved = resolve_default_status("alice", d(date), &rules);
        assert_eq!(resolved.source, ScheduleSource::WeekdayDefault, "rule leaked onto {date}");
    }
}

#[test]
fn rule_window_start_is_inclusive() {
    let rules = vec![RecurrenceRule::weekly("alice", &[2], ShiftStatus::Off)
        .with_window(Some(d("2024-03-12")), None)];

    assert_eq!(resolve_default_status("alice", d("2024-03-05"), &rules).status, ShiftStatus::On);
    assert_eq!(resolve_default_status("alice", d("2024-03-12"), &rules).status, ShiftStatus::Off);
}

/// Overlapping rules resolve by stored order.
#[test]
fn first_matching_rule_wins() {
    let rules = vec![
        RecurrenceRule::weekly("alice", &[5], ShiftStatus::Sick),
        RecurrenceRule::weekly("alice", &[1, 2, 3, 4, 5], ShiftStatus::Off),
    ];
    assert_eq!(resolve_default_status("alice", d("2024-03-15"), &rules).status, ShiftStatus::Sick);
    assert_eq!(resolve_default_status("alice", d("2024-03-14"), &rules).status, ShiftStatus::Off);
}

/// A day-matching every-other rule in the wrong week does not stop the
/// scan; the next rule still gets a chance.
#[test]
fn skipped_alternating_rule_falls_through_to_next_rule() {
    let rules = vec![
        RecurrenceRule::every_other("alice", &[1], ShiftStatus::Off, 1),
        RecurrenceRule::weekly("alice", &[1], ShiftStatus::On).with_hours("noon-8"),
    ];
    // Week 10 (even): first rule skipped, second applies.
    let resolved = resolve_default_status("alice", d("2024-03-04"), &rules);
    assert_eq!(resolved.status, ShiftStatus::On);
    assert_eq!(resolved.hours, "noon-8");
    assert_eq!(resolved.source, ScheduleSource::RecurringRule);
}

#[test]
fn empty_days_never_match() {
    let rules = vec![RecurrenceRule::weekly("alice", &[], ShiftStatus::Off)];
    for date in ["2024-03-10", "2024-03-11", "2024-03-16"] {
        let resolved = resolve_default_status("alice", d(date), &rules);
        assert_ne!(resolved.source, ScheduleSource::RecurringRule, "empty rule matched {date}");
    }
}

#[test]
fn rules_of_other_people_are_ignored() {
    let rules = vec![RecurrenceRule::weekly("bob", &[1, 2, 3, 4, 5], ShiftStatus::Off)];
    let resolved = resolve_default_status("alice", d("2024-03-12"), &rules);
    assert_eq!(resolved.status, ShiftStatus::On);
    assert_eq!(resolved.source, ScheduleSource::WeekdayDefault);
}

/// A weekend rule turns a default-off Saturday on, with its custom hours.
#[test]
fn rule_can_schedule_a_weekend_shift() {
    let rules = vec![RecurrenceRule::weekly("alice", &[6], ShiftStatus::On).with_hours("8a-2p")];
    let resolved = resolve_default_status("alice", d("2024-03-16"), &rules);
    assert_eq!(resolved.status, ShiftStatus::On);
    assert_eq!(resolved.hours, "8a-2p");
    assert_eq!(resolved.source, ScheduleSource::RecurringRule);
}
