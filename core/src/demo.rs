//! Seeded demo organization for the runner and for smoke tests.
//!
//! Same seed and `DemoSpec` always produce the same org chart, rules,
//! overrides and planning inputs.

use crate::{
    calendar::{days_in_month, first_of_month},
    error::{DeskError, DeskResult},
    name_generator::NameGenerator,
    recurrence::{RecurrenceRule, ShiftStatus},
    rng::{DemoStream, RngBank},
    roster::{OrgChart, Person, Role, Zone},
    schedule::StaffOverride,
    staffing::MonthlyPlanningData,
    store::DeskStore,
    types::YearMonth,
};
use chrono::{Duration, NaiveDate};

#[derive(Debug, Clone, Copy)]
pub struct DemoSpec {
    pub month: YearMonth,
    pub zones: usize,
    pub members_per_zone: usize,
}

impl DemoSpec {
    pub fn new(month: YearMonth) -> Self {
        Self { month, zones: 3, members_per_zone: 5 }
    }
}

#[derive(Debug, Clone)]
pub struct DemoData {
    pub chart:     OrgChart,
    pub rules:     Vec<RecurrenceRule>,
    pub overrides: Vec<(NaiveDate, StaffOverride)>,
    pub planning:  MonthlyPlanningData,
}

pub fn generate(seed: u64, spec: DemoSpec) -> DeskResult<DemoData> {
    let first = first_of_month(spec.month)
        .ok_or_else(|| DeskError::InvalidDate(spec.month.key()))?;
    let month_len = i64::from(days_in_month(spec.month));
    let bank = RngBank::new(seed);
    let mut names = bank.stream(DemoStream::Names);
    let mut org = bank.stream(DemoStream::Org);

    let mut next_id = 0usize;
    let mut person = |role: Role, names: &mut crate::rng::DemoRng| {
        next_id += 1;
        Person::new(format!("p{next_id:03}"), NameGenerator::generate_full_name(names), role)
    };

    let mut chart = OrgChart::default();
    for z in 0..spec.zones {
        let mut lead = person(Role::MitLead, &mut names);
        lead.second_shift_lead = org.chance(0.2);
        let mut members = Vec::with_capacity(spec.members_per_zone);
        for _ in 0..spec.members_per_zone {
            let role = if org.chance(0.25) { Role::DemoTech } else { Role::MitTech };
            let mut member = person(role, &mut names);
            if org.chance(0.15) {
                member.in_training = true;
                let offset = org.next_u64_below(month_len as u64 + 14) as i64;
                member.training_end_date = first.checked_add_signed(Duration::days(offset));
            }
            if org.chance(0.05) {
                let offset = org.next_u64_below(month_len as u64) as i64;
                member.end_date = first.checked_add_signed(Duration::days(offset));
            }
            members.push(member);
        }
        chart.zones.push(Zone {
            name: NameGenerator::zone_name(z),
            lead: Some(lead),
            members,
        });
    }
    for role in [Role::Manager, Role::Supervisor, Role::Fleet, Role::FleetSafety, Role::Auditor] {
        chart.management.push(person(role, &mut names));
    }
    for _ in 0..2 {
        chart.warehouse.push(person(Role::Warehouse, &mut names));
    }

    let techs: Vec<&Person> = chart
        .zones
        .iter()
        .flat_map(|z| z.members.iter())
        .filter(|p| p.role == Role::MitTech)
        .collect();

    let mut rule_rng = bank.stream(DemoStream::Rules);
    let mut rules = Vec::new();
    for tech in &techs {
        if rule_rng.chance(0.4) {
            let anchor = 1 + rule_rng.next_u64_below(2) as u8;
            rules.push(
                RecurrenceRule::every_other(tech.id.clone(), &[6], ShiftStatus::On, anchor)
                    .with_hours("8a-2p"),
            );
        }
        if rule_rng.chance(0.3) {
            let day = 1 + rule_rng.next_u64_below(5) as u32;
            rules.push(RecurrenceRule::weekly(tech.id.clone(), &[day], ShiftStatus::Off));
        }
        if rule_rng.chance(0.1) {
            let start_offset = rule_rng.next_u64_below(month_len.max(1) as u64) as i64;
            let start = first.checked_add_signed(Duration::days(start_offset));
            let end = start.and_then(|s| s.checked_add_signed(Duration::days(4)));
            rules.push(
                RecurrenceRule::weekly(tech.id.clone(), &[1, 2, 3, 4, 5], ShiftStatus::Vacation)
                    .with_window(start, end),
            );
        }
    }

    let mut override_rng = bank.stream(DemoStream::Overrides);
    let mut overrides = Vec::new();
    for _ in 0..spec.zones {
        if let Some(tech) = override_rng.pick(&techs) {
            let offset = override_rng.next_u64_below(month_len.max(1) as u64) as i64;
            if let Some(date) = first.checked_add_signed(Duration::days(offset)) {
                overrides.push((date, StaffOverride::new(tech.id.clone(), ShiftStatus::Sick)));
            }
        }
    }

    let mut plan = bank.stream(DemoStream::Planning);
    let planning = MonthlyPlanningData {
        leads_target:              (plan.range_f64(600.0, 1400.0)).round(),
        leads_percent_goal:        plan.range_f64(0.8, 1.05),
        booking_rate:              plan.range_f64(0.4, 0.6),
        wtr_ins_closing_rate:      plan.range_f64(0.2, 0.35),
        wtr_cash_closing_rate:     plan.range_f64(0.05, 0.15),
        days_in_month:             month_len as f64,
        avg_days_onsite:           plan.range_f64(1.0, 3.0),
        hours_per_appointment:     plan.range_f64(2.0, 4.0),
        avg_drive_time:            plan.range_f64(0.5, 1.5),
        ot_hours_per_tech_per_day: plan.range_f64(0.0, 1.5),
        team_members_off_per_day:  plan.next_u64_below(3) as f64,
    };

    Ok(DemoData { chart, rules, overrides, planning })
}

/// Write the demo data into `store`, replacing the org chart and the
/// month's planning inputs. Rules and overrides are added.
pub fn install(store: &DeskStore, month: YearMonth, data: &DemoData) -> DeskResult<()> {
    store.save_org_chart(&data.chart)?;
    for rule in &data.rules {
        store.save_rule(rule)?;
    }
    for (date, entry) in &data.overrides {
        store.save_override(*date, entry.clone())?;
    }
    store.save_planning_inputs(month, &data.planning)?;
    log::info!(
        "Installed demo data for {month}: {} zones, {} rules, {} overrides",
        data.chart.zones.len(),
        data.rules.len(),
        data.overrides.len()
    );
    Ok(())
}
