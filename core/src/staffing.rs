//! Staffing calculator — monthly headcount projection and labor cost.
//!
//! Pure arithmetic. Missing or non-finite inputs count as zero and every
//! division is guarded, so a half-filled planning document yields a
//! (possibly all-zero) projection instead of an error.

use crate::{
    calendar::{month_dates, weekday_index, SATURDAY, SUNDAY},
    config::LaborRates,
    types::YearMonth,
};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

pub const STANDARD_SHIFT_HOURS: f64 = 8.0;
/// Used when a month has no working-day count.
pub const FALLBACK_WORKING_DAYS: f64 = 22.0;

// Job-volume weights for the daily forecast. Business policy, not derived.
pub const WEEKDAY_WEIGHT: f64 = 1.0;
pub const SATURDAY_WEIGHT: f64 = 0.5;
pub const SUNDAY_WEIGHT: f64 = 0.25;

/// Planning inputs for one month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthlyPlanningData {
    #[serde(deserialize_with = "lenient_f64")]
    pub leads_target:              f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub leads_percent_goal:        f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub booking_rate:              f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub wtr_ins_closing_rate:      f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub wtr_cash_closing_rate:     f64,
    /// Working days in the month; 0 means "use 22".
    #[serde(deserialize_with = "lenient_f64")]
    pub days_in_month:             f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub avg_days_onsite:           f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub hours_per_appointment:     f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub avg_drive_time:            f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub ot_hours_per_tech_per_day: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub team_members_off_per_day:  f64,
}

/// Reads a planning number from whatever the document holds. `null`,
/// blanks, non-numeric text and non-finite values all read as 0.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let number = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.map(finite).unwrap_or(0.0))
}

impl MonthlyPlanningData {
    /// Copy with every non-finite field replaced by zero.
    pub fn sanitized(&self) -> Self {
        Self {
            leads_target:              finite(self.leads_target),
            leads_percent_goal:        finite(self.leads_percent_goal),
            booking_rate:              finite(self.booking_rate),
            wtr_ins_closing_rate:      finite(self.wtr_ins_closing_rate),
            wtr_cash_closing_rate:     finite(self.wtr_cash_closing_rate),
            days_in_month:             finite(self.days_in_month),
            avg_days_onsite:           finite(self.avg_days_onsite),
            hours_per_appointment:     finite(self.hours_per_appointment),
            avg_drive_time:            finite(self.avg_drive_time),
            ot_hours_per_tech_per_day: finite(self.ot_hours_per_tech_per_day),
            team_members_off_per_day:  finite(self.team_members_off_per_day),
        }
    }

    pub fn working_days(&self) -> f64 {
        let days = finite(self.days_in_month);
        if days > 0.0 { days } else { FALLBACK_WORKING_DAYS }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffingProjection {
    pub actual_leads:           f64,
    pub sales_ops:              f64,
    pub projected_jobs:         f64,
    pub working_days:           f64,
    pub active_jobs_per_day:    f64,
    pub hours_needed_per_day:   f64,
    pub effective_work_hours:   f64,
    pub techs_needed:           f64,
    pub staffing_need:          f64,
    pub current_staffing_level: f64,
    /// Negative means understaffed.
    pub staffing_delta:         f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborCost {
    pub regular_hours:     f64,
    pub overtime_hours:    f64,
    pub tech_labor_cost:   f64,
    pub fixed_labor_cost:  f64,
    pub total_labor_spend: f64,
    pub cost_per_job:      f64,
}

/// One calendar day of the weighted forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecastRow {
    pub date:           NaiveDate,
    pub weight:         f64,
    pub projected_jobs: f64,
    pub hours_needed:   f64,
    pub routes_needed:  f64,
    /// Whole routes, `ceil(routes_needed)`.
    pub routes_to_fill: f64,
    /// Route runners resolved `on` that day, when a schedule was supplied.
    pub on_duty:        Option<usize>,
    /// `on_duty - routes_to_fill`.
    pub gap:            Option<f64>,
}

/// Derived outputs cached alongside the inputs for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedOutputs {
    pub projection:  StaffingProjection,
    pub labor:       LaborCost,
    pub computed_at: String,
}

/// The persisted per-month planning document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningDocument {
    #[serde(flatten)]
    pub inputs:  MonthlyPlanningData,
    #[serde(default)]
    pub derived: Option<DerivedOutputs>,
}

/// Everything the desk reports for a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyForecast {
    pub month:      YearMonth,
    pub inputs:     MonthlyPlanningData,
    pub projection: StaffingProjection,
    pub labor:      LaborCost,
    pub daily:      Vec<DailyForecastRow>,
}

/// Monthly forward projection of technician need against current
/// eligible headcount.
pub fn project_month(data: &MonthlyPlanningData, current_staffing_level: usize) -> StaffingProjection {
    let d = data.sanitized();

    let actual_leads = round_half_up(d.leads_percent_goal * d.leads_target);
    let sales_ops = round_half_up(actual_leads * d.booking_rate);
    let projected_jobs = round_half_up(
        sales_ops * d.wtr_ins_closing_rate + sales_ops * d.wtr_cash_closing_rate,
    );

    let working_days = d.working_days();
    let active_jobs_per_day = finite(projected_jobs / working_days) * d.avg_days_onsite;
    let hours_needed_per_day = active_jobs_per_day * d.hours_per_appointment;

    let effective_work_hours = (STANDARD_SHIFT_HOURS - d.avg_drive_time) + d.ot_hours_per_tech_per_day;
    let techs_needed = if effective_work_hours > 0.0 {
        finite((hours_needed_per_day / effective_work_hours).ceil())
    } else {
        0.0
    };

    let staffing_need = techs_needed + d.team_members_off_per_day;
    let current = current_staffing_level as f64;

    StaffingProjection {
        actual_leads,
        sales_ops,
        projected_jobs,
        working_days,
        active_jobs_per_day,
        hours_needed_per_day,
        effective_work_hours,
        techs_needed,
        staffing_need,
        current_staffing_level: current,
        staffing_delta: current - staffing_need,
    }
}

/// Technician labor for the projected need plus prorated salaried overhead.
pub fn labor_cost(
    projection: &StaffingProjection,
    data: &MonthlyPlanningData,
    rates: &LaborRates,
) -> LaborCost {
    let days = projection.working_days;
    let ot_per_day = finite(data.ot_hours_per_tech_per_day);

    let regular_hours = projection.techs_needed * STANDARD_SHIFT_HOURS * days;
    let overtime_hours = projection.techs_needed * ot_per_day * days;
    let tech_labor_cost = regular_hours * finite(rates.base_wage) + overtime_hours * finite(rates.ot_wage);
    let fixed_labor_cost = rates.monthly_salaried_cost();
    let total_labor_spend = tech_labor_cost + fixed_labor_cost;

    let cost_per_job = if projection.projected_jobs > 0.0 {
        total_labor_spend / projection.projected_jobs
    } else {
        0.0
    };

    LaborCost {
        regular_hours,
        overtime_hours,
        tech_labor_cost,
        fixed_labor_cost,
        total_labor_spend,
        cost_per_job: finite(cost_per_job),
    }
}

pub fn day_weight(date: NaiveDate) -> f64 {
    match weekday_index(date) {
        SATURDAY => SATURDAY_WEIGHT,
        SUNDAY => SUNDAY_WEIGHT,
        _ => WEEKDAY_WEIGHT,
    }
}

/// Spread the month's projected jobs over its calendar days by weight,
/// and size each day's routes from the weighted hours.
///
/// `on_duty` holds resolved route-runner counts per date; dates missing
/// from it get no gap.
pub fn daily_forecast(
    ym: YearMonth,
    projection: &StaffingProjection,
    on_duty: &HashMap<NaiveDate, usize>,
) -> Vec<DailyForecastRow> {
    let dates = month_dates(ym);
    let total_weight: f64 = dates.iter().map(|d| day_weight(*d)).sum();

    dates
        .into_iter()
        .map(|date| {
            let weight = day_weight(date);
            let projected_jobs = if total_weight > 0.0 {
                projection.projected_jobs * weight / total_weight
            } else {
                0.0
            };
            let hours_needed = projection.hours_needed_per_day * weight;
            let routes_needed = if projection.effective_work_hours > 0.0 {
                finite(hours_needed / projection.effective_work_hours)
            } else {
                0.0
            };
            let routes_to_fill = routes_needed.ceil();
            let on_duty = on_duty.get(&date).copied();

            DailyForecastRow {
                date,
                weight,
                projected_jobs,
                hours_needed,
                routes_needed,
                routes_to_fill,
                on_duty,
                gap: on_duty.map(|n| n as f64 - routes_to_fill),
            }
        })
        .collect()
}

/// Half-up rounding; halves go toward positive infinity.
/// Compares the fractional part directly, since `x + 0.5` can itself
/// round up (0.49999999999999994 + 0.5 == 1.0).
pub fn round_half_up(x: f64) -> f64 {
    let x = finite(x);
    let floor = x.floor();
    if x - floor >= 0.5 { floor + 1.0 } else { floor }
}

fn finite(x: f64) -> f64 {
    if x.is_finite() { x } else { 0.0 }
}
