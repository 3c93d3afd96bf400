//! The staffing desk — wires the sources to the pure core.
//!
//! FLOW (per call):
//!   1. Fetch a snapshot from the sources (roster, rules, overrides, planning)
//!   2. Hand the snapshot to the pure core (resolver, aggregator, calculator)
//!   3. Cache derived planning outputs back to the source for display
//!
//! RULES:
//!   - The desk never holds rules or overrides between calls; every call
//!     reads a fresh snapshot.
//!   - The core never sees a source, only plain data.

use crate::{
    calendar::{date_range, last_day_of_month, weekday_index, year_month_of},
    config::DeskConfig,
    error::{DeskError, DeskResult},
    roster::eligible_headcount,
    schedule::{get_resolved_schedule_for_day, on_duty_route_runners, resolve_month, resolve_range, ResolvedSchedule},
    source::{OverrideSource, PlanningSource, RosterSource, RuleSource},
    staffing::{daily_forecast, labor_cost, project_month, DerivedOutputs, MonthlyForecast},
    store::DeskStore,
    types::YearMonth,
};
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;

pub struct StaffingDesk<S = DeskStore> {
    config: DeskConfig,
    source: S,
}

impl<S> StaffingDesk<S>
where
    S: RosterSource + RuleSource + OverrideSource + PlanningSource,
{
    pub fn new(config: DeskConfig, source: S) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &DeskConfig {
        &self.config
    }

    /// The underlying source, for writes.
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn resolve_day(&self, date: NaiveDate) -> DeskResult<ResolvedSchedule> {
        let roster = self.source.roster()?;
        let rules = self.source.all_rules()?;
        let overrides = self.source.overrides_for_month(year_month_of(date))?;
        Ok(get_resolved_schedule_for_day(date, &overrides, &roster, &rules))
    }

    pub fn resolve_month(&self, ym: YearMonth) -> DeskResult<Vec<ResolvedSchedule>> {
        let roster = self.source.roster()?;
        let rules = self.source.all_rules()?;
        let overrides = self.source.overrides_for_month(ym)?;
        let days = resolve_month(ym, &overrides, &roster, &rules);
        log::debug!("Resolved {} days of {ym} for {} people", days.len(), roster.len());
        Ok(days)
    }

    /// The Sunday-to-Saturday week containing `date`.
    pub fn resolve_week(&self, date: NaiveDate) -> DeskResult<Vec<ResolvedSchedule>> {
        let start = date
            .checked_sub_signed(Duration::days(i64::from(weekday_index(date))))
            .ok_or_else(|| DeskError::InvalidDate(date.to_string()))?;
        let end = start
            .checked_add_signed(Duration::days(6))
            .ok_or_else(|| DeskError::InvalidDate(date.to_string()))?;

        let roster = self.source.roster()?;
        let rules = self.source.all_rules()?;
        let mut overrides = HashMap::new();
        for day in date_range(start, end) {
            let ym = year_month_of(day);
            if !overrides.contains_key(&ym) {
                overrides.insert(ym, self.source.overrides_for_month(ym)?);
            }
        }
        Ok(resolve_range(start, end, &overrides, &roster, &rules))
    }

    /// Eligible route runners as of the month's last day.
    pub fn eligible_headcount(&self, ym: YearMonth) -> DeskResult<usize> {
        let reference = last_day_of_month(ym)
            .ok_or_else(|| DeskError::InvalidDate(ym.key()))?;
        Ok(eligible_headcount(&self.source.roster()?, reference))
    }

    /// Project the month from its planning inputs, compare against the
    /// resolved schedules, and cache the derived outputs.
    /// A month with no planning document projects from all-zero inputs.
    pub fn forecast_month(&self, ym: YearMonth) -> DeskResult<MonthlyForecast> {
        let reference = last_day_of_month(ym)
            .ok_or_else(|| DeskError::InvalidDate(ym.key()))?;
        let inputs = self
            .source
            .planning_for_month(ym)?
            .map(|doc| doc.inputs)
            .unwrap_or_default();

        let roster = self.source.roster()?;
        let rules = self.source.all_rules()?;
        let overrides = self.source.overrides_for_month(ym)?;

        let headcount = eligible_headcount(&roster, reference);
        let projection = project_month(&inputs, headcount);
        let labor = labor_cost(&projection, &inputs, &self.config.labor);

        let on_duty: HashMap<NaiveDate, usize> = resolve_month(ym, &overrides, &roster, &rules)
            .iter()
            .map(|day| (day.date, on_duty_route_runners(day, &roster)))
            .collect();
        let daily = daily_forecast(ym, &projection, &on_duty);

        self.source.cache_outputs(
            ym,
            &DerivedOutputs {
                projection: projection.clone(),
                labor: labor.clone(),
                computed_at: chrono::Utc::now().to_rfc3339(),
            },
        )?;

        if projection.staffing_delta < 0.0 {
            log::warn!(
                "{ym} understaffed: need {} have {} (delta {:+})",
                projection.staffing_need, headcount, projection.staffing_delta
            );
        } else {
            log::info!(
                "{ym} forecast: {} jobs, {} techs needed, delta {:+}",
                projection.projected_jobs, projection.techs_needed, projection.staffing_delta
            );
        }

        Ok(MonthlyForecast {
            month: ym,
            inputs,
            projection,
            labor,
            daily,
        })
    }
}
