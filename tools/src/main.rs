//! desk-runner: headless front end for the labor desk.
//!
//! Usage:
//!   desk-runner --month 2024-03 --db desk.db
//!   desk-runner --month 2024-03 --seed-demo 42
//!   desk-runner --db desk.db --ipc-mode

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use labor_desk_core::{
    calendar::parse_date,
    config::DeskConfig,
    demo::{self, DemoSpec},
    desk::StaffingDesk,
    recurrence::{RecurrenceRule, ShiftStatus},
    roster::OrgChart,
    schedule::StaffOverride,
    staffing::{MonthlyForecast, MonthlyPlanningData},
    store::DeskStore,
    types::YearMonth,
};
use serde_json::{json, Value};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetDay {
        date: String,
    },
    GetWeek {
        date: String,
    },
    GetMonth {
        month: String,
    },
    GetRoster,
    SaveOrgChart {
        chart: OrgChart,
    },
    SaveOverride {
        date: String,
        id: String,
        status: ShiftStatus,
        #[serde(default)]
        hours: String,
    },
    ClearOverride {
        date: String,
        id: String,
    },
    SaveNotes {
        date: String,
        notes: String,
    },
    GetRules,
    SaveRule {
        rule: RecurrenceRule,
    },
    DeleteRule {
        id: String,
    },
    SavePlanning {
        month: String,
        inputs: MonthlyPlanningData,
    },
    Forecast {
        month: String,
    },
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let db = string_arg(&args, "--db").unwrap_or(":memory:");
    let data_dir = string_arg(&args, "--data-dir").unwrap_or("./data");
    let seed_demo: Option<u64> = string_arg(&args, "--seed-demo").and_then(|s| s.parse().ok());
    let month = match string_arg(&args, "--month") {
        Some(m) => YearMonth::parse(m).ok_or_else(|| anyhow!("--month expects YYYY-MM, got {m}"))?,
        None => {
            let today = chrono::Local::now().date_naive();
            labor_desk_core::calendar::year_month_of(today)
        }
    };

    let config = match DeskConfig::load(data_dir) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("{e}; using built-in labor rates");
            DeskConfig::default_test()
        }
    };

    if !ipc_mode {
        println!("Labor Desk: desk-runner");
        println!("  month:     {month}");
        println!("  db:        {db}");
        println!("  data_dir:  {data_dir}");
        println!();
    }

    // For :memory: use a SQLite shared-memory URI so reopened
    // connections see the same database.
    let db_effective: String = if db == ":memory:" {
        format!("file:deskrun_{}?mode=memory&cache=shared", clock_secs())
    } else {
        db.to_string()
    };
    let store = DeskStore::open_with(&db_effective, &config.store)?;
    store.migrate()?;

    if let Some(seed) = seed_demo {
        let data = demo::generate(seed, DemoSpec::new(month))?;
        demo::install(&store, month, &data)?;
    }

    let desk = StaffingDesk::new(config, store);

    if ipc_mode {
        run_ipc_loop(&desk)?;
    } else {
        let forecast = desk.forecast_month(month)?;
        print_summary(&desk, &forecast)?;
    }

    Ok(())
}

fn run_ipc_loop(desk: &StaffingDesk) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                writeln!(stdout, "{}", json!({ "error": e.to_string() }))?;
                stdout.flush()?;
                continue;
            }
        };
        if matches!(cmd, IpcCommand::Quit) {
            break;
        }

        let reply = match handle_command(desk, cmd) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Command failed: {e}");
                json!({ "error": e.to_string() })
            }
        };
        writeln!(stdout, "{reply}")?;
        stdout.flush()?;
    }
    Ok(())
}

fn handle_command(desk: &StaffingDesk, cmd: IpcCommand) -> Result<Value> {
    let store = desk.source();
    let value = match cmd {
        IpcCommand::GetDay { date } => serde_json::to_value(desk.resolve_day(date_arg(&date)?)?)?,
        IpcCommand::GetWeek { date } => serde_json::to_value(desk.resolve_week(date_arg(&date)?)?)?,
        IpcCommand::GetMonth { month } => serde_json::to_value(desk.resolve_month(month_arg(&month)?)?)?,
        IpcCommand::GetRoster => serde_json::to_value(store.load_org_chart()?)?,
        IpcCommand::SaveOrgChart { chart } => {
            store.save_org_chart(&chart)?;
            json!({ "ok": true })
        }
        IpcCommand::SaveOverride { date, id, status, hours } => {
            let date = date_arg(&date)?;
            store.save_override(date, StaffOverride::new(id, status).with_hours(hours))?;
            serde_json::to_value(desk.resolve_day(date)?)?
        }
        IpcCommand::ClearOverride { date, id } => {
            let date = date_arg(&date)?;
            let removed = store.clear_override(date, &id)?;
            let day = desk.resolve_day(date)?;
            json!({ "removed": removed, "day": day })
        }
        IpcCommand::SaveNotes { date, notes } => {
            let date = date_arg(&date)?;
            store.save_day_notes(date, &notes)?;
            serde_json::to_value(desk.resolve_day(date)?)?
        }
        IpcCommand::GetRules => serde_json::to_value(store.load_rules()?)?,
        IpcCommand::SaveRule { rule } => {
            let id = store.save_rule(&rule)?;
            json!({ "id": id })
        }
        IpcCommand::DeleteRule { id } => {
            let removed = store.delete_rule(&id)?;
            json!({ "removed": removed })
        }
        IpcCommand::SavePlanning { month, inputs } => {
            let ym = month_arg(&month)?;
            store.save_planning_inputs(ym, &inputs)?;
            serde_json::to_value(desk.forecast_month(ym)?)?
        }
        IpcCommand::Forecast { month } => serde_json::to_value(desk.forecast_month(month_arg(&month)?)?)?,
        IpcCommand::Quit => Value::Null,
    };
    Ok(value)
}

fn print_summary(desk: &StaffingDesk, forecast: &MonthlyForecast) -> Result<()> {
    let p = &forecast.projection;
    let l = &forecast.labor;
    let roster = desk.source().load_roster()?;

    println!("=== STAFFING FORECAST {} ===", forecast.month);
    println!("  roster:          {}", roster.len());
    println!("  route runners:   {}", p.current_staffing_level);
    println!("  projected jobs:  {:.0}", p.projected_jobs);
    println!("  working days:    {}", p.working_days);
    println!("  hours/day:       {:.1}", p.hours_needed_per_day);
    println!("  techs needed:    {}", p.techs_needed);
    println!("  staffing need:   {}", p.staffing_need);
    println!("  delta:           {:+}", p.staffing_delta);

    println!();
    println!("=== LABOR COST ===");
    println!("  regular hours:   {:.0}", l.regular_hours);
    println!("  overtime hours:  {:.0}", l.overtime_hours);
    println!("  tech labor:      ${:.2}", l.tech_labor_cost);
    println!("  salaried:        ${:.2}", l.fixed_labor_cost);
    println!("  total:           ${:.2}", l.total_labor_spend);
    println!("  cost per job:    ${:.2}", l.cost_per_job);

    println!();
    println!("=== SHORT DAYS ===");
    let short: Vec<_> = forecast
        .daily
        .iter()
        .filter(|row| row.gap.map_or(false, |g| g < 0.0))
        .collect();
    if short.is_empty() {
        println!("  (every day covered)");
    } else {
        for row in short {
            println!(
                "  {} | routes {:>2} | on duty {:>2} | gap {:+}",
                row.date,
                row.routes_to_fill,
                row.on_duty.unwrap_or(0),
                row.gap.unwrap_or(0.0)
            );
        }
    }
    Ok(())
}

fn date_arg(s: &str) -> Result<NaiveDate> {
    parse_date(s).ok_or_else(|| anyhow!("expected YYYY-MM-DD, got {s}"))
}

fn month_arg(s: &str) -> Result<YearMonth> {
    YearMonth::parse(s).ok_or_else(|| anyhow!("expected YYYY-MM, got {s}"))
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn clock_secs() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
