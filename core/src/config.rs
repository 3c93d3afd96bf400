use serde::{Deserialize, Serialize};
use std::path::Path;

/// A salaried position whose annual wage is prorated into every month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalariedPosition {
    pub title: String,
    pub annual_wage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborRates {
    /// Hourly wage for regular technician hours.
    pub base_wage: f64,
    /// Hourly wage for overtime hours.
    pub ot_wage: f64,
    /// Fixed supervisory roster.
    #[serde(default)]
    pub salaried_roster: Vec<SalariedPosition>,
}

impl LaborRates {
    /// Sum of annual salaries / 12.
    pub fn monthly_salaried_cost(&self) -> f64 {
        self.salaried_roster
            .iter()
            .map(|p| if p.annual_wage.is_finite() { p.annual_wage / 12.0 } else { 0.0 })
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    /// SQLite journal mode for file-backed stores.
    #[serde(default = "default_journal_mode")]
    pub journal_mode: String,
}

fn default_journal_mode() -> String {
    "WAL".into()
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self { journal_mode: default_journal_mode() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeskConfig {
    pub labor: LaborRates,
    pub store: StoreSettings,
}

impl DeskConfig {
    /// Load from `{data_dir}/labor/labor_rates.json` and, when present,
    /// `{data_dir}/store/store.json`.
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let labor_path = format!("{data_dir}/labor/labor_rates.json");
        let labor_content = std::fs::read_to_string(&labor_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {labor_path}: {e}"))?;
        let labor: LaborRates = serde_json::from_str(&labor_content)
            .map_err(|e| anyhow::anyhow!("Invalid {labor_path}: {e}"))?;

        let store_path = format!("{data_dir}/store/store.json");
        let store = if Path::new(&store_path).exists() {
            let content = std::fs::read_to_string(&store_path)
                .map_err(|e| anyhow::anyhow!("Cannot read {store_path}: {e}"))?;
            serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Invalid {store_path}: {e}"))?
        } else {
            StoreSettings::default()
        };

        log::debug!(
            "Loaded config from {data_dir}: {} salaried positions",
            labor.salaried_roster.len()
        );
        Ok(Self { labor, store })
    }

    /// Built-in rates for tests and for running without a data directory.
    pub fn default_test() -> Self {
        Self {
            labor: LaborRates {
                base_wage: 20.0,
                ot_wage: 30.0,
                salaried_roster: vec![
                    SalariedPosition { title: "Operations Manager".into(), annual_wage: 72_000.0 },
                    SalariedPosition { title: "Field Supervisor".into(),   annual_wage: 60_000.0 },
                    SalariedPosition { title: "Fleet Safety Lead".into(),  annual_wage: 48_000.0 },
                ],
            },
            store: StoreSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("labor-desk-{tag}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(dir.join("labor")).expect("create scratch dir");
        dir
    }

    #[test]
    fn loads_labor_rates_and_defaults_store_settings() {
        let dir = scratch_dir("load");
        std::fs::write(
            dir.join("labor/labor_rates.json"),
            r#"{ "baseWage": 21.5, "otWage": 32.25,
                 "salariedRoster": [ { "title": "Manager", "annualWage": 60000 } ] }"#,
        )
        .expect("write rates");

        let config = DeskConfig::load(dir.to_str().expect("utf-8 path")).expect("load config");
        assert_eq!(config.labor.base_wage, 21.5);
        assert_eq!(config.labor.salaried_roster.len(), 1);
        assert_eq!(config.labor.monthly_salaried_cost(), 5_000.0);
        assert_eq!(config.store.journal_mode, "WAL");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_rates_file_is_an_error() {
        let dir = scratch_dir("missing");
        let err = DeskConfig::load(dir.to_str().expect("utf-8 path")).unwrap_err();
        assert!(err.to_string().contains("labor_rates.json"), "got {err}");
        let _ = std::fs::remove_dir_all(&dir);
    }
}
