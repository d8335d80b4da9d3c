//! Application configuration management.

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Ledger policy configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Demo/bootstrap configuration.
    #[serde(default)]
    pub demo: DemoConfig,
}

/// Ledger policy configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Whether closing a period with no journal entries is rejected.
    #[serde(default)]
    pub require_entries_on_close: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            require_entries_on_close: false,
        }
    }
}

/// Bootstrap values used by the demo binary.
#[derive(Debug, Clone, Deserialize)]
pub struct DemoConfig {
    /// First day of the demo fiscal year.
    #[serde(default = "default_fiscal_year_start")]
    pub fiscal_year_start: NaiveDate,
    /// Opening cash balance seeded against owner's equity.
    #[serde(default = "default_opening_cash")]
    pub opening_cash: Decimal,
}

fn default_fiscal_year_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(Utc::now().year(), 1, 1).expect("valid year start")
}

fn default_opening_cash() -> Decimal {
    Decimal::new(25_000_00, 2)
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            fiscal_year_start: default_fiscal_year_start(),
            opening_cash: default_opening_cash(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PRINTFARM").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
