//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Document store configuration.
    pub store: StoreConfig,
    /// Report and snapshot output configuration.
    #[serde(default)]
    pub reporting: ReportingConfig,
}

/// Document store configuration.
///
/// Both fields are required. The reconciliation is destructive, so the
/// operator must name the target database explicitly.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// MongoDB connection URL.
    pub url: String,
    /// Database holding the shop's ledger collections.
    pub database: String,
}

/// Output locations for audit reports and pre-flight snapshots.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportingConfig {
    /// Directory receiving `audit_report_*.json` artifacts.
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,
    /// Directory receiving `accounting_backup_*.json` artifacts.
    #[serde(default = "default_snapshots_dir")]
    pub snapshots_dir: PathBuf,
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_snapshots_dir() -> PathBuf {
    PathBuf::from("snapshots")
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            reports_dir: default_reports_dir(),
            snapshots_dir: default_snapshots_dir(),
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
            .add_source(config::Environment::with_prefix("AURUM").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
