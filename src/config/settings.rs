//! User settings for spend-ledger
//!
//! Preferences for logging, chart output and exports, stored as JSON.

use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::LevelFilter;

use super::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::export::ExportFormat;

/// User settings for spend-ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Log level used when neither `RUST_LOG` nor `--log-level` is given
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whether `ledger run` prints the spend chart after the ledgers
    #[serde(default = "default_show_chart")]
    pub show_chart: bool,

    /// Format used by `ledger export` when none is given
    #[serde(default)]
    pub default_export_format: ExportFormat,
}

fn default_schema_version() -> u32 {
    1
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_show_chart() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            log_level: default_log_level(),
            show_chart: default_show_chart(),
            default_export_format: ExportFormat::default(),
        }
    }
}

impl Settings {
    /// Parse the configured log level
    pub fn log_level_filter(&self) -> Result<LevelFilter, LedgerError> {
        self.log_level.parse().map_err(|_| {
            LedgerError::Config(format!("Invalid log level in settings: {}", self.log_level))
        })
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                LedgerError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                LedgerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            LedgerError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            LedgerError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
