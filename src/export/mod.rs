//! Export module for spend-ledger
//!
//! Provides budget export functionality in multiple formats:
//! - CSV: One row per ledger entry (spreadsheet-compatible)
//! - JSON: Machine-readable budget snapshot
//! - YAML: Human-readable budget snapshot

pub mod csv;
pub mod json;
pub mod yaml;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

use crate::error::LedgerResult;
use crate::services::Budget;

pub use self::csv::export_ledger_csv;
pub use json::{export_budget_json, import_from_json, BudgetExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_budget_yaml, import_from_yaml};

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Ledger entries as CSV
    #[default]
    Csv,
    /// Budget snapshot as JSON
    Json,
    /// Budget snapshot as YAML
    Yaml,
}

impl ExportFormat {
    /// Conventional file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Export a budget in the given format
pub fn export_budget<W: Write>(
    budget: &Budget,
    format: ExportFormat,
    writer: &mut W,
) -> LedgerResult<()> {
    match format {
        ExportFormat::Csv => export_ledger_csv(budget, writer),
        ExportFormat::Json => export_budget_json(budget, writer),
        ExportFormat::Yaml => export_budget_yaml(budget, writer),
    }
}
