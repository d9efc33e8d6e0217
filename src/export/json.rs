//! JSON Export functionality
//!
//! Exports a budget snapshot to JSON format with schema versioning.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, Money};
use crate::services::Budget;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Budget snapshot export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// All categories with their ledgers, in budget order
    pub categories: Vec<Category>,

    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// Total number of categories
    pub category_count: usize,

    /// Total number of ledger entries
    pub entry_count: usize,

    /// Sum of all category balances
    pub total_balance: Money,

    /// Sum of all category withdrawals
    pub total_withdrawals: Money,
}

impl BudgetExport {
    /// Snapshot a budget
    pub fn from_budget(budget: &Budget) -> Self {
        let categories = budget.categories().to_vec();

        let metadata = ExportMetadata {
            category_count: categories.len(),
            entry_count: categories.iter().map(Category::len).sum(),
            total_balance: budget.total_balance(),
            total_withdrawals: categories.iter().map(Category::get_withdrawals).sum(),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            categories,
            metadata,
        }
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        if self.metadata.category_count != self.categories.len() {
            return Err(format!(
                "Category count mismatch: metadata says {}, found {}",
                self.metadata.category_count,
                self.categories.len()
            ));
        }

        Ok(())
    }

    /// Rebuild the budget the snapshot was taken from
    pub fn into_budget(self) -> LedgerResult<Budget> {
        Budget::from_categories(self.categories)
    }
}

/// Export a budget snapshot to JSON format
pub fn export_budget_json<W: Write>(budget: &Budget, writer: &mut W) -> LedgerResult<()> {
    let export = BudgetExport::from_budget(budget);
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(())
}

/// Import from a JSON export
pub fn import_from_json(json_str: &str) -> LedgerResult<BudgetExport> {
    let export: BudgetExport = serde_json::from_str(json_str)?;

    export.validate().map_err(LedgerError::Validation)?;

    Ok(export)
}
