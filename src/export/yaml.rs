//! YAML Export functionality
//!
//! Exports a budget snapshot to YAML format for human-readable backup.

use crate::error::{LedgerError, LedgerResult};
use crate::export::json::BudgetExport;
use crate::services::Budget;
use std::io::Write;

/// Export a budget snapshot to YAML format
pub fn export_budget_yaml<W: Write>(budget: &Budget, writer: &mut W) -> LedgerResult<()> {
    let export = BudgetExport::from_budget(budget);

    writeln!(writer, "# spend-ledger budget export")
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer, "# App Version: {}", export.app_version)
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}

/// Import from a YAML export
pub fn import_from_yaml(yaml_str: &str) -> LedgerResult<BudgetExport> {
    let export: BudgetExport = serde_yaml::from_str(yaml_str)?;

    export.validate().map_err(LedgerError::Validation)?;

    Ok(export)
}
