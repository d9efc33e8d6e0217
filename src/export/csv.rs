//! CSV Export functionality
//!
//! Exports every ledger entry of a budget to CSV, one row per entry.

use crate::error::{LedgerError, LedgerResult};
use crate::services::Budget;
use std::io::Write;

/// Export all ledger entries to CSV
///
/// Columns: `category,index,description,amount`, where `index` is the
/// entry's zero-based position in its category's ledger.
pub fn export_ledger_csv<W: Write>(budget: &Budget, writer: W) -> LedgerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["category", "index", "description", "amount"])?;

    for category in budget.categories() {
        for (index, entry) in category.ledger().iter().enumerate() {
            csv_writer.write_record([
                category.name().to_string(),
                index.to_string(),
                entry.description.clone(),
                entry.amount.to_string(),
            ])?;
        }
    }

    csv_writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(())
}
