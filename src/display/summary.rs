//! Budget summary table
//!
//! Renders per-category balances and withdrawal shares as a terminal table.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::services::CategorySummary;

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Withdrawals")]
    withdrawals: String,
    #[tabled(rename = "Share")]
    share: String,
}

impl From<&CategorySummary> for SummaryRow {
    fn from(summary: &CategorySummary) -> Self {
        Self {
            name: summary.name.clone(),
            balance: summary.balance.to_string(),
            withdrawals: summary.withdrawals.to_string(),
            share: format!("{:.1}%", summary.share),
        }
    }
}

/// Format category summaries as a table
pub fn format_summary_table(summaries: &[CategorySummary]) -> String {
    if summaries.is_empty() {
        return "No categories found.".to_string();
    }

    let rows: Vec<SummaryRow> = summaries.iter().map(SummaryRow::from).collect();
    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()));
    table.to_string()
}
