//! Display formatting for terminal output
//!
//! Table rendering for budget summaries. Ledger dumps and the spend chart
//! format themselves (see `Category`'s `Display` impl and `SpendChart`).

pub mod summary;

pub use summary::format_summary_table;
