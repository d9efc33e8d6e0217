//! spend-ledger - Category ledgers and a terminal spend chart
//!
//! This library models budget categories as append-only ledgers with
//! deposit, withdraw and transfer operations, and renders each category's
//! share of total withdrawals as a text bar chart.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Money, ledger entries and categories
//! - `reports`: The spend chart
//! - `services`: The budget, a named collection of categories
//! - `session`: Replayable scripts of ledger operations
//! - `export`: CSV, JSON and YAML export
//! - `display`: Terminal tables
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust
//! use spend_ledger::models::{Category, Money};
//! use spend_ledger::reports::create_spend_chart;
//!
//! let mut food = Category::new("Food");
//! let mut clothing = Category::new("Clothing");
//!
//! food.deposit(Money::from_cents(90000), "deposit");
//! assert!(food.withdraw(Money::from_cents(10555), "groceries"));
//! assert!(food.transfer(Money::from_cents(5000), &mut clothing));
//! assert!(!clothing.withdraw(Money::from_cents(5001), "too much"));
//!
//! assert_eq!(food.get_balance().to_string(), "744.45");
//! let chart = create_spend_chart([&food, &clothing])?;
//! assert!(chart.starts_with("Percentage spent by category"));
//! # Ok::<(), spend_ledger::LedgerError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod session;

pub use error::{LedgerError, LedgerResult};
pub use models::{Category, LedgerEntry, Money};
pub use reports::create_spend_chart;
