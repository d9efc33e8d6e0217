//! Core data models for spend-ledger
//!
//! This module contains the data structures of the ledger domain: money
//! amounts, ledger entries, and the categories that own them.

pub mod category;
pub mod entry;
pub mod money;

pub use category::{Category, CategoryValidationError};
pub use entry::LedgerEntry;
pub use money::{Money, MoneyParseError};
