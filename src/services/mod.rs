//! Service layer for spend-ledger
//!
//! Business logic that works across several categories at once.

pub mod budget;

pub use budget::{Budget, CategorySummary};
