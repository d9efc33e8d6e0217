//! Session scripts
//!
//! A session is a script of category names and ledger operations that is
//! replayed into a fresh budget, used by the `ledger` binary.

pub mod runner;
pub mod script;

pub use runner::{OperationOutcome, RunOptions, RunReport, Session, SessionRunner};
pub use script::{Operation, SessionScript};
