//! Category model
//!
//! A category is a named, append-only ledger of signed entries. The balance
//! is always derived from the ledger, never stored.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::entry::LedgerEntry;
use super::money::Money;

/// Width of the title line in the formatted ledger dump
const TITLE_WIDTH: usize = 30;
/// Width of the description column in the formatted ledger dump
const DESCRIPTION_WIDTH: usize = 23;
/// Width of the amount column in the formatted ledger dump
const AMOUNT_WIDTH: usize = 7;
/// Longest name accepted by [`Category::validate`]
pub const MAX_NAME_LEN: usize = 50;

/// A budget category with its own ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category name (fixed at construction)
    name: String,

    /// Entries in insertion order
    #[serde(default)]
    ledger: Vec<LedgerEntry>,
}

impl Category {
    /// Create a new, empty category
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ledger: Vec::new(),
        }
    }

    /// The category name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All ledger entries, oldest first
    pub fn ledger(&self) -> &[LedgerEntry] {
        &self.ledger
    }

    /// Append a deposit to the ledger
    ///
    /// The amount is not validated: a negative deposit reduces the balance
    /// without going through [`Category::check_funds`].
    pub fn deposit(&mut self, amount: Money, description: impl Into<String>) {
        self.ledger.push(LedgerEntry::new(amount, description));
    }

    /// Withdraw from the ledger if funds allow
    ///
    /// Returns `false` and leaves the ledger untouched when `amount` exceeds
    /// the current balance.
    pub fn withdraw(&mut self, amount: Money, description: impl Into<String>) -> bool {
        if !self.check_funds(amount) {
            return false;
        }
        self.ledger.push(LedgerEntry::new(-amount, description));
        true
    }

    /// Current balance: the sum of every ledger amount
    pub fn get_balance(&self) -> Money {
        self.ledger.iter().map(|entry| entry.amount).sum()
    }

    /// Move `amount` from this category into `target`
    ///
    /// Records "Transfer to {target}" here and "Transfer from {self}" on the
    /// target. Returns `false` with neither ledger changed when funds are
    /// insufficient.
    pub fn transfer(&mut self, amount: Money, target: &mut Category) -> bool {
        if !self.check_funds(amount) {
            return false;
        }
        let withdrew = self.withdraw(amount, format!("Transfer to {}", target.name));
        debug_assert!(withdrew, "funds were checked before withdrawing");
        target.deposit(amount, format!("Transfer from {}", self.name));
        true
    }

    /// Whether `amount` can be taken out without the balance going negative
    pub fn check_funds(&self, amount: Money) -> bool {
        amount <= self.get_balance()
    }

    /// Total money out of this category, as a positive amount
    pub fn get_withdrawals(&self) -> Money {
        self.ledger
            .iter()
            .filter(|entry| entry.is_withdrawal())
            .map(|entry| -entry.amount)
            .sum()
    }

    /// Number of entries in the ledger
    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    /// Whether the ledger has no entries
    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    /// Validate the category name
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        let len = self.name.chars().count();
        if len > MAX_NAME_LEN {
            return Err(CategoryValidationError::NameTooLong(len));
        }

        Ok(())
    }
}

/// Formatted ledger dump
///
/// ```text
/// *************Food*************
/// initial deposit        1000.00
/// groceries               -10.15
/// Total: 989.85
/// ```
///
/// The title centers the name in 30 columns of `*` (the extra `*` goes on the
/// right), descriptions are cut to 23 characters, amounts are right-aligned
/// in 7 columns. There is no newline after the total line.
impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:*^width$}", self.name, width = TITLE_WIDTH)?;
        for entry in &self.ledger {
            let description: String = entry.description.chars().take(DESCRIPTION_WIDTH).collect();
            writeln!(
                f,
                "{:<dw$}{:>aw$}",
                description,
                entry.amount,
                dw = DESCRIPTION_WIDTH,
                aw = AMOUNT_WIDTH
            )?;
        }
        write!(f, "Total: {}", self.get_balance())
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(
                    f,
                    "Category name too long ({} chars, max {})",
                    len, MAX_NAME_LEN
                )
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}
