//! Ledger entry model
//!
//! A single signed movement of money within one category.

use serde::{Deserialize, Serialize};

use super::money::Money;

/// One line of a category ledger
///
/// Positive amounts are deposits, negative amounts are withdrawals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Signed amount of the movement
    pub amount: Money,

    /// Free-form description (may be empty)
    #[serde(default)]
    pub description: String,
}

impl LedgerEntry {
    /// Create a new ledger entry
    pub fn new(amount: Money, description: impl Into<String>) -> Self {
        Self {
            amount,
            description: description.into(),
        }
    }

    /// Whether this entry moved money out of the category
    pub fn is_withdrawal(&self) -> bool {
        self.amount.is_negative()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_direction() {
        let deposit = LedgerEntry::new(Money::from_cents(100), "pay");
        let withdrawal = LedgerEntry::new(Money::from_cents(-100), "rent");
        let zero = LedgerEntry::new(Money::zero(), "");

        assert!(!deposit.is_withdrawal());
        assert!(withdrawal.is_withdrawal());
        assert!(!zero.is_withdrawal());
    }

    #[test]
    fn test_missing_description_defaults_to_empty() {
        let entry: LedgerEntry = serde_json::from_str(r#"{"amount": 250}"#).unwrap();
        assert_eq!(entry.amount.cents(), 250);
        assert_eq!(entry.description, "");
    }
}
