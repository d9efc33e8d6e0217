//! Budget service
//!
//! Owns an ordered set of categories and routes ledger operations to them by
//! name. Funds rejections are passed through as `Ok(false)`; only lookup and
//! validation problems become errors.

use tracing::{debug, info};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, Money};
use crate::reports::SpendChart;

/// An ordered, in-memory collection of categories
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Budget {
    categories: Vec<Category>,
}

/// Per-category figures for summary tables
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub name: String,
    pub balance: Money,
    pub withdrawals: Money,
    /// Share of all withdrawals in the budget, 0-100
    pub share: f64,
}

impl Budget {
    /// Create an empty budget
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a budget from existing categories, keeping their order
    pub fn from_categories(categories: Vec<Category>) -> LedgerResult<Self> {
        let mut budget = Self::new();
        for category in categories {
            budget.insert(category)?;
        }
        Ok(budget)
    }

    /// Create a new, empty category at the end of the budget
    pub fn create_category(&mut self, name: &str) -> LedgerResult<&Category> {
        let index = self.insert(Category::new(name.trim()))?;
        info!(category = %self.categories[index].name(), "created category");
        Ok(&self.categories[index])
    }

    /// Find a category by name (case-insensitive, Unicode-aware)
    pub fn find(&self, name: &str) -> Option<&Category> {
        self.position(name).map(|i| &self.categories[i])
    }

    /// Get a category by name, failing if it does not exist
    pub fn get(&self, name: &str) -> LedgerResult<&Category> {
        self.find(name)
            .ok_or_else(|| LedgerError::category_not_found(name))
    }

    /// Get a mutable category by name, failing if it does not exist
    pub fn get_mut(&mut self, name: &str) -> LedgerResult<&mut Category> {
        let index = self.index_of(name)?;
        Ok(&mut self.categories[index])
    }

    /// All categories in creation order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the budget has no categories
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Deposit into a category
    ///
    /// Fails with a validation error if the balance would leave the i64 range.
    pub fn deposit(&mut self, name: &str, amount: Money, description: &str) -> LedgerResult<()> {
        let category = self.get_mut(name)?;
        if category.get_balance().checked_add(amount).is_none() {
            return Err(LedgerError::Validation(format!(
                "Deposit of {} would overflow the balance of '{}'",
                amount,
                category.name()
            )));
        }
        category.deposit(amount, description);
        debug!(category = %category.name(), %amount, "deposit recorded");
        Ok(())
    }

    /// Withdraw from a category
    ///
    /// Returns `Ok(false)` when the category lacks funds.
    pub fn withdraw(
        &mut self,
        name: &str,
        amount: Money,
        description: &str,
    ) -> LedgerResult<bool> {
        let category = self.get_mut(name)?;
        let applied = category.withdraw(amount, description);
        debug!(category = %category.name(), %amount, applied, "withdrawal attempted");
        Ok(applied)
    }

    /// Transfer between two distinct categories
    ///
    /// Returns `Ok(false)` when the source lacks funds.
    pub fn transfer(&mut self, from: &str, to: &str, amount: Money) -> LedgerResult<bool> {
        let source = self.index_of(from)?;
        let target = self.index_of(to)?;
        if source == target {
            return Err(LedgerError::Validation(format!(
                "Cannot transfer from '{}' to itself",
                self.categories[source].name()
            )));
        }

        let (source, target) = self.pair_mut(source, target);
        let applied = source.transfer(amount, target);
        debug!(
            from = %source.name(),
            to = %target.name(),
            %amount,
            applied,
            "transfer attempted"
        );
        Ok(applied)
    }

    /// Sum of every category balance
    pub fn total_balance(&self) -> Money {
        self.categories.iter().map(Category::get_balance).sum()
    }

    /// Spend chart over every category, in order
    pub fn spend_chart(&self) -> LedgerResult<SpendChart> {
        SpendChart::generate(&self.categories)
    }

    /// Spend chart over the named categories, in the order given
    pub fn spend_chart_for<S: AsRef<str>>(&self, names: &[S]) -> LedgerResult<SpendChart> {
        let selected = names
            .iter()
            .map(|name| self.get(name.as_ref()))
            .collect::<LedgerResult<Vec<_>>>()?;
        SpendChart::generate(selected)
    }

    /// Balance, withdrawals and withdrawal share for each category
    pub fn summary(&self) -> Vec<CategorySummary> {
        let total: Money = self.categories.iter().map(Category::get_withdrawals).sum();
        self.categories
            .iter()
            .map(|category| {
                let withdrawals = category.get_withdrawals();
                let share = if total.is_positive() {
                    withdrawals.cents() as f64 / total.cents() as f64 * 100.0
                } else {
                    0.0
                };
                CategorySummary {
                    name: category.name().to_string(),
                    balance: category.get_balance(),
                    withdrawals,
                    share,
                }
            })
            .collect()
    }

    fn insert(&mut self, category: Category) -> LedgerResult<usize> {
        category
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        if self.position(category.name()).is_some() {
            return Err(LedgerError::duplicate_category(category.name()));
        }

        self.categories.push(category);
        Ok(self.categories.len() - 1)
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim().to_lowercase();
        self.categories
            .iter()
            .position(|c| c.name().to_lowercase() == name)
    }

    fn index_of(&self, name: &str) -> LedgerResult<usize> {
        self.position(name)
            .ok_or_else(|| LedgerError::category_not_found(name))
    }

    /// Borrow two different categories mutably at once
    fn pair_mut(&mut self, a: usize, b: usize) -> (&mut Category, &mut Category) {
        debug_assert_ne!(a, b);
        if a < b {
            let (left, right) = self.categories.split_at_mut(b);
            (&mut left[a], &mut right[0])
        } else {
            let (left, right) = self.categories.split_at_mut(a);
            (&mut right[0], &mut left[b])
        }
    }
}
