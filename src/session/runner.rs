//! Session runner
//!
//! Replays a [`SessionScript`] against a fresh [`Budget`]. Rejected
//! withdrawals and transfers are recorded in the [`RunReport`] and the run
//! continues, unless strict mode is on.

use tracing::{debug, warn};

use super::script::{Operation, SessionScript};
use crate::error::{LedgerError, LedgerResult};
use crate::reports::SpendChart;
use crate::services::Budget;

/// Options controlling a session run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Abort on the first operation rejected for insufficient funds
    pub strict: bool,
}

/// What happened to one operation
#[derive(Debug, Clone, PartialEq)]
pub struct OperationOutcome {
    /// Zero-based position in the script
    pub index: usize,
    pub operation: Operation,
    /// False when the operation was rejected for insufficient funds
    pub applied: bool,
}

/// Outcomes of every operation in a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub outcomes: Vec<OperationOutcome>,
}

impl RunReport {
    /// Operations that were rejected
    pub fn rejected(&self) -> impl Iterator<Item = &OperationOutcome> {
        self.outcomes.iter().filter(|o| !o.applied)
    }

    /// Number of operations applied
    pub fn applied_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.applied).count()
    }

    /// Number of operations rejected
    pub fn rejected_count(&self) -> usize {
        self.rejected().count()
    }
}

/// The result of replaying a script
#[derive(Debug, Clone)]
pub struct Session {
    pub budget: Budget,
    pub report: RunReport,
    chart: Option<Vec<String>>,
}

impl Session {
    /// Spend chart over the script's chart list, or every category
    pub fn spend_chart(&self) -> LedgerResult<SpendChart> {
        match &self.chart {
            Some(names) => self.budget.spend_chart_for(names.as_slice()),
            None => self.budget.spend_chart(),
        }
    }
}

/// Replays session scripts
#[derive(Debug, Clone, Default)]
pub struct SessionRunner {
    options: RunOptions,
}

impl SessionRunner {
    /// Create a runner with the given options
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }

    /// Create every category, then apply every operation in order
    pub fn run(&self, script: &SessionScript) -> LedgerResult<Session> {
        let mut budget = Budget::new();
        for name in &script.categories {
            budget.create_category(name)?;
        }

        let mut report = RunReport::default();
        for (index, operation) in script.operations.iter().enumerate() {
            let applied = apply(&mut budget, operation)?;

            if applied {
                debug!(index, %operation, "operation applied");
            } else {
                warn!(index, %operation, "operation rejected: insufficient funds");
                if self.options.strict {
                    let category = budget.get(operation.category())?;
                    return Err(LedgerError::InsufficientFunds {
                        category: category.name().to_string(),
                        needed: operation.amount(),
                        available: category.get_balance(),
                    });
                }
            }

            report.outcomes.push(OperationOutcome {
                index,
                operation: operation.clone(),
                applied,
            });
        }

        Ok(Session {
            budget,
            report,
            chart: script.chart.clone(),
        })
    }
}

fn apply(budget: &mut Budget, operation: &Operation) -> LedgerResult<bool> {
    match operation {
        Operation::Deposit {
            category,
            amount,
            description,
        } => budget.deposit(category, *amount, description).map(|_| true),
        Operation::Withdraw {
            category,
            amount,
            description,
        } => budget.withdraw(category, *amount, description),
        Operation::Transfer { from, to, amount } => budget.transfer(from, to, *amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    const SCRIPT: &str = r#"
categories: [Food, Clothing]
operations:
  - deposit: { category: Food, amount: 100, description: deposit }
  - withdraw: { category: Food, amount: 30, description: groceries }
  - withdraw: { category: Food, amount: 500, description: feast }
  - transfer: { from: Food, to: Clothing, amount: 20 }
  - transfer: { from: Clothing, to: Food, amount: 999 }
"#;

    fn script() -> SessionScript {
        SessionScript::from_yaml_str(SCRIPT).unwrap()
    }

    #[test]
    fn test_run_records_outcomes() {
        let session = SessionRunner::default().run(&script()).unwrap();

        assert_eq!(session.report.outcomes.len(), 5);
        assert_eq!(session.report.applied_count(), 3);
        assert_eq!(session.report.rejected_count(), 2);

        let rejected: Vec<usize> = session.report.rejected().map(|o| o.index).collect();
        assert_eq!(rejected, vec![2, 4]);

        let food = session.budget.get("Food").unwrap();
        assert_eq!(food.get_balance(), Money::from_cents(5000));
        assert_eq!(food.get_withdrawals(), Money::from_cents(5000));
        let clothing = session.budget.get("Clothing").unwrap();
        assert_eq!(clothing.get_balance(), Money::from_cents(2000));
    }

    #[test]
    fn test_strict_run_stops_on_rejection() {
        let runner = SessionRunner::new(RunOptions { strict: true });
        let err = runner.run(&script()).unwrap_err();

        match err {
            LedgerError::InsufficientFunds {
                category,
                needed,
                available,
            } => {
                assert_eq!(category, "Food");
                assert_eq!(needed, Money::from_cents(50000));
                assert_eq!(available, Money::from_cents(7000));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_strict_transfer_rejection_names_the_source() {
        let script = SessionScript::from_yaml_str(
            r#"
categories: [Food, Clothing]
operations:
  - deposit: { category: Food, amount: 10 }
  - transfer: { from: Clothing, to: Food, amount: 4.5 }
"#,
        )
        .unwrap();
        let err = SessionRunner::new(RunOptions { strict: true })
            .run(&script)
            .unwrap_err();

        match err {
            LedgerError::InsufficientFunds {
                category,
                needed,
                available,
            } => {
                assert_eq!(category, "Clothing");
                assert_eq!(needed, Money::from_cents(450));
                assert_eq!(available, Money::zero());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_huge_deposits_fail_without_panicking() {
        let json = r#"{
            "categories": ["Food"],
            "operations": [
                {"deposit": {"category": "Food", "amount": 90000000000000000}},
                {"deposit": {"category": "Food", "amount": 90000000000000000}},
                {"withdraw": {"category": "Food", "amount": 1}}
            ]
        }"#;
        let err = SessionScript::from_json_str(json).unwrap_err();
        assert!(matches!(err, LedgerError::Script(_)));
    }

    #[test]
    fn test_large_deposits_within_limit_still_balance() {
        let json = r#"{
            "categories": ["Food"],
            "operations": [
                {"deposit": {"category": "Food", "amount": 1000000000000}},
                {"deposit": {"category": "Food", "amount": 1000000000000}},
                {"withdraw": {"category": "Food", "amount": 1}}
            ]
        }"#;
        let script = SessionScript::from_json_str(json).unwrap();
        let session = SessionRunner::default().run(&script).unwrap();
        assert_eq!(session.report.applied_count(), 3);
        assert_eq!(
            session.budget.get("Food").unwrap().get_balance(),
            Money::from_cents(199_999_999_999_900)
        );
    }

    #[test]
    fn test_unknown_category_fails_the_run() {
        let script = SessionScript::from_yaml_str(
            "categories: [Food]\noperations:\n  - deposit: { category: Rent, amount: 1 }\n",
        )
        .unwrap();
        let err = SessionRunner::default().run(&script).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_duplicate_category_fails_the_run() {
        let script = SessionScript::from_yaml_str("categories: [Food, food]\n").unwrap();
        assert!(matches!(
            SessionRunner::default().run(&script),
            Err(LedgerError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_chart_list_selects_columns() {
        let mut script = script();
        script.chart = Some(vec!["Clothing".into()]);
        let session = SessionRunner::default().run(&script).unwrap();

        let chart = session.spend_chart().unwrap();
        assert_eq!(chart.columns.len(), 1);
        assert_eq!(chart.columns[0].name, "Clothing");
    }

    #[test]
    fn test_chart_defaults_to_all_categories() {
        let session = SessionRunner::default().run(&script()).unwrap();
        let chart = session.spend_chart().unwrap();
        assert_eq!(chart.columns.len(), 2);
        assert_eq!(chart.columns[0].bucket, 100);
        assert_eq!(chart.columns[1].bucket, 0);
    }
}
