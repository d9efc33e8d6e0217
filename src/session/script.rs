//! Session script format
//!
//! A session script lists the categories to create and the ledger operations
//! to replay against them:
//!
//! ```yaml
//! categories: [Food, Clothing, Auto]
//! operations:
//!   - deposit: { category: Food, amount: 1000, description: initial deposit }
//!   - withdraw: { category: Food, amount: 10.15, description: groceries }
//!   - transfer: { from: Food, to: Clothing, amount: 50 }
//! chart: [Food, Clothing]
//! ```
//!
//! Amounts may be integers (whole units), decimals, or strings such as
//! `"10.15"`. Scripts ending in `.json` are read as JSON, anything else as YAML.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Money;

/// A replayable ledger session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionScript {
    /// Categories to create, in chart order
    pub categories: Vec<String>,

    /// Operations to apply, in order
    ///
    /// Written as `- deposit: {...}` maps in YAML as well as JSON.
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub operations: Vec<Operation>,

    /// Categories to include in the spend chart (all when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<Vec<String>>,
}

/// A single ledger operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Deposit {
        category: String,
        #[serde(
            serialize_with = "serialize_amount",
            deserialize_with = "deserialize_amount"
        )]
        amount: Money,
        #[serde(default)]
        description: String,
    },
    Withdraw {
        category: String,
        #[serde(
            serialize_with = "serialize_amount",
            deserialize_with = "deserialize_amount"
        )]
        amount: Money,
        #[serde(default)]
        description: String,
    },
    Transfer {
        from: String,
        to: String,
        #[serde(
            serialize_with = "serialize_amount",
            deserialize_with = "deserialize_amount"
        )]
        amount: Money,
    },
}

impl Operation {
    /// The category money leaves (or enters, for deposits)
    pub fn category(&self) -> &str {
        match self {
            Self::Deposit { category, .. } | Self::Withdraw { category, .. } => category,
            Self::Transfer { from, .. } => from,
        }
    }

    /// The amount moved
    pub fn amount(&self) -> Money {
        match self {
            Self::Deposit { amount, .. }
            | Self::Withdraw { amount, .. }
            | Self::Transfer { amount, .. } => *amount,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit {
                category, amount, ..
            } => write!(f, "deposit {} into {}", amount, category),
            Self::Withdraw {
                category, amount, ..
            } => write!(f, "withdraw {} from {}", amount, category),
            Self::Transfer { from, to, amount } => {
                write!(f, "transfer {} from {} to {}", amount, from, to)
            }
        }
    }
}

impl SessionScript {
    /// Parse a script from YAML text
    pub fn from_yaml_str(text: &str) -> LedgerResult<Self> {
        serde_yaml::from_str(text).map_err(|e| LedgerError::Script(e.to_string()))
    }

    /// Parse a script from JSON text
    pub fn from_json_str(text: &str) -> LedgerResult<Self> {
        serde_json::from_str(text).map_err(|e| LedgerError::Script(e.to_string()))
    }

    /// Load a script from disk, picking the format from the file extension
    pub fn load(path: &Path) -> LedgerResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            LedgerError::Io(format!(
                "Failed to read script {}: {}",
                path.display(),
                e
            ))
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountInput {
    Whole(i64),
    Decimal(f64),
    Text(String),
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<Money, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = match AmountInput::deserialize(deserializer)? {
        AmountInput::Whole(units) => Money::from_units(units),
        AmountInput::Decimal(value) => Money::from_decimal(value),
        AmountInput::Text(text) => Money::parse(&text),
    };
    amount.map_err(|e| serde::de::Error::custom(format!("invalid amount: {}", e)))
}

fn serialize_amount<S>(amount: &Money, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SCRIPT: &str = r#"
categories: [Food, Clothing, Auto]
operations:
  - deposit: { category: Food, amount: 1000, description: initial deposit }
  - withdraw: { category: Food, amount: 10.15, description: groceries }
  - withdraw: { category: Food, amount: "15.89" }
  - transfer: { from: Food, to: Clothing, amount: 50 }
chart: [Food, Clothing]
"#;

    #[test]
    fn test_parse_yaml() {
        let script = SessionScript::from_yaml_str(SCRIPT).unwrap();
        assert_eq!(script.categories, vec!["Food", "Clothing", "Auto"]);
        assert_eq!(script.operations.len(), 4);
        assert_eq!(
            script.operations[0],
            Operation::Deposit {
                category: "Food".into(),
                amount: Money::from_cents(100000),
                description: "initial deposit".into(),
            }
        );
        assert_eq!(script.operations[1].amount(), Money::from_cents(1015));
        assert_eq!(script.operations[2].amount(), Money::from_cents(1589));
        assert_eq!(
            script.operations[2],
            Operation::Withdraw {
                category: "Food".into(),
                amount: Money::from_cents(1589),
                description: String::new(),
            }
        );
        assert_eq!(script.chart, Some(vec!["Food".into(), "Clothing".into()]));
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{
            "categories": ["Food"],
            "operations": [
                {"deposit": {"category": "Food", "amount": 900}},
                {"withdraw": {"category": "Food", "amount": 105.55, "description": "milk"}}
            ]
        }"#;
        let script = SessionScript::from_json_str(json).unwrap();
        assert_eq!(script.operations[1].amount(), Money::from_cents(10555));
        assert!(script.chart.is_none());
    }

    #[test]
    fn test_bad_amount_is_a_script_error() {
        let err = SessionScript::from_yaml_str(
            "categories: [Food]\noperations:\n  - deposit: { category: Food, amount: lots }\n",
        )
        .unwrap_err();
        assert!(matches!(&err, LedgerError::Script(msg) if msg.contains("invalid amount")));
    }

    #[test]
    fn test_oversized_amounts_are_rejected() {
        for amount in ["\"99999999999999999\"", "99999999999999999", "1e300"] {
            let json = format!(
                r#"{{"categories": ["Food"], "operations": [{{"deposit": {{"category": "Food", "amount": {}}}}}]}}"#,
                amount
            );
            let err = SessionScript::from_json_str(&json).unwrap_err();
            assert!(
                matches!(&err, LedgerError::Script(msg) if msg.contains("invalid amount")),
                "{amount}: {err}"
            );
        }
    }

    #[test]
    fn test_unknown_operation_is_a_script_error() {
        let err = SessionScript::from_yaml_str(
            "categories: [Food]\noperations:\n  - refund: { category: Food, amount: 1 }\n",
        )
        .unwrap_err();
        assert!(matches!(&err, LedgerError::Script(msg) if msg.contains("unknown variant")));
    }

    #[test]
    fn test_yaml_map_form_parses() {
        let script = SessionScript::from_yaml_str(
            "categories: [Food]\noperations:\n  - deposit: { category: Food, amount: 1 }\n",
        )
        .unwrap();
        assert_eq!(
            script.operations,
            vec![Operation::Deposit {
                category: "Food".into(),
                amount: Money::from_cents(100),
                description: String::new(),
            }]
        );
    }

    #[test]
    fn test_operation_display() {
        let op = Operation::Transfer {
            from: "Food".into(),
            to: "Auto".into(),
            amount: Money::from_cents(5000),
        };
        assert_eq!(op.to_string(), "transfer 50.00 from Food to Auto");
        assert_eq!(op.category(), "Food");
    }

    #[test]
    fn test_serialized_amounts_read_back() {
        let script = SessionScript::from_yaml_str(SCRIPT).unwrap();
        let yaml = serde_yaml::to_string(&script).unwrap();
        assert!(yaml.contains("- deposit:"));
        assert!(yaml.contains("10.15"));
        assert_eq!(SessionScript::from_yaml_str(&yaml).unwrap(), script);
    }

    #[test]
    fn test_load_picks_format_by_extension() {
        let temp_dir = TempDir::new().unwrap();

        let yaml_path = temp_dir.path().join("session.yaml");
        std::fs::write(&yaml_path, SCRIPT).unwrap();
        assert_eq!(SessionScript::load(&yaml_path).unwrap().operations.len(), 4);

        let json_path = temp_dir.path().join("session.JSON");
        std::fs::write(&json_path, r#"{"categories": ["Food"]}"#).unwrap();
        assert!(SessionScript::load(&json_path).unwrap().operations.is_empty());

        let missing = temp_dir.path().join("missing.yaml");
        assert!(matches!(
            SessionScript::load(&missing),
            Err(LedgerError::Io(_))
        ));
    }
}
