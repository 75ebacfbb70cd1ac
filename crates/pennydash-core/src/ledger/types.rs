use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum TransactionId {
    Number(i64),
    Text(String),
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Direction multiplier applied to a magnitude.
    pub const fn sign(self) -> f64 {
        match self {
            Self::Income => 1.0,
            Self::Expense => -1.0,
        }
    }
}

/// A normalized transaction. `amount` keeps the source sign; every
/// computation goes through [`Transaction::magnitude`].
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    pub date: Option<NaiveDate>,
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: Option<String>,
    pub description: Option<String>,
    pub card_id: Option<String>,
}

impl Transaction {
    pub fn magnitude(&self) -> f64 {
        self.amount.abs()
    }

    pub fn signed_magnitude(&self) -> f64 {
        self.kind.sign() * self.magnitude()
    }

    pub fn category_label(&self) -> &str {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(UNCATEGORIZED_LABEL)
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }
}
