use serde_json::Value;

use crate::ledger::types::TransactionKind;

const INCOME_LABELS: [&str; 5] = ["income", "credit", "надходження", "дохід", "доходи"];

const EXPENSE_LABELS: [&str; 4] = ["expense", "debit", "витрата", "витрати"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindMatch {
    Recognized(TransactionKind),
    /// Label not in either vocabulary; treated as an expense.
    Defaulted,
}

impl KindMatch {
    pub fn kind(self) -> TransactionKind {
        match self {
            Self::Recognized(kind) => kind,
            Self::Defaulted => TransactionKind::Expense,
        }
    }
}

pub fn classify_kind(label: &str) -> KindMatch {
    let normalized = normalize_label(label);
    if INCOME_LABELS.contains(&normalized.as_str()) {
        return KindMatch::Recognized(TransactionKind::Income);
    }
    if EXPENSE_LABELS.contains(&normalized.as_str()) {
        return KindMatch::Recognized(TransactionKind::Expense);
    }
    KindMatch::Defaulted
}

/// Coerces an amount field to a finite number. `None` means the value was
/// present but not numeric; callers count it as zero.
pub fn coerce_amount(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_amount_text(text),
        _ => None,
    };
    parsed.filter(|amount| amount.is_finite())
}

pub fn parse_amount_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

fn normalize_label(value: &str) -> String {
    let mut output = String::new();
    let mut previous_space = false;
    for character in value.trim().chars() {
        if character.is_whitespace() {
            if !previous_space {
                output.push(' ');
                previous_space = true;
            }
        } else {
            output.extend(character.to_lowercase());
            previous_space = false;
        }
    }
    output
}
