use serde::Serialize;
use serde_json::Value;

use crate::ledger::date::parse_transaction_date;
use crate::ledger::normalize::{KindMatch, classify_kind, coerce_amount};
use crate::ledger::types::{Transaction, TransactionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    UnrecognizedType,
    NonNumericAmount,
    MalformedDate,
}

impl IssueCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnrecognizedType => "unrecognized_type",
            Self::NonNumericAmount => "non_numeric_amount",
            Self::MalformedDate => "malformed_date",
        }
    }
}

/// A record that was kept but needed a fallback during ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestIssue {
    pub row: usize,
    pub id: String,
    pub code: IssueCode,
    pub value: Option<String>,
}

/// Field values of one source record before normalization.
#[derive(Debug, Clone, Default)]
pub(crate) struct RawRecord {
    pub(crate) row: usize,
    pub(crate) id: Option<Value>,
    pub(crate) date: Option<Value>,
    pub(crate) kind: Option<Value>,
    pub(crate) amount: Option<Value>,
    pub(crate) category: Option<Value>,
    pub(crate) description: Option<Value>,
    pub(crate) card_id: Option<Value>,
}

pub(crate) fn ingest_records(records: Vec<RawRecord>) -> (Vec<Transaction>, Vec<IngestIssue>) {
    let mut transactions = Vec::with_capacity(records.len());
    let mut issues = Vec::new();

    for record in records {
        let id = transaction_id(record.id.as_ref(), record.row);
        let id_text = id.to_string();

        let kind_label = record.kind.as_ref().and_then(text_of).unwrap_or_default();
        let kind_match = classify_kind(&kind_label);
        if kind_match == KindMatch::Defaulted {
            tracing::warn!(
                row = record.row,
                id = %id_text,
                label = %kind_label,
                "unrecognized transaction type; counting it as an expense"
            );
            issues.push(issue(record.row, &id_text, IssueCode::UnrecognizedType, Some(kind_label)));
        }

        let amount = match record.amount.as_ref().and_then(coerce_amount) {
            Some(value) => value,
            None => {
                let raw = record.amount.as_ref().map(display_value);
                tracing::warn!(row = record.row, id = %id_text, "non-numeric amount; counting it as zero");
                issues.push(issue(record.row, &id_text, IssueCode::NonNumericAmount, raw));
                0.0
            }
        };

        let raw_date = record.date.as_ref().and_then(text_of);
        let date = raw_date.as_deref().and_then(parse_transaction_date);
        if date.is_none() {
            tracing::warn!(
                row = record.row,
                id = %id_text,
                "malformed date; excluding row from date-scoped views"
            );
            issues.push(issue(record.row, &id_text, IssueCode::MalformedDate, raw_date));
        }

        transactions.push(Transaction {
            id,
            date,
            kind: kind_match.kind(),
            amount,
            category: non_blank(record.category.as_ref()),
            description: non_blank(record.description.as_ref()),
            card_id: non_blank(record.card_id.as_ref()),
        });
    }

    (transactions, issues)
}

fn transaction_id(value: Option<&Value>, row: usize) -> TransactionId {
    match value {
        Some(Value::Number(number)) => match number.as_i64() {
            Some(integer) => TransactionId::Number(integer),
            None => TransactionId::Text(number.to_string()),
        },
        Some(Value::String(text)) if !text.trim().is_empty() => {
            TransactionId::Text(text.trim().to_string())
        }
        _ => TransactionId::Text(format!("row-{row}")),
    }
}

fn issue(row: usize, id: &str, code: IssueCode, value: Option<String>) -> IngestIssue {
    IngestIssue {
        row,
        id: id.to_string(),
        code,
        value,
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn non_blank(value: Option<&Value>) -> Option<String> {
    value
        .and_then(text_of)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::{IssueCode, RawRecord, ingest_records};
    use crate::ledger::types::{TransactionId, TransactionKind};

    fn record(row: usize) -> RawRecord {
        RawRecord {
            row,
            id: Some(json!(row)),
            date: Some(json!("2024-05-01")),
            kind: Some(json!("Income")),
            amount: Some(json!(10)),
            ..RawRecord::default()
        }
    }

    #[test]
    fn clean_record_has_no_issues() {
        let mut raw = record(1);
        raw.category = Some(json!(" Food "));
        raw.card_id = Some(json!(42));
        let (transactions, issues) = ingest_records(vec![raw]);
        assert!(issues.is_empty());
        assert_eq!(transactions.len(), 1);
        let transaction = &transactions[0];
        assert_eq!(transaction.id, TransactionId::Number(1));
        assert_eq!(transaction.kind, TransactionKind::Income);
        assert_eq!(transaction.date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(transaction.category.as_deref(), Some("Food"));
        assert_eq!(transaction.card_id.as_deref(), Some("42"));
    }

    #[test]
    fn bad_fields_are_kept_with_fallbacks_and_reported() {
        let raw = RawRecord {
            row: 3,
            id: None,
            date: Some(json!("not a date")),
            kind: Some(json!("Transfer")),
            amount: Some(json!("twelve")),
            ..RawRecord::default()
        };
        let (transactions, issues) = ingest_records(vec![raw]);
        assert_eq!(transactions.len(), 1);
        let transaction = &transactions[0];
        assert_eq!(transaction.id, TransactionId::Text("row-3".to_string()));
        assert_eq!(transaction.kind, TransactionKind::Expense);
        assert_eq!(transaction.amount, 0.0);
        assert_eq!(transaction.date, None);

        let codes = issues.iter().map(|issue| issue.code).collect::<Vec<_>>();
        assert_eq!(
            codes,
            vec![
                IssueCode::UnrecognizedType,
                IssueCode::NonNumericAmount,
                IssueCode::MalformedDate
            ]
        );
        assert_eq!(issues[0].value.as_deref(), Some("Transfer"));
        assert_eq!(issues[1].value.as_deref(), Some("twelve"));
    }

    #[test]
    fn missing_fields_are_reported() {
        let raw = RawRecord {
            row: 1,
            id: Some(json!("tx_1")),
            ..RawRecord::default()
        };
        let (_, issues) = ingest_records(vec![raw]);
        assert_eq!(issues.len(), 3);
        assert!(issues.iter().all(|issue| issue.id == "tx_1"));
    }
}
