use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::ledger::normalize::coerce_amount;
use crate::source::ingest::{RawRecord, ingest_records};
use crate::source::{CardBalance, DashboardSnapshot, ServerTotals};
use crate::{CoreError, CoreResult};

const REQUIRED_CSV_FIELDS: [&str; 4] = ["id", "date", "type", "amount"];
const OPTIONAL_CSV_FIELDS: [&str; 3] = ["category", "description", "card_id"];

/// Parses a JSON transaction array, a dashboard JSON object or CSV.
pub fn parse_source(content: &str) -> CoreResult<DashboardSnapshot> {
    let trimmed = content.trim_start_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        return Err(CoreError::invalid_source("Source document is empty."));
    }

    if trimmed.starts_with('[') {
        let Value::Array(items) = parse_json(trimmed)? else {
            return Err(CoreError::invalid_source(
                "JSON input must be an array of transaction objects.",
            ));
        };
        return snapshot_from_records(
            records_from_json(&items)?,
            ServerTotals::default(),
            Vec::new(),
        );
    }

    if trimmed.starts_with('{') {
        let parsed = parse_json(trimmed)?;
        let Some(object) = parsed.as_object() else {
            return Err(CoreError::invalid_source("Dashboard JSON must be an object."));
        };
        return parse_dashboard_object(object);
    }

    if looks_like_csv(trimmed) {
        return snapshot_from_records(parse_csv(trimmed)?, ServerTotals::default(), Vec::new());
    }

    Err(CoreError::invalid_source_format(
        "Unsupported source format. Provide a JSON array, a dashboard JSON object, or CSV with headers.",
        "unknown",
    ))
}

fn parse_json(content: &str) -> CoreResult<Value> {
    serde_json::from_str::<Value>(content)
        .map_err(|error| CoreError::invalid_source(&format!("Invalid JSON input: {error}.")))
}

fn parse_dashboard_object(object: &Map<String, Value>) -> CoreResult<DashboardSnapshot> {
    let items = match object.get("transactions") {
        Some(Value::Array(items)) => items.as_slice(),
        Some(Value::Null) | None => &[],
        Some(_) => {
            return Err(CoreError::invalid_source(
                "Dashboard field `transactions` must be an array of transaction objects.",
            ));
        }
    };

    let server_totals = ServerTotals {
        total_balance: number_field(object, &["totalBalance", "total_balance"]),
        income: number_field(object, &["income"]),
        expense: number_field(object, &["expense"]),
        savings: number_field(object, &["savings"]),
        savings_percentage: number_field(object, &["savingsPercentage", "savings_percentage"]),
    };

    let cards = match object.get("cards") {
        Some(Value::Array(cards)) => cards.iter().filter_map(card_balance).collect(),
        _ => Vec::new(),
    };

    snapshot_from_records(records_from_json(items)?, server_totals, cards)
}

fn snapshot_from_records(
    records: Vec<RawRecord>,
    server_totals: ServerTotals,
    cards: Vec<CardBalance>,
) -> CoreResult<DashboardSnapshot> {
    let (transactions, issues) = ingest_records(records);
    Ok(DashboardSnapshot {
        transactions,
        issues,
        server_totals,
        cards,
    })
}

fn records_from_json(items: &[Value]) -> CoreResult<Vec<RawRecord>> {
    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            return Err(CoreError::invalid_source(
                "Transaction entries must all be JSON objects.",
            )
            .with_data(serde_json::json!({ "row": index + 1 })));
        };

        records.push(RawRecord {
            row: index + 1,
            id: field(object, &["id", "_id"]),
            date: field(object, &["date", "createdAt"]),
            kind: field(object, &["type"]),
            amount: field(object, &["amount"]),
            category: field(object, &["category"]),
            description: field(object, &["description", "name"]),
            card_id: field(object, &["cardId", "card_id"]),
        });
    }
    Ok(records)
}

fn card_balance(value: &Value) -> Option<CardBalance> {
    let object = value.as_object()?;
    let balance = object.get("balance").and_then(coerce_amount)?;
    let id = field(object, &["id", "_id"]).map(|value| match value {
        Value::String(text) => text,
        other => other.to_string(),
    });
    Some(CardBalance { id, balance })
}

fn field(object: &Map<String, Value>, names: &[&str]) -> Option<Value> {
    names
        .iter()
        .find_map(|name| object.get(*name))
        .filter(|value| !value.is_null())
        .cloned()
}

fn number_field(object: &Map<String, Value>, names: &[&str]) -> Option<f64> {
    names
        .iter()
        .find_map(|name| object.get(*name))
        .and_then(coerce_amount)
}

fn parse_csv(content: &str) -> CoreResult<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| CoreError::invalid_source("CSV header row is missing or unreadable."))?
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<String>>();

    if !headers_are_valid(&headers) {
        return Err(CoreError::source_schema_mismatch(
            to_strings(&REQUIRED_CSV_FIELDS),
            to_strings(&OPTIONAL_CSV_FIELDS),
            headers,
        ));
    }

    let index_by_name = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name.to_string(), index))
        .collect::<HashMap<String, usize>>();

    let mut records = Vec::new();
    for (row_index, result_row) in reader.records().enumerate() {
        let record = result_row
            .map_err(|_| CoreError::invalid_source("CSV rows are malformed or not UTF-8."))?;

        records.push(RawRecord {
            row: row_index + 1,
            id: csv_id(value_for(&record, &index_by_name, "id")),
            date: value_for(&record, &index_by_name, "date"),
            kind: value_for(&record, &index_by_name, "type"),
            amount: value_for(&record, &index_by_name, "amount"),
            category: value_for(&record, &index_by_name, "category"),
            description: value_for(&record, &index_by_name, "description"),
            card_id: value_for(&record, &index_by_name, "card_id"),
        });
    }

    Ok(records)
}

/// CSV ids that are plain integers keep their numeric identity.
fn csv_id(value: Option<Value>) -> Option<Value> {
    let text = match value {
        Some(Value::String(text)) => text,
        other => return other,
    };
    match text.trim().parse::<i64>() {
        Ok(number) => Some(Value::from(number)),
        Err(_) => Some(Value::String(text)),
    }
}

fn value_for(
    record: &csv::StringRecord,
    index_by_name: &HashMap<String, usize>,
    field_name: &str,
) -> Option<Value> {
    let index = index_by_name.get(field_name)?;
    let value = record.get(*index)?;
    if value.trim().is_empty() {
        return None;
    }
    Some(Value::String(value.to_string()))
}

fn looks_like_csv(content: &str) -> bool {
    let Some(first_line) = content.lines().find(|line| !line.trim().is_empty()) else {
        return false;
    };
    first_line.contains(',')
}

fn headers_are_valid(actual_headers: &[String]) -> bool {
    for required in &REQUIRED_CSV_FIELDS {
        if !actual_headers.iter().any(|value| value == required) {
            return false;
        }
    }

    actual_headers.iter().all(|header| {
        REQUIRED_CSV_FIELDS.contains(&header.as_str()) || OPTIONAL_CSV_FIELDS.contains(&header.as_str())
    })
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
