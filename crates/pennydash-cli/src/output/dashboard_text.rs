use std::io;

use pennydash_core::ledger::format::format_amount;
use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_summary(data: &Value) -> io::Result<String> {
    let mut lines = vec![heading("Summary", data), String::new()];

    let source = match data.get("source").and_then(Value::as_str) {
        Some("server") => "reported by the dashboard API",
        _ => "computed from transactions",
    };
    lines.extend(format::key_value_rows(
        &[
            ("Income:", amount(data, "income")),
            ("Expense:", amount(data, "expense")),
            ("Savings:", amount(data, "savings")),
            ("Savings rate:", percent(data, "savings_percentage")),
            ("Total balance:", amount(data, "total_balance")),
            ("Transactions:", count(data, "transaction_count")),
            ("Totals:", source.to_string()),
        ],
        2,
    ));

    let categories = rows(data, "top_categories")?;
    lines.push(String::new());
    if categories.is_empty() {
        lines.push("No expenses in this period.".to_string());
    } else {
        lines.push("Top categories:".to_string());
        lines.extend(category_table(categories));
    }

    let issues = rows(data, "issues")?;
    if !issues.is_empty() {
        lines.push(String::new());
        lines.push(format!("Source issues ({}):", issues.len()));
        lines.extend(issue_table(issues));
    }

    Ok(lines.join("\n"))
}

pub fn render_series(data: &Value) -> io::Result<String> {
    let points = rows(data, "points")?;
    let mut lines = vec![heading("Balance", data), String::new()];

    if points.is_empty() {
        lines.push("No dated transactions in this period.".to_string());
        return Ok(lines.join("\n"));
    }

    let columns = [
        Column {
            name: "Date",
            align: Align::Left,
        },
        Column {
            name: "Balance",
            align: Align::Right,
        },
    ];
    let table_rows = points
        .iter()
        .map(|point| vec![text(point, "date"), amount(point, "balance")])
        .collect::<Vec<Vec<String>>>();
    lines.extend(format::render_table_or_blocks(
        &columns,
        &table_rows,
        format::terminal_width(),
        "Point",
    ));

    let skipped = data
        .get("skipped_undated")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    if skipped > 0 {
        lines.push(String::new());
        lines.push(format!(
            "{skipped} transaction(s) without a readable date are not charted."
        ));
    }

    Ok(lines.join("\n"))
}

pub fn render_categories(data: &Value) -> io::Result<String> {
    let categories = rows(data, "categories")?;
    let mut lines = vec![heading("Expenses by category", data), String::new()];

    if categories.is_empty() {
        lines.push("No expenses in this period.".to_string());
        return Ok(lines.join("\n"));
    }

    lines.extend(category_table(categories));
    lines.push(String::new());
    lines.extend(format::key_value_rows(
        &[("Total expense:", amount(data, "expense_total"))],
        2,
    ));

    let omitted = data
        .get("omitted_categories")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    if omitted > 0 {
        lines.push(format!(
            "  {omitted} smaller categor{} not shown. Use --top to list more.",
            if omitted == 1 { "y" } else { "ies" }
        ));
    }

    Ok(lines.join("\n"))
}

pub fn render_recent(data: &Value) -> io::Result<String> {
    let transactions = rows(data, "transactions")?;
    let mut lines = vec![heading("Recent transactions", data), String::new()];

    if transactions.is_empty() {
        lines.push("No transactions found.".to_string());
        return Ok(lines.join("\n"));
    }

    let columns = [
        Column {
            name: "Date",
            align: Align::Left,
        },
        Column {
            name: "Category",
            align: Align::Left,
        },
        Column {
            name: "Description",
            align: Align::Left,
        },
        Column {
            name: "Amount",
            align: Align::Right,
        },
    ];
    let table_rows = transactions
        .iter()
        .map(|row| {
            let date = row
                .get("date")
                .and_then(Value::as_str)
                .unwrap_or("no date")
                .to_string();
            let sign = match row.get("type").and_then(Value::as_str) {
                Some("income") => "+",
                _ => "-",
            };
            vec![
                date,
                text(row, "category"),
                row.get("description")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string(),
                format!("{sign}{}", amount(row, "amount")),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(format::render_table_or_blocks(
        &columns,
        &table_rows,
        format::terminal_width(),
        "Transaction",
    ));

    Ok(lines.join("\n"))
}

pub fn render_budget(data: &Value) -> io::Result<String> {
    let as_of = text(data, "as_of");
    let mut lines = vec![format!("Monthly budget (as of {as_of})")];
    if let Some(card) = data.get("card").and_then(Value::as_str) {
        lines.push(format!("Card: {card}"));
    }
    lines.push(String::new());

    lines.extend(format::key_value_rows(
        &[
            ("Budget:", amount(data, "monthly_budget")),
            ("Spent this month:", amount(data, "current_spending")),
            ("Remaining:", amount(data, "remaining")),
            ("Used:", percent(data, "used_percentage")),
            ("Warn at:", percent(data, "threshold")),
        ],
        2,
    ));

    let flag = |key: &str| data.get(key).and_then(Value::as_bool).unwrap_or(false);
    lines.push(String::new());
    let status = if flag("exceeded") {
        "Budget exceeded."
    } else if flag("threshold_reached") {
        "Warning: spending has reached the budget threshold."
    } else {
        "Spending is within budget."
    };
    lines.push(status.to_string());

    Ok(lines.join("\n"))
}

fn heading(title: &str, data: &Value) -> String {
    let label = data
        .get("period_label")
        .and_then(Value::as_str)
        .unwrap_or("All time");
    let as_of = text(data, "as_of");
    match data.get("card").and_then(Value::as_str) {
        Some(card) => format!("{title}: {label}, card {card} (as of {as_of})"),
        None => format!("{title}: {label} (as of {as_of})"),
    }
}

fn category_table(categories: &[Value]) -> Vec<String> {
    let columns = [
        Column {
            name: "Category",
            align: Align::Left,
        },
        Column {
            name: "Total",
            align: Align::Right,
        },
        Column {
            name: "Share",
            align: Align::Right,
        },
    ];
    let table_rows = categories
        .iter()
        .map(|row| {
            vec![
                text(row, "category"),
                amount(row, "total"),
                percent(row, "share_percentage"),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    format::render_table_or_blocks(
        &columns,
        &table_rows,
        format::terminal_width(),
        "Category",
    )
}

fn issue_table(issues: &[Value]) -> Vec<String> {
    let columns = [
        Column {
            name: "Row",
            align: Align::Right,
        },
        Column {
            name: "Id",
            align: Align::Left,
        },
        Column {
            name: "Issue",
            align: Align::Left,
        },
        Column {
            name: "Value",
            align: Align::Left,
        },
    ];
    let table_rows = issues
        .iter()
        .map(|issue| {
            vec![
                count(issue, "row"),
                text(issue, "id"),
                issue_description(issue.get("code").and_then(Value::as_str)).to_string(),
                issue
                    .get("value")
                    .and_then(Value::as_str)
                    .unwrap_or("(missing)")
                    .to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    format::render_table_or_blocks(&columns, &table_rows, format::terminal_width(), "Issue")
}

fn issue_description(code: Option<&str>) -> &'static str {
    match code {
        Some("unrecognized_type") => "unknown type, counted as expense",
        Some("non_numeric_amount") => "unreadable amount, counted as 0",
        Some("malformed_date") => "unreadable date, left out of periods",
        _ => "unknown issue",
    }
}

fn rows<'a>(data: &'a Value, key: &str) -> io::Result<&'a [Value]> {
    data.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| io::Error::other(format!("output requires `{key}`")))
}

fn amount(data: &Value, key: &str) -> String {
    format_amount(data.get(key).and_then(Value::as_f64).unwrap_or(0.0))
}

fn percent(data: &Value, key: &str) -> String {
    let value = data.get(key).and_then(Value::as_i64).unwrap_or(0);
    format!("{value}%")
}

fn count(data: &Value, key: &str) -> String {
    data.get(key)
        .and_then(Value::as_u64)
        .unwrap_or(0)
        .to_string()
}

fn text(data: &Value, key: &str) -> String {
    match data.get(key) {
        Some(Value::String(value)) => value.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{render_budget, render_categories, render_recent, render_series, render_summary};

    #[test]
    fn summary_renders_totals_categories_and_issues() {
        let data = json!({
            "period": "this-month",
            "period_label": "This month",
            "as_of": "2024-06-15",
            "card": null,
            "source": "computed",
            "income": 30000.0,
            "expense": 9800.3,
            "savings": 20199.7,
            "savings_percentage": 67,
            "total_balance": 20199.7,
            "transaction_count": 5,
            "series_points": 4,
            "top_categories": [
                {"category": "Оренда", "total": 8000.0, "share_percentage": 82}
            ],
            "issues": [
                {"row": 3, "id": "row-3", "code": "malformed_date", "value": "soon"}
            ]
        });
        let rendered = render_summary(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Summary: This month (as of 2024-06-15)"));
            assert!(text.contains("30\u{a0}000,00"));
            assert!(text.contains("9\u{a0}800,30"));
            assert!(text.contains("67%"));
            assert!(text.contains("Оренда"));
            assert!(text.contains("Source issues (1):"));
            assert!(text.contains("unreadable date, left out of periods"));
        }
    }

    #[test]
    fn empty_views_print_friendly_messages() {
        let scope = json!({"period_label": "Last month", "as_of": "2024-06-15"});
        let mut series = scope.clone();
        series["points"] = json!([]);
        let mut categories = scope.clone();
        categories["categories"] = json!([]);
        let mut recent = scope;
        recent["transactions"] = json!([]);

        let cases = [
            (render_series(&series), "No dated transactions in this period."),
            (render_categories(&categories), "No expenses in this period."),
            (render_recent(&recent), "No transactions found."),
        ];
        for (rendered, expected) in cases {
            assert!(rendered.is_ok());
            if let Ok(text) = rendered {
                assert!(text.contains(expected));
            }
        }
    }

    #[test]
    fn recent_marks_direction_and_missing_dates() {
        let data = json!({
            "period_label": "All time",
            "as_of": "2024-06-15",
            "card": "c1",
            "transactions": [
                {"id": 2, "date": null, "type": "expense", "amount": 40.0, "category": "Food", "description": null},
                {"id": 1, "date": "2024-06-01", "type": "income", "amount": 1000.0, "category": "Uncategorized", "description": "Salary"}
            ]
        });
        let rendered = render_recent(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("card c1"));
            assert!(text.contains("no date"));
            assert!(text.contains("-40,00"));
            assert!(text.contains("+1\u{a0}000,00"));
        }
    }

    #[test]
    fn budget_reports_threshold_state() {
        let data = json!({
            "as_of": "2024-06-15",
            "card": null,
            "monthly_budget": 10000.0,
            "current_spending": 9800.3,
            "remaining": 199.7,
            "used_percentage": 98,
            "threshold": 90,
            "threshold_reached": true,
            "exceeded": false
        });
        let rendered = render_budget(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("98%"));
            assert!(text.contains("Warning: spending has reached the budget threshold."));
        }
    }

    #[test]
    fn missing_sections_are_errors() {
        assert!(render_series(&json!({})).is_err());
        assert!(render_summary(&json!({"top_categories": []})).is_err());
    }
}
