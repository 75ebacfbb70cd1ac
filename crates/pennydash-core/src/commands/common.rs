use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use chrono::NaiveDate;

use crate::clock::{Clock, FixedClock, SystemClock};
use crate::config::{Settings, load_settings};
use crate::contracts::types::{CategoryRow, PeriodScope, TransactionRow};
use crate::ledger::activity::filter_by_card;
use crate::ledger::aggregate::percentage_of;
use crate::ledger::date::{format_iso_date, parse_iso_date_strict};
use crate::ledger::period::PeriodKind;
use crate::ledger::types::Transaction;
use crate::source::{DashboardSnapshot, ServerTotals, load_snapshot};
use crate::{CoreError, CoreResult};

/// Inputs every dashboard command shares.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct SourceRequest<'a> {
    pub(crate) path: Option<&'a str>,
    pub(crate) stdin_override: Option<&'a str>,
    pub(crate) card: Option<&'a str>,
    pub(crate) as_of: Option<&'a str>,
    pub(crate) home_override: Option<&'a Path>,
}

pub(crate) struct CommandContext {
    pub(crate) snapshot: DashboardSnapshot,
    pub(crate) settings: Settings,
    pub(crate) clock: Box<dyn Clock>,
    /// Real date the source was read; server aggregates describe its month.
    pub(crate) reported_on: NaiveDate,
    pub(crate) card: Option<String>,
}

impl CommandContext {
    pub(crate) fn scope(&self, period: PeriodKind) -> PeriodScope {
        PeriodScope {
            period,
            period_label: period.label().to_string(),
            as_of: format_iso_date(&self.clock.today()),
            card: self.card.clone(),
        }
    }
}

pub(crate) fn prepare(command: &str, request: SourceRequest<'_>) -> CoreResult<CommandContext> {
    let settings = load_settings(request.home_override)?;
    let clock = resolve_clock(request.as_of, command)?;
    let mut snapshot = load_snapshot(
        request.path.map(str::to_string),
        request.stdin_override.map(str::to_string),
    )?;

    let card = request
        .card
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);
    if let Some(card_id) = card.as_deref() {
        scope_to_card(&mut snapshot, card_id);
    }

    Ok(CommandContext {
        snapshot,
        settings,
        clock,
        reported_on: SystemClock.today(),
        card,
    })
}

/// Resolves `--period`, falling back to the configured default.
pub(crate) fn resolve_period(
    period: Option<&str>,
    settings: &Settings,
    command: &str,
) -> CoreResult<PeriodKind> {
    let Some(value) = period else {
        return Ok(settings.default_period);
    };
    PeriodKind::parse_known(value).ok_or_else(|| {
        let accepted = PeriodKind::ALL_KINDS
            .iter()
            .map(|kind| kind.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        CoreError::invalid_argument_for_command(
            &format!("Unknown period `{value}`. Expected one of: {accepted}."),
            Some(command),
        )
    })
}

fn resolve_clock(as_of: Option<&str>, command: &str) -> CoreResult<Box<dyn Clock>> {
    match as_of {
        Some(value) => {
            let date = parse_iso_date_strict(value, "--as-of", command)?;
            Ok(Box::new(FixedClock::at_date(date)))
        }
        None => Ok(Box::new(SystemClock)),
    }
}

/// Server aggregates and the combined balance describe every card, so a
/// card-scoped view drops them and keeps only that card's balance and
/// ingestion issues.
fn scope_to_card(snapshot: &mut DashboardSnapshot, card_id: &str) {
    snapshot.transactions = filter_by_card(&snapshot.transactions, card_id);
    snapshot.server_totals = ServerTotals::default();
    snapshot
        .cards
        .retain(|card| card.id.as_deref().map(str::trim) == Some(card_id));

    let kept_ids = snapshot
        .transactions
        .iter()
        .map(|transaction| transaction.id.to_string())
        .collect::<HashSet<_>>();
    snapshot.issues.retain(|issue| kept_ids.contains(&issue.id));
}

/// Largest expense categories first, ties by name, truncated to `limit`.
pub(crate) fn ranked_categories(
    totals: &BTreeMap<String, f64>,
    limit: usize,
) -> (Vec<CategoryRow>, usize) {
    let expense_total = totals.values().sum::<f64>();
    let mut rows = totals
        .iter()
        .map(|(category, total)| CategoryRow {
            category: category.clone(),
            total: *total,
            share_percentage: percentage_of(*total, expense_total),
        })
        .collect::<Vec<_>>();
    rows.sort_by(|left, right| {
        right
            .total
            .partial_cmp(&left.total)
            .unwrap_or(Ordering::Equal)
            .then_with(|| left.category.cmp(&right.category))
    });

    let omitted = rows.len().saturating_sub(limit);
    rows.truncate(limit);
    (rows, omitted)
}

pub(crate) fn transaction_row(transaction: &Transaction) -> TransactionRow {
    TransactionRow {
        id: transaction.id.clone(),
        date: transaction.date.as_ref().map(format_iso_date),
        kind: transaction.kind,
        amount: transaction.magnitude(),
        category: transaction.category_label().to_string(),
        description: transaction.description.clone(),
        card_id: transaction.card_id.clone(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{ranked_categories, resolve_period, scope_to_card};
    use crate::config::Settings;
    use crate::ledger::period::PeriodKind;
    use crate::ledger::types::TransactionKind::{Expense, Income};
    use crate::ledger::types::fixtures::{txn, ymd};
    use crate::source::{CardBalance, DashboardSnapshot, IngestIssue, IssueCode, ServerTotals};

    #[test]
    fn categories_rank_by_total_then_name() {
        let totals = BTreeMap::from([
            ("Rent".to_string(), 500.0),
            ("Food".to_string(), 200.0),
            ("Cafe".to_string(), 200.0),
            ("Taxi".to_string(), 100.0),
        ]);
        let (rows, omitted) = ranked_categories(&totals, 3);
        let names = rows.iter().map(|row| row.category.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["Rent", "Cafe", "Food"]);
        assert_eq!(omitted, 1);
        assert_eq!(rows[0].share_percentage, 50);
    }

    #[test]
    fn period_flag_overrides_configured_default() {
        let settings = Settings::default();
        let fallback = resolve_period(None, &settings, "summary");
        assert!(matches!(fallback, Ok(PeriodKind::ThisMonth)));

        let explicit = resolve_period(Some("last-year"), &settings, "summary");
        assert!(matches!(explicit, Ok(PeriodKind::LastYear)));

        let unknown = resolve_period(Some("fortnight"), &settings, "summary");
        assert!(unknown.is_err());
        if let Err(error) = unknown {
            assert_eq!(error.code, "invalid_argument");
        }
    }

    #[test]
    fn card_scope_keeps_only_that_cards_rows_balance_and_issues() {
        let mut on_card = txn(1, Income, 100.0, ymd(2024, 6, 1), None);
        on_card.card_id = Some("c1".to_string());
        let mut other_card = txn(2, Expense, 40.0, None, None);
        other_card.card_id = Some("c2".to_string());
        let mut broken_on_card = txn(3, Expense, 0.0, ymd(2024, 6, 2), None);
        broken_on_card.card_id = Some("c1".to_string());

        let issue = |row: usize, id: &str, code: IssueCode| IngestIssue {
            row,
            id: id.to_string(),
            code,
            value: None,
        };
        let mut snapshot = DashboardSnapshot {
            transactions: vec![on_card, other_card, broken_on_card],
            issues: vec![
                issue(2, "2", IssueCode::MalformedDate),
                issue(3, "3", IssueCode::NonNumericAmount),
            ],
            server_totals: ServerTotals {
                income: Some(1.0),
                ..ServerTotals::default()
            },
            cards: vec![
                CardBalance {
                    id: Some("c1".to_string()),
                    balance: 60.0,
                },
                CardBalance {
                    id: Some("c2".to_string()),
                    balance: 10.0,
                },
            ],
        };

        scope_to_card(&mut snapshot, "c1");

        assert_eq!(snapshot.transactions.len(), 2);
        assert_eq!(snapshot.server_totals, ServerTotals::default());
        assert_eq!(snapshot.cards.len(), 1);
        assert_eq!(snapshot.issues.len(), 1);
        assert_eq!(snapshot.issues[0].id, "3");
        assert_eq!(snapshot.issues[0].code, IssueCode::NonNumericAmount);
    }
}
