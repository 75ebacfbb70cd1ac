use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::clock::Clock;
use crate::ledger::aggregate::{BalancePoint, Totals, aggregate, round_half_up};
use crate::ledger::period::{PeriodKind, filter_by_period};
use crate::source::{DashboardSnapshot, ServerTotals};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalsSource {
    Server,
    Computed,
}

impl TotalsSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::Computed => "computed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub period: PeriodKind,
    pub as_of: NaiveDate,
    pub source: TotalsSource,
    pub totals: Totals,
    pub total_balance: f64,
    pub category_totals: BTreeMap<String, f64>,
    pub balance_series: Vec<BalancePoint>,
    pub transaction_count: usize,
}

/// Builds the numbers behind the dashboard cards for one period.
///
/// Server aggregates describe the calendar month of `reported_on`, the real
/// date they were read. They are only trusted for [`PeriodKind::ThisMonth`],
/// only when the clock falls in that same month, and only when all four are
/// present. Everything else is recomputed from the transactions.
pub fn summarize(
    snapshot: &DashboardSnapshot,
    period: PeriodKind,
    clock: &dyn Clock,
    reported_on: NaiveDate,
) -> DashboardSummary {
    let today = clock.today();
    let scoped = filter_by_period(&snapshot.transactions, period, clock);
    let computed = aggregate(&scoped);

    let server = if same_month(today, reported_on) {
        server_totals_for(period, &snapshot.server_totals)
    } else {
        None
    };
    let (source, totals) = match server {
        Some(totals) => (TotalsSource::Server, totals),
        None => (TotalsSource::Computed, computed.totals()),
    };
    tracing::debug!(
        period = period.as_str(),
        source = source.as_str(),
        transactions = scoped.len(),
        "summarized dashboard period"
    );

    DashboardSummary {
        period,
        as_of: today,
        source,
        totals,
        total_balance: total_balance(snapshot),
        category_totals: computed.category_totals,
        balance_series: computed.balance_series,
        transaction_count: scoped.len(),
    }
}

/// Server `totalBalance`, else the sum of card balances, else the net of
/// every transaction.
pub fn total_balance(snapshot: &DashboardSnapshot) -> f64 {
    if let Some(balance) = snapshot.server_totals.total_balance {
        return balance;
    }
    if !snapshot.cards.is_empty() {
        return snapshot.cards.iter().map(|card| card.balance).sum();
    }
    snapshot
        .transactions
        .iter()
        .map(|transaction| transaction.signed_magnitude())
        .sum()
}

fn same_month(left: NaiveDate, right: NaiveDate) -> bool {
    left.year() == right.year() && left.month() == right.month()
}

fn server_totals_for(period: PeriodKind, server: &ServerTotals) -> Option<Totals> {
    if period != PeriodKind::ThisMonth {
        return None;
    }
    Some(Totals {
        income: server.income?,
        expense: server.expense?,
        savings: server.savings?,
        savings_percentage: round_half_up(server.savings_percentage?),
    })
}
