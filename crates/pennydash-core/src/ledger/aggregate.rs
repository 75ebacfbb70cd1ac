//! Income/expense totals, category breakdowns and running-balance series.
//!
//! Every reduction here works on magnitudes: the source sign of `amount` is
//! discarded and the direction comes from the transaction kind.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::clock::Clock;
use crate::ledger::period::{PeriodKind, filter_by_period};
use crate::ledger::types::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub savings: f64,
    pub savings_percentage: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BalancePoint {
    pub date: NaiveDate,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AggregateResult {
    pub income: f64,
    pub expense: f64,
    pub savings: f64,
    pub savings_percentage: i64,
    pub category_totals: BTreeMap<String, f64>,
    pub balance_series: Vec<BalancePoint>,
}

impl AggregateResult {
    pub fn totals(&self) -> Totals {
        Totals {
            income: self.income,
            expense: self.expense,
            savings: self.savings,
            savings_percentage: self.savings_percentage,
        }
    }
}

pub fn compute_totals(transactions: &[Transaction]) -> Totals {
    let mut income = 0.0;
    let mut expense = 0.0;
    for transaction in transactions {
        if transaction.is_income() {
            income += transaction.magnitude();
        } else {
            expense += transaction.magnitude();
        }
    }

    let savings = income - expense;
    Totals {
        income,
        expense,
        savings,
        savings_percentage: percentage_of(savings, income),
    }
}

/// Expense magnitude per category label. Income never contributes.
pub fn category_totals(transactions: &[Transaction]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for transaction in transactions.iter().filter(|t| !t.is_income()) {
        *totals
            .entry(transaction.category_label().to_string())
            .or_insert(0.0) += transaction.magnitude();
    }
    totals
}

/// One point per distinct transaction date, ascending, holding the running
/// balance after that day's last transaction. Undated rows are skipped.
pub fn balance_series(transactions: &[Transaction]) -> Vec<BalancePoint> {
    let mut dated = transactions
        .iter()
        .filter_map(|transaction| transaction.date.map(|date| (date, transaction)))
        .collect::<Vec<_>>();
    dated.sort_by_key(|(date, _)| *date);

    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut running_balance = 0.0;
    for (date, transaction) in dated {
        running_balance += transaction.signed_magnitude();
        by_date.insert(date, running_balance);
    }

    by_date
        .into_iter()
        .map(|(date, balance)| BalancePoint { date, balance })
        .collect()
}

pub fn aggregate(transactions: &[Transaction]) -> AggregateResult {
    let totals = compute_totals(transactions);
    AggregateResult {
        income: totals.income,
        expense: totals.expense,
        savings: totals.savings,
        savings_percentage: totals.savings_percentage,
        category_totals: category_totals(transactions),
        balance_series: balance_series(transactions),
    }
}

pub fn aggregate_for_period(
    transactions: &[Transaction],
    period: PeriodKind,
    clock: &dyn Clock,
) -> AggregateResult {
    aggregate(&filter_by_period(transactions, period, clock))
}

/// `round(part / whole * 100)`, or 0 when `whole` is not positive.
pub fn percentage_of(part: f64, whole: f64) -> i64 {
    if whole <= 0.0 {
        return 0;
    }
    round_half_up(part / whole * 100.0)
}

/// Rounds to the nearest integer, breaking `.5` ties toward positive
/// infinity: 12.5 -> 13, -12.5 -> -12.
pub fn round_half_up(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}
