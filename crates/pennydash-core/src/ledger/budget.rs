use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::ledger::aggregate::{compute_totals, percentage_of};
use crate::ledger::period::{PeriodKind, filter_by_period};
use crate::ledger::types::Transaction;

/// Share of the monthly budget at which a warning is raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BudgetThreshold {
    #[default]
    Percent80,
    Percent90,
    Percent100,
}

impl BudgetThreshold {
    pub const fn percent(self) -> u8 {
        match self {
            Self::Percent80 => 80,
            Self::Percent90 => 90,
            Self::Percent100 => 100,
        }
    }
}

impl TryFrom<u8> for BudgetThreshold {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            80 => Ok(Self::Percent80),
            90 => Ok(Self::Percent90),
            100 => Ok(Self::Percent100),
            other => Err(format!("budget threshold must be 80, 90 or 100 (got {other})")),
        }
    }
}

impl From<BudgetThreshold> for u8 {
    fn from(value: BudgetThreshold) -> Self {
        value.percent()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub monthly_budget: f64,
    pub current_spending: f64,
    pub remaining: f64,
    pub used_percentage: i64,
    pub threshold: u8,
    pub threshold_reached: bool,
    pub exceeded: bool,
}

/// Compares this month's expenses with `monthly_budget`. A budget of zero
/// or less means "no budget set": nothing is reached or exceeded.
pub fn budget_status(
    monthly_budget: f64,
    threshold: BudgetThreshold,
    transactions: &[Transaction],
    clock: &dyn Clock,
) -> BudgetStatus {
    let this_month = filter_by_period(transactions, PeriodKind::ThisMonth, clock);
    let current_spending = compute_totals(&this_month).expense;
    let has_budget = monthly_budget > 0.0;
    let used_percentage = percentage_of(current_spending, monthly_budget);

    BudgetStatus {
        monthly_budget,
        current_spending,
        remaining: monthly_budget - current_spending,
        used_percentage,
        threshold: threshold.percent(),
        threshold_reached: has_budget && used_percentage >= i64::from(threshold.percent()),
        exceeded: has_budget && current_spending > monthly_budget,
    }
}
