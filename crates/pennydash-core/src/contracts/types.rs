use serde::Serialize;

use crate::ledger::aggregate::BalancePoint;
use crate::ledger::budget::BudgetStatus;
use crate::ledger::period::PeriodKind;
use crate::ledger::summary::TotalsSource;
use crate::ledger::types::{TransactionId, TransactionKind};
use crate::source::IngestIssue;

#[derive(Debug, Clone, Serialize)]
pub struct PeriodScope {
    pub period: PeriodKind,
    pub period_label: String,
    pub as_of: String,
    pub card: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryRow {
    pub category: String,
    pub total: f64,
    pub share_percentage: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    #[serde(flatten)]
    pub scope: PeriodScope,
    pub source: TotalsSource,
    pub income: f64,
    pub expense: f64,
    pub savings: f64,
    pub savings_percentage: i64,
    pub total_balance: f64,
    pub transaction_count: usize,
    pub series_points: usize,
    pub top_categories: Vec<CategoryRow>,
    pub issues: Vec<IngestIssue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesData {
    #[serde(flatten)]
    pub scope: PeriodScope,
    pub points: Vec<BalancePoint>,
    pub final_balance: Option<f64>,
    pub skipped_undated: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoriesData {
    #[serde(flatten)]
    pub scope: PeriodScope,
    pub expense_total: f64,
    pub categories: Vec<CategoryRow>,
    pub omitted_categories: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionRow {
    pub id: TransactionId,
    pub date: Option<String>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    pub card_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentData {
    #[serde(flatten)]
    pub scope: PeriodScope,
    pub limit: usize,
    pub transactions: Vec<TransactionRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetData {
    pub as_of: String,
    pub card: Option<String>,
    #[serde(flatten)]
    pub status: BudgetStatus,
}
