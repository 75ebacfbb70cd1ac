pub(crate) mod ingest;
pub(crate) mod input;
pub(crate) mod parse;

use crate::CoreResult;
use crate::ledger::types::Transaction;

pub use ingest::{IngestIssue, IssueCode};
pub use parse::parse_source;

/// Aggregates a dashboard API response may carry next to its transactions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ServerTotals {
    pub total_balance: Option<f64>,
    pub income: Option<f64>,
    pub expense: Option<f64>,
    pub savings: Option<f64>,
    pub savings_percentage: Option<f64>,
}

impl ServerTotals {
    pub fn is_complete(&self) -> bool {
        self.income.is_some()
            && self.expense.is_some()
            && self.savings.is_some()
            && self.savings_percentage.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardBalance {
    pub id: Option<String>,
    pub balance: f64,
}

/// Everything loaded from one source document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardSnapshot {
    pub transactions: Vec<Transaction>,
    pub issues: Vec<IngestIssue>,
    pub server_totals: ServerTotals,
    pub cards: Vec<CardBalance>,
}

/// Reads a file path (or `-` for stdin) and parses it into a snapshot.
pub fn load_snapshot(
    path: Option<String>,
    stdin_override: Option<String>,
) -> CoreResult<DashboardSnapshot> {
    let resolved = input::resolve_source(path, stdin_override)?;
    tracing::debug!(
        source = resolved.source_kind.as_str(),
        bytes = resolved.content.len(),
        "loaded dashboard source"
    );
    parse_source(&resolved.content)
}
