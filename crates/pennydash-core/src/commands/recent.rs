use std::path::Path;

use crate::CoreResult;
use crate::commands::common::{SourceRequest, prepare, resolve_period, transaction_row};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::RecentData;
use crate::ledger::activity::recent_transactions;
use crate::ledger::period::{PeriodKind, filter_by_period};

#[derive(Debug, Default)]
pub struct RecentRunOptions<'a> {
    pub path: Option<String>,
    pub period: Option<String>,
    pub card: Option<String>,
    pub as_of: Option<String>,
    pub limit: Option<usize>,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<String>,
}

pub fn run(path: Option<&str>, limit: Option<usize>) -> CoreResult<SuccessEnvelope> {
    run_with_options(RecentRunOptions {
        path: path.map(std::string::ToString::to_string),
        limit,
        ..RecentRunOptions::default()
    })
}

/// Recent activity spans every period unless `--period` narrows it.
#[doc(hidden)]
pub fn run_with_options(options: RecentRunOptions<'_>) -> CoreResult<SuccessEnvelope> {
    let context = prepare(
        "recent",
        SourceRequest {
            path: options.path.as_deref(),
            stdin_override: options.stdin_override.as_deref(),
            card: options.card.as_deref(),
            as_of: options.as_of.as_deref(),
            home_override: options.home_override,
        },
    )?;
    let period = match options.period.as_deref() {
        Some(value) => resolve_period(Some(value), &context.settings, "recent")?,
        None => PeriodKind::All,
    };
    let scoped = filter_by_period(&context.snapshot.transactions, period, context.clock.as_ref());
    let limit = options.limit.unwrap_or(context.settings.recent_limit);
    let transactions = recent_transactions(&scoped, limit)
        .iter()
        .map(transaction_row)
        .collect();

    let data = RecentData {
        scope: context.scope(period),
        limit,
        transactions,
    };

    success("recent", data)
}
