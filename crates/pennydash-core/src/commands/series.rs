use std::path::Path;

use crate::CoreResult;
use crate::commands::common::{SourceRequest, prepare, resolve_period};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::SeriesData;
use crate::ledger::aggregate::balance_series;
use crate::ledger::period::filter_by_period;

#[derive(Debug, Default)]
pub struct SeriesRunOptions<'a> {
    pub path: Option<String>,
    pub period: Option<String>,
    pub card: Option<String>,
    pub as_of: Option<String>,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<String>,
}

pub fn run(path: Option<&str>, period: Option<&str>) -> CoreResult<SuccessEnvelope> {
    run_with_options(SeriesRunOptions {
        path: path.map(std::string::ToString::to_string),
        period: period.map(std::string::ToString::to_string),
        ..SeriesRunOptions::default()
    })
}

#[doc(hidden)]
pub fn run_with_options(options: SeriesRunOptions<'_>) -> CoreResult<SuccessEnvelope> {
    let context = prepare(
        "series",
        SourceRequest {
            path: options.path.as_deref(),
            stdin_override: options.stdin_override.as_deref(),
            card: options.card.as_deref(),
            as_of: options.as_of.as_deref(),
            home_override: options.home_override,
        },
    )?;
    let period = resolve_period(options.period.as_deref(), &context.settings, "series")?;
    // counted before the period filter drops them
    let skipped_undated = context
        .snapshot
        .transactions
        .iter()
        .filter(|row| row.date.is_none())
        .count();
    let scoped = filter_by_period(&context.snapshot.transactions, period, context.clock.as_ref());
    if skipped_undated > 0 {
        tracing::debug!(skipped_undated, "undated rows left out of the balance series");
    }
    let points = balance_series(&scoped);

    let data = SeriesData {
        scope: context.scope(period),
        final_balance: points.last().map(|point| point.balance),
        points,
        skipped_undated,
    };

    success("series", data)
}
