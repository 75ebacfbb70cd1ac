use std::path::Path;

use crate::CoreResult;
use crate::commands::common::{SourceRequest, prepare, ranked_categories, resolve_period};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::SummaryData;
use crate::ledger::summary::summarize;

#[derive(Debug, Default)]
pub struct SummaryRunOptions<'a> {
    pub path: Option<String>,
    pub period: Option<String>,
    pub card: Option<String>,
    pub as_of: Option<String>,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<String>,
}

pub fn run(path: Option<&str>, period: Option<&str>) -> CoreResult<SuccessEnvelope> {
    run_with_options(SummaryRunOptions {
        path: path.map(std::string::ToString::to_string),
        period: period.map(std::string::ToString::to_string),
        ..SummaryRunOptions::default()
    })
}

#[doc(hidden)]
pub fn run_with_options(options: SummaryRunOptions<'_>) -> CoreResult<SuccessEnvelope> {
    let context = prepare(
        "summary",
        SourceRequest {
            path: options.path.as_deref(),
            stdin_override: options.stdin_override.as_deref(),
            card: options.card.as_deref(),
            as_of: options.as_of.as_deref(),
            home_override: options.home_override,
        },
    )?;
    let period = resolve_period(options.period.as_deref(), &context.settings, "summary")?;
    let summary = summarize(
        &context.snapshot,
        period,
        context.clock.as_ref(),
        context.reported_on,
    );
    let (top_categories, _) =
        ranked_categories(&summary.category_totals, context.settings.top_categories);

    let data = SummaryData {
        scope: context.scope(period),
        source: summary.source,
        income: summary.totals.income,
        expense: summary.totals.expense,
        savings: summary.totals.savings,
        savings_percentage: summary.totals.savings_percentage,
        total_balance: summary.total_balance,
        transaction_count: summary.transaction_count,
        series_points: summary.balance_series.len(),
        top_categories,
        issues: context.snapshot.issues.clone(),
    };

    success("summary", data)
}
