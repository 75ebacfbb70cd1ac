use std::path::Path;

use crate::CoreResult;
use crate::commands::common::{SourceRequest, prepare, ranked_categories, resolve_period};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::CategoriesData;
use crate::ledger::aggregate::category_totals;
use crate::ledger::period::filter_by_period;

#[derive(Debug, Default)]
pub struct CategoriesRunOptions<'a> {
    pub path: Option<String>,
    pub period: Option<String>,
    pub card: Option<String>,
    pub as_of: Option<String>,
    pub top: Option<usize>,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<String>,
}

pub fn run(path: Option<&str>, period: Option<&str>) -> CoreResult<SuccessEnvelope> {
    run_with_options(CategoriesRunOptions {
        path: path.map(std::string::ToString::to_string),
        period: period.map(std::string::ToString::to_string),
        ..CategoriesRunOptions::default()
    })
}

#[doc(hidden)]
pub fn run_with_options(options: CategoriesRunOptions<'_>) -> CoreResult<SuccessEnvelope> {
    let context = prepare(
        "categories",
        SourceRequest {
            path: options.path.as_deref(),
            stdin_override: options.stdin_override.as_deref(),
            card: options.card.as_deref(),
            as_of: options.as_of.as_deref(),
            home_override: options.home_override,
        },
    )?;
    let period = resolve_period(options.period.as_deref(), &context.settings, "categories")?;
    let scoped = filter_by_period(&context.snapshot.transactions, period, context.clock.as_ref());
    let totals = category_totals(&scoped);
    let limit = options.top.unwrap_or(context.settings.top_categories);
    let (categories, omitted_categories) = ranked_categories(&totals, limit);

    let data = CategoriesData {
        scope: context.scope(period),
        expense_total: totals.values().sum(),
        categories,
        omitted_categories,
    };

    success("categories", data)
}
