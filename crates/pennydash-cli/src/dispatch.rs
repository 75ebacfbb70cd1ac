use pennydash_core::commands::budget::{self, BudgetRunOptions};
use pennydash_core::commands::categories::{self, CategoriesRunOptions};
use pennydash_core::commands::recent::{self, RecentRunOptions};
use pennydash_core::commands::series::{self, SeriesRunOptions};
use pennydash_core::commands::summary::{self, SummaryRunOptions};
use pennydash_core::{CoreResult, PeriodKind, SuccessEnvelope};

use crate::cli::{Cli, Commands, SourceArgs};

pub fn dispatch(cli: &Cli) -> CoreResult<SuccessEnvelope> {
    dispatch_with_stdin(cli, None)
}

fn dispatch_with_stdin(cli: &Cli, stdin_override: Option<String>) -> CoreResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Summary { period, source } => summary::run_with_options(SummaryRunOptions {
            path: source.path.clone(),
            period: period_key(*period),
            card: source.card.clone(),
            as_of: as_of(source),
            home_override: None,
            stdin_override,
        }),
        Commands::Series { period, source } => series::run_with_options(SeriesRunOptions {
            path: source.path.clone(),
            period: period_key(*period),
            card: source.card.clone(),
            as_of: as_of(source),
            home_override: None,
            stdin_override,
        }),
        Commands::Categories {
            period,
            top,
            source,
        } => categories::run_with_options(CategoriesRunOptions {
            path: source.path.clone(),
            period: period_key(*period),
            card: source.card.clone(),
            as_of: as_of(source),
            top: *top,
            home_override: None,
            stdin_override,
        }),
        Commands::Recent {
            period,
            limit,
            source,
        } => recent::run_with_options(RecentRunOptions {
            path: source.path.clone(),
            period: period_key(*period),
            card: source.card.clone(),
            as_of: as_of(source),
            limit: *limit,
            home_override: None,
            stdin_override,
        }),
        Commands::Budget {
            budget,
            threshold,
            source,
        } => budget::run_with_options(BudgetRunOptions {
            path: source.path.clone(),
            card: source.card.clone(),
            as_of: as_of(source),
            monthly_budget: *budget,
            threshold: *threshold,
            home_override: None,
            stdin_override,
        }),
    }
}

fn period_key(period: Option<PeriodKind>) -> Option<String> {
    period.map(|kind| kind.as_str().to_string())
}

fn as_of(source: &SourceArgs) -> Option<String> {
    source.as_of.as_ref().map(|date| date.as_str().to_string())
}
