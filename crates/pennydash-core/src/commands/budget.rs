use std::path::Path;

use crate::commands::common::{SourceRequest, prepare};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::BudgetData;
use crate::ledger::budget::{BudgetThreshold, budget_status};
use crate::ledger::date::format_iso_date;
use crate::{CoreError, CoreResult};

#[derive(Debug, Default)]
pub struct BudgetRunOptions<'a> {
    pub path: Option<String>,
    pub card: Option<String>,
    pub as_of: Option<String>,
    pub monthly_budget: Option<f64>,
    pub threshold: Option<u8>,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<String>,
}

pub fn run(path: Option<&str>, monthly_budget: Option<f64>) -> CoreResult<SuccessEnvelope> {
    run_with_options(BudgetRunOptions {
        path: path.map(std::string::ToString::to_string),
        monthly_budget,
        ..BudgetRunOptions::default()
    })
}

/// Budget status always covers the current calendar month.
#[doc(hidden)]
pub fn run_with_options(options: BudgetRunOptions<'_>) -> CoreResult<SuccessEnvelope> {
    let context = prepare(
        "budget",
        SourceRequest {
            path: options.path.as_deref(),
            stdin_override: options.stdin_override.as_deref(),
            card: options.card.as_deref(),
            as_of: options.as_of.as_deref(),
            home_override: options.home_override,
        },
    )?;

    let Some(monthly_budget) = options.monthly_budget.or(context.settings.monthly_budget) else {
        return Err(CoreError::invalid_argument_with_recovery(
            "No monthly budget is set.",
            vec![
                "Pass `--budget <amount>`.".to_string(),
                "Or set `monthly_budget` in config.json under the pennydash home.".to_string(),
            ],
        ));
    };
    if !monthly_budget.is_finite() || monthly_budget < 0.0 {
        return Err(CoreError::invalid_argument_for_command(
            "Monthly budget must be a non-negative number.",
            Some("budget"),
        ));
    }

    let threshold = match options.threshold {
        Some(value) => BudgetThreshold::try_from(value).map_err(|message| {
            CoreError::invalid_argument_for_command(&message, Some("budget"))
        })?,
        None => context.settings.budget_threshold,
    };

    let status = budget_status(
        monthly_budget,
        threshold,
        &context.snapshot.transactions,
        context.clock.as_ref(),
    );
    if status.threshold_reached {
        tracing::debug!(
            used_percentage = status.used_percentage,
            threshold = status.threshold,
            "budget threshold reached"
        );
    }

    let data = BudgetData {
        as_of: format_iso_date(&context.clock.today()),
        card: context.card.clone(),
        status,
    };

    success("budget", data)
}
