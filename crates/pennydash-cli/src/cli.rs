use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use pennydash_core::PeriodKind;
use pennydash_core::ledger::budget::BudgetThreshold;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoDate(pub String);

impl IsoDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn parse_iso_date(value: &str) -> Result<IsoDate, String> {
    if value.len() != 10 {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return Err("date must use YYYY-MM-DD format".to_string());
        }
    }

    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err("date must use valid calendar values".to_string());
    }

    Ok(IsoDate(value.to_string()))
}

pub fn parse_period(value: &str) -> Result<PeriodKind, String> {
    PeriodKind::parse_known(value).ok_or_else(|| {
        "period must be one of: this-month, last-month, last-3-months, last-year, all".to_string()
    })
}

pub fn parse_threshold(value: &str) -> Result<u8, String> {
    let parsed = value
        .parse::<u8>()
        .map_err(|_| "threshold must be 80, 90 or 100".to_string())?;
    BudgetThreshold::try_from(parsed).map(|_| parsed)
}

pub fn parse_budget_amount(value: &str) -> Result<f64, String> {
    match value.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
        _ => Err("budget must be a non-negative number".to_string()),
    }
}

pub fn parse_positive_count(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err("value must be a whole number of at least 1".to_string()),
    }
}

/// Extended help shown after `pennydash <command> --help`.
pub const SOURCE_AFTER_HELP: &str = "\
Source documents:
  <path> is a local file path. Use `-` (or omit it) to read stdin.
  Example: curl -s $API/dashboard | pennydash summary -

  Accepted formats:
    JSON array      one object per transaction
    Dashboard JSON  {\"transactions\": [...], \"cards\": [...], \"totalBalance\": ...,
                     \"income\": ..., \"expense\": ..., \"savings\": ..., \"savingsPercentage\": ...}
    CSV             header row: id,date,type,amount[,category,description,card_id]

  Transaction fields:
    id        number or string (`_id` also accepted)
    date      YYYY-MM-DD, DD.MM.YYYY or an ISO timestamp (`createdAt` also accepted)
    type      Income / Expense, or Надходження / Витрата
    amount    number or numeric string; the sign is ignored
    category  optional; blank categories count as `Uncategorized`

  Rows with an unknown type count as expenses, unreadable amounts count as 0,
  and rows with unreadable dates are left out of period views. Each case is
  listed under `issues` in the summary.

Periods:
  this-month, last-month, last-3-months, last-year, all
  Without --period the configured `default_period` applies (this-month).

Configuration:
  $PENNYDASH_HOME/config.json (default ~/.pennydash/config.json)
  {\"default_period\": \"this-month\", \"top_categories\": 5, \"recent_limit\": 10,
   \"monthly_budget\": 20000, \"budget_threshold\": 80}
";

#[derive(Debug, Parser)]
#[command(
    name = "pennydash",
    version,
    about = "personal finance dashboard numbers from exported transactions",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Path to a JSON or CSV document (use `-` for stdin)
    pub path: Option<String>,
    /// Only count transactions from one card
    #[arg(long)]
    pub card: Option<String>,
    /// Evaluate periods as of this date instead of today (YYYY-MM-DD)
    #[arg(long, value_parser = parse_iso_date)]
    pub as_of: Option<IsoDate>,
    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show income, expense, savings and balance for a period
    #[command(after_long_help = SOURCE_AFTER_HELP)]
    Summary {
        /// Period to summarize
        #[arg(long, value_parser = parse_period)]
        period: Option<PeriodKind>,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Show the running balance per day for a period
    #[command(after_long_help = SOURCE_AFTER_HELP)]
    Series {
        /// Period to chart
        #[arg(long, value_parser = parse_period)]
        period: Option<PeriodKind>,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Show expense totals per category for a period
    #[command(after_long_help = SOURCE_AFTER_HELP)]
    Categories {
        /// Period to break down
        #[arg(long, value_parser = parse_period)]
        period: Option<PeriodKind>,
        /// Number of categories to show
        #[arg(long, value_parser = parse_positive_count)]
        top: Option<usize>,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// List the most recent transactions
    #[command(after_long_help = SOURCE_AFTER_HELP)]
    Recent {
        /// Restrict the list to a period (default: all)
        #[arg(long, value_parser = parse_period)]
        period: Option<PeriodKind>,
        /// Number of transactions to show
        #[arg(long, value_parser = parse_positive_count)]
        limit: Option<usize>,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Compare this month's spending with a monthly budget
    #[command(after_long_help = SOURCE_AFTER_HELP)]
    Budget {
        /// Monthly budget amount (overrides `monthly_budget` in config)
        #[arg(long, value_parser = parse_budget_amount)]
        budget: Option<f64>,
        /// Warning threshold in percent: 80, 90 or 100
        #[arg(long, value_parser = parse_threshold)]
        threshold: Option<u8>,
        #[command(flatten)]
        source: SourceArgs,
    },
}

impl Commands {
    pub fn source(&self) -> &SourceArgs {
        match self {
            Self::Summary { source, .. }
            | Self::Series { source, .. }
            | Self::Categories { source, .. }
            | Self::Recent { source, .. }
            | Self::Budget { source, .. } => source,
        }
    }
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;
    use pennydash_core::PeriodKind;

    use super::{Commands, parse_from};

    #[test]
    fn parse_command_paths() {
        let cases: [Vec<&str>; 8] = [
            vec!["pennydash", "summary", "rows.json"],
            vec!["pennydash", "summary", "--period", "last-month", "-"],
            vec!["pennydash", "series", "--period", "all", "rows.csv", "--json"],
            vec!["pennydash", "categories", "--top", "3", "rows.json"],
            vec!["pennydash", "recent", "--limit", "5", "--card", "c1", "rows.json"],
            vec!["pennydash", "budget", "--budget", "15000", "--threshold", "90", "rows.json"],
            vec!["pennydash", "summary", "--as-of", "2024-06-15", "rows.json"],
            vec!["pennydash", "budget"],
        ];

        for case in cases {
            let parsed = parse_from(case.clone());
            assert!(parsed.is_ok(), "failed to parse {case:?}");
        }
    }

    #[test]
    fn period_and_source_flags_are_captured() {
        let parsed = parse_from([
            "pennydash",
            "summary",
            "--period",
            "last_3_months",
            "--card",
            "c7",
            "--json",
            "dash.json",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            let Commands::Summary { period, source } = &cli.command else {
                return;
            };
            assert_eq!(*period, Some(PeriodKind::Last3Months));
            assert_eq!(source.card.as_deref(), Some("c7"));
            assert_eq!(source.path.as_deref(), Some("dash.json"));
            assert!(source.json);
        }
    }

    #[test]
    fn invalid_values_are_rejected() {
        let cases: [Vec<&str>; 6] = [
            vec!["pennydash", "summary", "--period", "fortnight"],
            vec!["pennydash", "summary", "--as-of", "2024-02-31"],
            vec!["pennydash", "summary", "--as-of", "15.06.2024"],
            vec!["pennydash", "budget", "--threshold", "85"],
            vec!["pennydash", "budget", "--budget=-10"],
            vec!["pennydash", "recent", "--limit", "0"],
        ];

        for case in cases {
            let parsed = parse_from(case.clone());
            assert!(parsed.is_err(), "accepted {case:?}");
            if let Err(error) = parsed {
                assert_eq!(error.kind(), ErrorKind::ValueValidation);
            }
        }
    }

    #[test]
    fn budget_does_not_take_a_period() {
        let parsed = parse_from(["pennydash", "budget", "--period", "all"]);
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.kind(), ErrorKind::UnknownArgument);
        }
    }

    #[test]
    fn help_command_is_rejected() {
        let parsed = parse_from(["pennydash", "help"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn subcommand_help_uses_clap_display_help() {
        let parsed = parse_from(["pennydash", "summary", "--help"]);
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.kind(), ErrorKind::DisplayHelp);
        }
    }
}
