mod cli;
mod dispatch;
mod logging;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use pennydash_core::CoreError;
use stdout_io::write_stdout_text;

const ROOT_HELP: &str = "pennydash - personal finance dashboard numbers

Usage:
  pennydash <command> [path]

Start here:
  pennydash summary transactions.json
  pennydash summary --help
";

const TOP_LEVEL_HELP: &str = "pennydash — personal finance dashboard numbers

USAGE: pennydash <command> [options] [path]

Read a transaction export (JSON array, dashboard JSON or CSV) from a file,
or from stdin with `-`, and print the numbers behind the dashboard:
  pennydash summary <path>                     Income, expense, savings and balance
  pennydash series <path>                      Running balance per day
  pennydash categories <path>                  Expense totals per category
  pennydash recent <path>                      Most recent transactions
  pennydash budget --budget 20000 <path>       This month against a monthly budget

Common options:
  --period <this-month|last-month|last-3-months|last-year|all>
  --card <id>                                  Only one card's transactions
  --as-of YYYY-MM-DD                           Evaluate periods on another day
  --json                                       Machine-readable output

Settings live in $PENNYDASH_HOME/config.json (default ~/.pennydash).
Set PENNYDASH_LOG=debug to see diagnostics on stderr.
Run `pennydash <command> --help` for accepted formats and fields.
";

fn main() -> ExitCode {
    logging::init_tracing();
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }
    let parsed = cli::Cli::try_parse();
    let cli = match parsed {
        Ok(value) => value,
        Err(err) => {
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let body = if is_top_level_help_request(&raw_args) {
                    TOP_LEVEL_HELP.to_string()
                } else {
                    err.to_string()
                };
                if write_stdout_text(&body).is_err() {
                    return Err(ExitCode::from(2));
                }
                return Ok(ExitCode::SUCCESS);
            }
            let command_hint = if matches!(
                err.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::InvalidValue
                    | ErrorKind::ValueValidation
                    | ErrorKind::WrongNumberOfValues
                    | ErrorKind::UnknownArgument
            ) {
                command_from_args(&raw_args)
            } else {
                None
            };
            let clean_message = strip_clap_boilerplate(&err.to_string());
            let parse_error =
                CoreError::invalid_argument_for_command(&clean_message, command_hint);
            let mode = infer_requested_output_mode(&raw_args);
            if output::print_failure(&parse_error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            return Err(ExitCode::from(1));
        }
    };
    let mode = output::mode_for_command(&cli.command);

    let dispatched = dispatch::dispatch(&cli);
    match dispatched {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            tracing::debug!(code = %error.code, "command failed");
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Strips clap's trailing boilerplate (Usage line, "For more information" hint)
/// so our "What to do next" section is the single source of guidance.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed
        .trim_start_matches("error: ")
        .trim_end()
        .to_string()
}

/// The subcommand named in raw args, for `pennydash <command> --help` hints.
fn command_from_args(raw_args: &[String]) -> Option<&'static str> {
    let first = raw_args.get(1)?;
    ["summary", "series", "categories", "recent", "budget"]
        .into_iter()
        .find(|command| *command == first.as_str())
}

fn exit_code_for_error(error: &CoreError) -> ExitCode {
    if is_internal_error(error) {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

fn is_internal_error(error: &CoreError) -> bool {
    error.code.starts_with("internal_")
}

#[cfg(test)]
mod tests {
    use pennydash_core::CoreError;

    use super::{command_from_args, is_internal_error, strip_clap_boilerplate};

    #[test]
    fn clap_boilerplate_is_removed() {
        let message = "error: invalid value 'x' for '--period <PERIOD>'\n\nUsage: pennydash summary";
        assert_eq!(
            strip_clap_boilerplate(message),
            "invalid value 'x' for '--period <PERIOD>'"
        );
    }

    #[test]
    fn command_hint_comes_from_first_argument() {
        let args = ["pennydash", "budget", "--threshold", "85"].map(str::to_string);
        assert_eq!(command_from_args(&args), Some("budget"));
        let unknown = ["pennydash", "report"].map(str::to_string);
        assert_eq!(command_from_args(&unknown), None);
    }

    #[test]
    fn only_internal_codes_map_to_exit_two() {
        assert!(is_internal_error(&CoreError::internal_serialization("x")));
        assert!(is_internal_error(&CoreError::home_unresolved("x")));
        assert!(!is_internal_error(&CoreError::invalid_source("x")));
    }
}
