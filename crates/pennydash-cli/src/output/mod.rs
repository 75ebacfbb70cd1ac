mod dashboard_text;
mod error_text;
mod format;
mod json;
mod mode;

use std::io;

use pennydash_core::{CoreError, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &CoreError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "summary" => dashboard_text::render_summary(&success.data),
        "series" => dashboard_text::render_series(&success.data),
        "categories" => dashboard_text::render_categories(&success.data),
        "recent" => dashboard_text::render_recent(&success.data),
        "budget" => dashboard_text::render_budget(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
