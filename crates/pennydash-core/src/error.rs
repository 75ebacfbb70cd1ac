use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

pub(crate) const SOURCE_HELP_COMMAND: &str = "pennydash summary --help";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct CoreError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl CoreError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `pennydash {cmd} --help` for usage."),
            None => "Run `pennydash --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn invalid_source(message: &str) -> Self {
        Self::new(
            "invalid_source",
            message,
            vec![
                "Provide a JSON array, a dashboard JSON object, or CSV with headers.".to_string(),
                format!("Run `{SOURCE_HELP_COMMAND}` to review the accepted shapes."),
            ],
        )
    }

    pub fn invalid_source_format(message: &str, received_format: &str) -> Self {
        Self::invalid_source(message).with_data(json!({
            "received_format": received_format,
            "supported_formats": ["json_array", "json_dashboard", "csv"],
        }))
    }

    pub fn source_schema_mismatch(
        required_headers: Vec<String>,
        optional_headers: Vec<String>,
        actual_headers: Vec<String>,
    ) -> Self {
        Self::new(
            "source_schema_mismatch",
            "CSV headers do not satisfy the transaction schema.",
            vec![
                "Include all required headers; optional headers may be omitted.".to_string(),
                "Do not include unknown headers.".to_string(),
                format!("Run `{SOURCE_HELP_COMMAND}` to review required and optional fields."),
            ],
        )
        .with_data(json!({
            "required_headers": required_headers,
            "optional_headers": optional_headers,
            "actual_headers": actual_headers,
        }))
    }

    pub fn source_unreadable(location: &str, detail: &str) -> Self {
        Self::invalid_argument_with_recovery(
            &format!("Could not read source `{location}`: {detail}"),
            vec![
                "Verify the path exists and is readable.".to_string(),
                "Or pipe the document via stdin using `-` as the path.".to_string(),
            ],
        )
    }

    pub fn invalid_config(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "invalid_config",
            &format!("Configuration at `{location}` is invalid: {detail}"),
            vec![
                format!("Fix or remove `{location}`; defaults apply when it is absent."),
                "Or set `PENNYDASH_HOME` to a directory with a valid config.json.".to_string(),
            ],
        )
    }

    pub fn home_unresolved(detail: &str) -> Self {
        Self::new(
            "internal_home_unresolved",
            &format!("Could not resolve the pennydash home directory: {detail}"),
            vec!["Set `PENNYDASH_HOME` to an existing directory.".to_string()],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
