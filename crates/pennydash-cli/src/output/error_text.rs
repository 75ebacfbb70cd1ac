use pennydash_core::CoreError;
use serde_json::Value;

pub fn render_error(error: &CoreError) -> String {
    let mut lines = vec![
        headline(&error.code).to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
    ];
    lines.extend(source_details(error.data.as_ref()));
    lines.push(String::new());
    lines.push("What to do next:".to_string());

    if error.recovery_steps.is_empty() {
        lines.push(format!("  1. {}", fallback_step(&error.code)));
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}

fn headline(code: &str) -> &'static str {
    match code {
        "invalid_source" | "source_schema_mismatch" => {
            "The transactions in this source could not be read."
        }
        "invalid_config" => "The pennydash settings could not be loaded.",
        _ if code.starts_with("internal_") => "pennydash hit an internal problem.",
        _ => "The dashboard numbers could not be computed.",
    }
}

fn fallback_step(code: &str) -> &'static str {
    if code.starts_with("internal_") {
        "Re-run with PENNYDASH_LOG=debug and check stderr for details."
    } else {
        "Retry the command."
    }
}

/// Extra lines for source errors: the detected format and missing CSV headers.
fn source_details(data: Option<&Value>) -> Vec<String> {
    let Some(data) = data else {
        return Vec::new();
    };
    let mut lines = Vec::new();

    if let Some(received) = data.get("received_format").and_then(Value::as_str) {
        lines.push(format!("  Received: {received}"));
    }

    let headers = |key: &str| {
        data.get(key)
            .and_then(Value::as_array)
            .map(|values| values.iter().filter_map(Value::as_str).collect::<Vec<_>>())
    };
    if let (Some(required), Some(actual)) = (headers("required_headers"), headers("actual_headers"))
    {
        let missing = required
            .into_iter()
            .filter(|header| !actual.contains(header))
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            lines.push(format!("  Missing:  {}", missing.join(", ")));
        }
    }

    lines
}
