use std::io;

use pennydash_core::{CoreError, SuccessEnvelope, failure_from_error};
use serde::Serialize;

pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    serialize_json_pretty(success)
}

pub fn render_error_json(error: &CoreError) -> io::Result<String> {
    serialize_json_pretty(&failure_from_error(error))
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use pennydash_core::{CoreError, SuccessEnvelope};
    use serde_json::{Value, json};

    use super::{render_error_json, render_success_json};

    #[test]
    fn success_json_keeps_the_envelope() {
        let success = SuccessEnvelope {
            ok: true,
            command: "summary".to_string(),
            version: "0.1.0".to_string(),
            data: json!({ "income": 10.0 }),
        };
        let rendered = render_success_json(&success);
        assert!(rendered.is_ok());
        if let Ok(body) = rendered {
            let parsed = serde_json::from_str::<Value>(&body);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert_eq!(value["ok"], json!(true));
                assert_eq!(value["command"], json!("summary"));
                assert_eq!(value["data"]["income"], json!(10.0));
            }
        }
    }

    #[test]
    fn error_json_nests_code_message_and_data() {
        let error = CoreError::invalid_argument_for_command("bad period", Some("summary"));
        let rendered = render_error_json(&error);
        assert!(rendered.is_ok());
        if let Ok(body) = rendered {
            let parsed = serde_json::from_str::<Value>(&body);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert_eq!(value["error"]["code"], json!("invalid_argument"));
                assert_eq!(value["error"]["message"], json!("bad period"));
                assert_eq!(value["error"]["data"]["command_hint"], json!("summary"));
                assert_eq!(value["ok"], json!(false));
            }
        }
    }
}
