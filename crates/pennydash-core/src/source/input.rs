use std::fs;
use std::io::{IsTerminal, Read};

use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum SourceKind {
    File,
    Stdin,
}

impl SourceKind {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Stdin => "stdin",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ResolvedSource {
    pub(crate) source_kind: SourceKind,
    pub(crate) content: String,
}

pub(crate) fn resolve_source(
    path: Option<String>,
    stdin_override: Option<String>,
) -> CoreResult<ResolvedSource> {
    match path.as_deref() {
        Some("-") | None => {
            let stdin_body = read_stdin(stdin_override)?;
            if let Some(stdin_value) = stdin_body
                && !stdin_value.trim().is_empty()
            {
                return Ok(ResolvedSource {
                    source_kind: SourceKind::Stdin,
                    content: stdin_value,
                });
            }

            if path.is_some() {
                return Err(CoreError::invalid_source(
                    "Path `-` means stdin input, but stdin was empty. Pipe a document or pass a file path.",
                ));
            }
            Err(CoreError::invalid_source(
                "No source provided. Pass a file path or pipe a document via stdin.",
            ))
        }
        Some(path_value) => {
            let file_body = fs::read_to_string(path_value)
                .map_err(|error| CoreError::source_unreadable(path_value, &error.to_string()))?;
            Ok(ResolvedSource {
                source_kind: SourceKind::File,
                content: file_body,
            })
        }
    }
}

fn read_stdin(stdin_override: Option<String>) -> CoreResult<Option<String>> {
    if let Some(value) = stdin_override {
        return Ok(Some(value));
    }

    if std::io::stdin().is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|error| CoreError::source_unreadable("stdin", &error.to_string()))?;

    if buffer.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(buffer))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::Builder;

    use super::{SourceKind, resolve_source};

    #[test]
    fn dash_path_reads_stdin_override() {
        let resolved = resolve_source(Some("-".to_string()), Some("[]".to_string()));
        assert!(resolved.is_ok());
        if let Ok(source) = resolved {
            assert_eq!(source.source_kind, SourceKind::Stdin);
            assert_eq!(source.content, "[]");
        }
    }

    #[test]
    fn empty_stdin_is_rejected() {
        let resolved = resolve_source(Some("-".to_string()), Some("   ".to_string()));
        assert!(resolved.is_err());
        if let Err(error) = resolved {
            assert_eq!(error.code, "invalid_source");
        }
    }

    #[test]
    fn file_path_is_read() {
        let dir = Builder::new().prefix("pennydash-input").tempdir();
        assert!(dir.is_ok());
        if let Ok(dir) = dir {
            let path = dir.path().join("rows.json");
            assert!(fs::write(&path, "[]").is_ok());
            let resolved = resolve_source(Some(path.display().to_string()), None);
            assert!(resolved.is_ok());
            if let Ok(source) = resolved {
                assert_eq!(source.source_kind, SourceKind::File);
            }
        }
    }

    #[test]
    fn missing_file_reports_invalid_argument() {
        let resolved = resolve_source(Some("/definitely/not/here.json".to_string()), None);
        assert!(resolved.is_err());
        if let Err(error) = resolved {
            assert_eq!(error.code, "invalid_argument");
            assert!(error.message.contains("/definitely/not/here.json"));
        }
    }
}
