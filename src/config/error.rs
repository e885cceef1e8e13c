//! Configuration error types.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or checking `emit.toml`.
///
/// `path` is empty for configs built in code or parsed from a string.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read emit config `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse emit config{}", origin(.0))]
    Toml(PathBuf, #[source] toml::de::Error),

    #[error("Invalid [{field}] in emit config{}: {reason}", origin(.path))]
    Validation {
        path: PathBuf,
        field: &'static str,
        reason: String,
    },
}

fn origin(path: &Path) -> String {
    if path.as_os_str().is_empty() {
        String::new()
    } else {
        format!(" `{}`", path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_error_names_file() {
        let err = ConfigError::Io(
            PathBuf::from("emit.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        assert_eq!(err.to_string(), "Failed to read emit config `emit.toml`");
    }

    #[test]
    fn test_validation_error_display() {
        let inline = ConfigError::Validation {
            path: PathBuf::new(),
            field: "base.url",
            reason: "must not be empty".into(),
        };
        assert_eq!(inline.to_string(), "Invalid [base.url] in emit config: must not be empty");

        let from_file = ConfigError::Validation {
            path: PathBuf::from("site/emit.toml"),
            field: "base.url",
            reason: "must not be empty".into(),
        };
        assert_eq!(
            from_file.to_string(),
            "Invalid [base.url] in emit config `site/emit.toml`: must not be empty"
        );
    }

    #[test]
    fn test_toml_error_keeps_source() {
        let source = toml::from_str::<toml::Value>("[base").unwrap_err();
        let err = ConfigError::Toml(PathBuf::from("emit.toml"), source);

        assert_eq!(err.to_string(), "Failed to parse emit config `emit.toml`");
        assert!(std::error::Error::source(&err).is_some());
    }
}
