//! Unified error types for api-changelog.
//!
//! The diff and analytics core never fails; these errors cover loading
//! snapshots and changelogs, configuration and writing output.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for api-changelog operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ChangelogError {
    /// Errors while decoding a snapshot, changelog or history file
    #[error("Failed to parse {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Unknown document format '{0}' (expected .json, .yaml or .yml)")]
    UnknownFormat(String),

    #[error("Invalid JSON document: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML document: {0}")]
    InvalidYaml(String),
}

/// Convenient Result type for api-changelog operations
pub type Result<T> = std::result::Result<T, ChangelogError>;

impl ChangelogError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: Some(path.into()),
            message: source.to_string(),
            source,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<std::io::Error> for ChangelogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ChangelogError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse("JSON document", ParseErrorKind::InvalidJson(err.to_string()))
    }
}

impl From<serde_yaml::Error> for ChangelogError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::parse("YAML document", ParseErrorKind::InvalidYaml(err.to_string()))
    }
}

impl From<crate::config::ConfigFileError> for ChangelogError {
    fn from(err: crate::config::ConfigFileError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Extension trait for adding context to errors.
///
/// ```ignore
/// use api_changelog::error::ErrorContext;
///
/// let content = std::fs::read_to_string(path)
///     .with_context(|| format!("reading {}", path.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// Prepend context to the error's existing context.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Lazily computed variant of [`ErrorContext::context`].
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<ChangelogError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: ChangelogError, new_ctx: &str) -> ChangelogError {
    match err {
        ChangelogError::Parse {
            context: existing,
            source,
        } => ChangelogError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ChangelogError::Io {
            path,
            message,
            source,
        } => ChangelogError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        ChangelogError::Config(msg) => ChangelogError::Config(chain_context(new_ctx, &msg)),
        ChangelogError::Validation(msg) => ChangelogError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// `"new: existing"`, or just `new` when nothing exists yet.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ChangelogError::io("/specs/v2.json", io_err);
        assert!(err.to_string().contains("/specs/v2.json"));
    }

    #[test]
    fn test_json_error_conversion() {
        let err: ChangelogError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(
            err,
            ChangelogError::Parse {
                source: ParseErrorKind::InvalidJson(_),
                ..
            }
        ));
    }

    #[test]
    fn test_context_chaining() {
        fn inner() -> Result<()> {
            Err(ChangelogError::parse(
                "base",
                ParseErrorKind::UnknownFormat("txt".to_string()),
            ))
        }

        let result = inner().context("middle").context("outer");
        match result {
            Err(ChangelogError::Parse { context, .. }) => {
                assert_eq!(context, "outer: middle: base");
            }
            _ => panic!("Expected Parse error"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;
        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "unused"
        });
        assert!(!called);

        let err_result: Result<i32> = Err(ChangelogError::validation("bad"));
        let err = err_result.with_context(|| "checking history").unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: checking history: bad");
    }
}
