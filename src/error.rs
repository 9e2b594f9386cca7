use std::path::PathBuf;

use thiserror::Error;

/// Library result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the I/O collaborators and dataset tooling.
///
/// The text engine itself never fails; every error here originates from
/// reading, writing or configuring a run.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    /// Directory traversal error
    #[error("Failed to walk corpus directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        message: String,
        hint: &'static str,
    },
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config {
            message: message.into(),
            hint,
        }
    }
}
