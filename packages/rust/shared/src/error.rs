//! Error types for contrib-links.
//!
//! Library crates use [`ContriblinksError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all contrib-links operations.
#[derive(Debug, thiserror::Error)]
pub enum ContriblinksError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A repository or issue URL could not be built.
    #[error("invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ContriblinksError>;

impl ContriblinksError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid-URL error.
    pub fn invalid_url(url: impl Into<String>, msg: impl std::fmt::Display) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            message: msg.to_string(),
        }
    }
}
