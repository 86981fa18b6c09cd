//! Error types for the advisor workspace.
//!
//! Library crates use [`AdvisorError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all advisor operations.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error while fetching pages, documents, or bot updates.
    #[error("network error: {0}")]
    Network(String),

    /// HTML or JSON parsing error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (unknown program key, bad URL, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// A document could not be downloaded through the direct link.
    #[error("download error for {file_id}: {reason}")]
    Download { file_id: String, reason: String },

    /// PDF decoding or text extraction error.
    #[error("pdf error: {0}")]
    Pdf(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, AdvisorError>;

impl AdvisorError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Create a download error for a specific document.
    pub fn download(file_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Download {
            file_id: file_id.into(),
            reason: reason.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
