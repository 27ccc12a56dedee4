//! Error types for report and export operations.

use thiserror::Error;

/// Errors that can occur while rendering or exporting.
#[derive(Debug, Error)]
pub enum Error {
    /// Output format name was not recognized.
    #[error("unknown output format '{0}' (expected text, json, yaml or csv)")]
    UnknownFormat(String),

    /// CSV writing error.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// YAML serialization error.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// I/O error while flushing output.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Rendered output was not UTF-8.
    #[error("output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type alias for report operations.
pub type Result<T> = std::result::Result<T, Error>;
