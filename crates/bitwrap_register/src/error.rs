//! Error types for register and configuration validation.

use thiserror::Error;

/// Errors that can occur while building registers or configurations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A parameter lies outside its documented domain.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A register name could not be parsed.
    #[error("invalid register '{input}': {reason}")]
    InvalidRegister {
        /// The text that failed to parse.
        input: String,
        /// Reason why it was rejected.
        reason: String,
    },

    /// A preset name could not be parsed.
    #[error("unknown preset '{0}' (expected 'long-long' or 'int32')")]
    UnknownPreset(String),
}

impl Error {
    /// Creates an invalid configuration error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    /// Creates an invalid register error.
    pub fn register(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRegister {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for register operations.
pub type Result<T> = std::result::Result<T, Error>;
