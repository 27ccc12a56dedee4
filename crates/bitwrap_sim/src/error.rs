//! Error types for simulation operations.

use thiserror::Error;

/// Errors that can occur during simulation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The configuration or register was rejected.
    #[error(transparent)]
    Register(#[from] bitwrap_register::Error),

    /// A parameter specific to one simulation kind is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl Error {
    /// Returns true if the error stems from an out-of-domain parameter.
    pub const fn is_invalid_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfiguration(_)
                | Self::Register(bitwrap_register::Error::InvalidConfiguration(_))
        )
    }
}

/// Result type alias for simulation operations.
pub type Result<T> = std::result::Result<T, Error>;
