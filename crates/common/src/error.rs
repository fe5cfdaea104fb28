//! Common error types for DecayViz

use thiserror::Error;

/// Common error type used across DecayViz crates
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid input was provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unknown unit code
    #[error("Unknown {kind} '{code}', expected one of: {expected}")]
    UnknownUnit {
        kind: &'static str,
        code: String,
        expected: String,
    },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using the common Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Create an unknown unit error listing the accepted codes
    pub fn unknown_unit(kind: &'static str, code: impl Into<String>, expected: &[&str]) -> Self {
        Self::UnknownUnit {
            kind,
            code: code.into(),
            expected: expected.join(", "),
        }
    }
}
