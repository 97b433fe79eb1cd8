//! Error types for core identifiers.

use thiserror::Error;

/// A specialized Result type for core parsing operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while parsing or validating core identifiers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A tenor label could not be parsed.
    #[error("Invalid tenor '{label}': {reason}")]
    InvalidTenor {
        /// The offending label.
        label: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Unknown currency code.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Unknown quote side name.
    #[error("Unknown quote side: {0}")]
    UnknownQuoteSide(String),

    /// Unknown task name.
    #[error("Unknown task: {0}")]
    UnknownTask(String),
}
