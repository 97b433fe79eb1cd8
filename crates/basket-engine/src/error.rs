//! Engine error types.

use basket_config::ConfigError;
use basket_core::Symbol;
use basket_curves::CurveError;
use thiserror::Error;

/// A specialized Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine error type.
///
/// None of these are retried. A side that failed to bootstrap is stored as
/// missing and only surfaces as [`EngineError::NotFound`] when read.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Invalid setup, such as a missing collaborator or an inconsistent rule.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A sheet or basket was registered twice under the same symbol.
    #[error("symbol already registered: {0}")]
    DuplicateSymbol(Symbol),

    /// Unregistered symbol, curve, basket or bump variant.
    #[error("not found: {0}")]
    NotFound(String),

    /// Unrecognised collateral scheme, selector or quote side combination.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// The pricing function rejected the product or market.
    #[error("pricing error: {0}")]
    Pricing(String),

    /// Curve error.
    #[error("curve error: {0}")]
    Curve(#[from] CurveError),

    /// Configuration loading or validation error.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// Creates a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates a not found error.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Creates an unsupported type error.
    pub fn unsupported(what: impl Into<String>) -> Self {
        Self::UnsupportedType(what.into())
    }

    /// Creates a pricing error.
    pub fn pricing(msg: impl Into<String>) -> Self {
        Self::Pricing(msg.into())
    }
}
