//! Error types for curve operations.

use basket_core::QuoteSide;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// A curve was read as the wrong kind (e.g. a spot read as a zero curve).
    #[error("Wrong curve kind: expected {expected}, got {got}")]
    WrongCurveKind {
        /// Kind the caller asked for.
        expected: &'static str,
        /// Kind the curve actually is.
        got: &'static str,
    },

    /// Curve has no points.
    #[error("Empty curve")]
    EmptyCurve,

    /// Pillars are not strictly increasing.
    #[error("Non-monotonic pillars at index {index}: {prev:.4} >= {current:.4}")]
    NonMonotonicPillars {
        /// Index where monotonicity violation occurred.
        index: usize,
        /// Previous pillar in years.
        prev: f64,
        /// Current pillar in years.
        current: f64,
    },

    /// A quote required for bootstrapping is absent.
    #[error("Missing {side} quote for {instrument}")]
    MissingQuote {
        /// Instrument description.
        instrument: String,
        /// Side that was requested.
        side: QuoteSide,
    },

    /// The sheet cannot be bootstrapped into a single curve.
    #[error("Invalid sheet: {reason}")]
    InvalidSheet {
        /// Description of the problem.
        reason: String,
    },

    /// Invalid numeric value.
    #[error("Invalid value: {reason}")]
    InvalidValue {
        /// Description of the problem.
        reason: String,
    },
}

impl CurveError {
    /// Creates a wrong curve kind error.
    #[must_use]
    pub fn wrong_kind(expected: &'static str, got: &'static str) -> Self {
        Self::WrongCurveKind { expected, got }
    }

    /// Creates an invalid sheet error.
    #[must_use]
    pub fn invalid_sheet(reason: impl Into<String>) -> Self {
        Self::InvalidSheet {
            reason: reason.into(),
        }
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }
}
