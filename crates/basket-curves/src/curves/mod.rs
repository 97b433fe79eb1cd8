//! Bootstrapped market curves.
//!
//! A [`MarketCurve`] is the immutable artifact a bootstrapper produces for one
//! (symbol, quote side). Downstream pricers read it through the typed
//! accessors, which fail with [`CurveError::WrongCurveKind`] on a mismatch.

mod zero;

pub use zero::ZeroCurve;

use crate::error::{CurveError, CurveResult};

/// Closed set of curve kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum MarketCurve {
    /// Spot price of a single name.
    Spot(f64),
    /// Continuously compounded zero rate curve (discount, repo, projection).
    Zero(ZeroCurve),
    /// Continuous dividend yield term structure.
    DividendYield(ZeroCurve),
    /// FX spot, reporting currency per unit of foreign currency.
    FxSpot(f64),
}

impl MarketCurve {
    /// Human-readable kind name.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Spot(_) => "Spot",
            Self::Zero(_) => "Zero",
            Self::DividendYield(_) => "DividendYield",
            Self::FxSpot(_) => "FxSpot",
        }
    }

    /// Reads a spot price.
    pub fn as_spot(&self) -> CurveResult<f64> {
        match self {
            Self::Spot(spot) => Ok(*spot),
            other => Err(CurveError::wrong_kind("Spot", other.kind_name())),
        }
    }

    /// Reads a zero rate curve.
    pub fn as_zero(&self) -> CurveResult<&ZeroCurve> {
        match self {
            Self::Zero(curve) => Ok(curve),
            other => Err(CurveError::wrong_kind("Zero", other.kind_name())),
        }
    }

    /// Reads a dividend yield curve.
    pub fn as_dividend_yield(&self) -> CurveResult<&ZeroCurve> {
        match self {
            Self::DividendYield(curve) => Ok(curve),
            other => Err(CurveError::wrong_kind("DividendYield", other.kind_name())),
        }
    }

    /// Reads an FX spot rate.
    pub fn as_fx_spot(&self) -> CurveResult<f64> {
        match self {
            Self::FxSpot(rate) => Ok(*rate),
            other => Err(CurveError::wrong_kind("FxSpot", other.kind_name())),
        }
    }
}
