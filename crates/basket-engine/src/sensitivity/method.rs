//! Finite-difference formulas.
//!
//! Each method reduces a base price and up to two bumped scenarios to one
//! number. A missing side is replaced by the base price at distance 0, so
//! every method also covers one-sided differences.
//!
//! | Method | Formula |
//! |--------|---------|
//! | `Derivative` | `(U - L) / (dU - dL) * norm` |
//! | `Absolute` | `((U - B) + (B - L)) * norm` |
//! | `RelativeChange` | `(L - U) / U * norm` |
//! | `DerivativeBasket` | `Derivative` against the weighted basket move |

use std::collections::BTreeMap;
use std::fmt;

use basket_config::BasketScaling;
use basket_core::Symbol;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::warn;

/// Price of one scenario and the market move that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Scenario price.
    pub price: f64,
    /// Realised market move.
    pub distance: f64,
}

impl Observation {
    /// Creates an observation.
    #[must_use]
    pub fn new(price: f64, distance: f64) -> Self {
        Self { price, distance }
    }
}

/// Move of one bumped symbol within a scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolMove {
    /// Realised distance on the resolved quote side.
    pub distance: f64,
    /// Bump magnitude as specified.
    pub magnitude: f64,
}

/// Finite-difference method with its normalisation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FdMethod {
    /// Slope against the realised distance.
    Derivative {
        /// Output scale.
        norm: Decimal,
    },
    /// Summed price impact of both sides.
    Absolute {
        /// Output scale.
        norm: Decimal,
    },
    /// Relative change of the lower price against the upper.
    RelativeChange {
        /// Output scale.
        norm: Decimal,
    },
    /// Slope against the weighted move of a basket's constituents.
    DerivativeBasket {
        /// Constituent weights.
        weights: BTreeMap<Symbol, Decimal>,
        /// Output scale.
        norm: Decimal,
        /// Realised distances or original magnitudes.
        scaling: BasketScaling,
    },
}

impl FdMethod {
    /// Derivative with unit norm.
    #[must_use]
    pub fn derivative() -> Self {
        Self::Derivative { norm: Decimal::ONE }
    }

    /// Norm as a float.
    #[must_use]
    pub fn norm(&self) -> f64 {
        let norm = match self {
            Self::Derivative { norm }
            | Self::Absolute { norm }
            | Self::RelativeChange { norm }
            | Self::DerivativeBasket { norm, .. } => norm,
        };
        norm.to_f64().unwrap_or(f64::NAN)
    }

    /// Aggregate distance of one scenario.
    ///
    /// Basket slopes weight each constituent's move; the other methods take
    /// the mean realised distance over the bumped symbols.
    #[must_use]
    pub fn scenario_distance(&self, moves: &BTreeMap<Symbol, SymbolMove>) -> f64 {
        match self {
            Self::DerivativeBasket {
                weights, scaling, ..
            } => moves
                .iter()
                .map(|(symbol, m)| {
                    let w = weights
                        .get(symbol)
                        .and_then(ToPrimitive::to_f64)
                        .unwrap_or(0.0);
                    match scaling {
                        BasketScaling::RealizedDistance => w * m.distance,
                        BasketScaling::OriginalMagnitude => w * m.magnitude,
                    }
                })
                .sum(),
            _ if moves.is_empty() => 0.0,
            _ => moves.values().map(|m| m.distance).sum::<f64>() / moves.len() as f64,
        }
    }

    /// Reduces base, lower and upper scenarios to a sensitivity.
    #[must_use]
    pub fn evaluate(&self, base: f64, lower: Option<Observation>, upper: Option<Observation>) -> f64 {
        let l = lower.unwrap_or(Observation::new(base, 0.0));
        let u = upper.unwrap_or(Observation::new(base, 0.0));
        let norm = self.norm();

        match self {
            Self::Derivative { .. } | Self::DerivativeBasket { .. } => {
                let dx = u.distance - l.distance;
                if dx == 0.0 {
                    warn!(method = %self, "zero realised distance in finite difference");
                }
                (u.price - l.price) / dx * norm
            }
            Self::Absolute { .. } => ((u.price - base) + (base - l.price)) * norm,
            Self::RelativeChange { .. } => (l.price - u.price) / u.price * norm,
        }
    }
}

impl Default for FdMethod {
    fn default() -> Self {
        Self::derivative()
    }
}

impl fmt::Display for FdMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Derivative { norm } => write!(f, "Derivative(x{norm})"),
            Self::Absolute { norm } => write!(f, "Absolute(x{norm})"),
            Self::RelativeChange { norm } => write!(f, "RelativeChange(x{norm})"),
            Self::DerivativeBasket { norm, scaling, .. } => {
                write!(f, "DerivativeBasket({scaling:?}, x{norm})")
            }
        }
    }
}
