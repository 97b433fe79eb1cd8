//! # Basket Curves
//!
//! Market inputs of the basket risk engine.
//!
//! This crate provides:
//!
//! - **Quote sheets**: [`QuoteSheet`] of [`Instrument`]s carrying Mid/Bid/Ask quotes
//! - **Market curves**: [`MarketCurve`] tagged variants (spot, zero, dividend yield, FX)
//! - **Bootstrap**: the [`Bootstrapper`] interface and the reference [`PillarBootstrapper`]
//! - **Bumping**: [`Selector`] predicates and value-typed [`BumpSpec`] perturbations
//!
//! ## Quick Start
//!
//! ```rust
//! use basket_core::{QuoteSide, Tenor};
//! use basket_curves::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let sheet = QuoteSheet::new(vec![
//!     Instrument::new(InstrumentKind::RepoRate, Tenor::years_of(1), QuoteSet::mid(0.01)),
//!     Instrument::new(InstrumentKind::RepoRate, Tenor::years_of(2), QuoteSet::mid(0.012)),
//! ]);
//!
//! // +1bp on every repo quote
//! let bump = BumpSpec::absolute(Selector::All, dec!(0.0001));
//! let bumped = bump.apply(&sheet);
//! assert!((bumped.distance(QuoteSide::Mid) - 0.0001).abs() < 1e-12);
//!
//! let curves = PillarBootstrapper::new().bootstrap(&bumped.sheet);
//! let zero = curves[&QuoteSide::Mid].as_zero().unwrap();
//! assert!((zero.zero_rate(1.0) - 0.0101).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bootstrap;
pub mod bumping;
pub mod curves;
pub mod error;
pub mod instruments;
pub mod sheet;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::{BootstrapResult, Bootstrapper, PillarBootstrapper};
    pub use crate::bumping::{BumpPolicy, BumpSpec, BumpedSheet, Selector};
    pub use crate::curves::{MarketCurve, ZeroCurve};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::instruments::{Instrument, InstrumentKind, QuoteSet};
    pub use crate::sheet::QuoteSheet;
}

pub use bootstrap::{BootstrapResult, Bootstrapper, PillarBootstrapper};
pub use bumping::{BumpPolicy, BumpSpec, BumpedSheet, Selector};
pub use curves::{MarketCurve, ZeroCurve};
pub use error::{CurveError, CurveResult};
pub use instruments::{Instrument, InstrumentKind, QuoteSet};
pub use sheet::QuoteSheet;
