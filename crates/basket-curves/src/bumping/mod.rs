//! Quote sheet bumping for finite-difference sensitivities.
//!
//! A bump is a value: a [`Selector`] choosing instruments, a signed magnitude
//! and a [`BumpPolicy`]. Two bumps with the same parameters compare and hash
//! equal, which lets the market data store bootstrap each distinct bump once.
//!
//! # Example
//!
//! ```rust
//! use basket_core::{QuoteSide, Tenor};
//! use basket_curves::bumping::{BumpSpec, Selector};
//! use basket_curves::{Instrument, InstrumentKind, QuoteSet, QuoteSheet};
//! use rust_decimal_macros::dec;
//!
//! let sheet = QuoteSheet::new(vec![
//!     Instrument::new(InstrumentKind::Spot, Tenor::days(0), QuoteSet::mid(200.0)),
//! ]);
//!
//! // +1% relative spot bump
//! let up = BumpSpec::relative(Selector::Kind(InstrumentKind::Spot), dec!(0.01));
//! let bumped = up.apply(&sheet);
//! assert!((bumped.distance(QuoteSide::Mid) - 2.0).abs() < 1e-12);
//! assert_eq!(up, BumpSpec::relative(Selector::Kind(InstrumentKind::Spot), dec!(0.010)));
//! ```

mod selector;
mod spec;

pub use selector::Selector;
pub use spec::{BumpPolicy, BumpSpec, BumpedSheet};
