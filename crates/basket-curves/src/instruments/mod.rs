//! Quote sheet instruments.
//!
//! An instrument is one line of a quote sheet: what it is, where it sits on
//! the curve, and up to three quotes (Mid/Bid/Ask).

mod quotes;

pub use quotes::QuoteSet;

use std::fmt;

use basket_core::{Symbol, Tenor};
use serde::{Deserialize, Serialize};

/// Type of a quoted instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InstrumentKind {
    /// Spot price of a single name.
    Spot,
    /// Continuously compounded zero rate.
    ZeroRate,
    /// Money-market deposit rate (simple, ACT/365).
    Deposit,
    /// Par swap rate, treated as a zero rate at the pillar.
    Swap,
    /// Repo rate.
    RepoRate,
    /// Continuous dividend yield.
    DividendYield,
    /// FX spot, units of reporting currency per unit of foreign currency.
    FxSpot,
}

impl InstrumentKind {
    /// Returns true for instruments quoted as a rate on a term structure.
    #[must_use]
    pub fn is_rate(&self) -> bool {
        matches!(
            self,
            Self::ZeroRate | Self::Deposit | Self::Swap | Self::RepoRate | Self::DividendYield
        )
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A quoted instrument on a sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// Instrument type.
    pub kind: InstrumentKind,
    /// Maturity point on the curve.
    pub pillar: Tenor,
    /// Tenor of the referenced rate (e.g. the 3M of a 3M-Libor swap).
    pub tenor: Option<Tenor>,
    /// Underlying single name, for instruments quoted per constituent.
    pub underlying: Option<Symbol>,
    /// Market quotes.
    pub quotes: QuoteSet,
}

impl Instrument {
    /// Creates an instrument with no tenor or underlying.
    #[must_use]
    pub fn new(kind: InstrumentKind, pillar: Tenor, quotes: QuoteSet) -> Self {
        Self {
            kind,
            pillar,
            tenor: None,
            underlying: None,
            quotes,
        }
    }

    /// Sets the referenced rate tenor.
    #[must_use]
    pub fn with_tenor(mut self, tenor: Tenor) -> Self {
        self.tenor = Some(tenor);
        self
    }

    /// Sets the underlying single name.
    #[must_use]
    pub fn with_underlying(mut self, underlying: Symbol) -> Self {
        self.underlying = Some(underlying);
        self
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.pillar)?;
        if let Some(tenor) = self.tenor {
            write!(f, " ({tenor})")?;
        }
        if let Some(underlying) = &self.underlying {
            write!(f, " on {underlying}")?;
        }
        Ok(())
    }
}
