//! Read interface consumed by pricers.

use std::collections::BTreeMap;
use std::sync::Arc;

use basket_core::{Currency, QuoteSide, Symbol};
use basket_curves::{BumpSpec, MarketCurve};

use super::basket::Basket;
use crate::error::EngineResult;

/// Bumps active for one repricing, at most one per symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BumpContext {
    bumps: BTreeMap<Symbol, BumpSpec>,
}

impl BumpContext {
    /// The unbumped context.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Bump applied to a symbol, if any.
    #[must_use]
    pub fn bump_for(&self, symbol: &Symbol) -> Option<&BumpSpec> {
        self.bumps.get(symbol)
    }

    /// Returns true if no symbol is bumped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bumps.is_empty()
    }

    /// Number of bumped symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bumps.len()
    }
}

impl From<BTreeMap<Symbol, BumpSpec>> for BumpContext {
    fn from(bumps: BTreeMap<Symbol, BumpSpec>) -> Self {
        Self { bumps }
    }
}

/// Market data as seen by a pricing function.
pub trait MarketView {
    /// The curve of a symbol on one quote side.
    fn curve(&self, symbol: &Symbol, side: QuoteSide) -> EngineResult<Arc<MarketCurve>>;

    /// Composition of a basket symbol.
    fn basket(&self, symbol: &Symbol) -> EngineResult<Basket>;

    /// Spot of a single name.
    fn spot(&self, symbol: &Symbol, side: QuoteSide) -> EngineResult<f64> {
        Ok(self.curve(symbol, side)?.as_spot()?)
    }

    /// Units of `reporting` per unit of `currency`, read on the Mid side.
    fn fx_rate(&self, currency: Currency, reporting: Currency) -> EngineResult<f64> {
        if currency == reporting {
            return Ok(1.0);
        }
        let symbol = Symbol::currency(currency);
        Ok(self.curve(&symbol, QuoteSide::Mid)?.as_fx_spot()?)
    }
}
