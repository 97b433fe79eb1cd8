//! Basket composition.

use std::collections::{BTreeMap, BTreeSet};

use basket_core::Symbol;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// One single name of a basket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketConstituent {
    /// Single-name equity symbol.
    pub symbol: Symbol,
    /// Number of units per basket.
    pub weight: Decimal,
}

/// Weighted collection of single names treated as one underlying.
///
/// A basket has no quote sheet of its own: its market data lives on the
/// constituents, which the store reports through `depends_on`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basket {
    constituents: Vec<BasketConstituent>,
}

impl Basket {
    /// Creates a basket, rejecting empty or repeated constituents.
    pub fn new(constituents: impl IntoIterator<Item = (Symbol, Decimal)>) -> EngineResult<Self> {
        let constituents: Vec<_> = constituents
            .into_iter()
            .map(|(symbol, weight)| BasketConstituent { symbol, weight })
            .collect();

        if constituents.is_empty() {
            return Err(EngineError::configuration("basket has no constituents"));
        }
        let mut seen = BTreeSet::new();
        for c in &constituents {
            if !seen.insert(&c.symbol) {
                return Err(EngineError::configuration(format!(
                    "constituent {} appears twice",
                    c.symbol
                )));
            }
        }
        Ok(Self { constituents })
    }

    /// Constituents in registration order.
    #[must_use]
    pub fn constituents(&self) -> &[BasketConstituent] {
        &self.constituents
    }

    /// Constituent symbols in registration order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.constituents.iter().map(|c| &c.symbol)
    }

    /// Returns true if `symbol` is a constituent.
    #[must_use]
    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.symbols().any(|s| s == symbol)
    }

    /// Exact weights keyed by constituent.
    #[must_use]
    pub fn weights(&self) -> BTreeMap<Symbol, Decimal> {
        self.constituents
            .iter()
            .map(|c| (c.symbol.clone(), c.weight))
            .collect()
    }

    /// Weight of a constituent as a float, 0 if absent.
    #[must_use]
    pub fn weight(&self, symbol: &Symbol) -> f64 {
        self.constituents
            .iter()
            .find(|c| &c.symbol == symbol)
            .and_then(|c| c.weight.to_f64())
            .unwrap_or(0.0)
    }
}
