//! Dependency-tracking proxy.
//!
//! Wraps the store for one top-level pricing call. Every curve read through
//! one of its views is recorded, which tells the orchestrator which symbols
//! (and on which quote sides) the product actually depends on. Basket reads
//! are recorded separately, since a basket has no curve of its own.

use std::collections::BTreeSet;
use std::sync::Arc;

use basket_core::{QuoteSide, Symbol};
use basket_curves::MarketCurve;
use parking_lot::Mutex;

use super::basket::Basket;
use super::store::MarketDataStore;
use super::view::{BumpContext, MarketView};
use crate::error::EngineResult;

/// Store wrapper recording the `(symbol, side)` pairs read in a pass.
///
/// One instance serves one pricing call at a time; concurrent calls sharing a
/// store each use their own proxy.
#[derive(Debug)]
pub struct TrackingMarket {
    store: Arc<MarketDataStore>,
    dependencies: Mutex<BTreeSet<(Symbol, QuoteSide)>>,
    composites: Mutex<BTreeSet<Symbol>>,
}

impl TrackingMarket {
    /// Creates a proxy over a shared store.
    #[must_use]
    pub fn new(store: Arc<MarketDataStore>) -> Self {
        Self {
            store,
            dependencies: Mutex::new(BTreeSet::new()),
            composites: Mutex::new(BTreeSet::new()),
        }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &MarketDataStore {
        &self.store
    }

    /// Clears the recorded dependencies.
    pub fn reset_dependencies(&self) {
        self.dependencies.lock().clear();
        self.composites.lock().clear();
    }

    /// Snapshot of the recorded dependencies.
    #[must_use]
    pub fn dependencies(&self) -> BTreeSet<(Symbol, QuoteSide)> {
        self.dependencies.lock().clone()
    }

    /// Snapshot of the baskets read.
    #[must_use]
    pub fn composites(&self) -> BTreeSet<Symbol> {
        self.composites.lock().clone()
    }

    /// An unbumped view.
    #[must_use]
    pub fn base(&self) -> ScenarioView<'_> {
        ScenarioView {
            market: self,
            context: None,
        }
    }

    /// A view reading bumped variants for the symbols of `context`.
    #[must_use]
    pub fn scenario<'a>(&'a self, context: &'a BumpContext) -> ScenarioView<'a> {
        ScenarioView {
            market: self,
            context: Some(context),
        }
    }
}

/// A [`MarketView`] with an explicit bump context.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioView<'a> {
    market: &'a TrackingMarket,
    context: Option<&'a BumpContext>,
}

impl ScenarioView<'_> {
    /// Returns true if the view reads bumped variants.
    #[must_use]
    pub fn is_bumped(&self) -> bool {
        self.context.is_some_and(|c| !c.is_empty())
    }
}

impl MarketView for ScenarioView<'_> {
    fn curve(&self, symbol: &Symbol, side: QuoteSide) -> EngineResult<Arc<MarketCurve>> {
        self.market
            .dependencies
            .lock()
            .insert((symbol.clone(), side));
        let bump = self.context.and_then(|c| c.bump_for(symbol));
        self.market.store.get(symbol, bump, side)
    }

    fn basket(&self, symbol: &Symbol) -> EngineResult<Basket> {
        self.market.composites.lock().insert(symbol.clone());
        self.market.store.basket(symbol)
    }
}
