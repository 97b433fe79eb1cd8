//! # Basket Engine
//!
//! Market data cache and finite-difference sensitivity engine for basket
//! total return swaps.
//!
//! - **[`market`]**: the [`MarketDataStore`] of base and bumped curves, baskets,
//!   and the dependency-tracking views pricers read through
//! - **[`sensitivity`]**: bump rules, finite-difference methods, the delta ledger
//!   and the [`SensitivityEngine`] orchestrating base and bumped repricings
//! - **[`pricing`]**: the [`Pricer`] interface
//! - **[`products`]**: reference equity forward and total return swap pricers
//! - **[`book`]**: sequential and parallel book runs with per-instrument isolation
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use basket_core::{Currency, Symbol, SymbolKind, Task, TaskSet, Tenor};
//! use basket_curves::prelude::*;
//! use basket_engine::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let store = MarketDataStore::new();
//! let boot: Arc<dyn Bootstrapper> = Arc::new(PillarBootstrapper::new());
//! let spot = |v| QuoteSheet::new(vec![
//!     Instrument::new(InstrumentKind::Spot, Tenor::days(0), QuoteSet::mid(v)),
//! ]);
//! let rate = |kind, v| QuoteSheet::new(vec![
//!     Instrument::new(kind, Tenor::years_of(1), QuoteSet::mid(v)),
//! ]);
//!
//! let aapl = Symbol::equity("AAPL");
//! store.add_sheet(aapl.clone(), spot(100.0), boot.clone()).unwrap();
//! store.add_sheet(repo_symbol(&aapl), rate(InstrumentKind::RepoRate, 0.01), boot.clone()).unwrap();
//! store.add_sheet(dividend_symbol(&aapl), rate(InstrumentKind::DividendYield, 0.02), boot).unwrap();
//!
//! let repo_rule = DeltaRule::parallel(dec!(0.0001), BumpPolicy::Absolute);
//! store.register_bump(&repo_symbol(&aapl), &repo_rule).unwrap();
//!
//! let engine = SensitivityEngine::new(Arc::new(store));
//! let request = PricingRequest::new(TaskSet::from_tasks([Task::RepoDelta]), Currency::USD);
//! let forward = EquityForward::level(aapl.clone(), 1.0, Currency::USD);
//! let result = engine.run(&ForwardPricer, &forward, &request).unwrap();
//!
//! // dF/dr = F * T
//! let repo_delta = result.ledger.total_for(&repo_symbol(&aapl));
//! assert!((repo_delta - result.valuation.value).abs() < 1e-6);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod book;
pub mod error;
pub mod market;
pub mod pricing;
pub mod products;
pub mod sensitivity;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::book::{price_book, price_book_parallel, Book, BookResult, InstrumentResult};
    pub use crate::error::{EngineError, EngineResult};
    pub use crate::market::{Basket, BumpContext, MarketDataStore, MarketView, TrackingMarket};
    pub use crate::pricing::{LegValuation, Pricer, PricingRequest, Valuation};
    pub use crate::products::{
        dividend_symbol, repo_symbol, CollateralScheme, Discounting, EquityForward,
        EquityUnderlying, ForwardPricer, FundingLeg, TotalReturnSwap, TrsPricer,
    };
    pub use crate::sensitivity::{
        register_configured_bumps, DeltaKey, DeltaLedger, DeltaRule, DeltaScope, FdDelta,
        FdMethod, SensitivityEngine, SensitivityResult,
    };
}

pub use error::{EngineError, EngineResult};
pub use market::{MarketDataStore, MarketView};
pub use pricing::Pricer;
pub use sensitivity::SensitivityEngine;
