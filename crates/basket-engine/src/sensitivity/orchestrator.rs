//! Sensitivity orchestrator.
//!
//! One call runs a base pass, then for every requested category and every
//! delta registered on a symbol the base pass touched, reprices under the
//! delta's upper and lower contexts and reduces the prices into the ledger.
//! A basket counts as touched only when the product read its composition.
//! Errors in any scenario propagate to the caller.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use basket_core::{QuoteSide, Symbol};
use basket_curves::BumpSpec;
use tracing::debug;

use super::delta::FdDelta;
use super::ledger::{DeltaKey, DeltaLedger};
use super::method::{Observation, SymbolMove};
use crate::error::{EngineError, EngineResult};
use crate::market::{BumpContext, MarketDataStore, TrackingMarket};
use crate::pricing::{Pricer, PricingRequest, Valuation};

/// Base valuation and sensitivities of one product, in reporting currency.
#[derive(Debug, Clone)]
pub struct SensitivityResult {
    /// Base valuation converted to reporting currency.
    pub valuation: Valuation,
    /// Computed deltas.
    pub ledger: DeltaLedger,
    /// Number of bumped repricings.
    pub scenarios: usize,
}

/// One repriced scenario.
struct Scenario {
    valuation: Valuation,
    distance: f64,
}

impl Scenario {
    fn total(&self) -> Observation {
        Observation::new(self.valuation.value, self.distance)
    }

    fn leg(&self, name: &str) -> EngineResult<Observation> {
        self.valuation
            .leg(name)
            .map(|leg| Observation::new(leg.value, self.distance))
            .ok_or_else(|| EngineError::pricing(format!("leg {name} missing from scenario")))
    }
}

/// Drives base and bumped repricings for one product at a time.
///
/// Owns a private [`TrackingMarket`], so engines sharing a store may run on
/// different threads.
#[derive(Debug)]
pub struct SensitivityEngine {
    market: TrackingMarket,
}

impl SensitivityEngine {
    /// Creates an engine over a shared store.
    #[must_use]
    pub fn new(store: Arc<MarketDataStore>) -> Self {
        Self {
            market: TrackingMarket::new(store),
        }
    }

    /// The proxy the engine prices through.
    #[must_use]
    pub fn market(&self) -> &TrackingMarket {
        &self.market
    }

    /// Prices `product` and computes every requested sensitivity.
    pub fn run<P: Pricer>(
        &self,
        pricer: &P,
        product: &P::Product,
        request: &PricingRequest,
    ) -> EngineResult<SensitivityResult> {
        let reporting = request.reporting_currency;

        self.market.reset_dependencies();
        let base_view = self.market.base();
        let base = pricer
            .price(product, &base_view, request, true)?
            .convert(&base_view, reporting)?;
        let touched = self.market.dependencies();
        let composites = self.market.composites();

        let store = self.market.store();
        let mut ledger = DeltaLedger::new();
        let mut scenarios = 0;

        for category in request.tasks.categories() {
            for symbol in store
                .delta_symbols()
                .into_iter()
                .filter(|s| s.kind().category() == category)
            {
                let constituents = store.depends_on(&symbol);
                let sides = if constituents.is_empty() {
                    touched_sides(&touched, std::slice::from_ref(&symbol))
                } else if composites.contains(&symbol) {
                    touched_sides(&touched, &constituents)
                } else {
                    BTreeSet::new()
                };
                if sides.is_empty() {
                    debug!(%symbol, %category, "symbol not used by product, skipped");
                    continue;
                }
                let side = resolve_quote_side(&sides)?;

                for delta in store.deltas(&symbol) {
                    let upper = self.reprice(pricer, product, request, &delta, &delta.upper, side)?;
                    let lower = self.reprice(pricer, product, request, &delta, &delta.lower, side)?;
                    scenarios += usize::from(upper.is_some()) + usize::from(lower.is_some());

                    let key = DeltaKey::new(symbol.clone(), delta.clone());
                    let value = delta.method.evaluate(
                        base.value,
                        lower.as_ref().map(Scenario::total),
                        upper.as_ref().map(Scenario::total),
                    );
                    ledger.record(key.clone(), value);

                    for leg in &base.legs {
                        let l = lower.as_ref().map(|s| s.leg(&leg.name)).transpose()?;
                        let u = upper.as_ref().map(|s| s.leg(&leg.name)).transpose()?;
                        let leg_value = delta.method.evaluate(leg.value, l, u);
                        ledger.record_leg(&leg.name, key.clone(), leg_value);
                    }
                }
            }
        }

        Ok(SensitivityResult {
            valuation: base,
            ledger,
            scenarios,
        })
    }

    fn reprice<P: Pricer>(
        &self,
        pricer: &P,
        product: &P::Product,
        request: &PricingRequest,
        delta: &FdDelta,
        bumps: &BTreeMap<Symbol, BumpSpec>,
        side: QuoteSide,
    ) -> EngineResult<Option<Scenario>> {
        if bumps.is_empty() {
            return Ok(None);
        }

        let store = self.market.store();
        let moves = bumps
            .iter()
            .map(|(symbol, spec)| {
                let distance = store.get_distance(symbol, Some(spec), side)?;
                let magnitude = spec.magnitude_f64();
                Ok((symbol.clone(), SymbolMove { distance, magnitude }))
            })
            .collect::<EngineResult<BTreeMap<_, _>>>()?;
        let distance = delta.method.scenario_distance(&moves);

        let context = BumpContext::from(bumps.clone());
        let view = self.market.scenario(&context);
        let valuation = pricer
            .price(product, &view, request, false)?
            .convert(&view, request.reporting_currency)?;
        debug!(
            delta = %delta.label,
            %side,
            distance,
            value = valuation.value,
            "repriced scenario"
        );
        Ok(Some(Scenario {
            valuation,
            distance,
        }))
    }
}

/// Sides any of `symbols` was read on.
fn touched_sides(touched: &BTreeSet<(Symbol, QuoteSide)>, symbols: &[Symbol]) -> BTreeSet<QuoteSide> {
    touched
        .iter()
        .filter(|(s, _)| symbols.contains(s))
        .map(|(_, side)| *side)
        .collect()
}

/// Picks one quote side for a symbol read on several.
///
/// One side is used as is; of two sides the non-Mid one wins (Bid over Ask
/// when Mid is absent); with all three, Mid.
pub fn resolve_quote_side(sides: &BTreeSet<QuoteSide>) -> EngineResult<QuoteSide> {
    let non_mid: Vec<_> = sides.iter().copied().filter(|s| *s != QuoteSide::Mid).collect();
    match (sides.len(), non_mid.as_slice()) {
        (1, _) => Ok(*sides.iter().next().unwrap_or(&QuoteSide::Mid)),
        (2, [only]) => Ok(*only),
        (2, _) => Ok(QuoteSide::Bid),
        (3, _) => Ok(QuoteSide::Mid),
        (n, _) => Err(EngineError::unsupported(format!(
            "cannot resolve a quote side from {n} touched sides"
        ))),
    }
}
