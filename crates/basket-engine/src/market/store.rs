//! Market data store.
//!
//! Bootstrapped curves keyed by `(symbol, quote side)` and, once a bump is
//! registered, by `(symbol, quote side, bump)`. The cache is append-only:
//! every variant is bootstrapped at most once and kept for the lifetime of
//! the store.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use basket_core::{QuoteSide, Symbol};
use basket_curves::{Bootstrapper, BumpSpec, MarketCurve, QuoteSheet, Selector};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, info, warn};

use super::basket::Basket;
use crate::error::{EngineError, EngineResult};
use crate::sensitivity::{DeltaRule, DeltaScope, FdDelta};

/// Curves bootstrapped from one bumped sheet.
#[derive(Debug, Clone, Default)]
struct BumpVariant {
    curves: BTreeMap<QuoteSide, Arc<MarketCurve>>,
    distances: BTreeMap<QuoteSide, f64>,
}

struct SymbolEntry {
    sheet: QuoteSheet,
    bootstrapper: Arc<dyn Bootstrapper>,
    base: BTreeMap<QuoteSide, Arc<MarketCurve>>,
    variants: HashMap<BumpSpec, BumpVariant>,
}

/// Keyed cache of bootstrapped curves and their bumped variants.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use basket_core::{QuoteSide, Symbol, SymbolKind, Tenor};
/// use basket_curves::prelude::*;
/// use basket_engine::market::MarketDataStore;
/// use basket_engine::sensitivity::DeltaRule;
/// use rust_decimal_macros::dec;
///
/// let store = MarketDataStore::new();
/// let repo = Symbol::new("AAPL.REPO", SymbolKind::Repo);
/// let sheet = QuoteSheet::new(vec![
///     Instrument::new(InstrumentKind::RepoRate, Tenor::years_of(1), QuoteSet::mid(0.01)),
/// ]);
/// store.add_sheet(repo.clone(), sheet, Arc::new(PillarBootstrapper::new())).unwrap();
///
/// let deltas = store
///     .register_bump(&repo, &DeltaRule::parallel(dec!(0.0001), BumpPolicy::Absolute))
///     .unwrap();
/// let up = &deltas[0].upper[&repo];
///
/// let bumped = store.get(&repo, Some(up), QuoteSide::Mid).unwrap();
/// assert!((bumped.as_zero().unwrap().zero_rate(1.0) - 0.0101).abs() < 1e-12);
/// assert!((store.get_distance(&repo, Some(up), QuoteSide::Mid).unwrap() - 0.0001).abs() < 1e-12);
/// ```
pub struct MarketDataStore {
    entries: DashMap<Symbol, SymbolEntry>,
    baskets: DashMap<Symbol, Basket>,
    deltas: DashMap<Symbol, Vec<FdDelta>>,
    bootstrap_count: AtomicUsize,
    fallback_count: AtomicUsize,
}

impl MarketDataStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            baskets: DashMap::new(),
            deltas: DashMap::new(),
            bootstrap_count: AtomicUsize::new(0),
            fallback_count: AtomicUsize::new(0),
        }
    }

    /// Registers a sheet and bootstraps its base curves on every quote side.
    pub fn add_sheet(
        &self,
        symbol: Symbol,
        sheet: QuoteSheet,
        bootstrapper: Arc<dyn Bootstrapper>,
    ) -> EngineResult<()> {
        if self.baskets.contains_key(&symbol) {
            return Err(EngineError::DuplicateSymbol(symbol));
        }
        match self.entries.entry(symbol) {
            Entry::Occupied(e) => Err(EngineError::DuplicateSymbol(e.key().clone())),
            Entry::Vacant(v) => {
                let base = self.bootstrap(v.key(), &sheet, bootstrapper.as_ref());
                info!(
                    symbol = %v.key(),
                    kind = %v.key().kind(),
                    instruments = sheet.len(),
                    sides = base.len(),
                    "registered quote sheet"
                );
                v.insert(SymbolEntry {
                    sheet,
                    bootstrapper,
                    base: base.into_iter().map(|(s, c)| (s, Arc::new(c))).collect(),
                    variants: HashMap::new(),
                });
                Ok(())
            }
        }
    }

    /// Registers a basket of already or later registered single names.
    pub fn register_basket(&self, symbol: Symbol, basket: Basket) -> EngineResult<()> {
        if self.entries.contains_key(&symbol) {
            return Err(EngineError::DuplicateSymbol(symbol));
        }
        match self.baskets.entry(symbol) {
            Entry::Occupied(e) => Err(EngineError::DuplicateSymbol(e.key().clone())),
            Entry::Vacant(v) => {
                info!(
                    basket = %v.key(),
                    constituents = basket.constituents().len(),
                    "registered basket"
                );
                v.insert(basket);
                Ok(())
            }
        }
    }

    fn bootstrap(
        &self,
        symbol: &Symbol,
        sheet: &QuoteSheet,
        bootstrapper: &dyn Bootstrapper,
    ) -> BTreeMap<QuoteSide, MarketCurve> {
        self.bootstrap_count.fetch_add(1, Ordering::Relaxed);
        let curves = bootstrapper.bootstrap(sheet);
        for side in sheet.complete_sides() {
            if !curves.contains_key(&side) {
                warn!(%symbol, %side, "quote side omitted from bootstrap");
            }
        }
        curves
    }

    /// Returns a curve.
    ///
    /// Without a bump this is the base curve. With a bump it is the cached
    /// variant for that exact key; a bump that was never registered degrades
    /// to the base curve, counted by [`fallback_count`](Self::fallback_count).
    /// A registered variant whose side failed to bootstrap is not found.
    pub fn get(
        &self,
        symbol: &Symbol,
        bump: Option<&BumpSpec>,
        side: QuoteSide,
    ) -> EngineResult<Arc<MarketCurve>> {
        let entry = self
            .entries
            .get(symbol)
            .ok_or_else(|| EngineError::not_found(format!("symbol {symbol}")))?;

        if let Some(bump) = bump {
            match entry.variants.get(bump) {
                Some(variant) => {
                    return variant.curves.get(&side).cloned().ok_or_else(|| {
                        EngineError::not_found(format!("{side} curve of {symbol} bumped by {bump}"))
                    });
                }
                None => {
                    self.fallback_count.fetch_add(1, Ordering::Relaxed);
                    warn!(%symbol, %bump, %side, "bump variant not registered, using base curve");
                }
            }
        }

        entry
            .base
            .get(&side)
            .cloned()
            .ok_or_else(|| EngineError::not_found(format!("{side} curve of {symbol}")))
    }

    /// Realised move of a bump variant on one side; 0 for the base.
    pub fn get_distance(
        &self,
        symbol: &Symbol,
        bump: Option<&BumpSpec>,
        side: QuoteSide,
    ) -> EngineResult<f64> {
        let entry = self
            .entries
            .get(symbol)
            .ok_or_else(|| EngineError::not_found(format!("symbol {symbol}")))?;
        let Some(bump) = bump else {
            return Ok(0.0);
        };
        entry
            .variants
            .get(bump)
            .map(|v| v.distances.get(&side).copied().unwrap_or(0.0))
            .ok_or_else(|| {
                EngineError::not_found(format!("bump variant {bump} of {symbol}"))
            })
    }

    /// Expands a rule into deltas on `symbol` and bootstraps every bump they
    /// need that is not cached yet.
    ///
    /// A basket yields one delta spanning all constituents. Registering a
    /// structurally equal rule again changes nothing.
    pub fn register_bump(&self, symbol: &Symbol, rule: &DeltaRule) -> EngineResult<Vec<FdDelta>> {
        let (owner, deltas) = match self.baskets.get(symbol) {
            Some(basket) => (basket.key().clone(), self.expand_basket(basket.key(), &basket, rule)?),
            None => {
                let entry = self
                    .entries
                    .get(symbol)
                    .ok_or_else(|| EngineError::not_found(format!("symbol {symbol}")))?;
                (entry.key().clone(), self.expand_single(entry.key(), &entry.sheet, rule)?)
            }
        };

        let mut created = 0;
        for delta in &deltas {
            for (target, spec) in delta.bumps() {
                if self.ensure_variant(target, spec)? {
                    created += 1;
                }
            }
        }

        let mut registered = self.deltas.entry(owner).or_default();
        let mut added = 0;
        for delta in &deltas {
            if !registered.contains(delta) {
                registered.push(delta.clone());
                added += 1;
            }
        }
        info!(
            %symbol,
            deltas = deltas.len(),
            added,
            bootstrapped = created,
            "registered bump rule"
        );
        Ok(deltas)
    }

    fn expand_single(
        &self,
        symbol: &Symbol,
        sheet: &QuoteSheet,
        rule: &DeltaRule,
    ) -> EngineResult<Vec<FdDelta>> {
        let method = rule.fd_method(None)?;
        let targets = std::slice::from_ref(symbol);
        let deltas = match &rule.scope {
            DeltaScope::Selector(selector) => {
                vec![rule.delta(format!("{symbol} {selector}"), selector, targets, method)]
            }
            DeltaScope::EachPillar(kind) => {
                let pillars: BTreeSet<_> = match kind {
                    Some(kind) => sheet.pillars(*kind).into_iter().collect(),
                    None => sheet.iter().map(|inst| inst.pillar).collect(),
                };
                pillars
                    .into_iter()
                    .map(|pillar| {
                        let selector = match kind {
                            Some(kind) => Selector::PillarKind { pillar, kind: *kind },
                            None => Selector::Pillar(pillar),
                        };
                        rule.delta(
                            format!("{symbol} {selector}"),
                            &selector,
                            targets,
                            method.clone(),
                        )
                    })
                    .collect()
            }
        };
        Ok(deltas)
    }

    fn expand_basket(
        &self,
        symbol: &Symbol,
        basket: &Basket,
        rule: &DeltaRule,
    ) -> EngineResult<Vec<FdDelta>> {
        let DeltaScope::Selector(selector) = &rule.scope else {
            return Err(EngineError::unsupported(format!(
                "per-pillar bumps on basket {symbol}"
            )));
        };
        let targets: Vec<Symbol> = basket.symbols().cloned().collect();
        if let Some(missing) = targets.iter().find(|s| !self.entries.contains_key(*s)) {
            return Err(EngineError::not_found(format!(
                "constituent {missing} of basket {symbol}"
            )));
        }
        let method = rule.fd_method(Some(basket))?;
        Ok(vec![rule.delta(
            format!("{symbol} {selector}"),
            selector,
            &targets,
            method,
        )])
    }

    /// Bootstraps `spec` on `symbol` unless cached. Returns true if it bootstrapped.
    fn ensure_variant(&self, symbol: &Symbol, spec: &BumpSpec) -> EngineResult<bool> {
        let mut entry = self
            .entries
            .get_mut(symbol)
            .ok_or_else(|| EngineError::not_found(format!("symbol {symbol}")))?;
        if entry.variants.contains_key(spec) {
            return Ok(false);
        }

        let bumped = spec.apply(&entry.sheet);
        let curves = self.bootstrap(symbol, &bumped.sheet, entry.bootstrapper.as_ref());
        debug!(
            %symbol,
            bump = %spec,
            sides = curves.len(),
            "bootstrapped bump variant"
        );
        let variant = BumpVariant {
            curves: curves.into_iter().map(|(s, c)| (s, Arc::new(c))).collect(),
            distances: bumped.distances().clone(),
        };
        entry.variants.insert(spec.clone(), variant);
        Ok(true)
    }

    /// Symbols a composite symbol reads its market data from.
    #[must_use]
    pub fn depends_on(&self, symbol: &Symbol) -> Vec<Symbol> {
        self.baskets
            .get(symbol)
            .map(|b| b.symbols().cloned().collect())
            .unwrap_or_default()
    }

    /// A registered basket.
    pub fn basket(&self, symbol: &Symbol) -> EngineResult<Basket> {
        self.baskets
            .get(symbol)
            .map(|b| b.value().clone())
            .ok_or_else(|| EngineError::not_found(format!("basket {symbol}")))
    }

    /// Deltas registered on a symbol, in registration order.
    #[must_use]
    pub fn deltas(&self, symbol: &Symbol) -> Vec<FdDelta> {
        self.deltas
            .get(symbol)
            .map(|d| d.value().clone())
            .unwrap_or_default()
    }

    /// Symbols carrying at least one delta, sorted.
    #[must_use]
    pub fn delta_symbols(&self) -> Vec<Symbol> {
        let mut symbols: Vec<_> = self.deltas.iter().map(|e| e.key().clone()).collect();
        symbols.sort();
        symbols
    }

    /// Symbols with a registered sheet, sorted.
    #[must_use]
    pub fn symbols(&self) -> Vec<Symbol> {
        let mut symbols: Vec<_> = self.entries.iter().map(|e| e.key().clone()).collect();
        symbols.sort();
        symbols
    }

    /// Registered basket symbols, sorted.
    #[must_use]
    pub fn basket_symbols(&self) -> Vec<Symbol> {
        let mut symbols: Vec<_> = self.baskets.iter().map(|e| e.key().clone()).collect();
        symbols.sort();
        symbols
    }

    /// The base sheet of a symbol.
    #[must_use]
    pub fn sheet(&self, symbol: &Symbol) -> Option<QuoteSheet> {
        self.entries.get(symbol).map(|e| e.sheet.clone())
    }

    /// Number of bootstrapper invocations, base sheets included.
    #[must_use]
    pub fn bootstrap_count(&self) -> usize {
        self.bootstrap_count.load(Ordering::Relaxed)
    }

    /// Number of bumped reads served by the base curve.
    #[must_use]
    pub fn fallback_count(&self) -> usize {
        self.fallback_count.load(Ordering::Relaxed)
    }
}

impl Default for MarketDataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MarketDataStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketDataStore")
            .field("symbols", &self.entries.len())
            .field("baskets", &self.baskets.len())
            .field("bootstrap_count", &self.bootstrap_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basket_config::SideSelection;
    use basket_core::{SymbolKind, Tenor};
    use basket_curves::{BumpPolicy, InstrumentKind, PillarBootstrapper, QuoteSet};
    use basket_curves::{CurveError, CurveResult, Instrument};
    use rust_decimal_macros::dec;

    fn repo() -> Symbol {
        Symbol::new("X.REPO", SymbolKind::Repo)
    }

    fn repo_sheet() -> QuoteSheet {
        QuoteSheet::new(vec![
            Instrument::new(InstrumentKind::RepoRate, Tenor::years_of(1), QuoteSet::mid(0.01)),
            Instrument::new(InstrumentKind::RepoRate, Tenor::years_of(2), QuoteSet::two_way(0.011, 0.013)),
        ])
    }

    fn store() -> MarketDataStore {
        let store = MarketDataStore::new();
        store
            .add_sheet(repo(), repo_sheet(), Arc::new(PillarBootstrapper::new()))
            .unwrap();
        store
    }

    fn bp() -> DeltaRule {
        DeltaRule::parallel(dec!(0.0001), BumpPolicy::Absolute)
    }

    #[test]
    fn test_base_curve_is_cached() {
        let store = store();
        let a = store.get(&repo(), None, QuoteSide::Mid).unwrap();
        let b = store.get(&repo(), None, QuoteSide::Mid).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(store.bootstrap_count(), 1);
        // the 1Y instrument has no bid
        assert!(matches!(
            store.get(&repo(), None, QuoteSide::Bid),
            Err(EngineError::NotFound(_))
        ));
    }

    #[test]
    fn test_duplicate_sheet_rejected() {
        let store = store();
        let err = store
            .add_sheet(repo(), repo_sheet(), Arc::new(PillarBootstrapper::new()))
            .unwrap_err();
        assert!(matches!(err, EngineError::DuplicateSymbol(_)));
    }

    #[test]
    fn test_register_bump_is_idempotent() {
        let store = store();
        let first = store.register_bump(&repo(), &bp()).unwrap();
        assert_eq!(store.bootstrap_count(), 3);
        let second = store.register_bump(&repo(), &bp()).unwrap();
        assert_eq!(store.bootstrap_count(), 3);
        assert_eq!(first, second);
        assert_eq!(store.deltas(&repo()).len(), 1);
        assert_eq!(store.delta_symbols(), vec![repo()]);
    }

    #[test]
    fn test_per_pillar_rule() {
        let store = store();
        let rule = bp().with_scope(DeltaScope::EachPillar(None));
        let deltas = store.register_bump(&repo(), &rule).unwrap();
        assert_eq!(deltas.len(), 2);
        assert_eq!(deltas[0].label, "X.REPO Pillar(1Y)");
        // two pillars, two sides
        assert_eq!(store.bootstrap_count(), 5);

        let up_2y = &deltas[1].upper[&repo()];
        let curve = store.get(&repo(), Some(up_2y), QuoteSide::Mid).unwrap();
        let zero = curve.as_zero().unwrap();
        assert!((zero.zero_rate(1.0) - 0.01).abs() < 1e-15);
        assert!((zero.zero_rate(2.0) - 0.0121).abs() < 1e-12);
    }

    #[test]
    fn test_per_pillar_rule_of_one_kind() {
        let store = MarketDataStore::new();
        let ois = Symbol::new("USD.OIS", SymbolKind::OisDiscount);
        let sheet = QuoteSheet::new(vec![
            Instrument::new(InstrumentKind::Deposit, Tenor::years_of(1), QuoteSet::mid(0.02)),
            Instrument::new(InstrumentKind::Swap, Tenor::years_of(1), QuoteSet::mid(0.025)),
            Instrument::new(InstrumentKind::Swap, Tenor::years_of(2), QuoteSet::mid(0.03)),
        ]);
        store
            .add_sheet(ois.clone(), sheet.clone(), Arc::new(PillarBootstrapper::new()))
            .unwrap();

        let rule = bp().with_scope(DeltaScope::EachPillar(Some(InstrumentKind::Swap)));
        let deltas = store.register_bump(&ois, &rule).unwrap();
        assert_eq!(deltas.len(), 2);
        assert_eq!(deltas[0].label, "USD.OIS Pillar(1Y)/Swap");

        // the deposit sharing the 1Y pillar is left alone
        let bumped = deltas[0].upper[&ois].apply(&sheet);
        assert!(bumped.sheet.shares_instrument(&sheet, 0));
        assert!(!bumped.sheet.shares_instrument(&sheet, 1));
        assert!(bumped.sheet.shares_instrument(&sheet, 2));
        assert!((bumped.distance(QuoteSide::Mid) - 0.0001).abs() < 1e-15);
    }

    #[test]
    fn test_unregistered_bump_falls_back_to_base() {
        let store = store();
        let stray = BumpSpec::absolute(Selector::All, dec!(0.5));
        let base = store.get(&repo(), None, QuoteSide::Mid).unwrap();
        let got = store.get(&repo(), Some(&stray), QuoteSide::Mid).unwrap();
        assert!(Arc::ptr_eq(&base, &got));
        assert_eq!(store.fallback_count(), 1);
        assert!(store.get_distance(&repo(), Some(&stray), QuoteSide::Mid).is_err());
        assert_eq!(store.get_distance(&repo(), None, QuoteSide::Mid).unwrap(), 0.0);
    }

    #[test]
    fn test_missing_symbol() {
        let store = store();
        let other = Symbol::new("Y.REPO", SymbolKind::Repo);
        assert!(matches!(
            store.get(&other, None, QuoteSide::Mid),
            Err(EngineError::NotFound(_))
        ));
        assert!(store.register_bump(&other, &bp()).is_err());
        assert!(store.sheet(&other).is_none());
    }

    struct FailingUpBootstrapper;

    impl Bootstrapper for FailingUpBootstrapper {
        fn bootstrap_side(&self, sheet: &QuoteSheet, side: QuoteSide) -> CurveResult<MarketCurve> {
            let curve = PillarBootstrapper::new().bootstrap_side(sheet, side)?;
            match curve.as_zero()?.zero_rate(1.0) {
                r if r > 0.01 => Err(CurveError::invalid_value("rate too high")),
                _ => Ok(curve),
            }
        }
    }

    #[test]
    fn test_failed_variant_surfaces_on_read() {
        let store = MarketDataStore::new();
        store
            .add_sheet(repo(), repo_sheet(), Arc::new(FailingUpBootstrapper))
            .unwrap();
        let deltas = store
            .register_bump(&repo(), &bp().with_sides(SideSelection::UpperOnly))
            .unwrap();
        let up = &deltas[0].upper[&repo()];
        assert!(matches!(
            store.get(&repo(), Some(up), QuoteSide::Mid),
            Err(EngineError::NotFound(_))
        ));
        // the variant exists, so its distance is known
        assert!(store.get_distance(&repo(), Some(up), QuoteSide::Mid).is_ok());
        assert_eq!(store.fallback_count(), 0);
    }

    #[test]
    fn test_baskets() {
        let store = MarketDataStore::new();
        for (name, spot) in [("A", 100.0), ("B", 50.0)] {
            store
                .add_sheet(
                    Symbol::equity(name),
                    QuoteSheet::new(vec![Instrument::new(
                        InstrumentKind::Spot,
                        Tenor::days(0),
                        QuoteSet::mid(spot),
                    )]),
                    Arc::new(PillarBootstrapper::new()),
                )
                .unwrap();
        }
        let basket = Basket::new([
            (Symbol::equity("A"), dec!(1)),
            (Symbol::equity("B"), dec!(2)),
        ])
        .unwrap();
        let sx = Symbol::basket("BSK");
        store.register_basket(sx.clone(), basket).unwrap();
        assert_eq!(store.depends_on(&sx), vec![Symbol::equity("A"), Symbol::equity("B")]);
        assert!(store.depends_on(&Symbol::equity("A")).is_empty());

        let rule = DeltaRule::parallel(dec!(0.01), BumpPolicy::Relative);
        let deltas = store.register_bump(&sx, &rule).unwrap();
        assert_eq!(deltas.len(), 1);
        assert!(deltas[0].is_composite());
        assert_eq!(deltas[0].upper.len(), 2);
        // two constituents, two sides, plus the two base sheets
        assert_eq!(store.bootstrap_count(), 6);

        assert!(matches!(
            store.register_bump(&sx, &rule.with_scope(DeltaScope::EachPillar(None))),
            Err(EngineError::UnsupportedType(_))
        ));
        assert!(matches!(
            store.register_basket(Symbol::basket("A"), Basket::new([(Symbol::equity("B"), dec!(1))]).unwrap()),
            Err(EngineError::DuplicateSymbol(_))
        ));
    }

    #[test]
    fn test_basket_with_missing_constituent() {
        let store = MarketDataStore::new();
        let sx = Symbol::basket("BSK");
        store
            .register_basket(sx.clone(), Basket::new([(Symbol::equity("A"), dec!(1))]).unwrap())
            .unwrap();
        assert!(matches!(
            store.register_bump(&sx, &DeltaRule::parallel(dec!(0.01), BumpPolicy::Relative)),
            Err(EngineError::NotFound(_))
        ));
        assert!(store.basket(&sx).is_ok());
        assert!(store.basket(&Symbol::basket("NONE")).is_err());
    }
}
