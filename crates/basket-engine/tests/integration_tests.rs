//! Integration tests for basket-engine.
//!
//! End-to-end runs of the store, the sensitivity engine and the reference
//! pricers on small but complete markets.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use approx::assert_relative_eq;
use basket_config::{BasketScaling, MethodKind, SideSelection};
use basket_core::{Category, Currency, QuoteSide, Symbol, SymbolKind, Task, TaskSet, Tenor};
use basket_curves::prelude::*;
use basket_engine::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// =============================================================================
// TEST FIXTURES
// =============================================================================

fn boot() -> Arc<dyn Bootstrapper> {
    Arc::new(PillarBootstrapper::new())
}

fn spot_sheet(spot: f64) -> QuoteSheet {
    QuoteSheet::new(vec![Instrument::new(
        InstrumentKind::Spot,
        Tenor::days(0),
        QuoteSet::mid(spot),
    )])
}

fn flat_sheet(kind: InstrumentKind, rate: f64) -> QuoteSheet {
    QuoteSheet::new(vec![
        Instrument::new(kind, Tenor::years_of(1), QuoteSet::mid(rate)),
        Instrument::new(kind, Tenor::years_of(5), QuoteSet::mid(rate)),
    ])
}

fn ois() -> Symbol {
    Symbol::new("USD.OIS", SymbolKind::OisDiscount)
}

fn libor() -> Symbol {
    Symbol::new("USD.LIBOR", SymbolKind::LiborDiscount)
}

fn projection() -> Symbol {
    Symbol::new("USD.LIBOR.3M", SymbolKind::ForwardFixing)
}

fn add_equity(store: &MarketDataStore, name: &str, spot: f64, repo: f64, div: f64) -> Symbol {
    let equity = Symbol::equity(name);
    store.add_sheet(equity.clone(), spot_sheet(spot), boot()).unwrap();
    store
        .add_sheet(repo_symbol(&equity), flat_sheet(InstrumentKind::RepoRate, repo), boot())
        .unwrap();
    store
        .add_sheet(
            dividend_symbol(&equity),
            flat_sheet(InstrumentKind::DividendYield, div),
            boot(),
        )
        .unwrap();
    equity
}

fn add_rates(store: &MarketDataStore) {
    store
        .add_sheet(ois(), flat_sheet(InstrumentKind::ZeroRate, 0.03), boot())
        .unwrap();
    store
        .add_sheet(libor(), flat_sheet(InstrumentKind::ZeroRate, 0.035), boot())
        .unwrap();
    let swaps = QuoteSheet::new(vec![
        Instrument::new(InstrumentKind::Swap, Tenor::years_of(1), QuoteSet::mid(0.032))
            .with_tenor(Tenor::months(3)),
        Instrument::new(InstrumentKind::Swap, Tenor::years_of(5), QuoteSet::mid(0.032))
            .with_tenor(Tenor::months(3)),
    ]);
    store.add_sheet(projection(), swaps, boot()).unwrap();
}

fn trs(underlying: EquityUnderlying, initial_level: f64, scheme: CollateralScheme) -> TotalReturnSwap {
    TotalReturnSwap {
        underlying,
        notional: 1_000_000.0,
        initial_level,
        equity_currency: Currency::USD,
        maturity: Tenor::years_of(1),
        funding: FundingLeg::new(projection(), 1_000_000.0, Currency::USD).with_spread(0.005),
        discounting: Discounting {
            scheme,
            ois: ois(),
            libor: libor(),
        },
    }
}

fn bp() -> DeltaRule {
    DeltaRule::parallel(dec!(0.0001), BumpPolicy::Absolute)
}

fn one_percent() -> DeltaRule {
    DeltaRule::parallel(dec!(0.01), BumpPolicy::Relative)
}

/// Counts calls through to the pillar bootstrapper.
#[derive(Default)]
struct CountingBootstrapper {
    calls: AtomicUsize,
}

impl Bootstrapper for CountingBootstrapper {
    fn bootstrap_side(&self, sheet: &QuoteSheet, side: QuoteSide) -> CurveResult<MarketCurve> {
        PillarBootstrapper::new().bootstrap_side(sheet, side)
    }

    fn bootstrap(&self, sheet: &QuoteSheet) -> BootstrapResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        PillarBootstrapper::new().bootstrap(sheet)
    }
}

/// Rejects any curve whose 1Y zero rate is above `cap`.
struct CappedBootstrapper {
    cap: f64,
}

impl Bootstrapper for CappedBootstrapper {
    fn bootstrap_side(&self, sheet: &QuoteSheet, side: QuoteSide) -> CurveResult<MarketCurve> {
        let curve = PillarBootstrapper::new().bootstrap_side(sheet, side)?;
        let rate = curve.as_zero()?.zero_rate(1.0);
        if rate > self.cap {
            return Err(CurveError::invalid_value(format!("1Y rate {rate} above cap")));
        }
        Ok(curve)
    }
}

// =============================================================================
// MARKET DATA STORE
// =============================================================================

#[test]
fn test_base_curve_identity_is_stable() {
    let store = MarketDataStore::new();
    let aapl = add_equity(&store, "AAPL", 100.0, 0.01, 0.02);

    let first = store.get(&aapl, None, QuoteSide::Mid).unwrap();
    for _ in 0..5 {
        let again = store.get(&aapl, None, QuoteSide::Mid).unwrap();
        assert!(Arc::ptr_eq(&first, &again));
    }
}

#[test]
fn test_equal_rules_bootstrap_once() {
    let store = MarketDataStore::new();
    let counter = Arc::new(CountingBootstrapper::default());
    let repo = Symbol::new("X.REPO", SymbolKind::Repo);
    store
        .add_sheet(repo.clone(), flat_sheet(InstrumentKind::RepoRate, 0.01), counter.clone())
        .unwrap();
    assert_eq!(counter.calls.load(Ordering::SeqCst), 1);

    let upper_only = bp().with_sides(SideSelection::UpperOnly);
    store.register_bump(&repo, &upper_only).unwrap();
    assert_eq!(counter.calls.load(Ordering::SeqCst), 2);

    // a separately built but equal rule
    let again = DeltaRule::parallel(dec!(0.00010), BumpPolicy::Absolute)
        .with_sides(SideSelection::UpperOnly);
    store.register_bump(&repo, &again).unwrap();
    assert_eq!(counter.calls.load(Ordering::SeqCst), 2);
    assert_eq!(store.deltas(&repo).len(), 1);

    // the lower side is new, the upper side is reused
    store.register_bump(&repo, &bp()).unwrap();
    assert_eq!(counter.calls.load(Ordering::SeqCst), 3);
    assert_eq!(store.bootstrap_count(), 3);
}

#[test]
fn test_null_bump_reproduces_base_curve() {
    let store = MarketDataStore::new();
    let repo = Symbol::new("X.REPO", SymbolKind::Repo);
    store
        .add_sheet(repo.clone(), flat_sheet(InstrumentKind::RepoRate, 0.0123), boot())
        .unwrap();

    let null = DeltaRule::parallel(Decimal::ZERO, BumpPolicy::Absolute);
    let deltas = store.register_bump(&repo, &null).unwrap();
    // +0 and -0 are the same bump
    assert_eq!(deltas[0].upper[&repo], deltas[0].lower[&repo]);
    assert_eq!(store.bootstrap_count(), 2);

    let spec = &deltas[0].upper[&repo];
    let base = store.get(&repo, None, QuoteSide::Mid).unwrap();
    let bumped = store.get(&repo, Some(spec), QuoteSide::Mid).unwrap();
    assert!(!Arc::ptr_eq(&base, &bumped));
    assert_eq!(*base, *bumped);
    assert_eq!(store.get_distance(&repo, Some(spec), QuoteSide::Mid).unwrap(), 0.0);
}

#[test]
fn test_dependencies_recorded_once_per_side() {
    let store = Arc::new(MarketDataStore::new());
    let aapl = add_equity(&store, "AAPL", 100.0, 0.01, 0.02);
    let market = TrackingMarket::new(store);

    let view = market.base();
    for _ in 0..25 {
        view.curve(&aapl, QuoteSide::Mid).unwrap();
    }
    let deps = market.dependencies();
    assert_eq!(deps.len(), 1);
    assert!(deps.contains(&(aapl, QuoteSide::Mid)));
}

// =============================================================================
// SENSITIVITIES
// =============================================================================

#[test]
fn test_forward_repo_delta_matches_analytic() {
    let store = MarketDataStore::new();
    let aapl = add_equity(&store, "AAPL", 100.0, 0.01, 0.02);
    store.register_bump(&repo_symbol(&aapl), &bp()).unwrap();

    let engine = SensitivityEngine::new(Arc::new(store));
    let request = PricingRequest::new(TaskSet::from_tasks([Task::RepoDelta]), Currency::USD);
    let forward = EquityForward::level(aapl.clone(), 1.0, Currency::USD);
    let result = engine.run(&ForwardPricer, &forward, &request).unwrap();

    let f = 100.0 * (-0.01f64).exp();
    assert_relative_eq!(result.valuation.value, f, epsilon = 1e-10);

    let (key, delta) = result.ledger.iter().next().unwrap();
    assert_eq!(key.kind, SymbolKind::Repo);
    assert_eq!(key.delta.label, "AAPL.REPO All");
    assert!((delta - f * 1.0).abs() < 1e-6, "delta {delta} vs {f}");
    assert_eq!(result.scenarios, 2);
    assert_eq!(engine.market().store().fallback_count(), 0);
}

#[test]
fn test_one_sided_forward_delta() {
    let store = MarketDataStore::new();
    let aapl = add_equity(&store, "AAPL", 100.0, 0.01, 0.02);
    store
        .register_bump(&repo_symbol(&aapl), &bp().with_sides(SideSelection::UpperOnly))
        .unwrap();
    store
        .register_bump(&dividend_symbol(&aapl), &bp().with_sides(SideSelection::LowerOnly))
        .unwrap();

    let engine = SensitivityEngine::new(Arc::new(store));
    let request = PricingRequest::new(
        TaskSet::from_tasks([Task::RepoDelta, Task::DividendDelta]),
        Currency::USD,
    );
    let forward = EquityForward::level(aapl.clone(), 2.0, Currency::USD);
    let result = engine.run(&ForwardPricer, &forward, &request).unwrap();
    assert_eq!(result.scenarios, 2);

    let f = result.valuation.value;
    let repo = result.ledger.total_for(&repo_symbol(&aapl));
    let div = result.ledger.total_for(&dividend_symbol(&aapl));
    // dF/dr = F T, dF/dq = -F T, first order error
    assert_relative_eq!(repo, 2.0 * f, max_relative = 1e-3);
    assert_relative_eq!(div, -2.0 * f, max_relative = 1e-3);
}

#[test]
fn test_per_pillar_deltas_sum_to_parallel() {
    let store = MarketDataStore::new();
    let aapl = add_equity(&store, "AAPL", 100.0, 0.01, 0.02);
    let repo = repo_symbol(&aapl);
    store.register_bump(&repo, &bp()).unwrap();
    store
        .register_bump(&repo, &bp().with_scope(DeltaScope::EachPillar(None)))
        .unwrap();
    assert_eq!(store.deltas(&repo).len(), 3);

    let engine = SensitivityEngine::new(Arc::new(store));
    let request = PricingRequest::new(TaskSet::from_tasks([Task::RepoDelta]), Currency::USD);
    let forward = EquityForward::level(aapl, 3.0, Currency::USD);
    let result = engine.run(&ForwardPricer, &forward, &request).unwrap();

    let mut parallel = 0.0;
    let mut buckets = 0.0;
    for (key, value) in result.ledger.iter() {
        if key.delta.label.ends_with("All") {
            parallel += value;
        } else {
            buckets += value;
        }
    }
    assert_relative_eq!(parallel, buckets, max_relative = 1e-6);
}

#[test]
fn test_basket_delta_is_one_entry() {
    let store = MarketDataStore::new();
    add_rates(&store);
    let a = add_equity(&store, "AAA", 100.0, 0.01, 0.02);
    let b = add_equity(&store, "BBB", 50.0, 0.01, 0.02);
    let bsk = Symbol::basket("BSK");
    store
        .register_basket(bsk.clone(), Basket::new([(a.clone(), dec!(1)), (b.clone(), dec!(2))]).unwrap())
        .unwrap();

    let realised = one_percent().with_method(MethodKind::DerivativeBasket);
    let original = realised.clone().with_basket_scaling(BasketScaling::OriginalMagnitude);
    store.register_bump(&bsk, &realised).unwrap();
    store.register_bump(&bsk, &original).unwrap();
    assert_eq!(store.deltas(&bsk).len(), 2);

    let engine = SensitivityEngine::new(Arc::new(store));
    let request = PricingRequest::new(TaskSet::from_tasks([Task::EquityDelta]), Currency::USD);
    let swap = trs(EquityUnderlying::Basket(bsk.clone()), 200.0, CollateralScheme::Ois);
    let result = engine.run(&TrsPricer, &swap, &request).unwrap();

    assert_eq!(result.ledger.len(), 2);
    assert!(result.ledger.iter().all(|(k, _)| k.symbol == bsk && k.kind == SymbolKind::Basket));

    // V is linear in the basket level
    let df = (-0.03f64).exp();
    let carry = (-0.01f64).exp();
    let slope = 1_000_000.0 * carry * df / 200.0;
    let by_method = |scaling: BasketScaling| {
        result
            .ledger
            .iter()
            .find(|(k, _)| {
                matches!(&k.delta.method, FdMethod::DerivativeBasket { scaling: s, .. } if *s == scaling)
            })
            .map(|(_, v)| v)
            .unwrap()
    };
    assert_relative_eq!(by_method(BasketScaling::RealizedDistance), slope, max_relative = 1e-9);
    // a 1% move of the basket is 2.0 in level against 0.03 of weighted magnitude
    assert_relative_eq!(
        by_method(BasketScaling::OriginalMagnitude),
        slope * 2.0 / 0.03,
        max_relative = 1e-9
    );

    // per-leg: only the equity leg moves
    let (key, _) = result.ledger.iter().next().unwrap();
    assert!(result.ledger.get_leg("funding", key).unwrap().abs() < 1e-9);
    assert!(result.ledger.get_leg("equity", key).unwrap().abs() > 0.0);
}

#[test]
fn test_collateral_scheme_selects_discount_curve() {
    let store = MarketDataStore::new();
    add_rates(&store);
    let a = add_equity(&store, "AAA", 100.0, 0.01, 0.02);
    store.register_bump(&ois(), &bp()).unwrap();
    store.register_bump(&libor(), &bp()).unwrap();
    let store = Arc::new(store);

    let request = PricingRequest::new(TaskSet::all(), Currency::USD);
    let ois_trs = trs(EquityUnderlying::Single(a.clone()), 90.0, CollateralScheme::Ois);
    let libor_trs = trs(
        EquityUnderlying::Single(a),
        90.0,
        "libor".parse().unwrap(),
    );

    let ois_result = SensitivityEngine::new(store.clone())
        .run(&TrsPricer, &ois_trs, &request)
        .unwrap();
    let libor_result = SensitivityEngine::new(store)
        .run(&TrsPricer, &libor_trs, &request)
        .unwrap();

    assert!(ois_result.valuation.value > libor_result.valuation.value);
    assert_eq!(ois_result.ledger.by_category(Category::OisDiscounting).count(), 1);
    assert_eq!(ois_result.ledger.by_category(Category::LiborDiscounting).count(), 0);
    assert_eq!(libor_result.ledger.by_category(Category::OisDiscounting).count(), 0);
    assert_eq!(libor_result.ledger.by_category(Category::LiborDiscounting).count(), 1);
}

#[test]
fn test_cross_currency_swap_fx_delta() {
    let store = MarketDataStore::new();
    add_rates(&store);
    let sap = add_equity(&store, "SAP", 120.0, 0.005, 0.015);
    let eur = Symbol::currency(Currency::EUR);
    store
        .add_sheet(
            eur.clone(),
            QuoteSheet::new(vec![Instrument::new(
                InstrumentKind::FxSpot,
                Tenor::days(0),
                QuoteSet::mid(1.1),
            )]),
            boot(),
        )
        .unwrap();
    store.register_bump(&eur, &one_percent()).unwrap();

    let mut swap = trs(EquityUnderlying::Single(sap), 100.0, CollateralScheme::Ois);
    swap.equity_currency = Currency::EUR;

    let engine = SensitivityEngine::new(Arc::new(store));
    let request = PricingRequest::new(TaskSet::from_tasks([Task::FxDelta]), Currency::USD);
    let result = engine.run(&TrsPricer, &swap, &request).unwrap();

    let equity_usd = result.valuation.leg("equity").unwrap().value;
    let funding_usd = result.valuation.leg("funding").unwrap().value;
    assert_relative_eq!(result.valuation.value, equity_usd + funding_usd, max_relative = 1e-12);

    // V = funding + equity_eur * fx
    let equity_eur = equity_usd / 1.1;
    let fx_delta = result.ledger.total_for(&eur);
    assert_relative_eq!(fx_delta, equity_eur, max_relative = 1e-8);

    let (key, _) = result.ledger.iter().next().unwrap();
    assert_eq!(key.kind, SymbolKind::Currency);
    assert_relative_eq!(result.ledger.get_leg("equity", key).unwrap(), equity_eur, max_relative = 1e-8);
    assert!(result.ledger.get_leg("funding", key).unwrap().abs() < 1e-9);
}

#[test]
fn test_configured_bumps_drive_a_full_run() {
    let store = MarketDataStore::new();
    add_rates(&store);
    let a = add_equity(&store, "AAA", 100.0, 0.01, 0.02);
    let config = basket_config::RiskConfig::standard();
    let registered = register_configured_bumps(&store, &config).unwrap();
    assert_eq!(registered, store.symbols().len());

    let engine = SensitivityEngine::new(Arc::new(store));
    let request = PricingRequest::new(TaskSet::all(), config.reporting_currency);
    let swap = trs(EquityUnderlying::Single(a), 100.0, CollateralScheme::Ois);
    let result = engine.run(&TrsPricer, &swap, &request).unwrap();

    // spot, repo, dividend, OIS and projection; Libor is not used
    assert_eq!(result.ledger.len(), 5);
    for category in [
        Category::Equity,
        Category::Repo,
        Category::Dividend,
        Category::OisDiscounting,
        Category::ForwardFixing,
    ] {
        assert_eq!(result.ledger.by_category(category).count(), 1, "{category}");
    }
}

#[test]
fn test_unused_basket_gets_no_delta() {
    let store = MarketDataStore::new();
    let a = add_equity(&store, "AAA", 100.0, 0.01, 0.02);
    let b = add_equity(&store, "BBB", 50.0, 0.01, 0.02);
    let bsk = Symbol::basket("BSK");
    store
        .register_basket(bsk.clone(), Basket::new([(a.clone(), dec!(1)), (b, dec!(2))]).unwrap())
        .unwrap();
    store.register_bump(&a, &one_percent()).unwrap();
    store
        .register_bump(&bsk, &one_percent().with_method(MethodKind::DerivativeBasket))
        .unwrap();
    let store = Arc::new(store);

    let request = PricingRequest::new(TaskSet::from_tasks([Task::EquityDelta]), Currency::USD);
    let forward = EquityForward::level(a.clone(), 1.0, Currency::USD);
    let result = SensitivityEngine::new(store.clone())
        .run(&ForwardPricer, &forward, &request)
        .unwrap();

    assert_eq!(result.ledger.len(), 1);
    let (key, delta) = result.ledger.iter().next().unwrap();
    assert_eq!(key.symbol, a);
    assert_eq!(key.kind, SymbolKind::Equity);
    assert_relative_eq!(delta, (-0.01f64).exp(), max_relative = 1e-9);
    assert_eq!(result.scenarios, 2);

    let book = Book::new().with_entry("FWD", forward);
    let booked = price_book(&store, &ForwardPricer, &book, &request);
    assert!(booked.ledger.iter().all(|(k, _)| k.kind != SymbolKind::Basket));
}

#[test]
fn test_failed_scenario_curve_fails_the_run() {
    let store = MarketDataStore::new();
    let cap = Symbol::equity("CAP");
    store.add_sheet(cap.clone(), spot_sheet(100.0), boot()).unwrap();
    store
        .add_sheet(
            repo_symbol(&cap),
            flat_sheet(InstrumentKind::RepoRate, 0.01),
            Arc::new(CappedBootstrapper { cap: 0.01 }),
        )
        .unwrap();
    store
        .add_sheet(
            dividend_symbol(&cap),
            flat_sheet(InstrumentKind::DividendYield, 0.02),
            boot(),
        )
        .unwrap();
    // the upper variant is registered but has no curve
    store
        .register_bump(&repo_symbol(&cap), &bp().with_sides(SideSelection::UpperOnly))
        .unwrap();
    store.register_bump(&dividend_symbol(&cap), &bp()).unwrap();
    let store = Arc::new(store);

    let forward = EquityForward::level(cap.clone(), 1.0, Currency::USD);
    let engine = SensitivityEngine::new(store.clone());

    let price = engine
        .run(&ForwardPricer, &forward, &PricingRequest::price_only(Currency::USD))
        .unwrap();
    assert!(price.valuation.value.is_finite());

    let dividend = PricingRequest::new(TaskSet::from_tasks([Task::DividendDelta]), Currency::USD);
    assert_eq!(engine.run(&ForwardPricer, &forward, &dividend).unwrap().ledger.len(), 1);

    let repo = PricingRequest::new(TaskSet::from_tasks([Task::RepoDelta]), Currency::USD);
    let err = engine.run(&ForwardPricer, &forward, &repo).unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)), "{err}");
    assert_eq!(store.fallback_count(), 0);

    let book = Book::new().with_entry("CAP", forward);
    let booked = price_book(&store, &ForwardPricer, &book, &repo);
    assert_eq!(booked.failed, 1);
    assert!(booked.entries[0].error.as_deref().unwrap().contains("bumped by"));
}

#[test]
fn test_unknown_collateral_scheme() {
    let err = "CSA".parse::<CollateralScheme>().unwrap_err();
    assert!(matches!(err, EngineError::UnsupportedType(_)));
}

// =============================================================================
// BOOK
// =============================================================================

fn book_store() -> Arc<MarketDataStore> {
    let store = MarketDataStore::new();
    add_rates(&store);
    let a = add_equity(&store, "AAA", 100.0, 0.01, 0.02);
    store.register_bump(&a, &one_percent()).unwrap();
    store.register_bump(&repo_symbol(&a), &bp()).unwrap();
    Arc::new(store)
}

fn book() -> Book<TotalReturnSwap> {
    Book::new()
        .with_entry(
            "GOOD",
            trs(EquityUnderlying::Single(Symbol::equity("AAA")), 95.0, CollateralScheme::Ois),
        )
        .with_entry(
            "GHOST",
            trs(EquityUnderlying::Single(Symbol::equity("GHOST")), 95.0, CollateralScheme::Ois),
        )
        .with_entry(
            "EXPIRED",
            TotalReturnSwap {
                maturity: Tenor::days(0),
                ..trs(EquityUnderlying::Single(Symbol::equity("AAA")), 95.0, CollateralScheme::Ois)
            },
        )
}

#[test]
fn test_book_isolates_failures() {
    let store = book_store();
    let request = PricingRequest::new(TaskSet::all(), Currency::USD);
    let result = price_book(&store, &TrsPricer, &book(), &request);

    assert_eq!(result.entries.len(), 3);
    assert_eq!(result.succeeded, 1);
    assert_eq!(result.failed, 2);

    let good = &result.entries[0];
    assert!(good.is_ok());
    assert!(good.valuation.as_ref().unwrap().value.is_finite());
    assert_eq!(good.ledger.len(), 2);

    for failed in &result.entries[1..] {
        assert!(!failed.error.as_deref().unwrap_or_default().is_empty());
        assert_eq!(failed.elapsed, std::time::Duration::ZERO);
        assert!(failed.valuation.is_none());
        assert!(failed.ledger.is_empty());
    }
    assert!(result.entries[1].error.as_deref().unwrap().contains("GHOST"));

    assert_eq!(result.ledger, good.ledger);
    assert_relative_eq!(result.total_value(), good.valuation.as_ref().unwrap().value);
}

#[test]
fn test_parallel_book_matches_sequential() {
    let store = book_store();
    let request = PricingRequest::new(TaskSet::all(), Currency::USD);
    let mut book = book();
    for i in 0..16 {
        book = book.with_entry(
            format!("T{i}"),
            trs(
                EquityUnderlying::Single(Symbol::equity("AAA")),
                90.0 + f64::from(i),
                CollateralScheme::Ois,
            ),
        );
    }

    let sequential = price_book(&store, &TrsPricer, &book, &request);
    let parallel = price_book_parallel(&store, &TrsPricer, &book, &request);

    assert_eq!(sequential.succeeded, parallel.succeeded);
    assert_eq!(sequential.failed, parallel.failed);
    for (s, p) in sequential.entries.iter().zip(&parallel.entries) {
        assert_eq!(s.id, p.id);
        assert_eq!(s.valuation, p.valuation);
        assert_eq!(s.ledger, p.ledger);
    }
    assert_eq!(sequential.ledger, parallel.ledger);
}

#[test]
fn test_book_survives_non_finite_maturity() {
    let store = MarketDataStore::new();
    let a = add_equity(&store, "AAA", 100.0, 0.01, 0.02);
    store.register_bump(&repo_symbol(&a), &bp()).unwrap();
    let store = Arc::new(store);

    let book = Book::new()
        .with_entry("GOOD", EquityForward::level(a.clone(), 1.0, Currency::USD))
        .with_entry("NAN", EquityForward::level(a.clone(), f64::NAN, Currency::USD))
        .with_entry("INF", EquityForward::level(a, f64::INFINITY, Currency::USD));
    let request = PricingRequest::new(TaskSet::all(), Currency::USD);

    for result in [
        price_book(&store, &ForwardPricer, &book, &request),
        price_book_parallel(&store, &ForwardPricer, &book, &request),
    ] {
        assert_eq!(result.succeeded, 1);
        assert_eq!(result.failed, 2);
        assert!(result.entries[0].is_ok());
        assert_eq!(result.entries[0].ledger.len(), 1);
        for failed in &result.entries[1..] {
            assert!(failed.error.as_deref().unwrap().contains("maturity"));
            assert_eq!(failed.elapsed, std::time::Duration::ZERO);
        }
    }
}
