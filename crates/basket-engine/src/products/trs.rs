//! Total return swap on a single name or a basket.

use basket_core::{Currency, QuoteSide, Symbol, Tenor};

use super::{equity_forward, CollateralScheme};
use crate::error::{EngineError, EngineResult};
use crate::market::MarketView;
use crate::pricing::{Pricer, PricingRequest, Valuation};

/// Performance underlying of a swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EquityUnderlying {
    /// One equity.
    Single(Symbol),
    /// A basket registered in the store.
    Basket(Symbol),
}

impl EquityUnderlying {
    /// Underlying symbol.
    #[must_use]
    pub fn symbol(&self) -> &Symbol {
        match self {
            Self::Single(s) | Self::Basket(s) => s,
        }
    }
}

/// Floating funding leg paid against the equity performance.
#[derive(Debug, Clone, PartialEq)]
pub struct FundingLeg {
    /// Projection curve of the floating rate.
    pub forward_curve: Symbol,
    /// Funding notional.
    pub notional: f64,
    /// Spread over the floating rate.
    pub spread: f64,
    /// Leg currency.
    pub currency: Currency,
}

impl FundingLeg {
    /// Creates a leg with no spread.
    #[must_use]
    pub fn new(forward_curve: Symbol, notional: f64, currency: Currency) -> Self {
        Self {
            forward_curve,
            notional,
            spread: 0.0,
            currency,
        }
    }

    /// Sets the spread.
    #[must_use]
    pub fn with_spread(mut self, spread: f64) -> Self {
        self.spread = spread;
        self
    }
}

/// Discounting curves for each collateral scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discounting {
    /// Collateral agreement in force.
    pub scheme: CollateralScheme,
    /// Overnight-indexed discount curve.
    pub ois: Symbol,
    /// Libor discount curve.
    pub libor: Symbol,
}

impl Discounting {
    /// The curve selected by the scheme.
    #[must_use]
    pub fn curve(&self) -> &Symbol {
        match self.scheme {
            CollateralScheme::Ois => &self.ois,
            CollateralScheme::Libor => &self.libor,
        }
    }
}

/// Receive equity performance, pay funding, single period to maturity.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalReturnSwap {
    /// Performance underlying.
    pub underlying: EquityUnderlying,
    /// Equity notional.
    pub notional: f64,
    /// Underlying level at trade date.
    pub initial_level: f64,
    /// Currency of the equity leg.
    pub equity_currency: Currency,
    /// Maturity.
    pub maturity: Tenor,
    /// Funding leg.
    pub funding: FundingLeg,
    /// Discounting.
    pub discounting: Discounting,
}

impl TotalReturnSwap {
    fn validate(&self) -> EngineResult<()> {
        if self.maturity.years() <= 0.0 {
            return Err(EngineError::pricing(format!(
                "maturity {} is not in the future",
                self.maturity
            )));
        }
        if self.initial_level <= 0.0 || !self.initial_level.is_finite() {
            return Err(EngineError::pricing(format!(
                "initial level must be positive, got {}",
                self.initial_level
            )));
        }
        Ok(())
    }

    /// Forward level of the underlying at `t`.
    fn forward_level(&self, market: &dyn MarketView, t: f64) -> EngineResult<f64> {
        match &self.underlying {
            EquityUnderlying::Single(equity) => equity_forward(market, equity, t),
            EquityUnderlying::Basket(symbol) => {
                let basket = market.basket(symbol)?;
                let mut level = 0.0;
                for equity in basket.symbols() {
                    level += basket.weight(equity) * equity_forward(market, equity, t)?;
                }
                Ok(level)
            }
        }
    }
}

/// Closed-form total return swap pricer.
///
/// The equity leg is worth `N * (F / I - 1) * DF` and the funding leg
/// `-Nf * (L + s) * T * DF`, with `L` the simple forward rate implied by the
/// projection curve and `DF` read from the collateral curve. The aggregate is
/// reported in the funding currency.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrsPricer;

impl Pricer for TrsPricer {
    type Product = TotalReturnSwap;

    fn price(
        &self,
        trs: &TotalReturnSwap,
        market: &dyn MarketView,
        request: &PricingRequest,
        is_base: bool,
    ) -> EngineResult<Valuation> {
        if is_base {
            trs.validate()?;
        }
        let t = trs.maturity.years();

        let discount = market.curve(trs.discounting.curve(), QuoteSide::Mid)?;
        let df = discount.as_zero()?.discount_factor(t);

        let forward = trs.forward_level(market, t)?;
        let equity = trs.notional * (forward / trs.initial_level - 1.0) * df;

        let projection = market.curve(&trs.funding.forward_curve, QuoteSide::Mid)?;
        let libor = (1.0 / projection.as_zero()?.discount_factor(t) - 1.0) / t;
        let funding = -trs.funding.notional * (libor + trs.funding.spread) * t * df;

        let reporting = request.reporting_currency;
        let cross = market.fx_rate(trs.equity_currency, reporting)?
            / market.fx_rate(trs.funding.currency, reporting)?;

        Ok(Valuation::new(trs.funding.currency, funding + equity * cross)
            .with_leg("equity", trs.equity_currency, equity)
            .with_leg("funding", trs.funding.currency, funding))
    }
}
