//! Equity forward.

use basket_core::{Currency, Symbol};

use super::equity_forward;
use crate::error::{EngineError, EngineResult};
use crate::market::MarketView;
use crate::pricing::{Pricer, PricingRequest, Valuation};

/// Forward contract on a single name, settled at maturity.
#[derive(Debug, Clone, PartialEq)]
pub struct EquityForward {
    /// Single-name underlying.
    pub underlying: Symbol,
    /// Years to maturity.
    pub maturity: f64,
    /// Delivery price.
    pub strike: f64,
    /// Number of shares.
    pub quantity: f64,
    /// Settlement currency.
    pub currency: Currency,
}

impl EquityForward {
    /// Long one share at zero strike: the value is the forward level itself.
    #[must_use]
    pub fn level(underlying: Symbol, maturity: f64, currency: Currency) -> Self {
        Self {
            underlying,
            maturity,
            strike: 0.0,
            quantity: 1.0,
            currency,
        }
    }
}

/// Undiscounted forward value `quantity * (F - strike)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardPricer;

impl Pricer for ForwardPricer {
    type Product = EquityForward;

    fn price(
        &self,
        product: &EquityForward,
        market: &dyn MarketView,
        _request: &PricingRequest,
        is_base: bool,
    ) -> EngineResult<Valuation> {
        if is_base && (product.maturity <= 0.0 || !product.maturity.is_finite()) {
            return Err(EngineError::pricing(format!(
                "forward on {} has invalid maturity {}",
                product.underlying, product.maturity
            )));
        }
        let forward = equity_forward(market, &product.underlying, product.maturity)?;
        Ok(Valuation::new(
            product.currency,
            product.quantity * (forward - product.strike),
        ))
    }
}
