//! Pricing interface.
//!
//! The engine treats pricing as an opaque collaborator invoked once per
//! scenario. It may be closed-form or simulation based; the engine only sees
//! the aggregate value and its optional legs.

use basket_core::{Currency, TaskSet};

use crate::error::{EngineError, EngineResult};
use crate::market::MarketView;

/// What a caller wants computed for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingRequest {
    /// Requested tasks.
    pub tasks: TaskSet,
    /// Currency of the reported value and deltas.
    pub reporting_currency: Currency,
}

impl PricingRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(tasks: TaskSet, reporting_currency: Currency) -> Self {
        Self {
            tasks,
            reporting_currency,
        }
    }

    /// Price only, reported in `currency`.
    #[must_use]
    pub fn price_only(currency: Currency) -> Self {
        Self::new(TaskSet::price_only(), currency)
    }
}

/// Value of one independently priced leg, in its own currency.
#[derive(Debug, Clone, PartialEq)]
pub struct LegValuation {
    /// Leg name, e.g. `equity` or `funding`.
    pub name: String,
    /// Leg currency.
    pub currency: Currency,
    /// Present value.
    pub value: f64,
}

/// Result of one pricing call.
#[derive(Debug, Clone, PartialEq)]
pub struct Valuation {
    /// Currency of `value`.
    pub currency: Currency,
    /// Aggregate present value.
    pub value: f64,
    /// Optional per-leg breakdown.
    pub legs: Vec<LegValuation>,
}

impl Valuation {
    /// A value with no legs.
    #[must_use]
    pub fn new(currency: Currency, value: f64) -> Self {
        Self {
            currency,
            value,
            legs: Vec::new(),
        }
    }

    /// Adds a leg.
    #[must_use]
    pub fn with_leg(mut self, name: impl Into<String>, currency: Currency, value: f64) -> Self {
        self.legs.push(LegValuation {
            name: name.into(),
            currency,
            value,
        });
        self
    }

    /// A leg by name.
    #[must_use]
    pub fn leg(&self, name: &str) -> Option<&LegValuation> {
        self.legs.iter().find(|l| l.name == name)
    }

    /// Converts the value and every leg into `reporting` at the view's FX spots.
    pub fn convert(&self, market: &dyn MarketView, reporting: Currency) -> EngineResult<Valuation> {
        let value = self.value * market.fx_rate(self.currency, reporting)?;
        let legs = self
            .legs
            .iter()
            .map(|leg| {
                let value = leg.value * market.fx_rate(leg.currency, reporting)?;
                if !value.is_finite() {
                    return Err(EngineError::pricing(format!(
                        "non-finite value {value} on leg {}",
                        leg.name
                    )));
                }
                Ok(LegValuation {
                    name: leg.name.clone(),
                    currency: reporting,
                    value,
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;
        if !value.is_finite() {
            return Err(EngineError::pricing(format!("non-finite value {value}")));
        }
        Ok(Valuation {
            currency: reporting,
            value,
            legs,
        })
    }
}

/// A pricing function for one product type.
pub trait Pricer: Send + Sync {
    /// The product priced.
    type Product: Send + Sync;

    /// Prices `product` against `market`.
    ///
    /// `is_base` is true for the unbumped pass, which runs once per call and
    /// before any scenario.
    fn price(
        &self,
        product: &Self::Product,
        market: &dyn MarketView,
        request: &PricingRequest,
        is_base: bool,
    ) -> EngineResult<Valuation>;
}
