//! Finite-difference deltas and the rules that produce them.

use std::collections::BTreeMap;
use std::fmt;

use basket_config::{BasketScaling, BumpSettings, Bucketing, MethodKind, SideSelection};
use basket_core::Symbol;
use basket_curves::{BumpPolicy, BumpSpec, InstrumentKind, Selector};
use rust_decimal::Decimal;

use super::method::FdMethod;
use crate::error::{EngineError, EngineResult};
use crate::market::Basket;

/// One sensitivity request: bumps per symbol for each side and the formula
/// reducing them.
///
/// Equality is structural, so two identical deltas collapse to one cache
/// entry. An empty side means a one-sided difference against the base.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FdDelta {
    /// Human readable bucket name, e.g. `AAPL.REPO Pillar(1Y)`.
    pub label: String,
    /// Downward bumps.
    pub lower: BTreeMap<Symbol, BumpSpec>,
    /// Upward bumps.
    pub upper: BTreeMap<Symbol, BumpSpec>,
    /// Reduction formula.
    pub method: FdMethod,
}

impl FdDelta {
    /// Every (symbol, bump) pair the delta needs bootstrapped.
    pub fn bumps(&self) -> impl Iterator<Item = (&Symbol, &BumpSpec)> {
        self.lower.iter().chain(self.upper.iter())
    }

    /// Returns true if the delta bumps more than one symbol.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.lower.len().max(self.upper.len()) > 1
    }
}

impl fmt::Display for FdDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.label, self.method)
    }
}

/// Which instruments of a sheet a rule bumps.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeltaScope {
    /// One delta bumping the selected instruments.
    Selector(Selector),
    /// One delta per distinct pillar, optionally limited to one instrument kind.
    EachPillar(Option<InstrumentKind>),
}

/// Registration-level description of the deltas wanted on a symbol.
///
/// The store expands a rule into concrete [`FdDelta`]s against the symbol's
/// sheet (or, for a basket, across its constituents).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeltaRule {
    /// Instruments to bump.
    pub scope: DeltaScope,
    /// Upward magnitude; the lower bump is its negation.
    pub magnitude: Decimal,
    /// Absolute or relative bumps.
    pub policy: BumpPolicy,
    /// Sides to evaluate.
    pub sides: SideSelection,
    /// Reduction formula.
    pub method: MethodKind,
    /// Output scale.
    pub norm: Decimal,
    /// Denominator of basket slopes.
    pub basket_scaling: BasketScaling,
}

impl DeltaRule {
    /// Central-difference derivative of a parallel bump.
    #[must_use]
    pub fn parallel(magnitude: Decimal, policy: BumpPolicy) -> Self {
        Self {
            scope: DeltaScope::Selector(Selector::All),
            magnitude,
            policy,
            sides: SideSelection::Both,
            method: MethodKind::Derivative,
            norm: Decimal::ONE,
            basket_scaling: BasketScaling::RealizedDistance,
        }
    }

    /// Builds a rule from configured settings.
    #[must_use]
    pub fn from_settings(settings: &BumpSettings) -> Self {
        let scope = match settings.bucketing {
            Bucketing::Parallel => DeltaScope::Selector(Selector::All),
            Bucketing::PerPillar => DeltaScope::EachPillar(None),
        };
        Self {
            scope,
            magnitude: settings.magnitude,
            policy: settings.policy,
            sides: settings.sides,
            method: settings.method,
            norm: settings.norm,
            basket_scaling: settings.basket_scaling,
        }
    }

    /// Sets the scope.
    #[must_use]
    pub fn with_scope(mut self, scope: DeltaScope) -> Self {
        self.scope = scope;
        self
    }

    /// Sets the sides.
    #[must_use]
    pub fn with_sides(mut self, sides: SideSelection) -> Self {
        self.sides = sides;
        self
    }

    /// Sets the method.
    #[must_use]
    pub fn with_method(mut self, method: MethodKind) -> Self {
        self.method = method;
        self
    }

    /// Sets the norm.
    #[must_use]
    pub fn with_norm(mut self, norm: Decimal) -> Self {
        self.norm = norm;
        self
    }

    /// Sets the basket scaling.
    #[must_use]
    pub fn with_basket_scaling(mut self, scaling: BasketScaling) -> Self {
        self.basket_scaling = scaling;
        self
    }

    /// The formula for a delta on a single name or, with `basket`, on a basket.
    pub fn fd_method(&self, basket: Option<&Basket>) -> EngineResult<FdMethod> {
        let norm = self.norm;
        let method = match (self.method, basket) {
            (MethodKind::Derivative, _) => FdMethod::Derivative { norm },
            (MethodKind::Absolute, _) => FdMethod::Absolute { norm },
            (MethodKind::RelativeChange, _) => FdMethod::RelativeChange { norm },
            (MethodKind::DerivativeBasket, Some(basket)) => FdMethod::DerivativeBasket {
                weights: basket.weights(),
                norm,
                scaling: self.basket_scaling,
            },
            (MethodKind::DerivativeBasket, None) => {
                return Err(EngineError::configuration(
                    "DerivativeBasket requires a basket symbol",
                ))
            }
        };
        Ok(method)
    }

    /// Builds the delta bumping `selector` on every symbol of `targets`.
    pub(crate) fn delta(
        &self,
        label: String,
        selector: &Selector,
        targets: &[Symbol],
        method: FdMethod,
    ) -> FdDelta {
        let up = BumpSpec::new(selector.clone(), self.magnitude, self.policy);
        let down = up.negated();
        let side = |spec: &BumpSpec, enabled: bool| -> BTreeMap<Symbol, BumpSpec> {
            if !enabled {
                return BTreeMap::new();
            }
            targets
                .iter()
                .map(|symbol| (symbol.clone(), spec.clone()))
                .collect()
        };
        FdDelta {
            label,
            lower: side(&down, self.sides.has_lower()),
            upper: side(&up, self.sides.has_upper()),
            method,
        }
    }
}
