//! Bump settings for one sensitivity category.

use basket_curves::BumpPolicy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Validate, ValidationError};

/// Which sides of a finite difference are bumped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SideSelection {
    /// Central difference: bump down and up.
    #[default]
    Both,
    /// Forward difference against the base price.
    UpperOnly,
    /// Backward difference against the base price.
    LowerOnly,
}

impl SideSelection {
    /// Returns true if the upward bump is evaluated.
    #[must_use]
    pub fn has_upper(&self) -> bool {
        matches!(self, Self::Both | Self::UpperOnly)
    }

    /// Returns true if the downward bump is evaluated.
    #[must_use]
    pub fn has_lower(&self) -> bool {
        matches!(self, Self::Both | Self::LowerOnly)
    }
}

/// Finite-difference formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MethodKind {
    /// Slope against the realised distance.
    #[default]
    Derivative,
    /// Summed price impact.
    Absolute,
    /// Relative price change.
    RelativeChange,
    /// Slope against the weighted basket move.
    DerivativeBasket,
}

/// Denominator of a basket slope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum BasketScaling {
    /// Weighted realised distances of the constituents.
    #[default]
    RealizedDistance,
    /// Weighted original bump magnitudes of the constituents.
    OriginalMagnitude,
}

/// Parallel or per-pillar bumping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Bucketing {
    /// One bump over the whole sheet.
    #[default]
    Parallel,
    /// One bump per distinct pillar of the sheet.
    PerPillar,
}

/// How one sensitivity category is bumped and reduced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BumpSettings {
    /// Bump size (1bp = 0.0001 for rates, 0.01 for a 1% relative bump).
    pub magnitude: Decimal,

    /// Absolute or relative bump.
    #[serde(default)]
    pub policy: BumpPolicy,

    /// Sides to bump.
    #[serde(default)]
    pub sides: SideSelection,

    /// Finite-difference formula.
    #[serde(default)]
    pub method: MethodKind,

    /// Scale applied to the finite difference.
    #[serde(default = "default_norm")]
    pub norm: Decimal,

    /// Denominator used by basket slopes.
    #[serde(default)]
    pub basket_scaling: BasketScaling,

    /// Parallel or per-pillar.
    #[serde(default)]
    pub bucketing: Bucketing,
}

fn default_norm() -> Decimal {
    Decimal::ONE
}

impl BumpSettings {
    /// Creates settings with a central derivative and unit norm.
    #[must_use]
    pub fn new(magnitude: Decimal, policy: BumpPolicy) -> Self {
        Self {
            magnitude,
            policy,
            sides: SideSelection::default(),
            method: MethodKind::default(),
            norm: default_norm(),
            basket_scaling: BasketScaling::default(),
            bucketing: Bucketing::default(),
        }
    }

    /// Absolute bump of `bps` basis points.
    #[must_use]
    pub fn basis_points(bps: i64) -> Self {
        Self::new(Decimal::new(bps, 4), BumpPolicy::Absolute)
    }

    /// Relative bump of `pct` percent.
    #[must_use]
    pub fn percent(pct: i64) -> Self {
        Self::new(Decimal::new(pct, 2), BumpPolicy::Relative)
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

    /// Sets the bucketing.
    #[must_use]
    pub fn with_bucketing(mut self, bucketing: Bucketing) -> Self {
        self.bucketing = bucketing;
        self
    }
}

impl Validate for BumpSettings {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.magnitude.is_zero() {
            errors.push(ValidationError::with_rule(
                "magnitude",
                "Bump magnitude must be non-zero",
                "non_zero_magnitude",
            ));
        }

        if self.policy == BumpPolicy::Relative && self.magnitude.abs() >= Decimal::ONE {
            errors.push(ValidationError::with_rule(
                "magnitude",
                "Relative bump must lie strictly between -100% and +100%",
                "relative_range",
            ));
        }

        if self.norm.is_zero() {
            errors.push(ValidationError::with_rule(
                "norm",
                "Norm must be non-zero",
                "non_zero_norm",
            ));
        }

        errors
    }
}
