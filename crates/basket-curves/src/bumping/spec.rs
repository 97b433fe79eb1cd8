//! Bump specifications.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use basket_core::QuoteSide;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::selector::Selector;
use crate::sheet::QuoteSheet;

/// How a bump magnitude is applied to a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum BumpPolicy {
    /// `quote + magnitude`
    #[default]
    Absolute,
    /// `quote * (1 + magnitude)`
    Relative,
}

/// A single market perturbation.
///
/// Magnitudes are [`Decimal`] so that equality and hashing are exact: two
/// specifications built from the same parameters are the same cache key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BumpSpec {
    /// Instruments to perturb.
    pub selector: Selector,
    /// Signed bump size.
    pub magnitude: Decimal,
    /// Absolute or relative application.
    pub policy: BumpPolicy,
}

impl BumpSpec {
    /// Creates a bump specification.
    #[must_use]
    pub fn new(selector: Selector, magnitude: Decimal, policy: BumpPolicy) -> Self {
        Self {
            selector,
            // trailing zeros dropped so labels print alike
            magnitude: magnitude.normalize(),
            policy,
        }
    }

    /// Additive bump.
    #[must_use]
    pub fn absolute(selector: Selector, magnitude: Decimal) -> Self {
        Self::new(selector, magnitude, BumpPolicy::Absolute)
    }

    /// Multiplicative bump.
    #[must_use]
    pub fn relative(selector: Selector, magnitude: Decimal) -> Self {
        Self::new(selector, magnitude, BumpPolicy::Relative)
    }

    /// The same bump in the opposite direction.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self::new(self.selector.clone(), -self.magnitude, self.policy)
    }

    /// Returns true if applying the bump leaves every quote unchanged.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.magnitude.is_zero()
    }

    /// Magnitude as a float.
    #[must_use]
    pub fn magnitude_f64(&self) -> f64 {
        self.magnitude.to_f64().unwrap_or(f64::NAN)
    }

    fn shift(&self, quote: f64, m: f64) -> f64 {
        match self.policy {
            BumpPolicy::Absolute => quote + m,
            BumpPolicy::Relative => quote * (1.0 + m),
        }
    }

    /// Applies the bump to a sheet.
    ///
    /// Unmatched instruments are shared with the input sheet; matched ones
    /// are copied and every quoted side rewritten. The realised distance of
    /// each side is the mean move over the matched instruments quoting it.
    #[must_use]
    pub fn apply(&self, sheet: &QuoteSheet) -> BumpedSheet {
        let m = self.magnitude_f64();
        let mut moves: BTreeMap<QuoteSide, (f64, usize)> = BTreeMap::new();

        let instruments = sheet
            .instruments()
            .iter()
            .map(|inst| {
                if !self.selector.matches(inst) {
                    return Arc::clone(inst);
                }
                let mut bumped = inst.as_ref().clone();
                for side in inst.quotes.sides() {
                    let Some(old) = inst.quotes.get(side) else {
                        continue;
                    };
                    let new = self.shift(old, m);
                    bumped.quotes.set(side, new);
                    let entry = moves.entry(side).or_insert((0.0, 0));
                    entry.0 += new - old;
                    entry.1 += 1;
                }
                Arc::new(bumped)
            })
            .collect();

        let distances = moves
            .into_iter()
            .map(|(side, (total, n))| (side, total / n as f64))
            .collect();

        BumpedSheet {
            sheet: QuoteSheet::from_shared(instruments),
            distances,
        }
    }
}

impl fmt::Display for BumpSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let policy = match self.policy {
            BumpPolicy::Absolute => "abs",
            BumpPolicy::Relative => "rel",
        };
        if self.magnitude.is_sign_negative() {
            write!(f, "{} {} {policy}", self.selector, self.magnitude)
        } else {
            write!(f, "{} +{} {policy}", self.selector, self.magnitude)
        }
    }
}

/// Result of applying a [`BumpSpec`] to a sheet.
#[derive(Debug, Clone)]
pub struct BumpedSheet {
    /// The perturbed sheet.
    pub sheet: QuoteSheet,
    distances: BTreeMap<QuoteSide, f64>,
}

impl BumpedSheet {
    /// Realised move on a quote side, 0 when nothing on that side was bumped.
    #[must_use]
    pub fn distance(&self, side: QuoteSide) -> f64 {
        self.distances.get(&side).copied().unwrap_or(0.0)
    }

    /// Realised moves per quote side.
    #[must_use]
    pub fn distances(&self) -> &BTreeMap<QuoteSide, f64> {
        &self.distances
    }
}
