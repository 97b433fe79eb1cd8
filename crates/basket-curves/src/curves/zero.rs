//! Zero-coupon rate curve.

use crate::error::{CurveError, CurveResult};

/// Continuously compounded zero rates by pillar (years).
///
/// Linear interpolation between pillars, flat extrapolation outside them.
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroCurve {
    /// (tenor in years, zero rate) pairs, strictly increasing in tenor.
    points: Vec<(f64, f64)>,
}

impl ZeroCurve {
    /// Creates a curve from (tenor years, zero rate) points.
    pub fn new(points: Vec<(f64, f64)>) -> CurveResult<Self> {
        if points.is_empty() {
            return Err(CurveError::EmptyCurve);
        }
        for (index, pair) in points.windows(2).enumerate() {
            if pair[1].0 <= pair[0].0 {
                return Err(CurveError::NonMonotonicPillars {
                    index: index + 1,
                    prev: pair[0].0,
                    current: pair[1].0,
                });
            }
        }
        if let Some((t, r)) = points.iter().find(|(t, r)| !t.is_finite() || !r.is_finite()) {
            return Err(CurveError::invalid_value(format!(
                "non-finite point ({t}, {r})"
            )));
        }
        Ok(Self { points })
    }

    /// A flat curve.
    #[must_use]
    pub fn flat(rate: f64) -> Self {
        Self {
            points: vec![(1.0, rate)],
        }
    }

    /// Curve points.
    #[must_use]
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Zero rate at `t` years; NaN when `t` is NaN.
    #[must_use]
    pub fn zero_rate(&self, t: f64) -> f64 {
        if t.is_nan() {
            return f64::NAN;
        }
        let (first_t, first_r) = self.points[0];
        if t <= first_t {
            return first_r;
        }
        let (last_t, last_r) = self.points[self.points.len() - 1];
        if t >= last_t {
            return last_r;
        }

        // first index with tenor >= t; guaranteed in 1..len by the checks above
        let i = self.points.partition_point(|(pt, _)| *pt < t);
        let (t0, r0) = self.points[i - 1];
        let (t1, r1) = self.points[i];
        let weight = (t - t0) / (t1 - t0);
        r0 + weight * (r1 - r0)
    }

    /// Discount factor to `t` years.
    #[must_use]
    pub fn discount_factor(&self, t: f64) -> f64 {
        (-self.zero_rate(t) * t).exp()
    }

    /// Continuously compounded forward rate between `t1` and `t2`.
    pub fn forward_rate(&self, t1: f64, t2: f64) -> CurveResult<f64> {
        if t2 <= t1 {
            return Err(CurveError::invalid_value(format!(
                "t2 ({t2}) must be greater than t1 ({t1})"
            )));
        }
        let r1 = self.zero_rate(t1);
        let r2 = self.zero_rate(t2);
        Ok((r2 * t2 - r1 * t1) / (t2 - t1))
    }
}
