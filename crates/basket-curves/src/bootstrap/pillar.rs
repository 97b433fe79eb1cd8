//! Reference pillar bootstrapper.
//!
//! Turns each quoted pillar directly into a curve point. Spot and FX sheets
//! hold a single instrument; rate sheets become a [`ZeroCurve`] with deposit
//! quotes converted from simple to continuous compounding.

use basket_core::QuoteSide;

use super::Bootstrapper;
use crate::curves::{MarketCurve, ZeroCurve};
use crate::error::{CurveError, CurveResult};
use crate::instruments::{Instrument, InstrumentKind};
use crate::sheet::QuoteSheet;

/// Bootstraps spot, FX, dividend yield and zero curves pillar by pillar.
#[derive(Debug, Clone, Copy, Default)]
pub struct PillarBootstrapper;

impl PillarBootstrapper {
    /// Creates the bootstrapper.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn quote(instrument: &Instrument, side: QuoteSide) -> CurveResult<f64> {
        instrument
            .quotes
            .get(side)
            .ok_or_else(|| CurveError::MissingQuote {
                instrument: instrument.to_string(),
                side,
            })
    }

    fn single(sheet: &QuoteSheet, side: QuoteSide) -> CurveResult<f64> {
        match sheet.instruments() {
            [only] => Self::quote(only, side),
            other => Err(CurveError::invalid_sheet(format!(
                "expected exactly one instrument, found {}",
                other.len()
            ))),
        }
    }

    fn zero_curve(sheet: &QuoteSheet, side: QuoteSide) -> CurveResult<ZeroCurve> {
        let mut points = sheet
            .iter()
            .map(|inst| {
                let t = inst.pillar.years();
                let quote = Self::quote(inst, side)?;
                let rate = match inst.kind {
                    InstrumentKind::Deposit if t > 0.0 => (quote * t).ln_1p() / t,
                    _ => quote,
                };
                Ok((t, rate))
            })
            .collect::<CurveResult<Vec<_>>>()?;
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        ZeroCurve::new(points)
    }
}

impl Bootstrapper for PillarBootstrapper {
    fn bootstrap_side(&self, sheet: &QuoteSheet, side: QuoteSide) -> CurveResult<MarketCurve> {
        let Some(first) = sheet.iter().next() else {
            return Err(CurveError::invalid_sheet("empty sheet"));
        };

        let kind = first.kind;
        if sheet.iter().any(|inst| curve_family(inst.kind) != curve_family(kind)) {
            return Err(CurveError::invalid_sheet(format!(
                "sheet mixes {kind} with incompatible instrument kinds"
            )));
        }

        match kind {
            InstrumentKind::Spot => Self::single(sheet, side).map(MarketCurve::Spot),
            InstrumentKind::FxSpot => Self::single(sheet, side).map(MarketCurve::FxSpot),
            InstrumentKind::DividendYield => {
                Self::zero_curve(sheet, side).map(MarketCurve::DividendYield)
            }
            InstrumentKind::ZeroRate
            | InstrumentKind::Deposit
            | InstrumentKind::Swap
            | InstrumentKind::RepoRate => Self::zero_curve(sheet, side).map(MarketCurve::Zero),
        }
    }
}

/// Instruments that can share a sheet map to the same family.
fn curve_family(kind: InstrumentKind) -> u8 {
    match kind {
        InstrumentKind::Spot => 0,
        InstrumentKind::FxSpot => 1,
        InstrumentKind::DividendYield => 2,
        InstrumentKind::ZeroRate
        | InstrumentKind::Deposit
        | InstrumentKind::Swap
        | InstrumentKind::RepoRate => 3,
    }
}
