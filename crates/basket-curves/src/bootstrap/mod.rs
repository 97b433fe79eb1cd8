//! Curve bootstrapping interface.
//!
//! The engine treats bootstrapping as an external collaborator: anything
//! implementing [`Bootstrapper`] can be registered with a sheet. Failure on
//! one quote side is reported per side and omitted from the full result, so
//! callers must tolerate partial maps.

mod pillar;

pub use pillar::PillarBootstrapper;

use std::collections::BTreeMap;

use basket_core::QuoteSide;
use tracing::debug;

use crate::curves::MarketCurve;
use crate::error::CurveResult;
use crate::sheet::QuoteSheet;

/// Curves produced for each quote side that bootstrapped successfully.
pub type BootstrapResult = BTreeMap<QuoteSide, MarketCurve>;

/// Builds market curves from a quote sheet.
pub trait Bootstrapper: Send + Sync {
    /// Bootstraps one quote side.
    fn bootstrap_side(&self, sheet: &QuoteSheet, side: QuoteSide) -> CurveResult<MarketCurve>;

    /// Bootstraps every quote side, omitting the sides that fail.
    fn bootstrap(&self, sheet: &QuoteSheet) -> BootstrapResult {
        let mut curves = BootstrapResult::new();
        for side in QuoteSide::ALL {
            match self.bootstrap_side(sheet, side) {
                Ok(curve) => {
                    curves.insert(side, curve);
                }
                Err(e) => debug!(%side, error = %e, "quote side omitted from bootstrap"),
            }
        }
        curves
    }
}
