//! Reference products and their closed-form pricers.
//!
//! Single names find their curves by naming convention: the repo curve of
//! `AAPL` is `AAPL.REPO` and its dividend curve `AAPL.DIV`.

mod forward;
mod trs;

pub use forward::{EquityForward, ForwardPricer};
pub use trs::{Discounting, EquityUnderlying, FundingLeg, TotalReturnSwap, TrsPricer};

use std::fmt;
use std::str::FromStr;

use basket_core::{QuoteSide, Symbol, SymbolKind};

use crate::error::{EngineError, EngineResult};
use crate::market::MarketView;

/// Repo curve symbol of a single name.
#[must_use]
pub fn repo_symbol(equity: &Symbol) -> Symbol {
    Symbol::new(format!("{}.REPO", equity.name()), SymbolKind::Repo)
}

/// Dividend curve symbol of a single name.
#[must_use]
pub fn dividend_symbol(equity: &Symbol) -> Symbol {
    Symbol::new(format!("{}.DIV", equity.name()), SymbolKind::Dividend)
}

/// Forward of a single name: `S * exp((repo - div) * t)`.
pub fn equity_forward(market: &dyn MarketView, equity: &Symbol, t: f64) -> EngineResult<f64> {
    let spot = market.spot(equity, QuoteSide::Mid)?;
    let repo = market.curve(&repo_symbol(equity), QuoteSide::Mid)?;
    let div = market.curve(&dividend_symbol(equity), QuoteSide::Mid)?;
    let carry = repo.as_zero()?.zero_rate(t) - div.as_dividend_yield()?.zero_rate(t);
    Ok(spot * (carry * t).exp())
}

/// Collateral agreement, which selects the discounting curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CollateralScheme {
    /// Cash collateral remunerated at the overnight rate.
    #[default]
    Ois,
    /// Uncollateralised, discounted on the Libor curve.
    Libor,
}

impl fmt::Display for CollateralScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ois => f.write_str("OIS"),
            Self::Libor => f.write_str("LIBOR"),
        }
    }
}

impl FromStr for CollateralScheme {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OIS" => Ok(Self::Ois),
            "LIBOR" | "IBOR" => Ok(Self::Libor),
            _ => Err(EngineError::unsupported(format!("collateral scheme '{s}'"))),
        }
    }
}
