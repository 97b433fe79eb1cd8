//! Market data symbols.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::currency::Currency;
use super::task::Category;

/// What a symbol's quote sheet describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    /// Single-name equity ticker (spot sheet).
    Equity,
    /// Weighted basket of single names. Baskets carry no sheet of their own.
    Basket,
    /// Dividend yield curve of an equity.
    Dividend,
    /// Repo (stock lending) curve of an equity.
    Repo,
    /// FX spot of a currency against the reporting currency.
    Currency,
    /// Overnight-indexed discounting curve.
    OisDiscount,
    /// Projection curve for floating-rate fixings.
    ForwardFixing,
    /// Libor (IBOR) discounting curve.
    LiborDiscount,
}

impl SymbolKind {
    /// The sensitivity category deltas on this kind are reported under.
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            Self::Equity | Self::Basket => Category::Equity,
            Self::Dividend => Category::Dividend,
            Self::Repo => Category::Repo,
            Self::Currency => Category::Fx,
            Self::OisDiscount => Category::OisDiscounting,
            Self::ForwardFixing => Category::ForwardFixing,
            Self::LiborDiscount => Category::LiborDiscounting,
        }
    }

    /// Returns true for composite symbols whose market data lives on other symbols.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Basket)
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Equity => "Equity",
            Self::Basket => "Basket",
            Self::Dividend => "Dividend",
            Self::Repo => "Repo",
            Self::Currency => "Currency",
            Self::OisDiscount => "OisDiscount",
            Self::ForwardFixing => "ForwardFixing",
            Self::LiborDiscount => "LiborDiscount",
        };
        f.write_str(name)
    }
}

/// Immutable market data identity.
///
/// Equality, ordering and hashing use the name only, so a symbol can be
/// looked up with any kind tag attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Symbol {
    name: String,
    kind: SymbolKind,
}

impl Symbol {
    /// Creates a new symbol.
    pub fn new(name: impl Into<String>, kind: SymbolKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Equity ticker symbol.
    pub fn equity(ticker: impl Into<String>) -> Self {
        Self::new(ticker, SymbolKind::Equity)
    }

    /// Basket symbol.
    pub fn basket(name: impl Into<String>) -> Self {
        Self::new(name, SymbolKind::Basket)
    }

    /// FX symbol for a currency, named by its ISO code.
    pub fn currency(currency: Currency) -> Self {
        Self::new(currency.code(), SymbolKind::Currency)
    }

    /// Returns the symbol name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the symbol kind.
    #[must_use]
    pub fn kind(&self) -> SymbolKind {
        self.kind
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
