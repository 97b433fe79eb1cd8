//! Quote side (price convention) of a market curve.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// The side of the market a curve was bootstrapped from.
///
/// Ordering is `Mid < Bid < Ask`; collections of sides iterate in that order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum QuoteSide {
    /// Mid quote.
    #[default]
    Mid,
    /// Bid quote.
    Bid,
    /// Ask (offer) quote.
    Ask,
}

impl QuoteSide {
    /// All quote sides, in bootstrap order.
    pub const ALL: [QuoteSide; 3] = [QuoteSide::Mid, QuoteSide::Bid, QuoteSide::Ask];

    /// Short name of the side.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mid => "Mid",
            Self::Bid => "Bid",
            Self::Ask => "Ask",
        }
    }
}

impl fmt::Display for QuoteSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuoteSide {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mid" => Ok(Self::Mid),
            "bid" => Ok(Self::Bid),
            "ask" | "offer" => Ok(Self::Ask),
            _ => Err(CoreError::UnknownQuoteSide(s.to_string())),
        }
    }
}
