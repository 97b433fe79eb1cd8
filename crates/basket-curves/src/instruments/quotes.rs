//! Market quotes attached to an instrument.

use basket_core::QuoteSide;
use serde::{Deserialize, Serialize};

/// Zero to three quotes of an instrument, one per [`QuoteSide`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteSet {
    /// Mid quote.
    pub mid: Option<f64>,
    /// Bid quote.
    pub bid: Option<f64>,
    /// Ask quote.
    pub ask: Option<f64>,
}

impl QuoteSet {
    /// Mid-only quote.
    #[must_use]
    pub fn mid(value: f64) -> Self {
        Self {
            mid: Some(value),
            ..Self::default()
        }
    }

    /// Bid/ask quote with the mid set to their average.
    #[must_use]
    pub fn two_way(bid: f64, ask: f64) -> Self {
        Self {
            mid: Some(0.5 * (bid + ask)),
            bid: Some(bid),
            ask: Some(ask),
        }
    }

    /// Returns the quote on a side.
    #[must_use]
    pub fn get(&self, side: QuoteSide) -> Option<f64> {
        match side {
            QuoteSide::Mid => self.mid,
            QuoteSide::Bid => self.bid,
            QuoteSide::Ask => self.ask,
        }
    }

    /// Replaces the quote on a side.
    pub fn set(&mut self, side: QuoteSide, value: f64) {
        match side {
            QuoteSide::Mid => self.mid = Some(value),
            QuoteSide::Bid => self.bid = Some(value),
            QuoteSide::Ask => self.ask = Some(value),
        }
    }

    /// Sides that carry a quote, in [`QuoteSide::ALL`] order.
    pub fn sides(&self) -> impl Iterator<Item = QuoteSide> + '_ {
        QuoteSide::ALL
            .into_iter()
            .filter(move |side| self.get(*side).is_some())
    }

    /// Returns true if no side is quoted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sides().next().is_none()
    }
}
