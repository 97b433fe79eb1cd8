//! Quote sheets.

use std::collections::BTreeSet;
use std::sync::Arc;

use basket_core::{QuoteSide, Tenor};

use crate::instruments::{Instrument, InstrumentKind};

/// Ordered collection of quoted instruments for one symbol.
///
/// Instruments are reference counted: copies of a sheet share every
/// instrument, and a bump deep-copies only the instruments it rewrites.
#[derive(Debug, Clone, Default)]
pub struct QuoteSheet {
    instruments: Vec<Arc<Instrument>>,
}

impl QuoteSheet {
    /// Creates a sheet from owned instruments.
    #[must_use]
    pub fn new(instruments: Vec<Instrument>) -> Self {
        Self {
            instruments: instruments.into_iter().map(Arc::new).collect(),
        }
    }

    /// Creates a sheet from shared instruments.
    #[must_use]
    pub fn from_shared(instruments: Vec<Arc<Instrument>>) -> Self {
        Self { instruments }
    }

    /// Appends an instrument.
    #[must_use]
    pub fn with_instrument(mut self, instrument: Instrument) -> Self {
        self.instruments.push(Arc::new(instrument));
        self
    }

    /// Returns the instruments in sheet order.
    #[must_use]
    pub fn instruments(&self) -> &[Arc<Instrument>] {
        &self.instruments
    }

    /// Iterates over the instruments.
    pub fn iter(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.iter().map(AsRef::as_ref)
    }

    /// Number of instruments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// Returns true if the sheet has no instruments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// Distinct pillars of instruments of the given kind, shortest first.
    #[must_use]
    pub fn pillars(&self, kind: InstrumentKind) -> Vec<Tenor> {
        self.iter()
            .filter(|inst| inst.kind == kind)
            .map(|inst| inst.pillar)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Sides quoted on every instrument of the sheet.
    #[must_use]
    pub fn complete_sides(&self) -> Vec<QuoteSide> {
        if self.is_empty() {
            return Vec::new();
        }
        QuoteSide::ALL
            .into_iter()
            .filter(|side| self.iter().all(|inst| inst.quotes.get(*side).is_some()))
            .collect()
    }

    /// Returns true if instrument `index` is the same allocation in both sheets.
    #[must_use]
    pub fn shares_instrument(&self, other: &QuoteSheet, index: usize) -> bool {
        match (self.instruments.get(index), other.instruments.get(index)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl FromIterator<Instrument> for QuoteSheet {
    fn from_iter<I: IntoIterator<Item = Instrument>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
