//! Book pricing.
//!
//! Runs the sensitivity engine over every instrument of a book. Failures
//! are isolated per instrument: a failing entry carries its error message
//! and zero elapsed time, and the rest of the book prices normally.

use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{info, warn};

use crate::market::MarketDataStore;
use crate::pricing::{Pricer, PricingRequest, Valuation};
use crate::sensitivity::{DeltaLedger, SensitivityEngine};

/// One instrument of a book.
#[derive(Debug, Clone)]
pub struct BookEntry<P> {
    /// Instrument identifier.
    pub id: String,
    /// The product.
    pub product: P,
}

/// Collection of instruments priced together.
#[derive(Debug, Clone)]
pub struct Book<P> {
    entries: Vec<BookEntry<P>>,
}

impl<P> Default for Book<P> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<P> Book<P> {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an instrument.
    #[must_use]
    pub fn with_entry(mut self, id: impl Into<String>, product: P) -> Self {
        self.entries.push(BookEntry {
            id: id.into(),
            product,
        });
        self
    }

    /// Instruments in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[BookEntry<P>] {
        &self.entries
    }

    /// Number of instruments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the book is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome for one instrument.
#[derive(Debug, Clone)]
pub struct InstrumentResult {
    /// Instrument identifier.
    pub id: String,
    /// Base valuation in reporting currency, absent on failure.
    pub valuation: Option<Valuation>,
    /// Deltas of this instrument.
    pub ledger: DeltaLedger,
    /// Error message on failure.
    pub error: Option<String>,
    /// Pricing time, zero on failure.
    pub elapsed: Duration,
}

impl InstrumentResult {
    /// Returns true if the instrument priced.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome for a book.
#[derive(Debug, Clone)]
pub struct BookResult {
    /// Per-instrument results in book order.
    pub entries: Vec<InstrumentResult>,
    /// Deltas aggregated over successful instruments.
    pub ledger: DeltaLedger,
    /// Number of instruments priced.
    pub succeeded: usize,
    /// Number of instruments that failed.
    pub failed: usize,
    /// Wall time of the whole run.
    pub elapsed: Duration,
}

impl BookResult {
    /// Sum of successful base values.
    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.entries
            .iter()
            .filter_map(|e| e.valuation.as_ref())
            .map(|v| v.value)
            .sum()
    }

    fn collect(entries: Vec<InstrumentResult>, started: Instant) -> Self {
        let mut ledger = DeltaLedger::new();
        let mut succeeded = 0;
        let mut failed = 0;
        for entry in &entries {
            if entry.is_ok() {
                succeeded += 1;
                ledger.merge(&entry.ledger);
            } else {
                failed += 1;
            }
        }
        let elapsed = started.elapsed();
        info!(
            instruments = entries.len(),
            succeeded,
            failed,
            elapsed_ms = elapsed.as_millis() as u64,
            "priced book"
        );
        Self {
            entries,
            ledger,
            succeeded,
            failed,
            elapsed,
        }
    }
}

fn price_entry<Pr: Pricer>(
    store: &Arc<MarketDataStore>,
    pricer: &Pr,
    entry: &BookEntry<Pr::Product>,
    request: &PricingRequest,
) -> InstrumentResult {
    let engine = SensitivityEngine::new(Arc::clone(store));
    let started = Instant::now();
    match engine.run(pricer, &entry.product, request) {
        Ok(result) => InstrumentResult {
            id: entry.id.clone(),
            valuation: Some(result.valuation),
            ledger: result.ledger,
            error: None,
            elapsed: started.elapsed(),
        },
        Err(e) => {
            warn!(id = %entry.id, error = %e, "instrument failed to price");
            InstrumentResult {
                id: entry.id.clone(),
                valuation: None,
                ledger: DeltaLedger::new(),
                error: Some(e.to_string()),
                elapsed: Duration::ZERO,
            }
        }
    }
}

/// Prices every instrument in order.
pub fn price_book<Pr: Pricer>(
    store: &Arc<MarketDataStore>,
    pricer: &Pr,
    book: &Book<Pr::Product>,
    request: &PricingRequest,
) -> BookResult {
    let started = Instant::now();
    let entries = book
        .entries
        .iter()
        .map(|entry| price_entry(store, pricer, entry, request))
        .collect();
    BookResult::collect(entries, started)
}

/// Prices instruments in parallel using rayon, each on a private proxy.
pub fn price_book_parallel<Pr: Pricer>(
    store: &Arc<MarketDataStore>,
    pricer: &Pr,
    book: &Book<Pr::Product>,
    request: &PricingRequest,
) -> BookResult {
    let started = Instant::now();
    let entries = book
        .entries
        .par_iter()
        .map(|entry| price_entry(store, pricer, entry, request))
        .collect();
    BookResult::collect(entries, started)
}
