//! Delta ledger.

use std::collections::BTreeMap;

use basket_core::{Category, Symbol, SymbolKind};

use super::delta::FdDelta;

/// Ledger key: the delta computed on a symbol.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeltaKey {
    /// Kind of the bumped symbol.
    pub kind: SymbolKind,
    /// Bumped symbol (a basket for composite deltas).
    pub symbol: Symbol,
    /// The delta.
    pub delta: FdDelta,
}

impl DeltaKey {
    /// Creates a key, taking the kind from the symbol.
    #[must_use]
    pub fn new(symbol: Symbol, delta: FdDelta) -> Self {
        Self {
            kind: symbol.kind(),
            symbol,
            delta,
        }
    }
}

/// Computed sensitivities in reporting currency, in total and per leg.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeltaLedger {
    totals: BTreeMap<DeltaKey, f64>,
    legs: BTreeMap<String, BTreeMap<DeltaKey, f64>>,
}

impl DeltaLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` to the total of `key`.
    pub fn record(&mut self, key: DeltaKey, value: f64) {
        *self.totals.entry(key).or_insert(0.0) += value;
    }

    /// Adds `value` to `key` on one leg.
    pub fn record_leg(&mut self, leg: &str, key: DeltaKey, value: f64) {
        *self
            .legs
            .entry(leg.to_string())
            .or_default()
            .entry(key)
            .or_insert(0.0) += value;
    }

    /// Total for a key.
    #[must_use]
    pub fn get(&self, key: &DeltaKey) -> Option<f64> {
        self.totals.get(key).copied()
    }

    /// Value of a key on one leg.
    #[must_use]
    pub fn get_leg(&self, leg: &str, key: &DeltaKey) -> Option<f64> {
        self.legs.get(leg).and_then(|m| m.get(key)).copied()
    }

    /// Sum of every delta computed on a symbol.
    #[must_use]
    pub fn total_for(&self, symbol: &Symbol) -> f64 {
        self.totals
            .iter()
            .filter(|(k, _)| &k.symbol == symbol)
            .map(|(_, v)| v)
            .sum()
    }

    /// Entries of one category.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = (&DeltaKey, f64)> {
        self.iter().filter(move |(k, _)| k.kind.category() == category)
    }

    /// All totals in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&DeltaKey, f64)> {
        self.totals.iter().map(|(k, v)| (k, *v))
    }

    /// Names of legs with entries.
    pub fn leg_names(&self) -> impl Iterator<Item = &str> {
        self.legs.keys().map(String::as_str)
    }

    /// Number of totals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Adds every entry of `other` into this ledger.
    pub fn merge(&mut self, other: &DeltaLedger) {
        for (key, value) in &other.totals {
            self.record(key.clone(), *value);
        }
        for (leg, entries) in &other.legs {
            for (key, value) in entries {
                self.record_leg(leg, key.clone(), *value);
            }
        }
    }
}
