//! Instrument selectors.

use std::fmt;

use basket_core::{Symbol, Tenor};
use serde::{Deserialize, Serialize};

use crate::instruments::{Instrument, InstrumentKind};

/// Value-typed predicate over the instruments of a sheet.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Selector {
    /// Every instrument.
    All,
    /// All instruments of one type.
    Kind(InstrumentKind),
    /// Instruments referencing one rate tenor.
    Tenor(Tenor),
    /// Instruments at one pillar.
    Pillar(Tenor),
    /// Instruments of one type at one pillar.
    PillarKind {
        /// Pillar to match.
        pillar: Tenor,
        /// Instrument type to match.
        kind: InstrumentKind,
    },
    /// Instruments at one pillar quoted on one underlying.
    PillarUnderlying {
        /// Pillar to match.
        pillar: Tenor,
        /// Underlying to match.
        underlying: Symbol,
    },
}

impl Selector {
    /// Returns true if the instrument is selected.
    #[must_use]
    pub fn matches(&self, instrument: &Instrument) -> bool {
        match self {
            Self::All => true,
            Self::Kind(kind) => instrument.kind == *kind,
            Self::Tenor(tenor) => instrument.tenor == Some(*tenor),
            Self::Pillar(pillar) => instrument.pillar == *pillar,
            Self::PillarKind { pillar, kind } => {
                instrument.pillar == *pillar && instrument.kind == *kind
            }
            Self::PillarUnderlying { pillar, underlying } => {
                instrument.pillar == *pillar && instrument.underlying.as_ref() == Some(underlying)
            }
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Kind(kind) => write!(f, "{kind}"),
            Self::Tenor(tenor) => write!(f, "Tenor({tenor})"),
            Self::Pillar(pillar) => write!(f, "Pillar({pillar})"),
            Self::PillarKind { pillar, kind } => write!(f, "Pillar({pillar})/{kind}"),
            Self::PillarUnderlying { pillar, underlying } => {
                write!(f, "Pillar({pillar})/{underlying}")
            }
        }
    }
}
