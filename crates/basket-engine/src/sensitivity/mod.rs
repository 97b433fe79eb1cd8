//! Finite-difference sensitivities.
//!
//! - [`FdMethod`]: the formulas
//! - [`FdDelta`] and [`DeltaRule`]: what to bump, expanded by the store
//! - [`DeltaLedger`]: the results
//! - [`SensitivityEngine`]: the base/bumped repricing loop

mod configured;
mod delta;
mod ledger;
mod method;
mod orchestrator;

pub use configured::register_configured_bumps;
pub use delta::{DeltaRule, DeltaScope, FdDelta};
pub use ledger::{DeltaKey, DeltaLedger};
pub use method::{FdMethod, Observation, SymbolMove};
pub use orchestrator::{resolve_quote_side, SensitivityEngine, SensitivityResult};
