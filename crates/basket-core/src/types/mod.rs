//! Domain types for the basket risk engine.
//!
//! - [`Symbol`]: market data identity (ticker, currency, rate reference, basket)
//! - [`QuoteSide`]: Mid/Bid/Ask price convention
//! - [`Tenor`]: period labels used by instruments and bump selectors
//! - [`Task`]: sensitivity selection per pricing request
//! - [`Currency`]: ISO currency codes

mod currency;
mod quote_side;
mod symbol;
mod task;
mod tenor;

pub use currency::Currency;
pub use quote_side::QuoteSide;
pub use symbol::{Symbol, SymbolKind};
pub use task::{Category, Task, TaskSet};
pub use tenor::{Tenor, TenorUnit};
