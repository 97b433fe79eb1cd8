//! # Basket Core
//!
//! Core identifiers shared by every crate of the basket risk engine.
//!
//! - **Symbols**: [`Symbol`] and [`SymbolKind`], the keys of the market data store
//! - **Quote sides**: [`QuoteSide`] (Mid/Bid/Ask)
//! - **Tenors**: [`Tenor`] labels such as `3M` or `10Y`
//! - **Tasks**: [`Task`], [`TaskSet`] and [`Category`] selecting the sensitivities to run
//! - **Currencies**: [`Currency`] ISO codes used for leg aggregation
//!
//! ## Example
//!
//! ```rust
//! use basket_core::prelude::*;
//!
//! let repo = Symbol::new("AAPL.REPO", SymbolKind::Repo);
//! assert_eq!(repo.kind().category(), Category::Repo);
//!
//! let tasks = TaskSet::from_tasks([Task::Price, Task::RepoDelta]);
//! assert!(tasks.contains_category(Category::Repo));
//! assert!(!tasks.contains_category(Category::Equity));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{
        Category, Currency, QuoteSide, Symbol, SymbolKind, Task, TaskSet, Tenor, TenorUnit,
    };
}

pub use error::{CoreError, CoreResult};
pub use types::{
    Category, Currency, QuoteSide, Symbol, SymbolKind, Task, TaskSet, Tenor, TenorUnit,
};
