//! # Basket Config
//!
//! Risk configuration for the basket risk engine: how each sensitivity
//! category is bumped and which finite-difference formula reduces it.
//!
//! - **[`BumpSettings`]**: magnitude, policy, sides, method, norm, bucketing
//! - **[`RiskConfig`]**: reporting currency, default settings, per-category overrides
//! - **[`Validate`]**: validation returning every violated rule
//!
//! Configurations load from JSON or TOML.
//!
//! # Example
//!
//! ```rust
//! use basket_config::{BumpSettings, RiskConfig, SideSelection, Validate};
//! use basket_core::Category;
//!
//! let config = RiskConfig::standard().with_override(
//!     Category::Repo,
//!     BumpSettings::basis_points(1).with_sides(SideSelection::UpperOnly),
//! );
//! config.validate_or_error().unwrap();
//! assert!(!config.settings_for(Category::Repo).sides.has_lower());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod bump;
mod error;
mod risk;

pub use bump::{BasketScaling, BumpSettings, Bucketing, MethodKind, SideSelection};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use risk::RiskConfig;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bump::{BumpSettings, Bucketing, MethodKind, SideSelection};
    pub use crate::error::{ConfigError, ConfigResult, Validate};
    pub use crate::risk::RiskConfig;
}
