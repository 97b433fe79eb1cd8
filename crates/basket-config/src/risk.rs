//! Risk run configuration.

use std::collections::BTreeMap;

use basket_core::{Category, Currency};
use serde::{Deserialize, Serialize};

use crate::bump::{BasketScaling, BumpSettings, Bucketing, MethodKind};
use crate::error::{ConfigResult, Validate, ValidationError};

/// Bump settings per sensitivity category plus the reporting currency.
///
/// ```rust
/// use basket_config::{RiskConfig, Validate};
/// use basket_core::{Category, Currency};
///
/// let config = RiskConfig::from_toml(r#"
///     name = "DESK"
///     reporting_currency = "EUR"
///
///     [default_bump]
///     magnitude = 0.0001
///
///     [overrides.Equity]
///     magnitude = 0.01
///     policy = "Relative"
/// "#).unwrap();
///
/// assert!(config.is_valid());
/// assert_eq!(config.reporting_currency, Currency::EUR);
/// assert_eq!(config.settings_for(Category::Repo).magnitude.to_string(), "0.0001");
/// assert_eq!(config.settings_for(Category::Equity).magnitude.to_string(), "0.01");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Configuration name.
    pub name: String,

    /// Description of this configuration.
    #[serde(default)]
    pub description: Option<String>,

    /// Currency that legs and deltas are converted into.
    #[serde(default)]
    pub reporting_currency: Currency,

    /// Settings for categories without an override.
    pub default_bump: BumpSettings,

    /// Per-category settings.
    #[serde(default)]
    pub overrides: BTreeMap<Category, BumpSettings>,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl RiskConfig {
    /// Creates a configuration bumping every category by 1bp.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            reporting_currency: Currency::default(),
            default_bump: BumpSettings::basis_points(1),
            overrides: BTreeMap::new(),
        }
    }

    /// Standard desk settings: 1% relative on equity spots (basket slopes on
    /// realised distance), 1% relative on FX spots, 1bp absolute elsewhere.
    pub fn standard() -> Self {
        Self::new("STANDARD")
            .with_description("1% relative spot bumps, 1bp parallel rate bumps")
            .with_override(Category::Equity, BumpSettings::percent(1))
            .with_override(Category::Fx, BumpSettings::percent(1))
    }

    /// Key-rate settings: 1bp per pillar on every rate curve.
    pub fn key_rate() -> Self {
        let bucketed = BumpSettings::basis_points(1).with_bucketing(Bucketing::PerPillar);
        Self::new("KEY_RATE")
            .with_description("1bp per-pillar rate bumps")
            .with_override(Category::Equity, BumpSettings::percent(1))
            .with_override(Category::Fx, BumpSettings::percent(1))
            .with_override(Category::Dividend, bucketed.clone())
            .with_override(Category::Repo, bucketed.clone())
            .with_override(Category::OisDiscounting, bucketed.clone())
            .with_override(Category::ForwardFixing, bucketed.clone())
            .with_override(Category::LiborDiscounting, bucketed)
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the reporting currency.
    #[must_use]
    pub fn with_reporting_currency(mut self, currency: Currency) -> Self {
        self.reporting_currency = currency;
        self
    }

    /// Sets the default bump.
    #[must_use]
    pub fn with_default_bump(mut self, settings: BumpSettings) -> Self {
        self.default_bump = settings;
        self
    }

    /// Overrides the settings of one category.
    #[must_use]
    pub fn with_override(mut self, category: Category, settings: BumpSettings) -> Self {
        self.overrides.insert(category, settings);
        self
    }

    /// Settings in force for a category.
    #[must_use]
    pub fn settings_for(&self, category: Category) -> &BumpSettings {
        self.overrides.get(&category).unwrap_or(&self.default_bump)
    }

    /// Parses a JSON configuration.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a TOML configuration.
    pub fn from_toml(toml: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(toml)?)
    }

    /// Serializes to pretty JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serializes to TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string(self)?)
    }
}

impl Validate for RiskConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.name.is_empty() {
            errors.push(ValidationError::new("name", "Name cannot be empty"));
        }

        errors.extend(
            self.default_bump
                .validate()
                .into_iter()
                .map(|e| e.nested("default_bump")),
        );

        for (category, settings) in &self.overrides {
            let prefix = format!("overrides.{category}");
            errors.extend(settings.validate().into_iter().map(|e| e.nested(&prefix)));

            if settings.method == MethodKind::DerivativeBasket && *category != Category::Equity {
                errors.push(ValidationError::with_rule(
                    format!("{prefix}.method"),
                    "Basket derivatives apply to equity only",
                    "basket_method_equity_only",
                ));
            }
        }

        if self.default_bump.method == MethodKind::DerivativeBasket {
            errors.push(ValidationError::with_rule(
                "default_bump.method",
                "Basket derivatives apply to equity only",
                "basket_method_equity_only",
            ));
        }

        for (category, settings) in &self.overrides {
            if settings.basket_scaling == BasketScaling::OriginalMagnitude
                && settings.method != MethodKind::DerivativeBasket
            {
                errors.push(ValidationError::with_rule(
                    format!("overrides.{category}.basket_scaling"),
                    "Original-magnitude scaling requires the DerivativeBasket method",
                    "scaling_requires_basket",
                ));
            }
        }

        errors
    }
}
