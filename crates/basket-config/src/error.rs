//! Configuration errors and validation.

use std::fmt;

use thiserror::Error;

/// Configuration operation result type.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or checking a risk configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A single rule was violated.
    #[error("invalid risk configuration: {0}")]
    Invalid(ValidationError),

    /// Several rules were violated.
    #[error("invalid risk configuration: {}", join(.0))]
    Rejected(Vec<ValidationError>),

    /// Input could not be parsed.
    #[error("cannot read {format} risk configuration: {message}")]
    Parse {
        /// `json` or `toml`.
        format: &'static str,
        /// Parser message.
        message: String,
    },

    /// Configuration could not be written.
    #[error("cannot write {format} risk configuration: {message}")]
    Write {
        /// `json` or `toml`.
        format: &'static str,
        /// Serializer message.
        message: String,
    },
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// One violated rule, located by a dotted field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `overrides.Repo.magnitude`.
    pub field: String,
    /// What is wrong.
    pub message: String,
    /// Short rule identifier, when the check has one.
    pub rule: Option<String>,
}

impl ValidationError {
    /// Creates an error without a rule identifier.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Creates an error tagged with a rule identifier.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            rule: Some(rule.into()),
            ..Self::new(field, message)
        }
    }

    /// Prefixes the field path, e.g. `magnitude` becomes `overrides.Repo.magnitude`.
    #[must_use]
    pub fn nested(mut self, prefix: &str) -> Self {
        self.field = format!("{prefix}.{}", self.field);
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)?;
        match &self.rule {
            Some(rule) => write!(f, " [{rule}]"),
            None => Ok(()),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Io => ConfigError::Write {
                format: "json",
                message: err.to_string(),
            },
            _ => ConfigError::Parse {
                format: "json",
                message: err.to_string(),
            },
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse {
            format: "toml",
            message: err.message().to_string(),
        }
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Write {
            format: "toml",
            message: err.to_string(),
        }
    }
}

/// Configurations that can check their own consistency.
pub trait Validate {
    /// Every violated rule; empty when valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if no rule is violated.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Folds [`validate`](Self::validate) into a single error.
    fn validate_or_error(&self) -> ConfigResult<()> {
        let mut errors = self.validate();
        match errors.len() {
            0 => Ok(()),
            1 => Err(ConfigError::Invalid(errors.remove(0))),
            _ => Err(ConfigError::Rejected(errors)),
        }
    }
}
