//! Tenor labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Unit of a tenor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TenorUnit {
    /// Calendar days.
    Day,
    /// Weeks.
    Week,
    /// Months.
    Month,
    /// Years.
    Year,
}

impl TenorUnit {
    fn suffix(self) -> char {
        match self {
            Self::Day => 'D',
            Self::Week => 'W',
            Self::Month => 'M',
            Self::Year => 'Y',
        }
    }
}

/// A period such as `3M` or `10Y`.
///
/// Used both as an instrument's pillar (its maturity point) and as the
/// tenor of the rate it references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tenor {
    count: u32,
    unit: TenorUnit,
}

impl Tenor {
    /// Creates a tenor.
    #[must_use]
    pub const fn new(count: u32, unit: TenorUnit) -> Self {
        Self { count, unit }
    }

    /// `n` days.
    #[must_use]
    pub const fn days(n: u32) -> Self {
        Self::new(n, TenorUnit::Day)
    }

    /// `n` weeks.
    #[must_use]
    pub const fn weeks(n: u32) -> Self {
        Self::new(n, TenorUnit::Week)
    }

    /// `n` months.
    #[must_use]
    pub const fn months(n: u32) -> Self {
        Self::new(n, TenorUnit::Month)
    }

    /// `n` years.
    #[must_use]
    pub const fn years_of(n: u32) -> Self {
        Self::new(n, TenorUnit::Year)
    }

    /// Number of units.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Unit.
    #[must_use]
    pub fn unit(&self) -> TenorUnit {
        self.unit
    }

    /// Returns the tenor in years as a fraction (ACT/365 for days and weeks).
    #[must_use]
    pub fn years(&self) -> f64 {
        let n = f64::from(self.count);
        match self.unit {
            TenorUnit::Day => n / 365.0,
            TenorUnit::Week => n * 7.0 / 365.0,
            TenorUnit::Month => n / 12.0,
            TenorUnit::Year => n,
        }
    }
}

impl PartialOrd for Tenor {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tenor {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.years()
            .total_cmp(&other.years())
            .then_with(|| self.unit.cmp(&other.unit))
            .then_with(|| self.count.cmp(&other.count))
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.unit.suffix())
    }
}

impl FromStr for Tenor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| CoreError::InvalidTenor {
            label: s.to_string(),
            reason: reason.to_string(),
        };

        let label = s.trim().to_ascii_uppercase();
        match label.as_str() {
            "ON" | "O/N" => return Ok(Self::days(1)),
            "TN" | "T/N" => return Ok(Self::days(2)),
            _ => {}
        }

        let Some(suffix) = label.chars().last() else {
            return Err(invalid("empty label"));
        };
        let unit = match suffix {
            'D' => TenorUnit::Day,
            'W' => TenorUnit::Week,
            'M' => TenorUnit::Month,
            'Y' => TenorUnit::Year,
            _ => return Err(invalid("unit must be one of D, W, M, Y")),
        };
        let count = label[..label.len() - 1]
            .parse::<u32>()
            .map_err(|_| invalid("count is not a non-negative integer"))?;
        Ok(Self::new(count, unit))
    }
}
