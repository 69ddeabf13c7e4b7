//! Money-market day count basis.
//!
//! Rate curves in a snapshot carry a `dayCount` of either 360 or 365; the
//! numerator is always actual calendar days measured as a signed offset from
//! spot.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Actual/360 or Actual/365 Fixed.
///
/// # Formula
///
/// $$\text{Year Fraction} = \frac{\text{Actual Days}}{\text{Basis}}$$
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u32", into = "u32")]
pub enum DayCountBasis {
    /// Actual/360 - USD, EUR and most money markets.
    #[default]
    Act360,
    /// Actual/365 Fixed - GBP, THB, HKD, SGD and similar markets.
    Act365,
}

impl DayCountBasis {
    /// Returns the year basis in days.
    #[must_use]
    pub fn days_in_year(self) -> u32 {
        match self {
            DayCountBasis::Act360 => 360,
            DayCountBasis::Act365 => 365,
        }
    }

    /// Year fraction for a signed day offset.
    #[must_use]
    pub fn year_fraction(self, days: i64) -> f64 {
        days as f64 / f64::from(self.days_in_year())
    }

    /// Returns the conventional name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            DayCountBasis::Act360 => "ACT/360",
            DayCountBasis::Act365 => "ACT/365F",
        }
    }
}

impl fmt::Display for DayCountBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u32> for DayCountBasis {
    type Error = CoreError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            360 => Ok(DayCountBasis::Act360),
            365 => Ok(DayCountBasis::Act365),
            other => Err(CoreError::InvalidDayCount { value: other }),
        }
    }
}

impl From<DayCountBasis> for u32 {
    fn from(basis: DayCountBasis) -> Self {
        basis.days_in_year()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_year_fraction() {
        assert_relative_eq!(DayCountBasis::Act360.year_fraction(90), 0.25);
        assert_relative_eq!(DayCountBasis::Act365.year_fraction(73), 0.2);
        assert_relative_eq!(DayCountBasis::Act365.year_fraction(-1), -1.0 / 365.0);
    }

    #[test]
    fn test_serde_from_integer() {
        let basis: DayCountBasis = serde_json::from_str("365").unwrap();
        assert_eq!(basis, DayCountBasis::Act365);
        assert_eq!(serde_json::to_string(&DayCountBasis::Act360).unwrap(), "360");
        assert!(serde_json::from_str::<DayCountBasis>("252").is_err());
    }
}
