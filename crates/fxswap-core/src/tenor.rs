//! Tenors and value-date resolution.
//!
//! A [`Tenor`] is parsed from text once and never mutated. The
//! [`TenorDateResolver`] turns a trade date plus a tenor into a value date
//! using spot-lag stepping, Modified Following adjustment and the
//! End-of-Month rule.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::calendars::{BusinessDayConvention, Calendar, RollDirection};
use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// Longest accepted tenor, in years.
pub const MAX_TENOR_YEARS: u32 = 100;

/// A symbolic duration for a rate or forward quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Tenor {
    /// Overnight: trade date to the next business day.
    Overnight,
    /// Tomorrow-Next: next business day to the one after.
    TomNext,
    /// Spot-Next: spot to the next business day.
    SpotNext,
    /// Spot itself.
    Spot,
    /// `<n>W`
    Weeks(u32),
    /// `<n>M`
    Months(u32),
    /// `<n>Y`
    Years(u32),
}

impl Tenor {
    /// Parses tenor text such as `O/N`, `TN`, `SPOT`, `2W`, `3M`, `10Y`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTenor` for anything else. Unknown tenors are
    /// never defaulted.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let text = s.trim().to_ascii_uppercase();
        match text.as_str() {
            "O/N" | "ON" => return Ok(Tenor::Overnight),
            "T/N" | "TN" => return Ok(Tenor::TomNext),
            "S/N" | "SN" => return Ok(Tenor::SpotNext),
            "SPOT" | "SP" => return Ok(Tenor::Spot),
            "" => return Err(CoreError::invalid_tenor(s, "empty tenor")),
            _ if !text.is_ascii() => return Err(CoreError::invalid_tenor(s, "non-ASCII text")),
            _ => {}
        }

        let (count, unit) = text.split_at(text.len() - 1);
        let count: u32 = count
            .parse()
            .map_err(|_| CoreError::invalid_tenor(s, format!("invalid count '{count}'")))?;
        if count == 0 {
            return Err(CoreError::invalid_tenor(s, "count must be positive"));
        }

        let (tenor, limit) = match unit {
            "W" => (Tenor::Weeks(count), MAX_TENOR_YEARS * 52),
            "M" => (Tenor::Months(count), MAX_TENOR_YEARS * 12),
            "Y" => (Tenor::Years(count), MAX_TENOR_YEARS),
            _ => return Err(CoreError::invalid_tenor(s, format!("unknown unit '{unit}'"))),
        };
        if count > limit {
            return Err(CoreError::invalid_tenor(
                s,
                format!("longer than {MAX_TENOR_YEARS} years"),
            ));
        }
        Ok(tenor)
    }

    /// Returns true for the O/N, T/N, S/N and SPOT codes.
    #[must_use]
    pub fn is_special(&self) -> bool {
        matches!(
            self,
            Tenor::Overnight | Tenor::TomNext | Tenor::SpotNext | Tenor::Spot
        )
    }

    /// Returns the tenor length in whole months for month/year tenors.
    #[must_use]
    pub fn months(&self) -> Option<u32> {
        match self {
            Tenor::Months(m) => Some(*m),
            Tenor::Years(y) => y.checked_mul(12),
            _ => None,
        }
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tenor::Overnight => f.write_str("O/N"),
            Tenor::TomNext => f.write_str("T/N"),
            Tenor::SpotNext => f.write_str("S/N"),
            Tenor::Spot => f.write_str("SPOT"),
            Tenor::Weeks(w) => write!(f, "{}W", w),
            Tenor::Months(m) => write!(f, "{}M", m),
            Tenor::Years(y) => write!(f, "{}Y", y),
        }
    }
}

impl FromStr for Tenor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Tenor {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Tenor> for String {
    fn from(tenor: Tenor) -> Self {
        tenor.to_string()
    }
}

/// Resolves tenors to value dates from a trade date.
///
/// # Example
///
/// ```rust
/// use fxswap_core::calendars::WeekendCalendar;
/// use fxswap_core::tenor::{Tenor, TenorDateResolver};
/// use fxswap_core::types::Date;
///
/// let calendar = WeekendCalendar;
/// let resolver = TenorDateResolver::new(&calendar, 2);
///
/// // Thursday trade, spot the following Monday
/// let trade = Date::from_ymd(2025, 1, 2).unwrap();
/// assert_eq!(resolver.spot_date(trade), Date::from_ymd(2025, 1, 6).unwrap());
/// assert_eq!(
///     resolver.add_tenor(trade, &Tenor::Weeks(1)).unwrap(),
///     Date::from_ymd(2025, 1, 13).unwrap()
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TenorDateResolver<'a, C: Calendar + ?Sized> {
    calendar: &'a C,
    spot_days: u32,
    end_of_month_rule: bool,
}

impl<'a, C: Calendar + ?Sized> TenorDateResolver<'a, C> {
    /// Creates a resolver with the End-of-Month rule enabled.
    pub fn new(calendar: &'a C, spot_days: u32) -> Self {
        Self {
            calendar,
            spot_days,
            end_of_month_rule: true,
        }
    }

    /// Enables or disables the End-of-Month rule for month/year tenors.
    #[must_use]
    pub fn with_end_of_month_rule(mut self, enabled: bool) -> Self {
        self.end_of_month_rule = enabled;
        self
    }

    /// Returns the calendar used for adjustment.
    #[must_use]
    pub fn calendar(&self) -> &'a C {
        self.calendar
    }

    /// Business days from trade date to spot.
    #[must_use]
    pub fn spot_days(&self) -> u32 {
        self.spot_days
    }

    /// Trade date stepped forward `spot_days` business days.
    #[must_use]
    pub fn spot_date(&self, trade_date: Date) -> Date {
        self.calendar.add_business_days(trade_date, self.spot_days)
    }

    /// Resolves a tenor to its value date.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTenor` if the tenor reaches past the
    /// supported date range.
    pub fn add_tenor(&self, trade_date: Date, tenor: &Tenor) -> CoreResult<Date> {
        let spot = self.spot_date(trade_date);
        self.add_tenor_from_spot(trade_date, spot, tenor)
    }

    /// Signed calendar days from spot to the tenor's value date.
    ///
    /// # Errors
    ///
    /// Same conditions as [`add_tenor`](Self::add_tenor).
    pub fn day_offset(&self, trade_date: Date, tenor: &Tenor) -> CoreResult<i64> {
        let spot = self.spot_date(trade_date);
        Ok(spot.days_between(&self.add_tenor_from_spot(trade_date, spot, tenor)?))
    }

    fn add_tenor_from_spot(&self, trade_date: Date, spot: Date, tenor: &Tenor) -> CoreResult<Date> {
        let calendar = self.calendar;
        let out_of_range =
            || CoreError::invalid_tenor(tenor.to_string(), "beyond the supported date range");

        let date = match *tenor {
            Tenor::Spot => spot,
            Tenor::Overnight => calendar.next_business_day(trade_date, RollDirection::Forward),
            Tenor::TomNext => calendar.add_business_days(trade_date, 2),
            Tenor::SpotNext => calendar.next_business_day(spot, RollDirection::Forward),
            Tenor::Weeks(weeks) => {
                let rolled = spot
                    .checked_add_days(i64::from(weeks) * 7)
                    .map_err(|_| out_of_range())?;
                calendar.adjust(rolled, BusinessDayConvention::ModifiedFollowing)
            }
            Tenor::Months(_) | Tenor::Years(_) => {
                let months = tenor
                    .months()
                    .and_then(|m| i32::try_from(m).ok())
                    .ok_or_else(out_of_range)?;
                self.add_months_from_spot(spot, months)
                    .map_err(|_| out_of_range())?
            }
        };
        Ok(date)
    }

    fn add_months_from_spot(&self, spot: Date, months: i32) -> CoreResult<Date> {
        let spot_is_month_end = self.calendar.is_end_of_month(spot);
        let rolled = spot.add_months(months)?;

        Ok(if spot_is_month_end && self.end_of_month_rule {
            self.calendar.end_of_month(rolled)
        } else {
            self.calendar
                .adjust(rolled, BusinessDayConvention::ModifiedFollowing)
        })
    }
}

/// Resolves a tenor string against a trade date.
///
/// Convenience wrapper over [`TenorDateResolver`] for one-off calls.
///
/// # Errors
///
/// Returns `CoreError::InvalidTenor` if `tenor` does not parse or resolves
/// past the supported date range.
pub fn add_tenor<C: Calendar + ?Sized>(
    trade_date: Date,
    tenor: &str,
    spot_days: u32,
    calendar: &C,
    end_of_month_rule: bool,
) -> CoreResult<Date> {
    let tenor = Tenor::parse(tenor)?;
    TenorDateResolver::new(calendar, spot_days)
        .with_end_of_month_rule(end_of_month_rule)
        .add_tenor(trade_date, &tenor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::{HolidaySet, WeekendCalendar};

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_special_codes() {
        assert_eq!(Tenor::parse("O/N").unwrap(), Tenor::Overnight);
        assert_eq!(Tenor::parse("on").unwrap(), Tenor::Overnight);
        assert_eq!(Tenor::parse("T/N").unwrap(), Tenor::TomNext);
        assert_eq!(Tenor::parse("S/N").unwrap(), Tenor::SpotNext);
        assert_eq!(Tenor::parse("SPOT").unwrap(), Tenor::Spot);
    }

    #[test]
    fn test_parse_periods() {
        assert_eq!(Tenor::parse("1W").unwrap(), Tenor::Weeks(1));
        assert_eq!(Tenor::parse("3m").unwrap(), Tenor::Months(3));
        assert_eq!(Tenor::parse(" 10Y ").unwrap(), Tenor::Years(10));
        assert_eq!(Tenor::Years(2).months(), Some(24));
        assert_eq!(Tenor::Weeks(2).months(), None);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        for bad in ["", "3Q", "M", "0M", "-1M", "1.5Y", "X/N"] {
            assert!(
                matches!(Tenor::parse(bad), Err(CoreError::InvalidTenor { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for tenor in [
            Tenor::Overnight,
            Tenor::TomNext,
            Tenor::SpotNext,
            Tenor::Spot,
            Tenor::Weeks(2),
            Tenor::Months(18),
            Tenor::Years(5),
        ] {
            assert_eq!(Tenor::parse(&tenor.to_string()).unwrap(), tenor);
        }
    }

    #[test]
    fn test_one_month_from_mid_month_spot() {
        // Trade Wed 2020-03-04, spot Fri 2020-03-06, +1M = Mon 2020-04-06
        let result = add_tenor(date(2020, 3, 4), "1M", 2, &WeekendCalendar, true).unwrap();
        assert_eq!(result, date(2020, 4, 6));
    }

    #[test]
    fn test_special_tenors() {
        let cal = WeekendCalendar;
        let resolver = TenorDateResolver::new(&cal, 2);
        // Thursday trade, Monday spot
        let trade = date(2025, 1, 2);

        assert_eq!(resolver.add_tenor(trade, &Tenor::Spot).unwrap(), date(2025, 1, 6));
        assert_eq!(resolver.add_tenor(trade, &Tenor::Overnight).unwrap(), date(2025, 1, 3));
        assert_eq!(resolver.add_tenor(trade, &Tenor::TomNext).unwrap(), date(2025, 1, 6));
        assert_eq!(resolver.add_tenor(trade, &Tenor::SpotNext).unwrap(), date(2025, 1, 7));
    }

    #[test]
    fn test_day_offsets_relative_to_spot() {
        let cal = WeekendCalendar;
        let resolver = TenorDateResolver::new(&cal, 2);
        let trade = date(2025, 1, 2);

        assert_eq!(resolver.day_offset(trade, &Tenor::Overnight).unwrap(), -3);
        assert_eq!(resolver.day_offset(trade, &Tenor::Spot).unwrap(), 0);
        assert_eq!(resolver.day_offset(trade, &Tenor::Weeks(1)).unwrap(), 7);
    }

    #[test]
    fn test_week_tenor_uses_modified_following_without_eom() {
        let cal = WeekendCalendar;
        let resolver = TenorDateResolver::new(&cal, 0);

        // Spot Fri 2025-05-23 + 1W = Fri 2025-05-30, already a business day
        assert_eq!(
            resolver.add_tenor(date(2025, 5, 23), &Tenor::Weeks(1)).unwrap(),
            date(2025, 5, 30)
        );
        // Sat 2025-05-31 cannot roll forward into June
        assert_eq!(
            resolver.add_tenor(date(2025, 5, 24), &Tenor::Weeks(1)).unwrap(),
            date(2025, 5, 30)
        );
    }

    #[test]
    fn test_month_end_spot_keeps_month_end() {
        let cal = WeekendCalendar;
        // Spot Fri 2025-02-28 is the last business day of February
        let resolver = TenorDateResolver::new(&cal, 0);
        let spot = date(2025, 2, 28);

        assert_eq!(resolver.add_tenor(spot, &Tenor::Months(1)).unwrap(), date(2025, 3, 31));
        // May 31 2025 is a Saturday
        assert_eq!(resolver.add_tenor(spot, &Tenor::Months(3)).unwrap(), date(2025, 5, 30));

        let no_eom = resolver.with_end_of_month_rule(false);
        assert_eq!(no_eom.add_tenor(spot, &Tenor::Months(1)).unwrap(), date(2025, 3, 28));
    }

    #[test]
    fn test_month_end_business_day_not_calendar_month_end() {
        let cal = WeekendCalendar;
        // Fri 2025-05-30 is the last business day of May (31st is Saturday)
        let resolver = TenorDateResolver::new(&cal, 0);

        assert_eq!(
            resolver.add_tenor(date(2025, 5, 30), &Tenor::Months(1)).unwrap(),
            date(2025, 6, 30)
        );
    }

    #[test]
    fn test_clamps_to_short_month() {
        let cal = WeekendCalendar;
        let resolver = TenorDateResolver::new(&cal, 0).with_end_of_month_rule(false);

        // Wed 2024-01-31 + 1M clamps to Thu 2024-02-29
        assert_eq!(
            resolver.add_tenor(date(2024, 1, 31), &Tenor::Months(1)).unwrap(),
            date(2024, 2, 29)
        );
    }

    #[test]
    fn test_spot_skips_holiday() {
        let cal = HolidaySet::new("TH", [date(2025, 1, 3)]);
        let resolver = TenorDateResolver::new(&cal, 2);

        // Thu trade, Fri holiday, spot Tue
        assert_eq!(resolver.spot_date(date(2025, 1, 2)), date(2025, 1, 7));
    }

    #[test]
    fn test_year_tenor() {
        let cal = WeekendCalendar;
        let result = add_tenor(date(2025, 1, 2), "1Y", 2, &cal, true).unwrap();
        // Spot Mon 2025-01-06 + 1Y = Tue 2026-01-06
        assert_eq!(result, date(2026, 1, 6));
    }

    #[test]
    fn test_parse_rejects_oversized_counts() {
        assert_eq!(Tenor::parse("100Y").unwrap(), Tenor::Years(100));
        assert_eq!(Tenor::parse("1200M").unwrap(), Tenor::Months(1200));
        for bad in ["101Y", "1201M", "5201W", "300000Y", "4000000000W", "99999999999M"] {
            assert!(
                matches!(Tenor::parse(bad), Err(CoreError::InvalidTenor { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_huge_tenors_are_errors_not_panics() {
        let cal = WeekendCalendar;
        let resolver = TenorDateResolver::new(&cal, 2);
        let trade = date(2025, 1, 2);

        assert!(add_tenor(trade, "300000Y", 2, &cal, true).is_err());
        assert!(add_tenor(trade, "4000000000W", 2, &cal, true).is_err());
        for tenor in [
            Tenor::Years(u32::MAX),
            Tenor::Years(300_000),
            Tenor::Months(u32::MAX),
            Tenor::Weeks(u32::MAX),
        ] {
            assert!(
                matches!(resolver.add_tenor(trade, &tenor), Err(CoreError::InvalidTenor { .. })),
                "{tenor} should be rejected"
            );
            assert!(resolver.day_offset(trade, &tenor).is_err());
        }
        assert_eq!(
            resolver.add_tenor(trade, &Tenor::Years(100)).unwrap(),
            date(2125, 1, 8)
        );
    }

    #[test]
    fn test_unknown_tenor_is_fatal() {
        assert!(add_tenor(date(2025, 1, 2), "BROKEN", 2, &WeekendCalendar, true).is_err());
    }
}
