//! Business day calendars and conventions.
//!
//! This module provides:
//! - The [`Calendar`] trait with strict next/previous business-day stepping
//! - [`HolidaySet`]: one jurisdiction's holiday dates
//! - [`HolidayCalendars`]: the loaded registry, keyed by jurisdiction code
//! - [`JointCalendar`]: a selection of jurisdictions observed together
//! - Business day adjustment conventions

mod conventions;
mod holidays;

pub use conventions::{adjust, BusinessDayConvention};
pub use holidays::{HolidayCalendars, HolidayRecord, HolidaySet, JointCalendar};

use crate::types::Date;

/// Direction for stepping to the next business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RollDirection {
    /// Step forward in time.
    Forward,
    /// Step backward in time.
    Backward,
}

impl RollDirection {
    fn step(self) -> i64 {
        match self {
            RollDirection::Forward => 1,
            RollDirection::Backward => -1,
        }
    }
}

/// Trait for business day calendars.
///
/// Saturdays and Sundays are never business days. On top of that, an
/// implementation supplies its holiday dates through [`Calendar::is_holiday`].
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &str;

    /// Returns true if the date appears in the calendar's holiday set.
    ///
    /// Weekends are handled by [`Calendar::is_business_day`] and need not be
    /// listed here.
    fn is_holiday(&self, date: Date) -> bool;

    /// Returns true if the date is neither a weekend nor a holiday.
    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.is_holiday(date)
    }

    /// Returns the first business day strictly after (or before) `date`.
    ///
    /// The input date is never returned, even when it is itself a business day.
    fn next_business_day(&self, date: Date, direction: RollDirection) -> Date {
        let step = direction.step();
        let mut result = date.add_days(step);
        while !self.is_business_day(result) {
            result = result.add_days(step);
        }
        result
    }

    /// Applies [`Calendar::next_business_day`] forward `days` times.
    fn add_business_days(&self, date: Date, days: u32) -> Date {
        (0..days).fold(date, |current, _| {
            self.next_business_day(current, RollDirection::Forward)
        })
    }

    /// Adjusts a date according to the given business day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        conventions::adjust(date, convention, self)
    }

    /// Returns the last business day of the date's month.
    fn end_of_month(&self, date: Date) -> Date {
        self.adjust(date, BusinessDayConvention::EndOfMonth)
    }

    /// Returns true if the date is the last business day of its month.
    fn is_end_of_month(&self, date: Date) -> bool {
        self.end_of_month(date) == date
    }
}

/// A simple weekend-only calendar (no holidays).
///
/// Useful for testing or when holiday data is not available.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &str {
        "Weekend Only"
    }

    fn is_holiday(&self, _date: Date) -> bool {
        false
    }
}
