//! Business day adjustment conventions.

use serde::{Deserialize, Serialize};

use super::{Calendar, RollDirection};
use crate::types::Date;

/// Business day adjustment conventions.
///
/// These conventions specify how to adjust a date that falls
/// on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessDayConvention {
    /// No adjustment - use the date as-is even if not a business day.
    #[serde(rename = "NO_CHANGE", alias = "UNADJUSTED")]
    Unadjusted,

    /// Move to the following business day.
    #[default]
    Following,

    /// Move to the following business day, unless it crosses a month boundary,
    /// in which case move to the preceding business day.
    #[serde(rename = "MD_FOLLOWING", alias = "MODIFIED_FOLLOWING")]
    ModifiedFollowing,

    /// Move to the preceding business day.
    Preceding,

    /// Move to the preceding business day, unless it crosses a month boundary,
    /// in which case move to the following business day.
    #[serde(rename = "MD_PRECEDING", alias = "MODIFIED_PRECEDING")]
    ModifiedPreceding,

    /// Snap to the last business day of the date's month.
    #[serde(rename = "END_MONTH", alias = "END_OF_MONTH")]
    EndOfMonth,
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
            BusinessDayConvention::EndOfMonth => "End of Month",
        };
        write!(f, "{name}")
    }
}

/// Adjusts a date according to the given business day convention.
///
/// `Unadjusted` and `EndOfMonth` are evaluated whether or not the input is a
/// business day; every other convention returns a business day unchanged.
pub fn adjust<C: Calendar + ?Sized>(
    date: Date,
    convention: BusinessDayConvention,
    calendar: &C,
) -> Date {
    match convention {
        BusinessDayConvention::Unadjusted => date,

        BusinessDayConvention::EndOfMonth => {
            let eom = date.end_of_month();
            if calendar.is_business_day(eom) {
                eom
            } else {
                preceding(eom, calendar)
            }
        }

        _ if calendar.is_business_day(date) => date,

        BusinessDayConvention::Following => following(date, calendar),

        BusinessDayConvention::ModifiedFollowing => {
            let adjusted = following(date, calendar);
            if adjusted.same_month(&date) {
                adjusted
            } else {
                // Crossed month boundary, go preceding instead
                preceding(date, calendar)
            }
        }

        BusinessDayConvention::Preceding => preceding(date, calendar),

        BusinessDayConvention::ModifiedPreceding => {
            let adjusted = preceding(date, calendar);
            if adjusted.same_month(&date) {
                adjusted
            } else {
                // Crossed month boundary, go following instead
                following(date, calendar)
            }
        }
    }
}

fn following<C: Calendar + ?Sized>(date: Date, calendar: &C) -> Date {
    calendar.next_business_day(date, RollDirection::Forward)
}

fn preceding<C: Calendar + ?Sized>(date: Date, calendar: &C) -> Date {
    calendar.next_business_day(date, RollDirection::Backward)
}
