//! Error types for date, calendar and tenor handling.
//!
//! Everything here is an input-shape error: the caller handed over a string
//! or a date that cannot be interpreted. Missing market data is never an error
//! at this layer.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The main error type for core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Invalid or unparseable date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Tenor string that does not name a known tenor.
    #[error("Invalid tenor '{tenor}': {reason}")]
    InvalidTenor {
        /// The rejected tenor text.
        tenor: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Invalid currency code or pair.
    #[error("Invalid currency: {value}")]
    InvalidCurrency {
        /// The rejected text.
        value: String,
    },

    /// Day count basis other than 360 or 365.
    #[error("Unsupported day count basis {value}, expected 360 or 365")]
    InvalidDayCount {
        /// The rejected basis.
        value: u32,
    },

    /// Calendar data could not be loaded.
    #[error("Calendar error: {reason}")]
    CalendarError {
        /// Description of the error.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid tenor error.
    #[must_use]
    pub fn invalid_tenor(tenor: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTenor {
            tenor: tenor.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid currency error.
    #[must_use]
    pub fn invalid_currency(value: impl Into<String>) -> Self {
        Self::InvalidCurrency {
            value: value.into(),
        }
    }

    /// Creates a calendar error.
    #[must_use]
    pub fn calendar(reason: impl Into<String>) -> Self {
        Self::CalendarError {
            reason: reason.into(),
        }
    }
}
