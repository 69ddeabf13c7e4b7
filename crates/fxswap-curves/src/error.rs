//! Error types for curve operations.
//!
//! Only malformed input is an error here. Missing market data surfaces as
//! `None` sides, identity discount factors or an unchanged curve.

use fxswap_core::CoreError;
use fxswap_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Two points in one curve share a day offset.
    #[error("Duplicate day offset {days} in curve: '{first}' and '{second}'")]
    DuplicateDayOffset {
        /// The shared offset.
        days: i64,
        /// Tenor label of the first point.
        first: String,
        /// Tenor label of the second point.
        second: String,
    },

    /// A swap-point override value is not a number.
    #[error("Invalid override for {tenor} {field}: '{value}'")]
    InvalidOverride {
        /// Tenor label the override is keyed on.
        tenor: String,
        /// Which side (`mid`, `bid`, `ask`).
        field: &'static str,
        /// The rejected raw value.
        value: String,
    },

    /// The market snapshot could not be read.
    #[error("Invalid snapshot: {reason}")]
    InvalidSnapshot {
        /// Description of the problem.
        reason: String,
    },

    /// Invalid value (NaN, Inf, or domain error).
    #[error("Invalid value: {reason}")]
    InvalidValue {
        /// Description of why value is invalid.
        reason: String,
    },

    /// Date, tenor or currency error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Interpolation error.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl CurveError {
    /// Creates a duplicate day offset error.
    #[must_use]
    pub fn duplicate_day_offset(
        days: i64,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self::DuplicateDayOffset {
            days,
            first: first.into(),
            second: second.into(),
        }
    }

    /// Creates an invalid override error.
    #[must_use]
    pub fn invalid_override(
        tenor: impl Into<String>,
        field: &'static str,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidOverride {
            tenor: tenor.into(),
            field,
            value: value.into(),
        }
    }

    /// Creates an invalid snapshot error.
    #[must_use]
    pub fn invalid_snapshot(reason: impl Into<String>) -> Self {
        Self::InvalidSnapshot {
            reason: reason.into(),
        }
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }
}
