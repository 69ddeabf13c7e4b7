//! # FxSwap Core
//!
//! Date arithmetic shared by every stage of the FxSwap engine.
//!
//! This crate provides:
//!
//! - **Types**: [`Date`], [`CurrencyPair`], [`DayCountBasis`]
//! - **Calendars**: Holiday sets keyed by jurisdiction, joined into
//!   settlement calendars, with strict next/previous business-day stepping
//! - **Conventions**: Following, Preceding, Modified Following/Preceding and
//!   End-of-Month date adjustment
//! - **Tenors**: Parsing of `O/N`, `T/N`, `S/N`, `SPOT`, `<n>W`, `<n>M`, `<n>Y`
//!   and resolution of a tenor to a value date from a trade date
//!
//! ## Example
//!
//! ```rust
//! use fxswap_core::prelude::*;
//!
//! let calendar = WeekendCalendar;
//! let resolver = TenorDateResolver::new(&calendar, 2);
//!
//! let trade = Date::from_ymd(2020, 3, 4).unwrap();
//! let one_month = resolver.add_tenor(trade, &"1M".parse().unwrap()).unwrap();
//! assert_eq!(one_month, Date::from_ymd(2020, 4, 6).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_possible_truncation)]

pub mod calendars;
pub mod daycount;
pub mod error;
pub mod tenor;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{
        BusinessDayConvention, Calendar, HolidayCalendars, HolidaySet, JointCalendar,
        RollDirection, WeekendCalendar,
    };
    pub use crate::daycount::DayCountBasis;
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::tenor::{add_tenor, Tenor, TenorDateResolver};
    pub use crate::types::{CurrencyCode, CurrencyPair, Date};
}

// Re-export commonly used types at crate root
pub use daycount::DayCountBasis;
pub use error::{CoreError, CoreResult};
pub use types::{CurrencyCode, CurrencyPair, Date};
