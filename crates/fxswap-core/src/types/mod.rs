//! Domain types shared across the engine.
//!
//! - [`Date`]: Calendar date for settlement calculations
//! - [`CurrencyCode`] / [`CurrencyPair`]: ISO-style currency identifiers

mod currency;
mod date;

pub use currency::{CurrencyCode, CurrencyPair};
pub use date::Date;
