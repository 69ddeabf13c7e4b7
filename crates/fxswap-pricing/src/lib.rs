//! # FxSwap Pricing
//!
//! Client-facing forward quotes on top of [`fxswap_curves`].
//!
//! This crate provides:
//!
//! - **Margins**: credit-tier and notional-bracket margins, per-client
//!   overrides, and the tier-5 block ([`margin`])
//! - **Configuration**: [`EngineConfig`] loadable from JSON or TOML with
//!   defaults and validation through the [`Validate`] trait
//! - **Spot cache values**: [`Cached`] with pure freshness checks
//! - **Orchestration**: [`ForwardPricer`] resolves dates, runs the configured
//!   interpolation strategy and applies margin for one request
//!
//! # Configuration
//!
//! ```rust
//! use fxswap_pricing::prelude::*;
//!
//! let config = EngineConfig::from_toml(r#"
//!     interpolation = "log_linear_df"
//!     calendars = ["US", "TH"]
//!
//!     [[margin.creditTiers]]
//!     tier = 1
//!     value = 2.0
//! "#)
//! .unwrap();
//!
//! assert_eq!(config.spot_days, 2);
//! assert!(config.is_valid());
//! ```
//!
//! The library emits `tracing` events but never installs a subscriber.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_code)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

pub mod cache;
pub mod config;
pub mod error;
pub mod margin;
pub mod pricer;

pub use cache::Cached;
pub use config::EngineConfig;
pub use error::{ConfigError, ConfigResult, PricingError, PricingResult, Validate, ValidationError};
pub use margin::{calculate_margin, CreditTier, MarginConfig, MarginOutcome};
pub use pricer::{ClientQuote, ForwardPricer, QuoteOutcome, QuoteRequest, ValueDate};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cache::Cached;
    pub use crate::config::EngineConfig;
    pub use crate::error::{
        ConfigError, ConfigResult, PricingError, PricingResult, Validate, ValidationError,
    };
    pub use crate::margin::{
        apply_margin, calculate_margin, widen_curve, ClientOverride, CreditTier,
        CreditTierMargin, MarginBreakdown, MarginConfig, MarginContext, MarginOutcome,
        MarginUnit, NotionalTier, QuotedPoints,
    };
    pub use crate::pricer::{ClientQuote, ForwardPricer, QuoteOutcome, QuoteRequest, ValueDate};
}
