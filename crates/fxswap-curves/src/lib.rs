//! # FxSwap Curves
//!
//! Discount curves and forward points for FX swaps.
//!
//! This crate provides:
//!
//! - **Market inputs**: [`RateCurve`], [`SwapPointCurve`], typed
//!   [`SwapPointOverrides`] and [`MarketSnapshot`] ingestion
//! - **Bootstrap**: base currency discount factors from money-market and
//!   par swap rates, and implied second currency discount factors from swap
//!   points via covered interest parity
//! - **Forward points**: linear-on-points and log-linear-on-DF interpolation
//!   to any settlement date, plus forward-forward spreads
//!
//! ## Quick Start
//!
//! ```rust
//! use fxswap_curves::prelude::*;
//! use fxswap_core::{CurrencyCode, DayCountBasis};
//!
//! let usd = RateCurve::new(
//!     CurrencyCode::new("USD").unwrap(),
//!     DayCountBasis::Act360,
//!     vec![RateTenorPoint::new("1M", 33, 0.053, RateType::Cash)],
//! )
//! .unwrap();
//! let thb = RateCurve::new(
//!     CurrencyCode::new("THB").unwrap(),
//!     DayCountBasis::Act365,
//!     vec![RateTenorPoint::new("1M", 33, 0.025, RateType::Cash)],
//! )
//! .unwrap();
//! let swaps = SwapPointCurve::new(vec![FxSwapPoint::new("1M", 33, -8.5)]).unwrap();
//!
//! let base = bootstrap_base(&usd);
//! let implied = bootstrap_implied(
//!     &base,
//!     &thb,
//!     &swaps,
//!     Some(36.5),
//!     &SwapPointOverrides::new(),
//!     PipScale::default(),
//! )
//! .into_implied()
//! .unwrap();
//!
//! let interp = LogLinearDfInterpolator::new(&base, &implied, &swaps, PipScale::default());
//! let result = interp.interpolate(33);
//! assert!((result.points - -8.5).abs() < 1e-8);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::similar_names)]

pub mod bootstrap;
pub mod error;
pub mod forward;
pub mod overrides;
pub mod points;
pub mod snapshot;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::{
        bootstrap_base, bootstrap_implied, BaseCurve, BasePoint, DfSource, ImpliedCurve,
        ImpliedOutcome, ImpliedPoint,
    };
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::forward::{
        forward_forward, ForwardPointInterpolator, ForwardSpread, InterpolationMode,
        InterpolationResult, LinearPointInterpolator, LogLinearDfInterpolator, Outright,
        SpreadConvention, SpreadSides,
    };
    pub use crate::overrides::{PointOverride, RawOverrideValue, RawPointOverride, SwapPointOverrides};
    pub use crate::points::{
        quote_offset, FxSwapPoint, PipScale, RateCurve, RateTenorPoint, RateType, SwapPointCurve,
    };
    pub use crate::snapshot::MarketSnapshot;
}

pub use bootstrap::{bootstrap_base, bootstrap_implied, BaseCurve, ImpliedCurve, ImpliedOutcome};
pub use error::{CurveError, CurveResult};
pub use points::{FxSwapPoint, PipScale, RateCurve, RateTenorPoint, RateType, SwapPointCurve};
