//! Discount factor bootstrapping.
//!
//! Two stages, in order:
//!
//! 1. [`bootstrap_base`] turns the base currency's money-market curve into
//!    discount factors directly (simple interest, or annual par swaps beyond
//!    one year).
//! 2. [`bootstrap_implied`] derives the second currency's discount factors
//!    from a [`BaseCurve`] and FX swap points via covered interest parity.
//!
//! The implied stage takes a `&BaseCurve`, so it cannot run on a curve that
//! has not been through the base stage.

mod base;
mod implied;

pub use base::{bootstrap_base, BaseCurve, BasePoint};
pub use implied::{bootstrap_implied, DfSource, ImpliedCurve, ImpliedOutcome, ImpliedPoint};

use fxswap_math::interpolation::{Extrapolation, Interpolator, LogLinearInterpolator};

/// Log-linear discount factor lookup over post-spot pillars.
///
/// Below the first pillar `ln(DF)` is scaled from zero at spot; beyond the
/// last it is held flat.
#[derive(Debug, Clone)]
pub(crate) struct DfLookup {
    interpolator: Option<LogLinearInterpolator>,
}

impl DfLookup {
    pub(crate) fn new(pillars: impl IntoIterator<Item = (i64, f64)>) -> Self {
        let (xs, log_dfs): (Vec<f64>, Vec<f64>) = pillars
            .into_iter()
            .filter(|(days, _)| *days > 0)
            .map(|(days, ln_df)| (days as f64, ln_df))
            .unzip();
        let interpolator = LogLinearInterpolator::from_logs(xs, log_dfs)
            .ok()
            .map(|i| i.with_extrapolation(Extrapolation::OriginAnchored));
        Self { interpolator }
    }

    /// Discount factor at a post-spot offset; 1.0 when there are no pillars.
    pub(crate) fn df(&self, days: i64) -> f64 {
        self.interpolator
            .as_ref()
            .and_then(|i| i.interpolate(days as f64).ok())
            .unwrap_or(1.0)
    }
}

/// Zero rate implied by a discount factor, or `rate` at zero year fraction.
pub(crate) fn implied_zero_rate(df: f64, year_fraction: f64, rate: f64) -> f64 {
    if year_fraction == 0.0 {
        rate
    } else {
        (1.0 / df - 1.0) / year_fraction
    }
}
