//! Forward point interpolation to an arbitrary settlement date.
//!
//! Both strategies are keyed on the signed day offset from spot and share
//! the pre-spot rules:
//!
//! | Offset | Result |
//! |--------|--------|
//! | `< -1` | `O/N + T/N` |
//! | `-1` | `T/N` |
//! | `0` | zero points |
//!
//! After spot:
//!
//! - [`LinearPointInterpolator`] interpolates swap points directly
//! - [`LogLinearDfInterpolator`] interpolates `ln(DF)` for both currencies and
//!   recovers points from the implied forward
//!
//! Below the first pillar values scale from zero at spot; beyond the last
//! they are clamped. A bid or ask is `None` whenever a pillar it depends on
//! has no quote for that side.

mod linear;
mod log_linear;
mod spread;

pub use linear::LinearPointInterpolator;
pub use log_linear::LogLinearDfInterpolator;
pub use spread::{forward_forward, ForwardSpread, SpreadConvention, SpreadSides};

use fxswap_core::tenor::Tenor;
use serde::{Deserialize, Serialize};

use crate::points::{PipScale, SwapPointCurve};

/// Forward point interpolation strategy.
pub trait ForwardPointInterpolator {
    /// Forward points for a signed day offset from spot.
    fn interpolate(&self, days: i64) -> InterpolationResult;

    /// Short name for logging.
    fn name(&self) -> &'static str;
}

/// Selects a [`ForwardPointInterpolator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMode {
    /// [`LinearPointInterpolator`].
    #[default]
    LinearPoints,
    /// [`LogLinearDfInterpolator`].
    LogLinearDf,
}

/// Forward points at one day offset.
///
/// A fresh value per call; log-linear results also carry the discount
/// factors and forwards they were derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpolationResult {
    /// Signed day offset from spot.
    pub days: i64,
    /// Day count shown to users: `days` after spot, the gap to spot before.
    pub display_days: i64,
    /// Mid swap points.
    pub points: f64,
    /// Bid swap points.
    pub bid: Option<f64>,
    /// Ask swap points.
    pub ask: Option<f64>,
    /// Base currency discount factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_df: Option<f64>,
    /// Second currency mid discount factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_df: Option<f64>,
    /// Second currency bid discount factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_df_bid: Option<f64>,
    /// Second currency ask discount factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_df_ask: Option<f64>,
    /// Mid outright forward.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward: Option<f64>,
    /// Bid outright forward.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward_bid: Option<f64>,
    /// Ask outright forward.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward_ask: Option<f64>,
}

impl InterpolationResult {
    /// A points-only result.
    #[must_use]
    pub fn from_points(days: i64, points: f64, bid: Option<f64>, ask: Option<f64>) -> Self {
        Self {
            days,
            display_days: display_days(days),
            points,
            bid,
            ask,
            base_df: None,
            quote_df: None,
            quote_df_bid: None,
            quote_df_ask: None,
            forward: None,
            forward_bid: None,
            forward_ask: None,
        }
    }

    /// Zero points on both sides, for spot itself.
    #[must_use]
    pub fn spot() -> Self {
        Self::from_points(0, 0.0, Some(0.0), Some(0.0))
    }

    /// Outright forward rates: `spot + points / pip_scale` per side.
    #[must_use]
    pub fn outright(&self, spot: f64, pip_scale: PipScale) -> Outright {
        let outright = |points: f64| spot + pip_scale.to_price(points);
        Outright {
            mid: outright(self.points),
            bid: self.bid.map(outright),
            ask: self.ask.map(outright),
        }
    }
}

/// Outright forward exchange rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Outright {
    /// Mid forward.
    pub mid: f64,
    /// Bid forward.
    pub bid: Option<f64>,
    /// Ask forward.
    pub ask: Option<f64>,
}

/// `days` on or after spot, `|days|` before it.
pub fn display_days(days: i64) -> i64 {
    days.abs()
}

/// Points for offsets at or before spot.
pub(crate) fn pre_spot(swap_points: &SwapPointCurve, days: i64) -> InterpolationResult {
    let leg = |tenor: Tenor| {
        swap_points
            .by_tenor(&tenor)
            .map_or((0.0, None, None), |p| (p.mid, p.bid, p.ask))
    };

    match days {
        0 => InterpolationResult::spot(),
        -1 => {
            let (mid, bid, ask) = leg(Tenor::TomNext);
            InterpolationResult::from_points(days, mid, bid, ask)
        }
        _ => {
            let (on_mid, on_bid, on_ask) = leg(Tenor::Overnight);
            let (tn_mid, tn_bid, tn_ask) = leg(Tenor::TomNext);
            InterpolationResult::from_points(
                days,
                on_mid + tn_mid,
                on_bid.zip(tn_bid).map(|(a, b)| a + b),
                on_ask.zip(tn_ask).map(|(a, b)| a + b),
            )
        }
    }
}

/// Position of a query offset among sorted pillar offsets.
///
/// Lets mid, bid and ask share one lookup while a missing side on either
/// bracketing pillar stays missing in the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Bracket {
    /// Before the first pillar.
    Below,
    /// Exactly on pillar `i`.
    At(usize),
    /// Strictly between pillars `i - 1` and `i`.
    Between(usize),
    /// After the last pillar.
    Beyond,
}

impl Bracket {
    /// Locates `days` among ascending, non-empty `pillars`.
    pub(crate) fn locate(pillars: &[i64], days: i64) -> Self {
        match pillars.binary_search(&days) {
            Ok(i) => Bracket::At(i),
            Err(0) => Bracket::Below,
            Err(i) if i == pillars.len() => Bracket::Beyond,
            Err(i) => Bracket::Between(i),
        }
    }

    /// Evaluates one series at `days`.
    ///
    /// `value(i)` is the series at pillar `i`; `None` there makes every
    /// result that depends on that pillar `None`.
    pub(crate) fn blend(
        self,
        pillars: &[i64],
        days: i64,
        value: impl Fn(usize) -> Option<f64>,
    ) -> Option<f64> {
        let x = days as f64;
        match self {
            Bracket::At(i) => value(i),
            Bracket::Below => value(0).map(|y| y * x / pillars[0] as f64),
            Bracket::Beyond => value(pillars.len() - 1),
            Bracket::Between(i) => {
                let (x0, x1) = (pillars[i - 1] as f64, pillars[i] as f64);
                let (y0, y1) = (value(i - 1)?, value(i)?);
                Some(y0 + (x - x0) / (x1 - x0) * (y1 - y0))
            }
        }
    }
}
