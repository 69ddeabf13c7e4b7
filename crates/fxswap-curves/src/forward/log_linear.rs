//! Log-linear interpolation on discount factors.

use super::{pre_spot, Bracket, ForwardPointInterpolator, InterpolationResult};
use crate::bootstrap::{BaseCurve, ImpliedCurve};
use crate::points::{PipScale, SwapPointCurve};

/// Interpolates `ln(DF)` for both currencies and recovers swap points from
/// covered interest parity:
///
/// ```text
/// Forward = Spot * BaseDF / QuoteDF
/// Points  = (Forward - Spot) * pip_scale
/// ```
///
/// Mid, bid and ask use the second currency's mid, bid and ask discount
/// factor series. At or before spot the swap points are used directly.
#[derive(Debug, Clone, Copy)]
pub struct LogLinearDfInterpolator<'a> {
    base: &'a BaseCurve,
    implied: &'a ImpliedCurve,
    swap_points: &'a SwapPointCurve,
    pip_scale: PipScale,
}

impl<'a> LogLinearDfInterpolator<'a> {
    /// Creates an interpolator.
    ///
    /// Spot is taken from the implied curve.
    pub fn new(
        base: &'a BaseCurve,
        implied: &'a ImpliedCurve,
        swap_points: &'a SwapPointCurve,
        pip_scale: PipScale,
    ) -> Self {
        Self {
            base,
            implied,
            swap_points,
            pip_scale,
        }
    }
}

impl ForwardPointInterpolator for LogLinearDfInterpolator<'_> {
    fn interpolate(&self, days: i64) -> InterpolationResult {
        if days <= 0 {
            return pre_spot(self.swap_points, days);
        }

        let pillars = self.implied.forward_points();
        if pillars.is_empty() {
            return InterpolationResult::from_points(days, 0.0, None, None);
        }

        let offsets: Vec<i64> = pillars.iter().map(|p| p.days()).collect();
        let bracket = Bracket::locate(&offsets, days);
        let quote_df = |ln_df: Option<f64>| ln_df.map(f64::exp);

        let base_df = self.base.discount_factor(days);
        let mid_df = quote_df(bracket.blend(&offsets, days, |i| Some(pillars[i].ln_df)));
        let bid_df = quote_df(bracket.blend(&offsets, days, |i| pillars[i].ln_df_bid));
        let ask_df = quote_df(bracket.blend(&offsets, days, |i| pillars[i].ln_df_ask));

        let spot = self.implied.spot();
        let forward = |df: f64| spot * base_df / df;
        let points = |fwd: f64| self.pip_scale.to_points(fwd - spot);

        let fwd_mid = mid_df.map(forward);
        let fwd_bid = bid_df.map(forward);
        let fwd_ask = ask_df.map(forward);

        InterpolationResult {
            base_df: Some(base_df),
            quote_df: mid_df,
            quote_df_bid: bid_df,
            quote_df_ask: ask_df,
            forward: fwd_mid,
            forward_bid: fwd_bid,
            forward_ask: fwd_ask,
            ..InterpolationResult::from_points(
                days,
                fwd_mid.map_or(0.0, points),
                fwd_bid.map(points),
                fwd_ask.map(points),
            )
        }
    }

    fn name(&self) -> &'static str {
        "log_linear_df"
    }
}
