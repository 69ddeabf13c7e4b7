//! Linear interpolation on swap points.

use super::{pre_spot, Bracket, ForwardPointInterpolator, InterpolationResult};
use crate::points::SwapPointCurve;

/// Interpolates mid, bid and ask swap points linearly in days.
///
/// # Example
///
/// ```rust
/// use fxswap_curves::prelude::*;
///
/// let curve = SwapPointCurve::new(vec![
///     FxSwapPoint::new("1M", 33, -0.50),
///     FxSwapPoint::new("2M", 61, -1.05),
/// ])
/// .unwrap();
///
/// let result = LinearPointInterpolator::new(&curve).interpolate(45);
/// assert!((result.points - -0.735714).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LinearPointInterpolator<'a> {
    swap_points: &'a SwapPointCurve,
}

impl<'a> LinearPointInterpolator<'a> {
    /// Creates an interpolator over a swap point curve.
    pub fn new(swap_points: &'a SwapPointCurve) -> Self {
        Self { swap_points }
    }
}

impl ForwardPointInterpolator for LinearPointInterpolator<'_> {
    fn interpolate(&self, days: i64) -> InterpolationResult {
        if days <= 0 {
            return pre_spot(self.swap_points, days);
        }

        let quotes = self.swap_points.forward_points();
        if quotes.is_empty() {
            return InterpolationResult::from_points(days, 0.0, None, None);
        }

        let pillars: Vec<i64> = quotes.iter().map(|p| p.days).collect();
        let bracket = Bracket::locate(&pillars, days);

        let points = bracket
            .blend(&pillars, days, |i| Some(quotes[i].mid))
            .unwrap_or(0.0);
        let bid = bracket.blend(&pillars, days, |i| quotes[i].bid);
        let ask = bracket.blend(&pillars, days, |i| quotes[i].ask);

        InterpolationResult::from_points(days, points, bid, ask)
    }

    fn name(&self) -> &'static str {
        "linear_points"
    }
}
