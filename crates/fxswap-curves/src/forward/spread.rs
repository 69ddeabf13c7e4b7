//! Forward-forward spreads between two settlement dates.

use serde::{Deserialize, Serialize};

use super::{ForwardPointInterpolator, InterpolationResult};

/// How bid/ask sides combine across the two legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpreadConvention {
    /// Same side on both legs: far bid minus near bid, far ask minus near ask.
    #[default]
    Tight,
    /// Crossed: far bid minus near ask, far ask minus near bid.
    Conservative,
}

/// Bid and ask of a spread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpreadSides {
    /// Bid spread points.
    pub bid: Option<f64>,
    /// Ask spread points.
    pub ask: Option<f64>,
}

/// Forward points between a near and a far date, under both conventions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForwardSpread {
    /// Spot-to-near result.
    pub near: InterpolationResult,
    /// Spot-to-far result.
    pub far: InterpolationResult,
    /// Mid spread points.
    pub mid: f64,
    /// [`SpreadConvention::Tight`] sides.
    pub tight: SpreadSides,
    /// [`SpreadConvention::Conservative`] sides.
    pub conservative: SpreadSides,
}

impl ForwardSpread {
    /// Sides under `convention`.
    pub fn sides(&self, convention: SpreadConvention) -> SpreadSides {
        match convention {
            SpreadConvention::Tight => self.tight,
            SpreadConvention::Conservative => self.conservative,
        }
    }
}

/// Runs `interpolator` at both offsets and derives the spread between them.
pub fn forward_forward<I>(interpolator: &I, start_days: i64, maturity_days: i64) -> ForwardSpread
where
    I: ForwardPointInterpolator + ?Sized,
{
    let near = interpolator.interpolate(start_days);
    let far = interpolator.interpolate(maturity_days);
    let diff = |a: Option<f64>, b: Option<f64>| a.zip(b).map(|(a, b)| a - b);

    ForwardSpread {
        near,
        far,
        mid: far.points - near.points,
        tight: SpreadSides {
            bid: diff(far.bid, near.bid),
            ask: diff(far.ask, near.ask),
        },
        conservative: SpreadSides {
            bid: diff(far.bid, near.ask),
            ask: diff(far.ask, near.bid),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forward::LinearPointInterpolator;
    use crate::points::{FxSwapPoint, SwapPointCurve};
    use approx::assert_relative_eq;

    #[test]
    fn test_tight_and_conservative() {
        let curve = SwapPointCurve::new(vec![
            FxSwapPoint::new("1M", 30, -10.0).with_sides(Some(-11.0), Some(-9.0)),
            FxSwapPoint::new("3M", 90, -30.0).with_sides(Some(-32.0), Some(-28.0)),
        ])
        .unwrap();
        let spread = forward_forward(&LinearPointInterpolator::new(&curve), 30, 90);

        assert_relative_eq!(spread.mid, -20.0, epsilon = 1e-12);
        assert_relative_eq!(spread.tight.bid.unwrap(), -21.0, epsilon = 1e-12);
        assert_relative_eq!(spread.tight.ask.unwrap(), -19.0, epsilon = 1e-12);
        assert_relative_eq!(spread.conservative.bid.unwrap(), -23.0, epsilon = 1e-12);
        assert_relative_eq!(spread.conservative.ask.unwrap(), -17.0, epsilon = 1e-12);
        assert_eq!(spread.sides(SpreadConvention::Conservative), spread.conservative);
    }

    #[test]
    fn test_missing_side_propagates() {
        let curve = SwapPointCurve::new(vec![
            FxSwapPoint::new("1M", 30, -10.0).with_sides(None, Some(-9.0)),
            FxSwapPoint::new("3M", 90, -30.0).with_sides(Some(-32.0), Some(-28.0)),
        ])
        .unwrap();
        let spread = forward_forward(&LinearPointInterpolator::new(&curve), 30, 90);

        assert_eq!(spread.tight.bid, None);
        assert_eq!(spread.conservative.ask, None);
        assert_relative_eq!(spread.conservative.bid.unwrap(), -23.0, epsilon = 1e-12);
    }
}
