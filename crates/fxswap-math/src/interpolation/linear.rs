//! Linear interpolation.

use super::{piecewise_linear, validate, Extrapolation, Interpolator};
use crate::error::MathResult;

/// Linear interpolation between data points.
///
/// Connects consecutive pillars with straight lines.
///
/// # Example
///
/// ```rust
/// use fxswap_math::interpolation::{Extrapolation, Interpolator, LinearInterpolator};
///
/// // Pillars at 33 and 61 days from spot
/// let interp = LinearInterpolator::new(vec![33.0, 61.0], vec![-0.50, -1.05])
///     .unwrap()
///     .with_extrapolation(Extrapolation::OriginAnchored);
///
/// let points = interp.interpolate(45.0).unwrap();
/// assert!((points - -0.735714).abs() < 1e-6);
///
/// // Below the first pillar: scaled from spot
/// assert!((interp.interpolate(11.0).unwrap() - -0.5 / 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    extrapolation: Extrapolation,
}

impl LinearInterpolator {
    /// Creates a new linear interpolator.
    ///
    /// # Arguments
    ///
    /// * `xs` - X coordinates (must be strictly increasing)
    /// * `ys` - Y coordinates
    ///
    /// # Errors
    ///
    /// Returns an error if there are no points, lengths differ, a value is
    /// not finite, or `xs` is not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate(&xs, &ys)?;
        Ok(Self {
            xs,
            ys,
            extrapolation: Extrapolation::None,
        })
    }

    /// Sets the behaviour outside the pillar range.
    #[must_use]
    pub fn with_extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        piecewise_linear(&self.xs, &self.ys, x, self.extrapolation)
    }

    fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}
