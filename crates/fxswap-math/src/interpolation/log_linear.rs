//! Log-linear interpolation.
//!
//! Interpolates the logarithm of values, which is useful for discount factors
//! as it ensures positive values and piecewise constant forward rates.

use super::{piecewise_linear, validate, Extrapolation, Interpolator};
use crate::error::{MathError, MathResult};

/// Log-linear interpolation between data points.
///
/// Interpolates the natural logarithm of y values, then exponentiates the result:
///
/// ```text
/// y(x) = exp(linear_interpolate(x, ln(y)))
/// ```
///
/// With [`Extrapolation::OriginAnchored`] the log is scaled from zero below
/// the first pillar, i.e. the curve passes through `y(0) = 1`.
///
/// # Example
///
/// ```rust
/// use fxswap_math::interpolation::{Extrapolation, Interpolator, LogLinearInterpolator};
///
/// let days = vec![30.0, 91.0, 182.0];
/// let discount_factors = vec![0.9975, 0.9921, 0.9840];
///
/// let interp = LogLinearInterpolator::new(days, discount_factors)
///     .unwrap()
///     .with_extrapolation(Extrapolation::OriginAnchored);
/// let df = interp.interpolate(60.0).unwrap();
/// assert!(df < 0.9975 && df > 0.9921);
/// ```
#[derive(Debug, Clone)]
pub struct LogLinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Precomputed ln(y) values
    log_ys: Vec<f64>,
    extrapolation: Extrapolation,
}

impl LogLinearInterpolator {
    /// Creates a new log-linear interpolator.
    ///
    /// # Arguments
    ///
    /// * `xs` - X coordinates (must be strictly increasing)
    /// * `ys` - Y coordinates (must all be positive)
    ///
    /// # Errors
    ///
    /// Returns an error if there are no points, lengths differ, `xs` is not
    /// strictly increasing, or any y value is non-positive.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate(&xs, &ys)?;

        let mut log_ys = Vec::with_capacity(ys.len());
        for (i, &y) in ys.iter().enumerate() {
            if y <= 0.0 {
                return Err(MathError::invalid_input(format!(
                    "y[{i}] = {y} is not positive; log-linear requires positive values"
                )));
            }
            log_ys.push(y.ln());
        }

        Ok(Self {
            xs,
            ys,
            log_ys,
            extrapolation: Extrapolation::None,
        })
    }

    /// Creates an interpolator from values that are already logarithms.
    ///
    /// Pillar queries return `exp(ln_y)` for these.
    ///
    /// # Errors
    ///
    /// Same shape checks as [`LogLinearInterpolator::new`].
    pub fn from_logs(xs: Vec<f64>, log_ys: Vec<f64>) -> MathResult<Self> {
        validate(&xs, &log_ys)?;
        let ys = log_ys.iter().map(|l| l.exp()).collect();
        Ok(Self {
            xs,
            ys,
            log_ys,
            extrapolation: Extrapolation::None,
        })
    }

    /// Sets the behaviour outside the pillar range.
    #[must_use]
    pub fn with_extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    /// Returns the interpolated `ln(y)` at x.
    pub fn interpolate_log(&self, x: f64) -> MathResult<f64> {
        piecewise_linear(&self.xs, &self.log_ys, x, self.extrapolation)
    }

    /// Returns the original y values.
    #[must_use]
    pub fn y_values(&self) -> &[f64] {
        &self.ys
    }
}

impl Interpolator for LogLinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        if let Some(i) = self.xs.iter().position(|&p| p == x) {
            return Ok(self.ys[i]);
        }
        Ok(self.interpolate_log(x)?.exp())
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
