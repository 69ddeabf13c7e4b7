//! Interpolation over pillar points.
//!
//! # Available Methods
//!
//! - [`LinearInterpolator`]: Linear in `y`; used for par swap rates
//! - [`LogLinearInterpolator`]: Linear in `ln(y)`; used for discount factor lookup
//!
//! Both take complete series. Quote series with optional bid or ask sides
//! are blended per pillar by the forward point strategies instead.
//!
//! # Boundaries
//!
//! | [`Extrapolation`] | Below first pillar | Beyond last pillar |
//! |-------------------|--------------------|--------------------|
//! | `None` | error | error |
//! | `Flat` | first value | last value |
//! | `OriginAnchored` | `y0 * x / x0` | last value |
//!
//! `OriginAnchored` assumes the curve passes through `(0, 0)`: zero points at
//! spot, or `ln(DF) = 0` at spot for the log-linear variant.

mod linear;
mod log_linear;

pub use linear::LinearInterpolator;
pub use log_linear::LogLinearInterpolator;

use crate::error::{MathError, MathResult};

/// Behaviour outside the pillar range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extrapolation {
    /// Reject queries outside the pillar range.
    #[default]
    None,
    /// Hold the end values constant.
    Flat,
    /// Scale linearly from the origin below the first pillar, flat beyond the last.
    OriginAnchored,
}

/// Trait for interpolation methods.
pub trait Interpolator: Send + Sync {
    /// Returns the interpolated value at x.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// Returns the configured boundary behaviour.
    fn extrapolation(&self) -> Extrapolation;

    /// Returns the minimum x value in the data.
    fn min_x(&self) -> f64;

    /// Returns the maximum x value in the data.
    fn max_x(&self) -> f64;

    /// Checks if x is within the interpolation range.
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}

/// Validates pillar abscissae: non-empty, same length as `ys`, strictly increasing.
fn validate(xs: &[f64], ys: &[f64]) -> MathResult<()> {
    if xs.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    if xs.len() != ys.len() {
        return Err(MathError::invalid_input(format!(
            "xs and ys must have same length: {} vs {}",
            xs.len(),
            ys.len()
        )));
    }
    if xs.iter().chain(ys).any(|v| !v.is_finite()) {
        return Err(MathError::invalid_input("pillar values must be finite"));
    }
    if xs.windows(2).any(|pair| pair[1] <= pair[0]) {
        return Err(MathError::invalid_input(
            "x values must be strictly increasing",
        ));
    }
    Ok(())
}

/// Piecewise-linear evaluation of `ys` at `x` under a boundary rule.
///
/// Pillar hits return the stored value exactly.
fn piecewise_linear(xs: &[f64], ys: &[f64], x: f64, extrapolation: Extrapolation) -> MathResult<f64> {
    let n = xs.len();
    let (first, last) = (xs[0], xs[n - 1]);

    if x < first || x > last {
        return match extrapolation {
            Extrapolation::None => Err(MathError::ExtrapolationNotAllowed {
                x,
                min: first,
                max: last,
            }),
            Extrapolation::OriginAnchored if x < first && first > 0.0 => Ok(ys[0] * x / first),
            Extrapolation::Flat | Extrapolation::OriginAnchored => {
                Ok(if x < first { ys[0] } else { ys[n - 1] })
            }
        };
    }

    match xs.binary_search_by(|probe| probe.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal)) {
        Ok(i) => Ok(ys[i]),
        Err(i) => {
            // first < x < last, so 1 <= i <= n - 1
            let (x0, x1) = (xs[i - 1], xs[i]);
            let (y0, y1) = (ys[i - 1], ys[i]);
            let t = (x - x0) / (x1 - x0);
            Ok(y0 + t * (y1 - y0))
        }
    }
}
