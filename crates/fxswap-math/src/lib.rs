//! # FxSwap Math
//!
//! Interpolation primitives for the FxSwap engine.
//!
//! This crate provides:
//!
//! - **Linear**: straight lines between pillars
//! - **Log-Linear**: straight lines between `ln(y)`, for discount factors
//! - **Extrapolation**: none, flat, or origin-anchored (scaled from zero
//!   below the first pillar, flat beyond the last)
//!
//! ## Design Philosophy
//!
//! - **Exact at pillars**: querying a pillar returns its input value bit for bit
//! - **Explicit boundaries**: out-of-range behaviour is chosen, never implied

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::float_cmp)]

pub mod error;
pub mod interpolation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{
        Extrapolation, Interpolator, LinearInterpolator, LogLinearInterpolator,
    };
}

pub use error::{MathError, MathResult};
