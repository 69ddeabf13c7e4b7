//! Base currency bootstrap.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use fxswap_core::{CurrencyCode, Date, DayCountBasis};
use fxswap_math::interpolation::{Extrapolation, Interpolator, LinearInterpolator};
use serde::Serialize;
use tracing::debug;

use super::{implied_zero_rate, DfLookup};
use crate::points::{RateCurve, RateTenorPoint, RateType};

/// Days in a year for swap year counting.
const DAYS_PER_YEAR: f64 = 365.0;

/// Simple-interest points within this many days of one year seed the
/// first annual discount factor.
const ONE_YEAR_WINDOW: i64 = 31;

/// A base curve point with its solved discount factor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasePoint {
    /// The input row.
    #[serde(flatten)]
    pub point: RateTenorPoint,
    /// Discount factor to maturity.
    pub df: f64,
    /// `ln(df)`.
    #[serde(rename = "lnDF")]
    pub ln_df: f64,
    /// Simple zero rate `(1/DF - 1) / yf`.
    pub zero_rate: f64,
}

/// A bootstrapped base currency curve.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseCurve {
    currency: CurrencyCode,
    day_count: DayCountBasis,
    #[serde(skip_serializing_if = "Option::is_none")]
    spot_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bootstrapped_at: Option<DateTime<Utc>>,
    #[serde(rename = "tenors")]
    points: Vec<BasePoint>,
    #[serde(skip)]
    lookup: DfLookup,
}

impl PartialEq for BaseCurve {
    fn eq(&self, other: &Self) -> bool {
        self.currency == other.currency
            && self.day_count == other.day_count
            && self.spot_date == other.spot_date
            && self.bootstrapped_at == other.bootstrapped_at
            && self.points == other.points
    }
}

impl BaseCurve {
    /// Returns the currency.
    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    /// Returns the day count basis.
    pub fn day_count(&self) -> DayCountBasis {
        self.day_count
    }

    /// Returns the spot date, if known.
    pub fn spot_date(&self) -> Option<Date> {
        self.spot_date
    }

    /// Returns the bootstrap timestamp, if any.
    pub fn bootstrapped_at(&self) -> Option<DateTime<Utc>> {
        self.bootstrapped_at
    }

    /// Stamps the curve with a bootstrap time.
    #[must_use]
    pub fn with_bootstrapped_at(mut self, at: DateTime<Utc>) -> Self {
        self.bootstrapped_at = Some(at);
        self
    }

    /// Returns the solved points in ascending day order.
    pub fn points(&self) -> &[BasePoint] {
        &self.points
    }

    /// Returns the point at exactly `days`.
    pub fn point_at(&self, days: i64) -> Option<&BasePoint> {
        self.points
            .binary_search_by_key(&days, |p| p.point.days)
            .ok()
            .map(|i| &self.points[i])
    }

    /// Returns true if the curve has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Discount factor at a signed day offset.
    ///
    /// Pillars return their solved value. Between post-spot pillars `ln(DF)`
    /// is interpolated linearly, scaled from spot below the first and held
    /// flat beyond the last. Off-pillar offsets at or before spot, and any
    /// offset on an empty curve, return 1.0.
    pub fn discount_factor(&self, days: i64) -> f64 {
        if let Some(point) = self.point_at(days) {
            return point.df;
        }
        if days <= 0 {
            return 1.0;
        }
        self.lookup.df(days)
    }
}

/// Bootstraps discount factors for the base currency.
///
/// Points tagged [`RateType::Cash`], and any point within one year of spot,
/// use simple interest: `DF = 1 / (1 + r * days / basis)`.
///
/// Longer [`RateType::Swap`] points are annual-pay par swaps. For a point at
/// `Y = round(|days| / 365)` years:
///
/// ```text
/// DF_Y = (1 - r * (DF_1 + ... + DF_{Y-1})) / (1 + r)
/// ```
///
/// Years without a quote are solved first from the par rate interpolated
/// between neighbouring quoted years. A simple-interest point maturing
/// within a month of one year seeds `DF_1`.
///
/// The input curve is not modified; running twice gives identical output.
pub fn bootstrap_base(curve: &RateCurve) -> BaseCurve {
    let basis = curve.day_count();
    let par_rates = ParRates::new(curve.points());
    let mut annual: BTreeMap<u32, f64> = BTreeMap::new();
    let mut points = Vec::with_capacity(curve.len());

    for point in curve.points() {
        let df = if point.kind == RateType::Cash || point.days.abs() <= 365 {
            let df = point.simple_df(basis);
            if point.days > 0 && (point.days - 365).abs() <= ONE_YEAR_WINDOW {
                annual.insert(1, df);
            }
            df
        } else {
            solve_swap_year(&mut annual, swap_years(point.days), point.rate, &par_rates)
        };

        let ln_df = df.ln();
        let zero_rate = implied_zero_rate(df, point.year_fraction(basis), point.rate);
        points.push(BasePoint {
            point: point.clone(),
            df,
            ln_df,
            zero_rate,
        });
    }

    debug!(
        currency = %curve.currency(),
        points = points.len(),
        solved_years = annual.len(),
        "bootstrapped base curve"
    );

    let lookup = DfLookup::new(points.iter().map(|p| (p.point.days, p.ln_df)));
    BaseCurve {
        currency: curve.currency().clone(),
        day_count: basis,
        spot_date: curve.spot_date(),
        bootstrapped_at: curve.bootstrapped_at(),
        points,
        lookup,
    }
}

/// Whole years of a swap point, at least one.
fn swap_years(days: i64) -> u32 {
    let years = (days.unsigned_abs() as f64 / DAYS_PER_YEAR).round() as u32;
    years.max(1)
}

/// Solves `DF_years`, filling any unsolved earlier years first.
fn solve_swap_year(
    annual: &mut BTreeMap<u32, f64>,
    years: u32,
    rate: f64,
    par_rates: &ParRates,
) -> f64 {
    for year in 1..years {
        if !annual.contains_key(&year) {
            let gap_rate = par_rates.rate_at(year).unwrap_or(rate);
            let df = par_df(annual, year, gap_rate);
            annual.insert(year, df);
        }
    }
    let df = par_df(annual, years, rate);
    annual.insert(years, df);
    df
}

fn par_df(annual: &BTreeMap<u32, f64>, year: u32, rate: f64) -> f64 {
    let annuity: f64 = annual.range(1..year).map(|(_, df)| df).sum();
    (1.0 - rate * annuity) / (1.0 + rate)
}

/// Quoted par swap rates by whole year.
struct ParRates {
    interpolator: Option<LinearInterpolator>,
}

impl ParRates {
    fn new(points: &[RateTenorPoint]) -> Self {
        let by_year: BTreeMap<u32, f64> = points
            .iter()
            .filter(|p| p.kind == RateType::Swap && p.days.abs() > 365)
            .map(|p| (swap_years(p.days), p.rate))
            .collect();
        let (years, rates): (Vec<f64>, Vec<f64>) =
            by_year.into_iter().map(|(y, r)| (f64::from(y), r)).unzip();
        let interpolator = LinearInterpolator::new(years, rates)
            .ok()
            .map(|i| i.with_extrapolation(Extrapolation::Flat));
        Self { interpolator }
    }

    fn rate_at(&self, year: u32) -> Option<f64> {
        self.interpolator
            .as_ref()
            .and_then(|i| i.interpolate(f64::from(year)).ok())
    }
}
