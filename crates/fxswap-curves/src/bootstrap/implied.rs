//! Second currency bootstrap from FX swap points.

use chrono::{DateTime, Utc};
use fxswap_core::{CurrencyCode, Date, DayCountBasis};
use serde::Serialize;
use tracing::{debug, warn};

use super::base::BaseCurve;
use super::{implied_zero_rate, DfLookup};
use crate::overrides::SwapPointOverrides;
use crate::points::{PipScale, RateCurve, RateTenorPoint, SwapPointCurve};

/// Where an implied discount factor came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DfSource {
    /// Covered interest parity against a swap point.
    SwapPoints,
    /// Simple interest on the point's own quoted rate.
    QuotedRate,
}

/// A second currency point with mid, bid and ask discount factors.
///
/// The embedded point carries the bid/ask discount factors in its
/// `df_bid`/`df_ask` fields, so [`ImpliedCurve::to_rate_curve`] can feed
/// them into the next run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpliedPoint {
    /// The input row, with bid/ask discount factors filled in.
    #[serde(flatten)]
    pub point: RateTenorPoint,
    /// Mid discount factor.
    pub df: f64,
    /// `ln(df)`.
    #[serde(rename = "lnDF")]
    pub ln_df: f64,
    /// `ln(df_bid)`, if a bid discount factor exists.
    #[serde(rename = "lnDFBid")]
    pub ln_df_bid: Option<f64>,
    /// `ln(df_ask)`, if an ask discount factor exists.
    #[serde(rename = "lnDFAsk")]
    pub ln_df_ask: Option<f64>,
    /// Simple zero rate implied by the mid discount factor.
    pub zero_rate: f64,
    /// How the mid discount factor was obtained.
    pub source: DfSource,
}

impl ImpliedPoint {
    fn new(
        point: &RateTenorPoint,
        basis: DayCountBasis,
        df: f64,
        df_bid: Option<f64>,
        df_ask: Option<f64>,
        source: DfSource,
    ) -> Self {
        let zero_rate = implied_zero_rate(df, point.year_fraction(basis), point.rate);
        Self {
            point: point.clone().with_stored_dfs(df_bid, df_ask),
            df,
            ln_df: df.ln(),
            ln_df_bid: df_bid.map(f64::ln),
            ln_df_ask: df_ask.map(f64::ln),
            zero_rate,
            source,
        }
    }

    /// Signed day offset from spot.
    pub fn days(&self) -> i64 {
        self.point.days
    }

    /// Bid discount factor.
    pub fn df_bid(&self) -> Option<f64> {
        self.point.df_bid
    }

    /// Ask discount factor.
    pub fn df_ask(&self) -> Option<f64> {
        self.point.df_ask
    }
}

/// A bootstrapped second currency curve.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpliedCurve {
    currency: CurrencyCode,
    day_count: DayCountBasis,
    #[serde(skip_serializing_if = "Option::is_none")]
    spot_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bootstrapped_at: Option<DateTime<Utc>>,
    spot: f64,
    #[serde(rename = "tenors")]
    points: Vec<ImpliedPoint>,
    #[serde(skip)]
    lookup: DfLookup,
}

impl PartialEq for ImpliedCurve {
    fn eq(&self, other: &Self) -> bool {
        self.currency == other.currency
            && self.day_count == other.day_count
            && self.spot_date == other.spot_date
            && self.bootstrapped_at == other.bootstrapped_at
            && self.spot == other.spot
            && self.points == other.points
    }
}

impl ImpliedCurve {
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

    /// Returns the spot rate used.
    pub fn spot(&self) -> f64 {
        self.spot
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

    /// Returns the points in ascending day order.
    pub fn points(&self) -> &[ImpliedPoint] {
        &self.points
    }

    /// Points strictly after spot.
    pub fn forward_points(&self) -> &[ImpliedPoint] {
        let first = self.points.partition_point(|p| p.days() <= 0);
        &self.points[first..]
    }

    /// Returns the point at exactly `days`.
    pub fn point_at(&self, days: i64) -> Option<&ImpliedPoint> {
        self.points
            .binary_search_by_key(&days, ImpliedPoint::days)
            .ok()
            .map(|i| &self.points[i])
    }

    /// Mid discount factor at a signed day offset, with the same rules as
    /// [`BaseCurve::discount_factor`].
    pub fn discount_factor(&self, days: i64) -> f64 {
        if let Some(point) = self.point_at(days) {
            return point.df;
        }
        if days <= 0 {
            return 1.0;
        }
        self.lookup.df(days)
    }

    /// The curve as rate rows with bid/ask discount factors stored.
    #[must_use]
    pub fn to_rate_curve(&self) -> RateCurve {
        let mut curve = RateCurve::empty(self.currency.clone(), self.day_count);
        if let Some(spot_date) = self.spot_date {
            curve = curve.with_spot_date(spot_date);
        }
        if let Some(at) = self.bootstrapped_at {
            curve = curve.with_bootstrapped_at(at);
        }
        // Points are already sorted and unique.
        curve.replace_points(self.points.iter().map(|p| p.point.clone()).collect());
        curve
    }
}

/// Result of an implied bootstrap.
#[derive(Debug, Clone, PartialEq)]
pub enum ImpliedOutcome {
    /// Discount factors were derived.
    Bootstrapped(ImpliedCurve),
    /// Spot, the curve, or the base curve was missing; the input is returned.
    Unchanged(RateCurve),
}

impl ImpliedOutcome {
    /// Returns the implied curve if the bootstrap ran.
    pub fn implied(&self) -> Option<&ImpliedCurve> {
        match self {
            ImpliedOutcome::Bootstrapped(curve) => Some(curve),
            ImpliedOutcome::Unchanged(_) => None,
        }
    }

    /// Consumes the outcome, returning the implied curve if the bootstrap ran.
    pub fn into_implied(self) -> Option<ImpliedCurve> {
        match self {
            ImpliedOutcome::Bootstrapped(curve) => Some(curve),
            ImpliedOutcome::Unchanged(_) => None,
        }
    }

    /// Returns true if discount factors were derived.
    pub fn is_bootstrapped(&self) -> bool {
        matches!(self, ImpliedOutcome::Bootstrapped(_))
    }
}

/// Bootstraps the second currency of a pair from base discount factors and
/// swap points.
///
/// For each post-spot point with a swap point at the same offset:
///
/// ```text
/// Forward   = Spot + points / pip_scale
/// ImpliedDF = BaseDF * Spot / Forward
/// ```
///
/// computed separately for mid, bid and ask. Absent bid or ask points use
/// the mid forward. Overrides replace swap point sides before the
/// calculation.
///
/// Points with no matching swap point fall back to simple interest on their
/// own quoted rate and keep whatever bid/ask discount factors they already
/// carry.
///
/// A missing or non-positive spot, an empty curve or an empty base curve
/// leaves the input unchanged.
pub fn bootstrap_implied(
    base: &BaseCurve,
    curve: &RateCurve,
    swap_points: &SwapPointCurve,
    spot: Option<f64>,
    overrides: &SwapPointOverrides,
    pip_scale: PipScale,
) -> ImpliedOutcome {
    let Some(spot) = spot.filter(|s| s.is_finite() && *s > 0.0) else {
        warn!(currency = %curve.currency(), "no spot rate, implied bootstrap skipped");
        return ImpliedOutcome::Unchanged(curve.clone());
    };
    if curve.is_empty() || base.is_empty() {
        warn!(
            currency = %curve.currency(),
            base = %base.currency(),
            "missing curve data, implied bootstrap skipped"
        );
        return ImpliedOutcome::Unchanged(curve.clone());
    }

    let basis = curve.day_count();
    let swap_points = swap_points.with_overrides(overrides);
    let mut points = Vec::with_capacity(curve.len());

    for point in curve.points() {
        let matched = if point.days > 0 {
            swap_points.at_days(point.days)
        } else {
            None
        };

        let base_df = base.discount_factor(point.days);
        let implied_df = |swap: f64| {
            let forward = spot + pip_scale.to_price(swap);
            (forward > 0.0).then(|| base_df * spot / forward)
        };

        let solved = matched.and_then(|swap| {
            let df = implied_df(swap.mid)?;
            let df_bid = swap.bid.and_then(&implied_df).unwrap_or(df);
            let df_ask = swap.ask.and_then(&implied_df).unwrap_or(df);
            Some(ImpliedPoint::new(
                point,
                basis,
                df,
                Some(df_bid),
                Some(df_ask),
                DfSource::SwapPoints,
            ))
        });

        let implied = match solved {
            Some(implied) => implied,
            None => {
                if point.days > 0 {
                    warn!(
                        currency = %curve.currency(),
                        tenor = %point.tenor,
                        days = point.days,
                        "no usable swap point, falling back to quoted rate"
                    );
                }
                ImpliedPoint::new(
                    point,
                    basis,
                    point.simple_df(basis),
                    point.df_bid,
                    point.df_ask,
                    DfSource::QuotedRate,
                )
            }
        };
        points.push(implied);
    }

    debug!(
        currency = %curve.currency(),
        base = %base.currency(),
        spot,
        points = points.len(),
        "bootstrapped implied curve"
    );

    let lookup = DfLookup::new(points.iter().map(|p| (p.days(), p.ln_df)));
    ImpliedOutcome::Bootstrapped(ImpliedCurve {
        currency: curve.currency().clone(),
        day_count: basis,
        spot_date: curve.spot_date(),
        bootstrapped_at: curve.bootstrapped_at(),
        spot,
        points,
        lookup,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::bootstrap_base;
    use crate::points::{FxSwapPoint, RateType};
    use approx::assert_relative_eq;

    fn base_curve() -> BaseCurve {
        bootstrap_base(
            &RateCurve::new(
                CurrencyCode::new("USD").unwrap(),
                DayCountBasis::Act360,
                vec![
                    RateTenorPoint::new("1M", 33, 0.053, RateType::Cash),
                    RateTenorPoint::new("2M", 61, 0.053, RateType::Cash),
                ],
            )
            .unwrap(),
        )
    }

    fn thb_curve() -> RateCurve {
        RateCurve::new(
            CurrencyCode::new("THB").unwrap(),
            DayCountBasis::Act365,
            vec![
                RateTenorPoint::new("O/N", -2, 0.025, RateType::Cash),
                RateTenorPoint::new("1M", 33, 0.025, RateType::Cash),
                RateTenorPoint::new("2M", 61, 0.026, RateType::Cash)
                    .with_stored_dfs(Some(0.9955), Some(0.9957)),
            ],
        )
        .unwrap()
    }

    fn swaps() -> SwapPointCurve {
        SwapPointCurve::new(vec![
            FxSwapPoint::new("1M", 33, -5.0).with_sides(Some(-5.5), Some(-4.5)),
        ])
        .unwrap()
    }

    #[test]
    fn test_covered_interest_parity() {
        let base = base_curve();
        let outcome = bootstrap_implied(
            &base,
            &thb_curve(),
            &swaps(),
            Some(36.0),
            &SwapPointOverrides::new(),
            PipScale::default(),
        );
        let implied = outcome.implied().unwrap();
        let one_month = implied.point_at(33).unwrap();
        let base_df = base.discount_factor(33);

        assert_eq!(one_month.source, DfSource::SwapPoints);
        assert_relative_eq!(one_month.df, base_df * 36.0 / 35.95, epsilon = 1e-15);
        assert_relative_eq!(one_month.df_bid().unwrap(), base_df * 36.0 / 35.945, epsilon = 1e-15);
        assert_relative_eq!(one_month.df_ask().unwrap(), base_df * 36.0 / 35.955, epsilon = 1e-15);
        assert_relative_eq!(one_month.ln_df, one_month.df.ln(), epsilon = 1e-15);
    }

    #[test]
    fn test_fallback_reuses_stored_sides() {
        let outcome = bootstrap_implied(
            &base_curve(),
            &thb_curve(),
            &swaps(),
            Some(36.0),
            &SwapPointOverrides::new(),
            PipScale::default(),
        );
        let implied = outcome.implied().unwrap();

        let two_month = implied.point_at(61).unwrap();
        assert_eq!(two_month.source, DfSource::QuotedRate);
        assert_relative_eq!(two_month.df, 1.0 / (1.0 + 0.026 * 61.0 / 365.0), epsilon = 1e-15);
        assert_eq!(two_month.df_bid(), Some(0.9955));
        assert_eq!(two_month.ln_df_ask, Some(0.9957f64.ln()));

        let overnight = implied.point_at(-2).unwrap();
        assert_eq!(overnight.source, DfSource::QuotedRate);
        assert_eq!(overnight.df_bid(), None);
        assert_eq!(overnight.ln_df_bid, None);
    }

    #[test]
    fn test_missing_sides_collapse_to_mid() {
        let swaps = SwapPointCurve::new(vec![FxSwapPoint::new("1M", 33, -5.0)]).unwrap();
        let outcome = bootstrap_implied(
            &base_curve(),
            &thb_curve(),
            &swaps,
            Some(36.0),
            &SwapPointOverrides::new(),
            PipScale::default(),
        );
        let one_month = outcome.implied().unwrap().point_at(33).unwrap().clone();
        assert_eq!(one_month.df_bid(), Some(one_month.df));
        assert_eq!(one_month.df_ask(), Some(one_month.df));
    }

    #[test]
    fn test_missing_spot_is_noop() {
        let curve = thb_curve();
        let outcome = bootstrap_implied(
            &base_curve(),
            &curve,
            &swaps(),
            None,
            &SwapPointOverrides::new(),
            PipScale::default(),
        );
        assert_eq!(outcome, ImpliedOutcome::Unchanged(curve));
    }

    #[test]
    fn test_to_rate_curve_round_trips_stored_sides() {
        let outcome = bootstrap_implied(
            &base_curve(),
            &thb_curve(),
            &swaps(),
            Some(36.0),
            &SwapPointOverrides::new(),
            PipScale::default(),
        );
        let implied = outcome.into_implied().unwrap();
        let rows = implied.to_rate_curve();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows.point_at(33).unwrap().df_bid, implied.point_at(33).unwrap().df_bid());
    }
}
