//! Market inputs: money-market curve rows and FX swap points.
//!
//! Day offsets are signed calendar days from spot. Negative offsets are
//! pre-spot legs: `O/N` at -2 and `T/N` at -1 with a two-day spot lag.

use chrono::{DateTime, Utc};
use fxswap_core::calendars::Calendar;
use fxswap_core::tenor::{Tenor, TenorDateResolver};
use fxswap_core::{CurrencyCode, Date, DayCountBasis};
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};

/// Bootstrapping regime of a rate point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum RateType {
    /// Simple interest to maturity.
    #[default]
    Cash,
    /// Annual-pay par swap rate.
    Swap,
}

/// One row of a money-market curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateTenorPoint {
    /// Tenor label as quoted (`"1M"`, `"O/N"`).
    pub tenor: String,
    /// Signed calendar days from spot to maturity.
    pub days: i64,
    /// Maturity date, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity: Option<Date>,
    /// Annualized rate as a decimal fraction (`0.0525` for 5.25%).
    pub rate: f64,
    /// Bootstrapping regime.
    #[serde(rename = "type", default)]
    pub kind: RateType,
    /// Bid discount factor carried over from an earlier implied bootstrap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub df_bid: Option<f64>,
    /// Ask discount factor carried over from an earlier implied bootstrap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub df_ask: Option<f64>,
}

impl RateTenorPoint {
    /// Creates a rate point.
    #[must_use]
    pub fn new(tenor: impl Into<String>, days: i64, rate: f64, kind: RateType) -> Self {
        Self {
            tenor: tenor.into(),
            days,
            maturity: None,
            rate,
            kind,
            df_bid: None,
            df_ask: None,
        }
    }

    /// Creates a rate point whose offset and maturity are resolved from its tenor.
    ///
    /// O/N and T/N are labelled by their near leg, see [`quote_offset`].
    pub fn from_tenor<C: Calendar + ?Sized>(
        tenor: &Tenor,
        rate: f64,
        kind: RateType,
        resolver: &TenorDateResolver<'_, C>,
        trade_date: Date,
    ) -> CurveResult<Self> {
        let days = quote_offset(tenor, resolver, trade_date)?;
        Ok(Self::new(tenor.to_string(), days, rate, kind)
            .with_maturity(resolver.add_tenor(trade_date, tenor)?))
    }

    /// Sets the maturity date.
    #[must_use]
    pub fn with_maturity(mut self, maturity: Date) -> Self {
        self.maturity = Some(maturity);
        self
    }

    /// Sets stored bid/ask discount factors.
    #[must_use]
    pub fn with_stored_dfs(mut self, df_bid: Option<f64>, df_ask: Option<f64>) -> Self {
        self.df_bid = df_bid;
        self.df_ask = df_ask;
        self
    }

    /// Year fraction to maturity under `basis`.
    #[must_use]
    pub fn year_fraction(&self, basis: DayCountBasis) -> f64 {
        basis.year_fraction(self.days)
    }

    /// Simple-interest discount factor: `1 / (1 + r * days / basis)`.
    #[must_use]
    pub fn simple_df(&self, basis: DayCountBasis) -> f64 {
        1.0 / (1.0 + self.rate * self.year_fraction(basis))
    }
}

/// A money-market curve for one currency, sorted by day offset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateCurve {
    currency: CurrencyCode,
    day_count: DayCountBasis,
    #[serde(skip_serializing_if = "Option::is_none")]
    spot_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bootstrapped_at: Option<DateTime<Utc>>,
    #[serde(rename = "tenors")]
    points: Vec<RateTenorPoint>,
}

impl RateCurve {
    /// Creates a curve, sorting points by day offset.
    ///
    /// # Errors
    ///
    /// Returns an error if two points share a day offset or a rate is not finite.
    pub fn new(
        currency: CurrencyCode,
        day_count: DayCountBasis,
        mut points: Vec<RateTenorPoint>,
    ) -> CurveResult<Self> {
        if let Some(bad) = points.iter().find(|p| !p.rate.is_finite()) {
            return Err(CurveError::invalid_value(format!(
                "rate for {} is not finite",
                bad.tenor
            )));
        }
        points.sort_by_key(|p| p.days);
        if let Some(pair) = points.windows(2).find(|pair| pair[0].days == pair[1].days) {
            return Err(CurveError::duplicate_day_offset(
                pair[0].days,
                &pair[0].tenor,
                &pair[1].tenor,
            ));
        }
        Ok(Self {
            currency,
            day_count,
            spot_date: None,
            bootstrapped_at: None,
            points,
        })
    }

    /// Creates a curve with no points.
    #[must_use]
    pub fn empty(currency: CurrencyCode, day_count: DayCountBasis) -> Self {
        Self {
            currency,
            day_count,
            spot_date: None,
            bootstrapped_at: None,
            points: Vec::new(),
        }
    }

    /// Sets the spot date the offsets are measured from.
    #[must_use]
    pub fn with_spot_date(mut self, spot_date: Date) -> Self {
        self.spot_date = Some(spot_date);
        self
    }

    /// Sets the bootstrap timestamp.
    #[must_use]
    pub fn with_bootstrapped_at(mut self, at: DateTime<Utc>) -> Self {
        self.bootstrapped_at = Some(at);
        self
    }

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

    /// Returns the points in ascending day order.
    pub fn points(&self) -> &[RateTenorPoint] {
        &self.points
    }

    /// Returns the point at exactly `days`.
    pub fn point_at(&self, days: i64) -> Option<&RateTenorPoint> {
        self.points
            .binary_search_by_key(&days, |p| p.days)
            .ok()
            .map(|i| &self.points[i])
    }

    /// Returns true if the curve has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Replaces the points; callers pass rows already sorted and unique.
    pub(crate) fn replace_points(&mut self, points: Vec<RateTenorPoint>) {
        self.points = points;
    }
}

/// Conversion between quoted swap points and price units.
///
/// A scale of 100 means 1 point = 0.01 in the exchange rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipScale(f64);

impl PipScale {
    /// Creates a pip scale.
    ///
    /// # Errors
    ///
    /// Returns an error unless `scale` is finite and positive.
    pub fn new(scale: f64) -> CurveResult<Self> {
        if scale.is_finite() && scale > 0.0 {
            Ok(Self(scale))
        } else {
            Err(CurveError::invalid_value(format!(
                "pip scale must be positive, got {scale}"
            )))
        }
    }

    /// Returns the scale factor.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Converts swap points to a price difference.
    pub fn to_price(self, points: f64) -> f64 {
        points / self.0
    }

    /// Converts a price difference to swap points.
    pub fn to_points(self, price: f64) -> f64 {
        price * self.0
    }
}

impl Default for PipScale {
    fn default() -> Self {
        Self(100.0)
    }
}

/// One FX swap point quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FxSwapPoint {
    /// Tenor label as quoted.
    pub tenor: String,
    /// Signed calendar days from spot.
    pub days: i64,
    /// Mid swap points.
    #[serde(rename = "points")]
    pub mid: f64,
    /// Bid swap points, if there is a market.
    #[serde(default)]
    pub bid: Option<f64>,
    /// Ask swap points, if there is a market.
    #[serde(default)]
    pub ask: Option<f64>,
    /// Near leg date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Date>,
    /// Far leg date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity: Option<Date>,
}

impl FxSwapPoint {
    /// Creates a mid-only swap point.
    #[must_use]
    pub fn new(tenor: impl Into<String>, days: i64, mid: f64) -> Self {
        Self {
            tenor: tenor.into(),
            days,
            mid,
            bid: None,
            ask: None,
            start: None,
            maturity: None,
        }
    }

    /// Sets bid and ask.
    #[must_use]
    pub fn with_sides(mut self, bid: Option<f64>, ask: Option<f64>) -> Self {
        self.bid = bid;
        self.ask = ask;
        self
    }

    /// Creates a swap point whose offset and leg dates are resolved from its tenor.
    ///
    /// Pre-spot tenors run from trade date; all others start at spot. O/N
    /// and T/N are labelled by their near leg, see [`quote_offset`].
    pub fn from_tenor<C: Calendar + ?Sized>(
        tenor: &Tenor,
        mid: f64,
        resolver: &TenorDateResolver<'_, C>,
        trade_date: Date,
    ) -> CurveResult<Self> {
        let start = match tenor {
            Tenor::Overnight => trade_date,
            Tenor::TomNext => resolver.add_tenor(trade_date, &Tenor::Overnight)?,
            _ => resolver.spot_date(trade_date),
        };
        let mut point = Self::new(tenor.to_string(), quote_offset(tenor, resolver, trade_date)?, mid);
        point.start = Some(start);
        point.maturity = Some(resolver.add_tenor(trade_date, tenor)?);
        Ok(point)
    }

    /// Parsed tenor, if the label is a recognised code.
    pub fn parsed_tenor(&self) -> Option<Tenor> {
        Tenor::parse(&self.tenor).ok()
    }
}

/// FX swap point quotes for one pair, sorted by day offset.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct SwapPointCurve {
    points: Vec<FxSwapPoint>,
}

impl SwapPointCurve {
    /// Creates a swap point curve, sorting by day offset.
    ///
    /// # Errors
    ///
    /// Returns an error if two points share a day offset or a value is not finite.
    pub fn new(mut points: Vec<FxSwapPoint>) -> CurveResult<Self> {
        if let Some(bad) = points.iter().find(|p| {
            !p.mid.is_finite()
                || p.bid.is_some_and(|v| !v.is_finite())
                || p.ask.is_some_and(|v| !v.is_finite())
        }) {
            return Err(CurveError::invalid_value(format!(
                "swap points for {} are not finite",
                bad.tenor
            )));
        }
        points.sort_by_key(|p| p.days);
        if let Some(pair) = points.windows(2).find(|pair| pair[0].days == pair[1].days) {
            return Err(CurveError::duplicate_day_offset(
                pair[0].days,
                &pair[0].tenor,
                &pair[1].tenor,
            ));
        }
        Ok(Self { points })
    }

    /// Returns all points in ascending day order.
    pub fn points(&self) -> &[FxSwapPoint] {
        &self.points
    }

    /// Points strictly after spot.
    pub fn forward_points(&self) -> &[FxSwapPoint] {
        let first = self.points.partition_point(|p| p.days <= 0);
        &self.points[first..]
    }

    /// Returns the point quoted at exactly `days`.
    pub fn at_days(&self, days: i64) -> Option<&FxSwapPoint> {
        self.points
            .binary_search_by_key(&days, |p| p.days)
            .ok()
            .map(|i| &self.points[i])
    }

    /// Returns the point whose label parses to `tenor`.
    pub fn by_tenor(&self, tenor: &Tenor) -> Option<&FxSwapPoint> {
        self.points
            .iter()
            .find(|p| p.parsed_tenor().as_ref() == Some(tenor))
    }

    /// Returns true if there are no quotes.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns a copy with each point's bid and ask recomputed from
    /// `(mid, bid, ask)`.
    #[must_use]
    pub fn map_sides<F>(&self, f: F) -> SwapPointCurve
    where
        F: Fn(f64, Option<f64>, Option<f64>) -> (Option<f64>, Option<f64>),
    {
        let points = self
            .points
            .iter()
            .map(|p| {
                let (bid, ask) = f(p.mid, p.bid, p.ask);
                FxSwapPoint {
                    bid,
                    ask,
                    ..p.clone()
                }
            })
            .collect();
        SwapPointCurve { points }
    }

    pub(crate) fn points_mut(&mut self) -> &mut [FxSwapPoint] {
        &mut self.points
    }
}

/// Day offset a tenor's quote is filed under.
///
/// O/N and T/N sit before spot at their near leg, counted in business days:
/// `-spot_days` and `-(spot_days - 1)`, i.e. -2 and -1 for a two-day spot
/// lag. Every other tenor is filed at its maturity's calendar-day offset
/// from spot.
pub fn quote_offset<C: Calendar + ?Sized>(
    tenor: &Tenor,
    resolver: &TenorDateResolver<'_, C>,
    trade_date: Date,
) -> CurveResult<i64> {
    let spot_days = i64::from(resolver.spot_days());
    Ok(match tenor {
        Tenor::Overnight => -spot_days,
        Tenor::TomNext => -(spot_days - 1).max(0),
        _ => resolver.day_offset(trade_date, tenor)?,
    })
}

/// Canonical form of a tenor label, for matching across sources.
pub(crate) fn canonical_label(label: &str) -> String {
    Tenor::parse(label).map_or_else(|_| label.trim().to_ascii_uppercase(), |t| t.to_string())
}
