//! Market snapshot ingestion.
//!
//! The snapshot shape is:
//!
//! ```json
//! {
//!   "USD/THB": {
//!     "USD": { "dayCount": 360, "spotDate": "2025-01-06", "tenors": [ ... ] },
//!     "THB": { "dayCount": 365, "spotDate": "2025-01-06", "tenors": [ ... ] }
//!   },
//!   "fxSwapPoints": [ { "tenor": "1M", "days": 33, "points": -8.5, "bid": -9.0, "ask": -8.0 } ]
//! }
//! ```
//!
//! Top-level keys that are not currency pairs are ignored.

use std::collections::BTreeMap;

use fxswap_core::{CurrencyCode, CurrencyPair, Date, DayCountBasis};
use serde::Deserialize;
use tracing::debug;

use crate::error::{CurveError, CurveResult};
use crate::points::{FxSwapPoint, RateCurve, RateTenorPoint, SwapPointCurve};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCurve {
    day_count: DayCountBasis,
    #[serde(default)]
    spot_date: Option<Date>,
    #[serde(default)]
    tenors: Vec<RateTenorPoint>,
}

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    #[serde(rename = "fxSwapPoints", default)]
    fx_swap_points: Vec<FxSwapPoint>,
    #[serde(flatten)]
    rest: BTreeMap<String, serde_json::Value>,
}

/// Rate curves and swap points for one or more currency pairs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarketSnapshot {
    curves: BTreeMap<CurrencyPair, BTreeMap<CurrencyCode, RateCurve>>,
    swap_points: SwapPointCurve,
}

impl MarketSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rate curve under `pair`.
    #[must_use]
    pub fn with_curve(mut self, pair: CurrencyPair, curve: RateCurve) -> Self {
        self.curves
            .entry(pair)
            .or_default()
            .insert(curve.currency().clone(), curve);
        self
    }

    /// Sets the swap points.
    #[must_use]
    pub fn with_swap_points(mut self, swap_points: SwapPointCurve) -> Self {
        self.swap_points = swap_points;
        self
    }

    /// Parses a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON, unknown day counts, bad dates,
    /// invalid currency codes or duplicate day offsets.
    pub fn from_json(json: &str) -> CurveResult<Self> {
        let raw: RawSnapshot = serde_json::from_str(json)
            .map_err(|e| CurveError::invalid_snapshot(e.to_string()))?;

        let mut snapshot = Self {
            curves: BTreeMap::new(),
            swap_points: SwapPointCurve::new(raw.fx_swap_points)?,
        };

        for (key, value) in raw.rest {
            let Ok(pair) = CurrencyPair::parse(&key) else {
                debug!(key = %key, "skipping non-pair snapshot entry");
                continue;
            };
            let by_currency: BTreeMap<String, RawCurve> = serde_json::from_value(value)
                .map_err(|e| CurveError::invalid_snapshot(format!("{key}: {e}")))?;

            for (code, raw_curve) in by_currency {
                let currency = CurrencyCode::new(&code)?;
                let mut curve = RateCurve::new(currency, raw_curve.day_count, raw_curve.tenors)?;
                if let Some(spot_date) = raw_curve.spot_date {
                    curve = curve.with_spot_date(spot_date);
                }
                snapshot = snapshot.with_curve(pair.clone(), curve);
            }
        }

        Ok(snapshot)
    }

    /// Currency pairs with at least one curve.
    pub fn pairs(&self) -> impl Iterator<Item = &CurrencyPair> {
        self.curves.keys()
    }

    /// The curve for `currency` under `pair`.
    pub fn curve(&self, pair: &CurrencyPair, currency: &CurrencyCode) -> Option<&RateCurve> {
        self.curves.get(pair).and_then(|c| c.get(currency))
    }

    /// The curve for the pair's base currency.
    pub fn base_curve(&self, pair: &CurrencyPair) -> Option<&RateCurve> {
        self.curve(pair, &pair.base)
    }

    /// The curve for the pair's quote currency.
    pub fn quote_curve(&self, pair: &CurrencyPair) -> Option<&RateCurve> {
        self.curve(pair, &pair.quote)
    }

    /// The swap points.
    pub fn swap_points(&self) -> &SwapPointCurve {
        &self.swap_points
    }
}
