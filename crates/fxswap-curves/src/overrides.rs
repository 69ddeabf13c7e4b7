//! Client-supplied swap point overrides.
//!
//! Overrides arrive as loosely typed `tenor -> {mid, bid, ask}` maps whose
//! values are strings. They are parsed once here; the bootstrap and
//! interpolation code only sees [`SwapPointOverrides`].

use std::collections::BTreeMap;

use fxswap_core::tenor::Tenor;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CurveError, CurveResult};
use crate::points::{canonical_label, SwapPointCurve};

/// A raw override value: a JSON number or a string holding one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawOverrideValue {
    /// Already numeric.
    Number(f64),
    /// Text; blank means "no override".
    Text(String),
}

/// A raw `{mid, bid, ask}` override entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPointOverride {
    /// Mid points override.
    #[serde(default)]
    pub mid: Option<RawOverrideValue>,
    /// Bid points override.
    #[serde(default)]
    pub bid: Option<RawOverrideValue>,
    /// Ask points override.
    #[serde(default)]
    pub ask: Option<RawOverrideValue>,
}

/// Parsed override for one tenor, in swap point units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PointOverride {
    /// Replacement mid.
    pub mid: Option<f64>,
    /// Replacement bid.
    pub bid: Option<f64>,
    /// Replacement ask.
    pub ask: Option<f64>,
}

impl PointOverride {
    /// Returns true if no side is overridden.
    pub fn is_empty(&self) -> bool {
        self.mid.is_none() && self.bid.is_none() && self.ask.is_none()
    }
}

/// Swap point overrides keyed by canonical tenor label.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct SwapPointOverrides {
    by_tenor: BTreeMap<String, PointOverride>,
}

impl SwapPointOverrides {
    /// Creates an empty override set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an override for `tenor`.
    #[must_use]
    pub fn with(mut self, tenor: &Tenor, point: PointOverride) -> Self {
        if !point.is_empty() {
            self.by_tenor.insert(tenor.to_string(), point);
        }
        self
    }

    /// Parses raw override entries.
    ///
    /// Blank strings mean "no override" and entries with no sides are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if a key is not a tenor or a value is not a finite number.
    pub fn parse<K, I>(raw: I) -> CurveResult<Self>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, RawPointOverride)>,
    {
        let mut by_tenor = BTreeMap::new();
        for (key, entry) in raw {
            let tenor = Tenor::parse(key.as_ref())?;
            let label = tenor.to_string();
            let point = PointOverride {
                mid: parse_value(&label, "mid", entry.mid.as_ref())?,
                bid: parse_value(&label, "bid", entry.bid.as_ref())?,
                ask: parse_value(&label, "ask", entry.ask.as_ref())?,
            };
            if !point.is_empty() {
                by_tenor.insert(label, point);
            }
        }
        Ok(Self { by_tenor })
    }

    /// Parses a JSON object of override entries.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON or any error from [`Self::parse`].
    pub fn from_json(json: &str) -> CurveResult<Self> {
        let raw: BTreeMap<String, RawPointOverride> = serde_json::from_str(json)
            .map_err(|e| CurveError::invalid_snapshot(format!("overrides: {e}")))?;
        Self::parse(raw)
    }

    /// Returns the override for a tenor label, in any accepted spelling.
    pub fn get(&self, label: &str) -> Option<&PointOverride> {
        self.by_tenor.get(&canonical_label(label))
    }

    /// Iterates over `(label, override)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PointOverride)> {
        self.by_tenor.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns true if there are no overrides.
    pub fn is_empty(&self) -> bool {
        self.by_tenor.is_empty()
    }

    /// Returns the number of overridden tenors.
    pub fn len(&self) -> usize {
        self.by_tenor.len()
    }
}

fn parse_value(
    tenor: &str,
    field: &'static str,
    raw: Option<&RawOverrideValue>,
) -> CurveResult<Option<f64>> {
    let value = match raw {
        None => return Ok(None),
        Some(RawOverrideValue::Number(n)) => *n,
        Some(RawOverrideValue::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<f64>()
                .map_err(|_| CurveError::invalid_override(tenor, field, text))?
        }
    };
    if value.is_finite() {
        Ok(Some(value))
    } else {
        Err(CurveError::invalid_override(tenor, field, value.to_string()))
    }
}

impl SwapPointCurve {
    /// Returns a copy with overridden sides replaced.
    ///
    /// Override tenors absent from the curve are logged and ignored.
    #[must_use]
    pub fn with_overrides(&self, overrides: &SwapPointOverrides) -> SwapPointCurve {
        let mut curve = self.clone();
        if overrides.is_empty() {
            return curve;
        }

        let mut applied = 0usize;
        for point in curve.points_mut() {
            if let Some(o) = overrides.get(&point.tenor) {
                point.mid = o.mid.unwrap_or(point.mid);
                point.bid = o.bid.or(point.bid);
                point.ask = o.ask.or(point.ask);
                applied += 1;
            }
        }

        if applied < overrides.len() {
            for (label, _) in overrides.iter() {
                if !self.points().iter().any(|p| canonical_label(&p.tenor) == label) {
                    warn!(tenor = label, "swap point override has no matching tenor");
                }
            }
        }
        curve
    }
}
