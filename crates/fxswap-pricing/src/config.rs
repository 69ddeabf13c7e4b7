//! Engine configuration.
//!
//! Loadable from JSON or TOML. Every field has a default, so an empty
//! document is a valid configuration.

use chrono::Duration;
use fxswap_curves::forward::{InterpolationMode, SpreadConvention};
use fxswap_curves::PipScale;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
use crate::margin::MarginConfig;

/// Maximum supported spot lag in business days.
const MAX_SPOT_DAYS: u32 = 5;

/// Engine-wide settings for one currency pair desk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Business days from trade date to spot.
    #[serde(default = "default_spot_days")]
    pub spot_days: u32,

    /// Whether month-end spot dates roll to month-end maturities.
    #[serde(default = "default_end_of_month_rule")]
    pub end_of_month_rule: bool,

    /// Swap points per unit of exchange rate.
    #[serde(default = "default_pip_scale")]
    pub pip_scale: f64,

    /// Forward point interpolation strategy.
    #[serde(default)]
    pub interpolation: InterpolationMode,

    /// Side convention for forward-forward quotes.
    #[serde(default)]
    pub spread_convention: SpreadConvention,

    /// Seconds a fetched spot rate stays usable.
    #[serde(default = "default_spot_cache_ttl_secs")]
    pub spot_cache_ttl_secs: u64,

    /// Holiday calendar codes to settle on; empty means all loaded calendars.
    #[serde(default)]
    pub calendars: Vec<String>,

    /// Client margin tables.
    #[serde(default)]
    pub margin: MarginConfig,
}

fn default_spot_days() -> u32 {
    2
}

fn default_end_of_month_rule() -> bool {
    true
}

fn default_pip_scale() -> f64 {
    100.0
}

fn default_spot_cache_ttl_secs() -> u64 {
    60
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            spot_days: default_spot_days(),
            end_of_month_rule: default_end_of_month_rule(),
            pip_scale: default_pip_scale(),
            interpolation: InterpolationMode::default(),
            spread_convention: SpreadConvention::default(),
            spot_cache_ttl_secs: default_spot_cache_ttl_secs(),
            calendars: Vec::new(),
            margin: MarginConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Parses and validates a TOML configuration.
    pub fn from_toml(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Serializes to pretty JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serializes to TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Sets the spot lag.
    #[must_use]
    pub fn with_spot_days(mut self, days: u32) -> Self {
        self.spot_days = days;
        self
    }

    /// Sets the End-of-Month rule.
    #[must_use]
    pub fn with_end_of_month_rule(mut self, enabled: bool) -> Self {
        self.end_of_month_rule = enabled;
        self
    }

    /// Sets the pip scale.
    #[must_use]
    pub fn with_pip_scale(mut self, scale: f64) -> Self {
        self.pip_scale = scale;
        self
    }

    /// Sets the interpolation strategy.
    #[must_use]
    pub fn with_interpolation(mut self, mode: InterpolationMode) -> Self {
        self.interpolation = mode;
        self
    }

    /// Sets the forward-forward spread convention.
    #[must_use]
    pub fn with_spread_convention(mut self, convention: SpreadConvention) -> Self {
        self.spread_convention = convention;
        self
    }

    /// Restricts settlement to the given calendar codes.
    #[must_use]
    pub fn with_calendars<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.calendars = codes.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the margin tables.
    #[must_use]
    pub fn with_margin(mut self, margin: MarginConfig) -> Self {
        self.margin = margin;
        self
    }

    /// The pip scale as a checked value.
    pub fn pip_scale(&self) -> ConfigResult<PipScale> {
        PipScale::new(self.pip_scale).map_err(|e| ConfigError::Validation {
            field: "pip_scale".to_string(),
            message: e.to_string(),
        })
    }

    /// The spot cache time-to-live.
    pub fn spot_cache_ttl(&self) -> Duration {
        Duration::seconds(i64::try_from(self.spot_cache_ttl_secs).unwrap_or(i64::MAX / 1000))
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !self.pip_scale.is_finite() || self.pip_scale <= 0.0 {
            errors.push(ValidationError::with_rule(
                "pip_scale",
                format!("Pip scale must be positive, got {}", self.pip_scale),
                "positive_pip_scale",
            ));
        }

        if self.spot_days > MAX_SPOT_DAYS {
            errors.push(ValidationError::with_rule(
                "spot_days",
                format!(
                    "Spot days {} exceeds maximum of {MAX_SPOT_DAYS}",
                    self.spot_days
                ),
                "max_spot_days",
            ));
        }

        if self.calendars.iter().any(|c| c.trim().is_empty()) {
            errors.push(ValidationError::new(
                "calendars",
                "Calendar codes cannot be empty",
            ));
        }

        errors.extend(self.margin.validate());
        errors
    }
}
