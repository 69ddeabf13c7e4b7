//! Client margins.
//!
//! A client's bid/ask widening is a credit-tier margin plus a notional-size
//! margin, or a custom margin that replaces both. All margins are in swap
//! point units.

use std::fmt;

use fxswap_curves::forward::InterpolationResult;
use fxswap_curves::{PipScale, SwapPointCurve};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Validate, ValidationError};

/// Credit tier, 1 (best) to 5 (blocked).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CreditTier(u8);

impl CreditTier {
    /// The tier at which trading is blocked.
    pub const BLOCKED: CreditTier = CreditTier(5);

    /// Creates a tier; `None` outside 1..=5.
    pub fn new(tier: u8) -> Option<Self> {
        (1..=5).contains(&tier).then_some(Self(tier))
    }

    /// Returns the tier number.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Returns true for the blocked tier.
    pub fn is_blocked(self) -> bool {
        self == Self::BLOCKED
    }
}

impl TryFrom<u8> for CreditTier {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("credit tier must be 1-5, got {value}"))
    }
}

impl From<CreditTier> for u8 {
    fn from(tier: CreditTier) -> Self {
        tier.0
    }
}

impl fmt::Display for CreditTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// Unit a credit margin is configured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginUnit {
    /// Swap points.
    #[default]
    Points,
    /// Annualized basis points of the spot rate.
    #[serde(alias = "bp", alias = "bps")]
    BasisPoints,
}

/// Configured margin for one credit tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreditTierMargin {
    /// The tier.
    pub tier: CreditTier,
    /// Margin value in `unit`.
    pub value: f64,
    /// Unit of `value`.
    #[serde(default)]
    pub unit: MarginUnit,
}

/// Notional bracket `[min, max)`; `max = None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NotionalTier {
    /// Inclusive lower bound.
    pub min: Decimal,
    /// Exclusive upper bound.
    #[serde(default)]
    pub max: Option<Decimal>,
    /// Margin in swap points.
    pub margin: f64,
}

impl NotionalTier {
    /// Returns true if `notional` falls in this bracket.
    pub fn contains(&self, notional: Decimal) -> bool {
        notional >= self.min && self.max.map_or(true, |max| notional < max)
    }
}

/// Per-client margin override.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientOverride {
    /// Drop the credit margin.
    #[serde(default)]
    pub ignore_credit: bool,
    /// Drop the notional margin.
    #[serde(default)]
    pub ignore_notional: bool,
    /// Replaces all tier-based margins when present.
    #[serde(default)]
    pub custom_margin: Option<f64>,
}

/// Credit and notional margin tables.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginConfig {
    /// Credit tier margins for tiers 1-4.
    #[serde(default)]
    pub credit_tiers: Vec<CreditTierMargin>,
    /// Notional brackets, ascending.
    #[serde(default)]
    pub notional_tiers: Vec<NotionalTier>,
}

impl MarginConfig {
    /// Creates an empty margin configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a credit tier margin in points.
    #[must_use]
    pub fn with_credit_margin(self, tier: CreditTier, points: f64) -> Self {
        self.with_credit_tier(CreditTierMargin {
            tier,
            value: points,
            unit: MarginUnit::Points,
        })
    }

    /// Sets a credit tier margin.
    #[must_use]
    pub fn with_credit_tier(mut self, margin: CreditTierMargin) -> Self {
        self.credit_tiers.retain(|m| m.tier != margin.tier);
        self.credit_tiers.push(margin);
        self.credit_tiers.sort_by_key(|m| m.tier);
        self
    }

    /// Appends a notional bracket.
    #[must_use]
    pub fn with_notional_tier(mut self, min: Decimal, max: Option<Decimal>, margin: f64) -> Self {
        self.notional_tiers.push(NotionalTier { min, max, margin });
        self
    }

    /// The configured margin for `tier`.
    pub fn credit_tier(&self, tier: CreditTier) -> Option<&CreditTierMargin> {
        self.credit_tiers.iter().find(|m| m.tier == tier)
    }

    /// The bracket containing `notional`.
    pub fn notional_tier(&self, notional: Decimal) -> Option<&NotionalTier> {
        self.notional_tiers.iter().find(|t| t.contains(notional))
    }

    /// Returns true if pricing `tier` needs a spot rate.
    pub fn requires_spot(&self, tier: CreditTier) -> bool {
        self.credit_tier(tier)
            .is_some_and(|m| m.unit == MarginUnit::BasisPoints)
    }
}

impl Validate for MarginConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for margin in &self.credit_tiers {
            if margin.tier.is_blocked() {
                errors.push(ValidationError::with_rule(
                    "credit_tiers",
                    "Tier 5 is blocked and cannot carry a margin",
                    "blocked_tier",
                ));
            }
            if !margin.value.is_finite() || margin.value < 0.0 {
                errors.push(ValidationError::with_rule(
                    "credit_tiers",
                    format!("Margin for {} must be finite and non-negative", margin.tier),
                    "non_negative_margin",
                ));
            }
        }

        let mut tiers: Vec<&CreditTierMargin> = self
            .credit_tiers
            .iter()
            .filter(|m| !m.tier.is_blocked())
            .collect();
        tiers.sort_by_key(|m| m.tier);
        for pair in tiers.windows(2) {
            if pair[0].tier == pair[1].tier {
                errors.push(ValidationError::with_rule(
                    "credit_tiers",
                    format!("{} is configured more than once", pair[0].tier),
                    "unique_tiers",
                ));
            } else if pair[1].value <= pair[0].value {
                errors.push(ValidationError::with_rule(
                    "credit_tiers",
                    format!(
                        "Margin for {} ({}) must exceed {} ({})",
                        pair[1].tier, pair[1].value, pair[0].tier, pair[0].value
                    ),
                    "increasing_credit_margin",
                ));
            }
        }

        for (i, tier) in self.notional_tiers.iter().enumerate() {
            if !tier.margin.is_finite() || tier.margin < 0.0 {
                errors.push(ValidationError::with_rule(
                    "notional_tiers",
                    format!("Margin for bracket {i} must be finite and non-negative"),
                    "non_negative_margin",
                ));
            }
            if tier.max.is_some_and(|max| max <= tier.min) {
                errors.push(ValidationError::with_rule(
                    "notional_tiers",
                    format!("Bracket {i} has max <= min"),
                    "valid_bracket",
                ));
            }
            match (tier.max, self.notional_tiers.get(i + 1)) {
                (None, Some(_)) => errors.push(ValidationError::with_rule(
                    "notional_tiers",
                    format!("Only the last bracket may be open-ended, bracket {i} is not last"),
                    "open_ended_last",
                )),
                (Some(max), Some(next)) if next.min != max => {
                    errors.push(ValidationError::with_rule(
                        "notional_tiers",
                        format!("Bracket {} must start at {max}, starts at {}", i + 1, next.min),
                        "contiguous_brackets",
                    ));
                }
                _ => {}
            }
        }

        errors
    }
}

/// Inputs for converting basis-point margins into swap points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarginContext {
    /// Days the margin accrues over.
    pub days: i64,
    /// Spot rate.
    pub spot: f64,
    /// Pip scale of the pair.
    pub pip_scale: PipScale,
}

impl MarginContext {
    /// Converts annualized basis points into swap points:
    /// `bp * days / 365 * spot / 10000 * pip_scale`.
    pub fn bp_to_points(&self, bp: f64) -> f64 {
        let price = bp * self.days.unsigned_abs() as f64 / 365.0 * self.spot / 10_000.0;
        self.pip_scale.to_points(price)
    }
}

/// Margin components in swap points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarginBreakdown {
    /// Credit tier component.
    pub credit: f64,
    /// Notional bracket component.
    pub notional: f64,
    /// Total applied to each side.
    pub total: f64,
}

/// Result of a margin calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MarginOutcome {
    /// Priceable, with this margin.
    Priced(MarginBreakdown),
    /// Tier 5: the client must not be quoted.
    Blocked,
}

/// Calculates the margin for a client and trade size.
///
/// A blocked tier returns [`MarginOutcome::Blocked`] before anything else.
/// A custom margin replaces both components. Otherwise each component can be
/// dropped by the client's override flags, and a tier or size with no
/// configured entry contributes zero.
pub fn calculate_margin(
    config: &MarginConfig,
    tier: CreditTier,
    notional: Decimal,
    client: Option<&ClientOverride>,
    context: &MarginContext,
) -> MarginOutcome {
    if tier.is_blocked() {
        return MarginOutcome::Blocked;
    }

    let client = client.copied().unwrap_or_default();
    if let Some(custom) = client.custom_margin {
        return MarginOutcome::Priced(MarginBreakdown {
            credit: 0.0,
            notional: 0.0,
            total: custom,
        });
    }

    let credit = if client.ignore_credit {
        0.0
    } else {
        match config.credit_tier(tier) {
            Some(m) => match m.unit {
                MarginUnit::Points => m.value,
                MarginUnit::BasisPoints => context.bp_to_points(m.value),
            },
            None => {
                warn!(tier = %tier, "no credit margin configured for tier");
                0.0
            }
        }
    };

    let notional = if client.ignore_notional {
        0.0
    } else {
        config
            .notional_tier(notional.abs())
            .map_or(0.0, |t| t.margin)
    };

    MarginOutcome::Priced(MarginBreakdown {
        credit,
        notional,
        total: credit + notional,
    })
}

/// Client-facing swap points after margin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuotedPoints {
    /// Mid points, unchanged.
    pub mid: f64,
    /// Bid less margin.
    pub bid: Option<f64>,
    /// Ask plus margin.
    pub ask: Option<f64>,
}

/// Widens an interpolation result by `margin` points each side.
pub fn apply_margin(result: &InterpolationResult, margin: f64) -> QuotedPoints {
    widen(result.points, result.bid, result.ask, margin)
}

/// Widens every point of a swap point curve by `margin` points each side.
#[must_use]
pub fn widen_curve(curve: &SwapPointCurve, margin: f64) -> SwapPointCurve {
    curve.map_sides(|mid, bid, ask| {
        let quoted = widen(mid, bid, ask, margin);
        (quoted.bid, quoted.ask)
    })
}

pub(crate) fn widen(mid: f64, bid: Option<f64>, ask: Option<f64>, margin: f64) -> QuotedPoints {
    QuotedPoints {
        mid,
        bid: bid.map(|b| b - margin),
        ask: ask.map(|a| a + margin),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fxswap_curves::FxSwapPoint;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn tier(n: u8) -> CreditTier {
        CreditTier::new(n).unwrap()
    }

    fn config() -> MarginConfig {
        MarginConfig::new()
            .with_credit_margin(tier(1), 2.0)
            .with_credit_margin(tier(2), 5.0)
            .with_credit_margin(tier(3), 8.0)
            .with_credit_margin(tier(4), 15.0)
            .with_notional_tier(dec!(0), Some(dec!(1_000_000)), 3.0)
            .with_notional_tier(dec!(1_000_000), Some(dec!(10_000_000)), 0.0)
            .with_notional_tier(dec!(10_000_000), None, 1.0)
    }

    fn context() -> MarginContext {
        MarginContext {
            days: 91,
            spot: 36.5,
            pip_scale: PipScale::default(),
        }
    }

    #[test]
    fn test_tier_two_no_notional_margin() {
        let outcome = calculate_margin(&config(), tier(2), dec!(5_000_000), None, &context());
        assert_eq!(
            outcome,
            MarginOutcome::Priced(MarginBreakdown {
                credit: 5.0,
                notional: 0.0,
                total: 5.0
            })
        );
    }

    #[test]
    fn test_custom_margin_replaces_everything() {
        let client = ClientOverride {
            custom_margin: Some(12.0),
            ..ClientOverride::default()
        };
        let outcome = calculate_margin(&config(), tier(4), dec!(500_000), Some(&client), &context());
        assert_eq!(
            outcome,
            MarginOutcome::Priced(MarginBreakdown {
                credit: 0.0,
                notional: 0.0,
                total: 12.0
            })
        );
    }

    #[test]
    fn test_blocked_tier() {
        let client = ClientOverride {
            custom_margin: Some(1.0),
            ..ClientOverride::default()
        };
        assert_eq!(
            calculate_margin(&config(), CreditTier::BLOCKED, dec!(1), Some(&client), &context()),
            MarginOutcome::Blocked
        );
    }

    #[test]
    fn test_override_flags() {
        let client = ClientOverride {
            ignore_credit: true,
            ..ClientOverride::default()
        };
        let MarginOutcome::Priced(m) =
            calculate_margin(&config(), tier(3), dec!(20_000_000), Some(&client), &context())
        else {
            panic!("expected a priced margin");
        };
        assert_eq!(m.credit, 0.0);
        assert_eq!(m.notional, 1.0);
        assert_eq!(m.total, 1.0);
    }

    #[test]
    fn test_notional_brackets_are_half_open() {
        let config = config();
        assert_eq!(config.notional_tier(dec!(999_999.99)).unwrap().margin, 3.0);
        assert_eq!(config.notional_tier(dec!(1_000_000)).unwrap().margin, 0.0);
        assert_eq!(config.notional_tier(dec!(10_000_000)).unwrap().margin, 1.0);
        assert_eq!(config.notional_tier(dec!(1_000_000_000)).unwrap().margin, 1.0);
    }

    #[test]
    fn test_basis_point_margin() {
        let config = MarginConfig::new().with_credit_tier(CreditTierMargin {
            tier: tier(1),
            value: 20.0,
            unit: MarginUnit::BasisPoints,
        });
        assert!(config.requires_spot(tier(1)));

        let ctx = MarginContext {
            days: 365,
            spot: 36.5,
            pip_scale: PipScale::default(),
        };
        let MarginOutcome::Priced(m) = calculate_margin(&config, tier(1), dec!(1), None, &ctx) else {
            panic!("expected a priced margin");
        };
        // 20bp of 36.5 over a year = 0.073 = 7.3 points
        assert_relative_eq!(m.credit, 7.3, epsilon = 1e-12);
    }

    #[test]
    fn test_apply_margin() {
        let result = InterpolationResult::from_points(45, -0.74, Some(-0.90), None);
        let quoted = apply_margin(&result, 5.0);
        assert_eq!(quoted.mid, -0.74);
        assert_relative_eq!(quoted.bid.unwrap(), -5.90, epsilon = 1e-12);
        assert_eq!(quoted.ask, None);
    }

    #[test]
    fn test_widen_curve() {
        let curve = SwapPointCurve::new(vec![
            FxSwapPoint::new("1M", 33, -0.5).with_sides(Some(-0.6), Some(-0.4)),
        ])
        .unwrap();
        let widened = widen_curve(&curve, 1.0);
        let point = widened.at_days(33).unwrap();
        assert_relative_eq!(point.bid.unwrap(), -1.6, epsilon = 1e-12);
        assert_relative_eq!(point.ask.unwrap(), 0.6, epsilon = 1e-12);
        assert_eq!(point.mid, -0.5);
    }

    #[test]
    fn test_validation() {
        assert!(config().is_valid());

        let inverted = config().with_credit_margin(tier(3), 4.0);
        assert!(!inverted.is_valid());

        let gap = MarginConfig::new()
            .with_notional_tier(dec!(0), Some(dec!(1_000_000)), 3.0)
            .with_notional_tier(dec!(2_000_000), None, 0.0);
        let errors = gap.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule.as_deref(), Some("contiguous_brackets"));

        let open_middle = MarginConfig::new()
            .with_notional_tier(dec!(0), None, 3.0)
            .with_notional_tier(dec!(1_000_000), None, 0.0);
        assert!(!open_middle.is_valid());
    }

    #[test]
    fn test_deserialize() {
        let json = r#"{
            "creditTiers": [
                {"tier": 1, "value": 2.0},
                {"tier": 2, "value": 15, "unit": "bp"}
            ],
            "notionalTiers": [{"min": 0, "max": 1000000, "margin": 1.5}, {"min": 1000000, "margin": 0}]
        }"#;
        let config: MarginConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.credit_tier(tier(2)).unwrap().unit, MarginUnit::BasisPoints);
        assert_eq!(config.notional_tiers[1].max, None);
        assert!(serde_json::from_str::<CreditTier>("6").is_err());
    }

    proptest! {
        #[test]
        fn prop_configured_tiers_increase(
            base in 0.0f64..10.0,
            steps in proptest::collection::vec(0.01f64..10.0, 3),
            notional in 0u64..100_000_000,
        ) {
            let mut config = MarginConfig::new().with_credit_margin(tier(1), base);
            let mut value = base;
            for (i, step) in steps.iter().enumerate() {
                value += step;
                config = config.with_credit_margin(tier(i as u8 + 2), value);
            }
            prop_assert!(config.is_valid());

            let notional = Decimal::from(notional);
            let totals: Vec<f64> = (1..=4)
                .map(|t| match calculate_margin(&config, tier(t), notional, None, &context()) {
                    MarginOutcome::Priced(m) => m.total,
                    MarginOutcome::Blocked => f64::INFINITY,
                })
                .collect();
            for pair in totals.windows(2) {
                prop_assert!(pair[1] > pair[0]);
            }
            prop_assert_eq!(
                calculate_margin(&config, CreditTier::BLOCKED, notional, None, &context()),
                MarginOutcome::Blocked
            );
        }
    }
}
