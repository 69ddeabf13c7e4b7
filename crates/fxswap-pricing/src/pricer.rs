//! Client forward quotes.
//!
//! [`ForwardPricer`] prices one request at a time against a market
//! snapshot:
//!
//! 1. Blocked clients are rejected before any market data is touched
//! 2. Value (and optional start) dates resolve against the joint calendar
//! 3. Day offsets from spot drive the configured interpolation strategy
//! 4. The client margin widens bid and ask
//!
//! Spot arrives as a [`Cached`] value; a stale rate is treated as missing.

use chrono::{DateTime, Utc};
use fxswap_core::calendars::{Calendar, HolidayCalendars};
use fxswap_core::tenor::{Tenor, TenorDateResolver};
use fxswap_core::{CurrencyPair, Date};
use fxswap_curves::forward::{
    forward_forward, ForwardPointInterpolator, ForwardSpread, InterpolationMode,
    InterpolationResult, LinearPointInterpolator, LogLinearDfInterpolator, Outright,
};
use fxswap_curves::overrides::SwapPointOverrides;
use fxswap_curves::snapshot::MarketSnapshot;
use fxswap_curves::{bootstrap_base, bootstrap_implied, ImpliedOutcome, PipScale, SwapPointCurve};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::Cached;
use crate::config::EngineConfig;
use crate::error::{PricingError, PricingResult, Validate};
use crate::margin::{
    apply_margin, calculate_margin, widen, ClientOverride, CreditTier, MarginBreakdown,
    MarginContext, MarginOutcome, QuotedPoints,
};

/// A settlement date given as a tenor or an explicit date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ValueDate {
    /// Resolved from the trade date.
    Tenor(Tenor),
    /// Used as given.
    Date(Date),
}

impl From<Tenor> for ValueDate {
    fn from(tenor: Tenor) -> Self {
        ValueDate::Tenor(tenor)
    }
}

impl From<Date> for ValueDate {
    fn from(date: Date) -> Self {
        ValueDate::Date(date)
    }
}

/// One client quote request.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRequest {
    /// Trade date.
    pub trade_date: Date,
    /// Far (or only) settlement date.
    pub value: ValueDate,
    /// Near settlement date for a forward-forward.
    pub start: Option<ValueDate>,
    /// Trade notional in base currency.
    pub notional: Decimal,
    /// Client credit tier.
    pub credit_tier: CreditTier,
    /// Client margin override.
    pub client_override: Option<ClientOverride>,
    /// Swap point overrides for this request.
    pub swap_overrides: SwapPointOverrides,
}

impl QuoteRequest {
    /// Creates an outright request with no overrides.
    pub fn new(
        trade_date: Date,
        value: impl Into<ValueDate>,
        notional: Decimal,
        credit_tier: CreditTier,
    ) -> Self {
        Self {
            trade_date,
            value: value.into(),
            start: None,
            notional,
            credit_tier,
            client_override: None,
            swap_overrides: SwapPointOverrides::new(),
        }
    }

    /// Makes this a forward-forward starting at `start`.
    #[must_use]
    pub fn with_start(mut self, start: impl Into<ValueDate>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Sets the client margin override.
    #[must_use]
    pub fn with_client_override(mut self, client: ClientOverride) -> Self {
        self.client_override = Some(client);
        self
    }

    /// Sets swap point overrides.
    #[must_use]
    pub fn with_swap_overrides(mut self, overrides: SwapPointOverrides) -> Self {
        self.swap_overrides = overrides;
        self
    }
}

/// A priced client quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientQuote {
    /// Currency pair.
    pub pair: CurrencyPair,
    /// Trade date.
    pub trade_date: Date,
    /// Spot date.
    pub spot_date: Date,
    /// Far settlement date.
    pub value_date: Date,
    /// Near settlement date, for forward-forwards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Date>,
    /// Signed days from spot to the value date.
    pub days: i64,
    /// Days shown to the client.
    pub display_days: i64,
    /// Strategy that produced the points.
    pub strategy: &'static str,
    /// Market points at the value date, before margin.
    pub market: InterpolationResult,
    /// Near/far breakdown, for forward-forwards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward_forward: Option<ForwardSpread>,
    /// Margin applied to each side.
    pub margin: MarginBreakdown,
    /// Client swap points.
    pub points: QuotedPoints,
    /// Client outright rates, when spot is known and the quote is outright.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outright: Option<Outright>,
}

/// Result of pricing a request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QuoteOutcome {
    /// The client was quoted.
    Quoted(Box<ClientQuote>),
    /// Tier-5 client; no quote.
    Blocked,
}

impl QuoteOutcome {
    /// Returns the quote, if any.
    pub fn quote(&self) -> Option<&ClientQuote> {
        match self {
            QuoteOutcome::Quoted(quote) => Some(quote),
            QuoteOutcome::Blocked => None,
        }
    }

    /// Returns true for a blocked client.
    pub fn is_blocked(&self) -> bool {
        matches!(self, QuoteOutcome::Blocked)
    }
}

/// Prices client forward requests for one currency pair.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use fxswap_core::calendars::HolidayCalendars;
/// use fxswap_core::tenor::Tenor;
/// use fxswap_core::{CurrencyPair, Date};
/// use fxswap_curves::prelude::*;
/// use fxswap_pricing::prelude::*;
/// use rust_decimal::Decimal;
///
/// let swaps = SwapPointCurve::new(vec![
///     FxSwapPoint::new("1W", 7, -0.4).with_sides(Some(-0.5), Some(-0.3)),
///     FxSwapPoint::new("1M", 31, -1.8).with_sides(Some(-2.0), Some(-1.6)),
/// ])
/// .unwrap();
/// let snapshot = MarketSnapshot::new().with_swap_points(swaps);
/// let config = EngineConfig::default();
/// let calendars = HolidayCalendars::new();
///
/// let pricer = ForwardPricer::new(
///     &config,
///     &calendars,
///     &snapshot,
///     CurrencyPair::parse("USD/THB").unwrap(),
/// )
/// .unwrap();
///
/// let request = QuoteRequest::new(
///     Date::from_ymd(2025, 1, 2).unwrap(),
///     Tenor::Weeks(1),
///     Decimal::from(1_000_000),
///     CreditTier::new(1).unwrap(),
/// );
/// let outcome = pricer.price(&request, None, Utc::now()).unwrap();
/// assert!((outcome.quote().unwrap().points.mid - -0.4).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct ForwardPricer<'a> {
    config: &'a EngineConfig,
    calendars: &'a HolidayCalendars,
    snapshot: &'a MarketSnapshot,
    pair: CurrencyPair,
    pip_scale: PipScale,
}

impl<'a> ForwardPricer<'a> {
    /// Creates a pricer, validating the configuration.
    pub fn new(
        config: &'a EngineConfig,
        calendars: &'a HolidayCalendars,
        snapshot: &'a MarketSnapshot,
        pair: CurrencyPair,
    ) -> PricingResult<Self> {
        config.validate_or_error()?;
        let pip_scale = config.pip_scale()?;
        Ok(Self {
            config,
            calendars,
            snapshot,
            pair,
            pip_scale,
        })
    }

    /// The pair being priced.
    pub fn pair(&self) -> &CurrencyPair {
        &self.pair
    }

    /// Prices `request` with the spot rate known at `now`.
    ///
    /// # Errors
    ///
    /// - [`PricingError::Core`] if a tenor resolves past the supported date
    ///   range
    /// - [`PricingError::InvalidRequest`] if a settlement date precedes the
    ///   trade date or the start date follows the value date
    /// - [`PricingError::MissingSpot`] if the margin is in basis points and
    ///   no fresh spot is available
    pub fn price(
        &self,
        request: &QuoteRequest,
        spot: Option<&Cached<f64>>,
        now: DateTime<Utc>,
    ) -> PricingResult<QuoteOutcome> {
        if request.credit_tier.is_blocked() {
            info!(pair = %self.pair, tier = %request.credit_tier, "client blocked, no quote");
            return Ok(QuoteOutcome::Blocked);
        }

        let spot = self.fresh_spot(spot, now);

        let calendar = self.calendars.select(self.config.calendars.as_slice());
        let resolver = TenorDateResolver::new(&calendar, self.config.spot_days)
            .with_end_of_month_rule(self.config.end_of_month_rule);
        let trade_date = request.trade_date;
        let spot_date = resolver.spot_date(trade_date);

        let value_date = resolve(&resolver, trade_date, request.value)?;
        let start_date = request
            .start
            .map(|s| resolve(&resolver, trade_date, s))
            .transpose()?;
        if value_date < trade_date || start_date.is_some_and(|s| s < trade_date) {
            return Err(PricingError::invalid_request(
                "settlement date precedes trade date",
            ));
        }
        if start_date.is_some_and(|s| s > value_date) {
            return Err(PricingError::invalid_request(
                "start date follows value date",
            ));
        }

        let days = spot_date.days_between(&value_date);
        let start_days = start_date.map(|s| spot_date.days_between(&s));

        let swaps = self
            .snapshot
            .swap_points()
            .with_overrides(&request.swap_overrides);
        let (strategy, market, spread) =
            self.interpolate(&swaps, &request.swap_overrides, spot, days, start_days);

        let margin_days = start_days.map_or(days, |near| days - near);
        let margin = self.margin(request, spot, margin_days)?;
        let MarginOutcome::Priced(margin) = margin else {
            return Ok(QuoteOutcome::Blocked);
        };

        let points = match &spread {
            Some(spread) => {
                let sides = spread.sides(self.config.spread_convention);
                widen(spread.mid, sides.bid, sides.ask, margin.total)
            }
            None => apply_margin(&market, margin.total),
        };
        let outright = match (spot, &spread) {
            (Some(spot), None) => Some(self.outright(spot, &points)),
            _ => None,
        };

        info!(
            pair = %self.pair,
            %value_date,
            days,
            strategy,
            mid = points.mid,
            margin = margin.total,
            "quote produced"
        );

        Ok(QuoteOutcome::Quoted(Box::new(ClientQuote {
            pair: self.pair.clone(),
            trade_date,
            spot_date,
            value_date,
            start_date,
            days,
            display_days: market.display_days,
            strategy,
            market,
            forward_forward: spread,
            margin,
            points,
            outright,
        })))
    }

    fn fresh_spot(&self, spot: Option<&Cached<f64>>, now: DateTime<Utc>) -> Option<f64> {
        let cached = spot?;
        let ttl = self.config.spot_cache_ttl();
        match cached.fresh(now, ttl) {
            Some(rate) => Some(*rate),
            None => {
                warn!(
                    pair = %self.pair,
                    age_secs = cached.age(now).num_seconds(),
                    "spot rate is stale, treating as missing"
                );
                None
            }
        }
    }

    fn interpolate(
        &self,
        swaps: &SwapPointCurve,
        overrides: &SwapPointOverrides,
        spot: Option<f64>,
        days: i64,
        start_days: Option<i64>,
    ) -> (&'static str, InterpolationResult, Option<ForwardSpread>) {
        if self.config.interpolation == InterpolationMode::LogLinearDf {
            if let Some(result) = self.interpolate_log_linear(swaps, overrides, spot, days, start_days)
            {
                return result;
            }
            warn!(
                pair = %self.pair,
                "log-linear inputs unavailable, falling back to linear points"
            );
        }
        run(&LinearPointInterpolator::new(swaps), days, start_days)
    }

    fn interpolate_log_linear(
        &self,
        swaps: &SwapPointCurve,
        overrides: &SwapPointOverrides,
        spot: Option<f64>,
        days: i64,
        start_days: Option<i64>,
    ) -> Option<(&'static str, InterpolationResult, Option<ForwardSpread>)> {
        let base_curve = self.snapshot.base_curve(&self.pair)?;
        let quote_curve = self.snapshot.quote_curve(&self.pair)?;

        let base = bootstrap_base(base_curve);
        let outcome = bootstrap_implied(
            &base,
            quote_curve,
            self.snapshot.swap_points(),
            spot,
            overrides,
            self.pip_scale,
        );
        let ImpliedOutcome::Bootstrapped(implied) = outcome else {
            return None;
        };
        debug!(
            pair = %self.pair,
            base_points = base.points().len(),
            implied_points = implied.points().len(),
            "curves bootstrapped for quote"
        );

        let interpolator = LogLinearDfInterpolator::new(&base, &implied, swaps, self.pip_scale);
        Some(run(&interpolator, days, start_days))
    }

    fn margin(
        &self,
        request: &QuoteRequest,
        spot: Option<f64>,
        days: i64,
    ) -> PricingResult<MarginOutcome> {
        let client = request.client_override.as_ref();
        let needs_spot = self.config.margin.requires_spot(request.credit_tier)
            && client.map_or(true, |c| c.custom_margin.is_none() && !c.ignore_credit);

        let spot = match spot {
            Some(spot) => spot,
            None if needs_spot => {
                return Err(PricingError::MissingSpot {
                    pair: self.pair.clone(),
                })
            }
            None => 0.0,
        };

        let context = MarginContext {
            days,
            spot,
            pip_scale: self.pip_scale,
        };
        Ok(calculate_margin(
            &self.config.margin,
            request.credit_tier,
            request.notional,
            client,
            &context,
        ))
    }

    fn outright(&self, spot: f64, points: &QuotedPoints) -> Outright {
        let outright = |p: f64| spot + self.pip_scale.to_price(p);
        Outright {
            mid: outright(points.mid),
            bid: points.bid.map(outright),
            ask: points.ask.map(outright),
        }
    }
}

fn resolve<C: Calendar + ?Sized>(
    resolver: &TenorDateResolver<'_, C>,
    trade_date: Date,
    value: ValueDate,
) -> PricingResult<Date> {
    match value {
        ValueDate::Tenor(tenor) => Ok(resolver.add_tenor(trade_date, &tenor)?),
        ValueDate::Date(date) => Ok(date),
    }
}

fn run<I>(
    interpolator: &I,
    days: i64,
    start_days: Option<i64>,
) -> (&'static str, InterpolationResult, Option<ForwardSpread>)
where
    I: ForwardPointInterpolator + ?Sized,
{
    match start_days {
        Some(near) => {
            let spread = forward_forward(interpolator, near, days);
            (interpolator.name(), spread.far, Some(spread))
        }
        None => (interpolator.name(), interpolator.interpolate(days), None),
    }
}
