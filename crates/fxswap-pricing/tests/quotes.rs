//! End-to-end client quotes from JSON market data.

use approx::assert_relative_eq;
use chrono::{DateTime, Duration, TimeZone, Utc};
use fxswap_core::calendars::HolidayCalendars;
use fxswap_core::tenor::Tenor;
use fxswap_core::{CurrencyPair, Date};
use fxswap_curves::forward::InterpolationMode;
use fxswap_curves::overrides::SwapPointOverrides;
use fxswap_curves::snapshot::MarketSnapshot;
use fxswap_pricing::prelude::*;
use rust_decimal_macros::dec;

const HOLIDAYS: &str = r#"{
    "US": [{"date": "2025-01-20", "name": "Martin Luther King Jr. Day", "type": "public"}],
    "TH": [{"date": "2025-01-06", "name": "Substitution Day", "type": "bank"}]
}"#;

const SNAPSHOT: &str = r#"{
    "USD/THB": {
        "USD": {
            "dayCount": 360,
            "spotDate": "2025-01-07",
            "tenors": [
                {"tenor": "1W", "days": 7, "rate": 0.0531, "type": "CASH"},
                {"tenor": "1M", "days": 33, "rate": 0.0532, "type": "CASH"},
                {"tenor": "2M", "days": 61, "rate": 0.0533, "type": "CASH"},
                {"tenor": "1Y", "days": 365, "rate": 0.0500, "type": "SWAP"}
            ]
        },
        "THB": {
            "dayCount": 365,
            "spotDate": "2025-01-07",
            "tenors": [
                {"tenor": "1W", "days": 7, "rate": 0.0250},
                {"tenor": "1M", "days": 33, "rate": 0.0252},
                {"tenor": "2M", "days": 61, "rate": 0.0254}
            ]
        }
    },
    "fxSwapPoints": [
        {"tenor": "O/N", "days": -2, "points": -0.31, "bid": -0.36, "ask": -0.26},
        {"tenor": "T/N", "days": -1, "points": -0.29, "bid": -0.34, "ask": -0.24},
        {"tenor": "1W", "days": 7, "points": -1.90, "bid": -2.10, "ask": -1.70},
        {"tenor": "1M", "days": 33, "points": -0.50, "bid": -0.70, "ask": -0.30},
        {"tenor": "2M", "days": 61, "points": -1.05, "bid": -1.30, "ask": -0.80}
    ]
}"#;

const CONFIG: &str = r#"
    calendars = ["US", "TH"]

    [[margin.creditTiers]]
    tier = 1
    value = 0.1

    [[margin.creditTiers]]
    tier = 2
    value = 0.25

    [[margin.notionalTiers]]
    min = 0
    max = 1000000
    margin = 0.05

    [[margin.notionalTiers]]
    min = 1000000
    margin = 0.0
"#;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn pair() -> CurrencyPair {
    CurrencyPair::parse("USD/THB").unwrap()
}

fn trade_date() -> Date {
    Date::from_ymd(2025, 1, 2).unwrap()
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 2, 3, 0, 0).unwrap()
}

fn market() -> (EngineConfig, HolidayCalendars, MarketSnapshot) {
    (
        EngineConfig::from_toml(CONFIG).unwrap(),
        HolidayCalendars::from_json(HOLIDAYS).unwrap(),
        MarketSnapshot::from_json(SNAPSHOT).unwrap(),
    )
}

#[test]
fn linear_quote_with_holiday_shifted_spot() {
    init_tracing();
    let (config, calendars, snapshot) = market();
    let pricer = ForwardPricer::new(&config, &calendars, &snapshot, pair()).unwrap();

    let request = QuoteRequest::new(
        trade_date(),
        Tenor::Months(1),
        dec!(500_000),
        CreditTier::new(2).unwrap(),
    );
    let spot = Cached::new(34.20, now());
    let outcome = pricer.price(&request, Some(&spot), now()).unwrap();
    let quote = outcome.quote().unwrap();

    // Thursday trade, Friday business, Monday a TH holiday: spot is Tuesday.
    assert_eq!(quote.spot_date, Date::from_ymd(2025, 1, 7).unwrap());
    assert_eq!(quote.value_date, Date::from_ymd(2025, 2, 7).unwrap());
    assert_eq!(quote.days, 31);
    assert_eq!(quote.strategy, "linear_points");

    let w = (31.0 - 7.0) / (33.0 - 7.0);
    let mid = -1.90 + w * (-0.50 - -1.90);
    let bid = -2.10 + w * (-0.70 - -2.10);
    assert_relative_eq!(quote.points.mid, mid, epsilon = 1e-12);

    assert_relative_eq!(quote.margin.credit, 0.25, epsilon = 1e-12);
    assert_relative_eq!(quote.margin.notional, 0.05, epsilon = 1e-12);
    assert_relative_eq!(quote.points.bid.unwrap(), bid - 0.30, epsilon = 1e-12);

    let outright = quote.outright.unwrap();
    assert_relative_eq!(outright.mid, 34.20 + mid / 100.0, epsilon = 1e-12);
}

#[test]
fn log_linear_recovers_quoted_pillar() {
    init_tracing();
    let (config, calendars, snapshot) = market();
    let config = config.with_interpolation(InterpolationMode::LogLinearDf);
    let pricer = ForwardPricer::new(&config, &calendars, &snapshot, pair()).unwrap();

    let spot_date = Date::from_ymd(2025, 1, 7).unwrap();
    let request = QuoteRequest::new(
        trade_date(),
        spot_date.add_days(33),
        dec!(5_000_000),
        CreditTier::new(1).unwrap(),
    );
    let spot = Cached::new(34.20, now() - Duration::seconds(30));
    let outcome = pricer.price(&request, Some(&spot), now()).unwrap();
    let quote = outcome.quote().unwrap();

    assert_eq!(quote.strategy, "log_linear_df");
    assert_relative_eq!(quote.market.points, -0.50, epsilon = 1e-8);
    assert!(quote.market.base_df.is_some());
    assert_relative_eq!(quote.points.ask.unwrap(), -0.30 + 0.1, epsilon = 1e-8);
}

#[test]
fn log_linear_without_spot_falls_back_to_linear() {
    init_tracing();
    let (config, calendars, snapshot) = market();
    let config = config.with_interpolation(InterpolationMode::LogLinearDf);
    let pricer = ForwardPricer::new(&config, &calendars, &snapshot, pair()).unwrap();

    let request = QuoteRequest::new(trade_date(), Tenor::Weeks(1), dec!(1), CreditTier::new(1).unwrap());
    let stale = Cached::new(34.20, now() - Duration::hours(1));
    let outcome = pricer.price(&request, Some(&stale), now()).unwrap();
    let quote = outcome.quote().unwrap();

    assert_eq!(quote.strategy, "linear_points");
    assert!(quote.outright.is_none());
    assert_relative_eq!(quote.points.mid, -1.90, epsilon = 1e-12);
}

#[test]
fn blocked_client_gets_no_quote() {
    init_tracing();
    let (config, calendars, snapshot) = market();
    let pricer = ForwardPricer::new(&config, &calendars, &snapshot, pair()).unwrap();

    let request = QuoteRequest::new(trade_date(), Tenor::Months(1), dec!(1), CreditTier::BLOCKED)
        .with_client_override(ClientOverride {
            custom_margin: Some(0.0),
            ..ClientOverride::default()
        });
    let outcome = pricer.price(&request, None, now()).unwrap();
    assert_eq!(outcome, QuoteOutcome::Blocked);
}

#[test]
fn request_overrides_replace_market_points() {
    init_tracing();
    let (config, calendars, snapshot) = market();
    let pricer = ForwardPricer::new(&config, &calendars, &snapshot, pair()).unwrap();

    let overrides = SwapPointOverrides::from_json(r#"{"1M": {"mid": "-0.40", "bid": "", "ask": -0.20}}"#)
        .unwrap();
    let spot_date = Date::from_ymd(2025, 1, 7).unwrap();
    let request = QuoteRequest::new(
        trade_date(),
        spot_date.add_days(33),
        dec!(2_000_000),
        CreditTier::new(1).unwrap(),
    )
    .with_swap_overrides(overrides);
    let outcome = pricer.price(&request, None, now()).unwrap();
    let quote = outcome.quote().unwrap();

    assert_relative_eq!(quote.market.points, -0.40, epsilon = 1e-12);
    assert_relative_eq!(quote.market.bid.unwrap(), -0.70, epsilon = 1e-12);
    assert_relative_eq!(quote.market.ask.unwrap(), -0.20, epsilon = 1e-12);
}

#[test]
fn conservative_forward_forward_crosses_sides() {
    init_tracing();
    let (config, calendars, snapshot) = market();
    let config = config.with_spread_convention(fxswap_curves::forward::SpreadConvention::Conservative);
    let pricer = ForwardPricer::new(&config, &calendars, &snapshot, pair()).unwrap();

    let request = QuoteRequest::new(trade_date(), Tenor::Months(2), dec!(2_000_000), CreditTier::new(1).unwrap())
        .with_start(Tenor::Weeks(1));
    let outcome = pricer.price(&request, None, now()).unwrap();
    let quote = outcome.quote().unwrap();
    let spread = quote.forward_forward.unwrap();

    assert_eq!(quote.start_date, Some(Date::from_ymd(2025, 1, 14).unwrap()));
    assert_relative_eq!(quote.points.bid.unwrap(), spread.conservative.bid.unwrap() - 0.1, epsilon = 1e-12);
    assert_relative_eq!(quote.points.ask.unwrap(), spread.conservative.ask.unwrap() + 0.1, epsilon = 1e-12);
    assert!(quote.points.bid.unwrap() <= spread.tight.bid.unwrap());
}

#[test]
fn invalid_config_text_is_rejected() {
    let err = EngineConfig::from_toml(
        r#"
        [[margin.creditTiers]]
        tier = 1
        value = 3.0

        [[margin.creditTiers]]
        tier = 2
        value = 1.0
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Validation { .. }));
}
