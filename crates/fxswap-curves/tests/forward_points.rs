//! Forward point scenarios across bootstrap and interpolation.

use approx::assert_relative_eq;
use fxswap_core::{CurrencyCode, DayCountBasis};
use fxswap_curves::prelude::*;
use proptest::prelude::*;

fn usd_curve() -> RateCurve {
    RateCurve::new(
        CurrencyCode::new("USD").unwrap(),
        DayCountBasis::Act360,
        vec![
            RateTenorPoint::new("O/N", -2, 0.0530, RateType::Cash),
            RateTenorPoint::new("1W", 7, 0.0531, RateType::Cash),
            RateTenorPoint::new("1M", 33, 0.0532, RateType::Cash),
            RateTenorPoint::new("2M", 61, 0.0533, RateType::Cash),
            RateTenorPoint::new("3M", 92, 0.0535, RateType::Cash),
            RateTenorPoint::new("1Y", 365, 0.0500, RateType::Swap),
            RateTenorPoint::new("2Y", 730, 0.0460, RateType::Swap),
            RateTenorPoint::new("5Y", 1826, 0.0420, RateType::Swap),
        ],
    )
    .unwrap()
}

fn thb_curve() -> RateCurve {
    RateCurve::new(
        CurrencyCode::new("THB").unwrap(),
        DayCountBasis::Act365,
        vec![
            RateTenorPoint::new("O/N", -2, 0.0250, RateType::Cash),
            RateTenorPoint::new("1W", 7, 0.0250, RateType::Cash),
            RateTenorPoint::new("1M", 33, 0.0252, RateType::Cash),
            RateTenorPoint::new("2M", 61, 0.0254, RateType::Cash),
            RateTenorPoint::new("3M", 92, 0.0255, RateType::Cash),
        ],
    )
    .unwrap()
}

fn swap_points() -> SwapPointCurve {
    SwapPointCurve::new(vec![
        FxSwapPoint::new("O/N", -2, -0.31).with_sides(Some(-0.36), Some(-0.26)),
        FxSwapPoint::new("T/N", -1, -0.29).with_sides(Some(-0.34), Some(-0.24)),
        FxSwapPoint::new("1W", 7, -1.90).with_sides(Some(-2.10), Some(-1.70)),
        FxSwapPoint::new("1M", 33, -0.50).with_sides(Some(-0.70), Some(-0.30)),
        FxSwapPoint::new("2M", 61, -1.05).with_sides(Some(-1.30), Some(-0.80)),
        FxSwapPoint::new("3M", 92, -1.62).with_sides(None, Some(-1.30)),
    ])
    .unwrap()
}

#[test]
fn linear_between_one_and_two_months() {
    let swaps = swap_points();
    let result = LinearPointInterpolator::new(&swaps).interpolate(45);

    let ratio = (45.0 - 33.0) / (61.0 - 33.0);
    assert_relative_eq!(ratio, 0.428_571_428_571, epsilon = 1e-9);
    assert_relative_eq!(result.points, -0.735_714_285_714, epsilon = 1e-9);
}

#[test]
fn spot_is_always_zero() {
    let swaps = swap_points();
    let base = bootstrap_base(&usd_curve());
    let implied = bootstrap_implied(
        &base,
        &thb_curve(),
        &swaps,
        Some(36.5),
        &SwapPointOverrides::new(),
        PipScale::default(),
    )
    .into_implied()
    .unwrap();

    let linear = LinearPointInterpolator::new(&swaps);
    let log_linear = LogLinearDfInterpolator::new(&base, &implied, &swaps, PipScale::default());

    for result in [linear.interpolate(0), log_linear.interpolate(0)] {
        assert_eq!(result.points, 0.0);
        assert_eq!(result.bid, Some(0.0));
        assert_eq!(result.ask, Some(0.0));
    }
}

#[test]
fn today_sums_overnight_and_tom_next() {
    let swaps = swap_points();
    let result = LinearPointInterpolator::new(&swaps).interpolate(-2);

    assert_relative_eq!(result.points, -0.31 + -0.29, epsilon = 1e-15);
    assert_relative_eq!(result.bid.unwrap(), -0.36 + -0.34, epsilon = 1e-15);
    assert_relative_eq!(result.ask.unwrap(), -0.26 + -0.24, epsilon = 1e-15);
    assert_eq!(result.display_days, 2);
}

#[test]
fn third_month_has_no_bid_beyond_second() {
    let swaps = swap_points();
    let interp = LinearPointInterpolator::new(&swaps);

    assert_eq!(interp.interpolate(75).bid, None);
    assert!(interp.interpolate(75).ask.is_some());
    assert_eq!(interp.interpolate(200).bid, None);
    assert_eq!(interp.interpolate(200).ask, Some(-1.30));
}

#[test]
fn overrides_flow_into_implied_curve() {
    let base = bootstrap_base(&usd_curve());
    let overrides = SwapPointOverrides::from_json(r#"{"1M": {"mid": "-0.80"}}"#).unwrap();

    let plain = bootstrap_implied(
        &base,
        &thb_curve(),
        &swap_points(),
        Some(36.5),
        &SwapPointOverrides::new(),
        PipScale::default(),
    )
    .into_implied()
    .unwrap();
    let adjusted = bootstrap_implied(
        &base,
        &thb_curve(),
        &swap_points(),
        Some(36.5),
        &overrides,
        PipScale::default(),
    )
    .into_implied()
    .unwrap();

    let expected = base.discount_factor(33) * 36.5 / (36.5 - 0.008);
    assert_relative_eq!(adjusted.point_at(33).unwrap().df, expected, epsilon = 1e-15);
    assert_eq!(adjusted.point_at(61), plain.point_at(61));
}

#[test]
fn long_end_bootstraps_through_missing_years() {
    let base = bootstrap_base(&usd_curve());

    let mut previous = 1.0;
    for point in base.points().iter().filter(|p| p.point.days > 0) {
        assert!(point.df < previous, "{} DF {} not below {}", point.point.tenor, point.df, previous);
        previous = point.df;
    }
    assert!(base.point_at(1826).unwrap().zero_rate > 0.0);
}

fn curve_from(rates: &[f64]) -> RateCurve {
    let days = [7, 33, 61, 92, 183, 365, 730, 1095];
    let points = days
        .iter()
        .zip(rates)
        .map(|(&d, &r)| {
            let kind = if d > 365 { RateType::Swap } else { RateType::Cash };
            RateTenorPoint::new(format!("{d}D"), d, r, kind)
        })
        .collect();
    RateCurve::new(CurrencyCode::new("EUR").unwrap(), DayCountBasis::Act360, points).unwrap()
}

proptest! {
    #[test]
    fn bootstrap_is_idempotent(rates in proptest::collection::vec(0.0f64..0.15, 8)) {
        let curve = curve_from(&rates);
        let first = bootstrap_base(&curve);
        let second = bootstrap_base(&curve);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn pillars_round_trip_exactly(
        mids in proptest::collection::vec(-100.0f64..100.0, 1..8),
        query in 0usize..8,
    ) {
        let points: Vec<FxSwapPoint> = mids
            .iter()
            .enumerate()
            .map(|(i, &m)| FxSwapPoint::new(format!("{}W", i + 1), (i as i64 + 1) * 7, m))
            .collect();
        let curve = SwapPointCurve::new(points).unwrap();
        let i = query % mids.len();

        let result = LinearPointInterpolator::new(&curve).interpolate((i as i64 + 1) * 7);
        prop_assert_eq!(result.points, mids[i]);
    }

    #[test]
    fn boundaries_clamp_and_scale(
        first in -50.0f64..50.0,
        last in -50.0f64..50.0,
        below in 1i64..30,
        beyond in 1i64..3650,
    ) {
        let curve = SwapPointCurve::new(vec![
            FxSwapPoint::new("1M", 30, first),
            FxSwapPoint::new("6M", 182, last),
        ])
        .unwrap();
        let interp = LinearPointInterpolator::new(&curve);

        prop_assert_eq!(interp.interpolate(182 + beyond).points, last);
        let scaled = interp.interpolate(below).points;
        prop_assert!((scaled - first * below as f64 / 30.0).abs() < 1e-12);
    }
}
