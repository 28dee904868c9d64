//! Properties of the fair value model

use approx::assert_relative_eq;
use proptest::prelude::*;
use strk_model::model::{deviation, Deviation, Range, Regime, StrkModel, Verdict};

fn rate_strategy() -> impl Strategy<Value = f64> {
    -0.04..0.5f64
}

fn price_strategy() -> impl Strategy<Value = f64> {
    0.0..10_000.0f64
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn test_fair_value_bounds_both_branches(rate in rate_strategy(), price in price_strategy()) {
        let model = StrkModel::default();
        let fair = model.fair_value(rate, price);
        prop_assert!(fair >= model.straight_value(rate));
        prop_assert!(fair >= model.conversion_value(price));
        prop_assert!(fair == model.straight_value(rate) || fair == model.conversion_value(price));
    }

    #[test]
    fn test_non_increasing_in_rate(
        rate in rate_strategy(),
        bump in 0.0..0.1f64,
        price in price_strategy()
    ) {
        let model = StrkModel::default();
        prop_assert!(model.fair_value(rate + bump, price) <= model.fair_value(rate, price));
    }

    #[test]
    fn test_non_decreasing_in_price(
        rate in rate_strategy(),
        price in price_strategy(),
        bump in 0.0..1_000.0f64
    ) {
        let model = StrkModel::default();
        prop_assert!(model.fair_value(rate, price + bump) >= model.fair_value(rate, price));
    }

    #[test]
    fn test_regime_matches_crossover(rate in 0.0..0.2f64, price in price_strategy()) {
        let model = StrkModel::default();
        let crossover = model.crossover_price(rate);
        let valuation = model.valuation(rate, price);
        if price < crossover * (1.0 - 1e-9) {
            prop_assert_eq!(valuation.regime, Regime::Straight);
        } else if price > crossover * (1.0 + 1e-9) {
            prop_assert_eq!(valuation.regime, Regime::Conversion);
        }
    }

    #[test]
    fn test_deviation_sign_matches_verdict(market in 50.0..300.0f64, fair in 50.0..300.0f64) {
        let d = Deviation::new(market, fair).unwrap();
        let expected = if market < fair {
            Verdict::Undervalued
        } else if market > fair {
            Verdict::Overvalued
        } else {
            Verdict::FairValue
        };
        prop_assert_eq!(d.verdict, expected);
        prop_assert!((d.percent - 100.0 * d.absolute / fair).abs() < 1e-9);
    }
}

#[test]
fn test_reference_point() {
    let model = StrkModel::default();
    assert_relative_eq!(model.fair_value(0.043, 165.0), 8.0 / 0.0853, epsilon = 1e-9);
    assert_relative_eq!(model.fair_value(0.043, 165.0), 93.79, epsilon = 5e-3);
}

#[test]
fn test_reference_deviation() {
    let (absolute, percent) = deviation(84.0, 93.79).unwrap();
    assert_relative_eq!(absolute, -9.79, epsilon = 1e-9);
    assert_relative_eq!(percent, -10.44, epsilon = 5e-3);
    assert_eq!(Deviation::new(84.0, 93.79).unwrap().verdict, Verdict::Undervalued);

    let exact = Deviation::new(93.79, 93.79).unwrap();
    assert_eq!(exact.absolute, 0.0);
    assert_eq!(exact.verdict, Verdict::FairValue);
}

#[test]
fn test_continuous_across_crossover() {
    let model = StrkModel::default();
    let rate = 0.043;
    let crossover = model.crossover_price(rate);

    for eps in [1e-3, 1e-6, 1e-9] {
        let below = model.fair_value(rate, crossover - eps);
        let above = model.fair_value(rate, crossover + eps);
        // Left branch is flat, right branch has slope 1 / conversion_ratio
        assert!((above - below).abs() <= eps / 10.0 + 1e-9);
    }

    // Kink: slope is 0 below the crossover and 1/10 above
    let h = 1.0;
    let left = (model.fair_value(rate, crossover) - model.fair_value(rate, crossover - h)) / h;
    let right = (model.fair_value(rate, crossover + h) - model.fair_value(rate, crossover)) / h;
    assert_relative_eq!(left, 0.0, epsilon = 1e-9);
    assert_relative_eq!(right, 0.1, epsilon = 1e-9);
}

#[test]
fn test_grid_matches_independent_evaluation() {
    let model = StrkModel::default();
    let rates = Range::new(0.005, 0.10);
    let prices = Range::new(100.0, 4000.0);
    let surface = model.build_surface(rates, prices, 37, 23).unwrap();

    assert_eq!(surface.len(), 37 * 23);
    assert_eq!(surface.points().count(), 37 * 23);

    let rate_axis = rates.linspace(37);
    let price_axis = prices.linspace(23);
    for (i, &price) in price_axis.iter().enumerate() {
        for (j, &rate) in rate_axis.iter().enumerate() {
            assert_eq!(surface.value(j, i), Some(model.fair_value(rate, price)));
        }
    }
}
