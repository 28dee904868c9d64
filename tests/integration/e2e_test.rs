//! End-to-end integration tests

use rust_decimal_macros::dec;
use strk_model::analysis::Analysis;
use strk_model::config::Config;
use strk_model::controls::InputOverrides;
use strk_model::model::{ModelParams, StrkModel, Verdict};
use strk_model::report::Summary;

#[test]
fn test_config_example_matches_defaults() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    assert_eq!(config, Config::default());
    assert!(config.controls.check().is_ok());
}

#[test]
fn test_config_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
        [model]
        risk_premium = 0.05

        [surface]
        rate_samples = 12
        price_samples = 8
        "#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.model.risk_premium, 0.05);
    assert_eq!(config.model.face_value, 8.0);
    assert_eq!(config.surface.rate_samples, 12);
}

#[test]
fn test_pull_model_recomputes_per_input() {
    let config = Config::default();
    let model = StrkModel::new(ModelParams::from_config(&config.model).unwrap());

    let first = config.controls.resolve(&InputOverrides::default()).unwrap();
    let first = Analysis::run(&model, &config.surface, first).unwrap();
    assert_eq!(first.deviation.verdict, Verdict::Undervalued);

    // Underlying rallies past the crossover
    let overrides = InputOverrides {
        underlying_price: Some(dec!(2000)),
        market_price: Some(dec!(210)),
        ..Default::default()
    };
    let second = config.controls.resolve(&overrides).unwrap();
    let second = Analysis::run(&model, &config.surface, second).unwrap();
    assert_eq!(second.current.fair_value, 200.0);
    assert_eq!(second.deviation.verdict, Verdict::Overvalued);

    // First result is unchanged
    assert_eq!(first.inputs.underlying_price, 165.0);
    assert_eq!(first.surface, second.surface);
}

#[test]
fn test_summary_for_custom_constants() {
    let mut config = Config::default();
    config.model.face_value = 10.0;
    config.model.conversion_ratio = 8.0;
    let params = ModelParams::from_config(&config.model).unwrap();

    let inputs = config.controls.resolve(&InputOverrides::default()).unwrap();
    let analysis = Analysis::run(&StrkModel::new(params), &config.surface, inputs).unwrap();
    let text = Summary::new(&analysis, &config.controls)
        .with_explanation(params)
        .to_string();

    // 10 / 0.0853
    assert!(text.contains("- Model STRK Price: $117.23"));
    assert!(text.contains("MSTR Price / 8"));
}

#[test]
fn test_out_of_range_input_is_rejected() {
    let config = Config::default();
    let overrides = InputOverrides {
        rate: Some(dec!(0.5)),
        ..Default::default()
    };
    assert!(config.controls.resolve(&overrides).is_err());
}
