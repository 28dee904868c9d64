//! Command-line parsing and command execution tests

use approx::assert_relative_eq;
use clap::Parser;
use rust_decimal_macros::dec;
use strk_model::cli::{Cli, Commands};
use strk_model::config::{BackendKind, Config};
use strk_model::model::Verdict;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("strk-model").chain(args.iter().copied())).unwrap()
}

fn small_config() -> Config {
    let mut config = Config::default();
    config.surface.rate_samples = 4;
    config.surface.price_samples = 3;
    config
}

#[test]
fn test_value_parses_and_executes() {
    let cli = parse(&["value", "--rate", "0.05", "--market-price", "120", "--explain"]);
    assert_eq!(cli.config, "config.toml");
    let Commands::Value(args) = cli.command else {
        panic!("expected value command");
    };
    assert_eq!(args.inputs.rate, Some(dec!(0.05)));
    assert!(args.explain);

    let config = small_config();
    let (_, analysis) = args.inputs.analyze(&config).unwrap();
    assert_relative_eq!(analysis.inputs.rate, 0.05, epsilon = 1e-12);
    assert_eq!(analysis.deviation.verdict, Verdict::Overvalued);
    args.execute(&config).unwrap();
}

#[test]
fn test_value_rejects_out_of_range_input() {
    let cli = parse(&["value", "--rate", "0.5"]);
    let Commands::Value(args) = cli.command else {
        panic!("expected value command");
    };
    assert!(args.execute(&small_config()).is_err());
}

#[test]
fn test_no_projection_conflicts_with_projected_flags() {
    let result = Cli::try_parse_from([
        "strk-model",
        "value",
        "--no-projection",
        "--projected-rate",
        "0.03",
    ]);
    assert!(result.is_err());

    let cli = parse(&["value", "--no-projection"]);
    let Commands::Value(args) = cli.command else {
        panic!("expected value command");
    };
    let (_, analysis) = args.inputs.analyze(&small_config()).unwrap();
    assert!(analysis.projected.is_none());
}

#[test]
fn test_plot_writes_chart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.svg");
    let path_arg = path.to_str().unwrap();
    let cli = parse(&["plot", "--backend", "svg", "--no-wireframe", "-o", path_arg]);
    let Commands::Plot(args) = cli.command else {
        panic!("expected plot command");
    };
    assert_eq!(args.backend, Some(BackendKind::Svg));

    args.execute(&small_config()).unwrap();
    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Current Model: $93.79"));
}

#[test]
fn test_surface_exports_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("surface.json");
    let path_arg = path.to_str().unwrap();
    let cli = parse(&["surface", "--rate-samples", "5", "--price-samples", "2", "-o", path_arg]);
    let Commands::Surface(args) = cli.command else {
        panic!("expected surface command");
    };

    args.execute(&small_config()).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(json["risk_premium"], 0.0423);
    assert_eq!(json["face_value"], 8.0);
    assert_eq!(json["rates"].as_array().unwrap().len(), 5);
    assert_eq!(json["underlying_prices"].as_array().unwrap().len(), 2);
    let values = json["values"].as_array().unwrap();
    assert_eq!(values.len(), 2);
    assert_eq!(values[0].as_array().unwrap().len(), 5);
    assert!(json["generated_at"].is_string());
}

#[test]
fn test_surface_rejects_zero_samples() {
    let cli = parse(&["surface", "--rate-samples", "0"]);
    let Commands::Surface(args) = cli.command else {
        panic!("expected surface command");
    };
    assert!(args.execute(&small_config()).is_err());
}
