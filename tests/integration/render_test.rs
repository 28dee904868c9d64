//! Chart backends over a full analysis

use strk_model::analysis::Analysis;
use strk_model::config::{BackendKind, ChartConfig, Config};
use strk_model::controls::InputOverrides;
use strk_model::model::{ModelParams, StrkModel};
use strk_model::render::{backend_for, ChartScene, MarkerRole, PlotlyBackend};
use strk_model::report::Summary;

fn analysis(config: &Config) -> Analysis {
    let params = ModelParams::from_config(&config.model).unwrap();
    let inputs = config.controls.resolve(&InputOverrides::default()).unwrap();
    Analysis::run(&StrkModel::new(params), &config.surface, inputs).unwrap()
}

#[test]
fn test_scene_markers_in_role_order() {
    let config = Config::default();
    let analysis = analysis(&config);
    let scene = ChartScene::from_analysis(&analysis, &config.chart);

    let roles: Vec<_> = scene.markers.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![MarkerRole::Market, MarkerRole::Model, MarkerRole::Projected]
    );
    let segment = scene.segment.unwrap();
    assert_eq!(segment.to_value, 84.0);
    assert_eq!(segment.from_value, analysis.current.fair_value);
}

#[test]
fn test_plotly_figure_has_full_grid() {
    let config = Config::default();
    let analysis = analysis(&config);
    let scene = ChartScene::from_analysis(&analysis, &config.chart);
    let figure = PlotlyBackend::new().figure(&scene).unwrap();

    let z = figure["data"][0]["z"].as_array().unwrap();
    assert_eq!(z.len(), 50);
    assert!(z.iter().all(|row| row.as_array().unwrap().len() == 100));
}

#[test]
fn test_both_backends_write_files() {
    let config = Config::default();
    let analysis = analysis(&config);
    let dir = tempfile::tempdir().unwrap();
    let summary = Summary::new(&analysis, &config.controls).to_string();

    for kind in [BackendKind::Plotly, BackendKind::Svg] {
        let backend = backend_for(kind);
        let scene =
            ChartScene::from_analysis(&analysis, &config.chart).with_caption(summary.clone());
        let document = backend.render(&scene).unwrap();

        let path = dir
            .path()
            .join(format!("chart.{}", backend.file_extension()));
        std::fs::write(&path, &document).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Current STRK: $84.00"));
        assert!(written.contains("Undervalued"));
    }
}

#[test]
fn test_svg_without_projection() {
    let config = Config::default();
    let params = ModelParams::from_config(&config.model).unwrap();
    let overrides = InputOverrides {
        skip_projection: true,
        ..Default::default()
    };
    let inputs = config.controls.resolve(&overrides).unwrap();
    let analysis = Analysis::run(&StrkModel::new(params), &config.surface, inputs).unwrap();

    let chart = ChartConfig {
        backend: BackendKind::Svg,
        ..Default::default()
    };
    let scene = ChartScene::from_analysis(&analysis, &chart);
    assert_eq!(scene.markers.len(), 2);

    let svg = backend_for(chart.backend).render(&scene).unwrap();
    assert!(!svg.contains("Projected Model"));
}
