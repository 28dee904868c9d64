//! Plot command implementation

use super::InputArgs;
use crate::config::{BackendKind, Config};
use crate::render::{backend_for, ChartScene};
use crate::report::Summary;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct PlotArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Chart backend (defaults to [chart].backend)
    #[arg(long, value_enum)]
    pub backend: Option<BackendKind>,

    /// Output file (defaults to [chart].output_stem plus the backend extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Draw the shaded surface without grid lines
    #[arg(long)]
    pub no_wireframe: bool,
}

impl PlotArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let (params, analysis) = self.inputs.analyze(config)?;

        let mut chart = config.chart.clone();
        if self.no_wireframe {
            chart.wireframe = false;
        }
        let backend = backend_for(self.backend.unwrap_or(chart.backend));

        let summary = Summary::new(&analysis, &config.controls)
            .with_explanation(params)
            .to_string();
        let scene = ChartScene::from_analysis(&analysis, &chart).with_caption(summary.clone());
        let document = backend.render(&scene)?;

        let output = self.output.clone().unwrap_or_else(|| {
            PathBuf::from(format!("{}.{}", chart.output_stem, backend.file_extension()))
        });
        std::fs::write(&output, &document)
            .with_context(|| format!("Failed to write chart to {}", output.display()))?;

        tracing::info!(
            backend = backend.name(),
            path = %output.display(),
            bytes = document.len(),
            generated_at = %analysis.generated_at,
            "Wrote chart"
        );

        print!("{summary}");
        Ok(())
    }
}
