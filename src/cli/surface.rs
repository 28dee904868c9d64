//! Surface export command implementation

use crate::config::Config;
use crate::model::{ModelParams, Range, StrkModel, Surface};
use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct SurfaceArgs {
    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override [surface].rate_samples
    #[arg(long)]
    pub rate_samples: Option<usize>,

    /// Override [surface].price_samples
    #[arg(long)]
    pub price_samples: Option<usize>,
}

/// Exported surface document
#[derive(Debug, Serialize)]
pub struct SurfaceExport<'a> {
    pub generated_at: DateTime<Utc>,
    pub face_value: f64,
    pub risk_premium: f64,
    pub conversion_ratio: f64,
    #[serde(flatten)]
    pub surface: &'a Surface,
}

impl SurfaceArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let params = ModelParams::from_config(&config.model)?;
        let grid = &config.surface;

        let surface = StrkModel::new(params).build_surface(
            Range::new(grid.rate_min, grid.rate_max),
            Range::new(grid.price_min, grid.price_max),
            self.rate_samples.unwrap_or(grid.rate_samples),
            self.price_samples.unwrap_or(grid.price_samples),
        )?;

        let export = SurfaceExport {
            generated_at: Utc::now(),
            face_value: params.face_value(),
            risk_premium: params.risk_premium(),
            conversion_ratio: params.conversion_ratio(),
            surface: &surface,
        };
        let json = serde_json::to_string_pretty(&export)?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, &json)
                    .with_context(|| format!("Failed to write surface to {}", path.display()))?;
                tracing::info!(path = %path.display(), points = surface.len(), "Wrote surface");
            }
            None => println!("{json}"),
        }
        Ok(())
    }
}
