//! Configuration types for strk-model

use crate::controls::ControlPanel;
use crate::model::{DEFAULT_CONVERSION_RATIO, DEFAULT_FACE_VALUE, DEFAULT_RISK_PREMIUM};
use crate::telemetry::LogFormat;
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: ModelConfig,
    pub surface: SurfaceConfig,
    pub controls: ControlPanel,
    pub chart: ChartConfig,
    pub telemetry: TelemetryConfig,
}

/// Fair value model constants
///
/// These come from an informal public model of STRK and are not calibrated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Numerator of the straight value (annual dividend in dollars)
    pub face_value: f64,
    /// Spread added to the 10Y yield in the straight-value denominator
    pub risk_premium: f64,
    /// Underlying price divisor of the conversion value
    pub conversion_ratio: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            face_value: DEFAULT_FACE_VALUE,
            risk_premium: DEFAULT_RISK_PREMIUM,
            conversion_ratio: DEFAULT_CONVERSION_RATIO,
        }
    }
}

/// Surface sampling grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub rate_min: f64,
    pub rate_max: f64,
    pub rate_samples: usize,
    pub price_min: f64,
    pub price_max: f64,
    pub price_samples: usize,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            rate_min: 0.01,
            rate_max: 0.10,
            rate_samples: 100,
            price_min: 100.0,
            price_max: 4000.0,
            price_samples: 50,
        }
    }
}

/// Chart rendering backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Interactive Plotly figure in a standalone HTML page
    Plotly,
    /// Static projected SVG image
    Svg,
}

/// Chart labels and output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub backend: BackendKind,
    pub title: String,
    pub rate_label: String,
    pub underlying_label: String,
    pub value_label: String,
    /// Draw grid lines over the shaded surface
    pub wireframe: bool,
    pub width: u32,
    pub height: u32,
    /// Output file name without extension
    pub output_stem: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Plotly,
            title: "STRK Price vs. 10-Year Yield and MSTR Price".to_string(),
            rate_label: "10Y UST Yield".to_string(),
            underlying_label: "MSTR Price ($)".to_string(),
            value_label: "STRK Price ($)".to_string(),
            wireframe: true,
            width: 900,
            height: 700,
            output_stem: "strk_surface".to_string(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.controls.check()?;
        Ok(config)
    }

    /// Load `path`, or the documented defaults when no such file exists
    ///
    /// A file that exists but does not parse or check is an error.
    pub fn load_or_default(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path)
                .with_context(|| format!("Invalid config {}", path.display()));
        }
        tracing::debug!(path = %path.display(), "Config file not found, using defaults");
        Ok(toml::from_str(include_str!("../config.toml.example"))?)
    }
}
