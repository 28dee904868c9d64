//! Chart scene types

use crate::analysis::Analysis;
use crate::config::ChartConfig;
use crate::model::Surface;
use serde::Serialize;
use thiserror::Error;

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Surface has no points to render")]
    EmptySurface,

    #[error("Surface grid is {rows} rows, expected {expected_rows} x {expected_cols}")]
    Shape {
        rows: usize,
        expected_rows: usize,
        expected_cols: usize,
    },

    #[error("Non-finite {what} cannot be rendered")]
    NonFinite { what: &'static str },

    #[error("Figure serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Formatting failed: {0}")]
    Format(#[from] std::fmt::Error),
}

/// What a marker stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerRole {
    /// Observed market price at the current inputs
    Market,
    /// Model fair value at the current inputs
    Model,
    /// Model fair value at the projected inputs
    Projected,
}

impl MarkerRole {
    pub fn color(&self) -> &'static str {
        match self {
            MarkerRole::Market => "red",
            MarkerRole::Model => "green",
            MarkerRole::Projected => "blue",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MarkerRole::Market => "Current STRK",
            MarkerRole::Model => "Current Model",
            MarkerRole::Projected => "Projected Model",
        }
    }
}

/// A discrete point drawn over the surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    pub role: MarkerRole,
    pub rate: f64,
    pub underlying_price: f64,
    pub value: f64,
}

impl Marker {
    /// Legend entry, e.g. "Current STRK: $84.00"
    pub fn name(&self) -> String {
        format!("{}: ${:.2}", self.role.label(), self.value)
    }
}

/// Vertical segment from the model price to the market price
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub rate: f64,
    pub underlying_price: f64,
    pub from_value: f64,
    pub to_value: f64,
}

/// Axis titles and chart title
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLabels {
    pub title: String,
    pub rate: String,
    pub underlying: String,
    pub value: String,
}

/// Everything a backend draws
#[derive(Debug, Clone)]
pub struct ChartScene<'a> {
    pub surface: &'a Surface,
    /// In role order: market, model, projected
    pub markers: Vec<Marker>,
    pub segment: Option<Segment>,
    pub labels: ChartLabels,
    pub wireframe: bool,
    pub width: u32,
    pub height: u32,
    /// Optional text shown alongside the chart
    pub caption: Option<String>,
}

impl<'a> ChartScene<'a> {
    /// Build the scene for an analysis
    pub fn from_analysis(analysis: &'a Analysis, chart: &ChartConfig) -> Self {
        let inputs = &analysis.inputs;
        let current = &analysis.current;

        let mut markers = vec![
            Marker {
                role: MarkerRole::Market,
                rate: inputs.rate,
                underlying_price: inputs.underlying_price,
                value: inputs.market_price,
            },
            Marker {
                role: MarkerRole::Model,
                rate: current.rate,
                underlying_price: current.underlying_price,
                value: current.fair_value,
            },
        ];

        if let Some(projected) = &analysis.projected {
            markers.push(Marker {
                role: MarkerRole::Projected,
                rate: projected.rate,
                underlying_price: projected.underlying_price,
                value: projected.fair_value,
            });
        }

        Self {
            surface: &analysis.surface,
            markers,
            segment: Some(Segment {
                rate: inputs.rate,
                underlying_price: inputs.underlying_price,
                from_value: current.fair_value,
                to_value: inputs.market_price,
            }),
            labels: ChartLabels {
                title: chart.title.clone(),
                rate: chart.rate_label.clone(),
                underlying: chart.underlying_label.clone(),
                value: chart.value_label.clone(),
            },
            wireframe: chart.wireframe,
            width: chart.width,
            height: chart.height,
            caption: None,
        }
    }

    /// Attach caption text
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Reject scenes that cannot be drawn
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.surface.is_empty() {
            return Err(RenderError::EmptySurface);
        }

        if !self.surface.is_rectangular() {
            return Err(RenderError::Shape {
                rows: self.surface.values.len(),
                expected_rows: self.surface.underlying_prices.len(),
                expected_cols: self.surface.rates.len(),
            });
        }

        let axes_finite = self
            .surface
            .rates
            .iter()
            .chain(&self.surface.underlying_prices)
            .all(|v| v.is_finite());
        if !axes_finite {
            return Err(RenderError::NonFinite { what: "axis value" });
        }

        if !self.surface.values.iter().flatten().all(|v| v.is_finite()) {
            return Err(RenderError::NonFinite {
                what: "surface value",
            });
        }

        let markers_finite = self
            .markers
            .iter()
            .all(|m| m.rate.is_finite() && m.underlying_price.is_finite() && m.value.is_finite());
        if !markers_finite {
            return Err(RenderError::NonFinite { what: "marker" });
        }

        Ok(())
    }

    /// (min, max) over surface values, markers and the segment
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        let (mut lo, mut hi) = self.surface.value_bounds()?;
        let extra = self
            .markers
            .iter()
            .map(|m| m.value)
            .chain(self.segment.iter().flat_map(|s| [s.from_value, s.to_value]));
        for v in extra {
            lo = lo.min(v);
            hi = hi.max(v);
        }
        Some((lo, hi))
    }
}
