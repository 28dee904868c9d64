//! Chart rendering module
//!
//! Two backends draw the same [`ChartScene`]:
//! - [`PlotlyBackend`]: interactive Plotly figure wrapped in an HTML page
//! - [`SvgBackend`]: static projected surface

mod plotly;
mod svg;
mod types;

pub use plotly::PlotlyBackend;
pub use svg::SvgBackend;
pub use types::{ChartLabels, ChartScene, Marker, MarkerRole, RenderError, Segment};

use crate::config::BackendKind;

/// Trait for chart backends
pub trait ChartBackend: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &'static str;

    /// Extension of the rendered document
    fn file_extension(&self) -> &'static str;

    /// Render the scene to a complete document
    fn render(&self, scene: &ChartScene<'_>) -> Result<String, RenderError>;
}

/// Backend for a configured kind
pub fn backend_for(kind: BackendKind) -> Box<dyn ChartBackend> {
    match kind {
        BackendKind::Plotly => Box::new(PlotlyBackend::new()),
        BackendKind::Svg => Box::new(SvgBackend::default()),
    }
}

/// Escape text for XML/HTML content and attributes
pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
