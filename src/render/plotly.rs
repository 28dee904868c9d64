//! Plotly backend
//!
//! Builds a Plotly figure (`{data, layout}`) with `serde_json` and embeds it
//! in a standalone HTML page that loads plotly.js from the CDN.

use super::{escape_xml, ChartBackend, ChartScene, RenderError};
use serde_json::{json, Value};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Plotly figure and HTML page renderer
#[derive(Debug, Clone, Default)]
pub struct PlotlyBackend;

impl PlotlyBackend {
    pub fn new() -> Self {
        Self
    }

    /// Plotly figure: surface trace, deviation segment, one trace per marker
    pub fn figure(&self, scene: &ChartScene<'_>) -> Result<Value, RenderError> {
        scene.validate()?;
        let surface = scene.surface;

        let mut surface_trace = json!({
            "type": "surface",
            "name": "STRK Model Price",
            "x": surface.rates,
            "y": surface.underlying_prices,
            "z": surface.values,
            "colorscale": "RdBu",
            "reversescale": true,
            "opacity": 0.9,
            "showscale": true,
            "colorbar": { "title": { "text": scene.labels.value }, "len": 0.7 },
        });
        if scene.wireframe {
            let lines = json!({ "show": true, "color": "black", "width": 1 });
            surface_trace["contours"] = json!({ "x": lines, "y": lines });
        }

        let mut data = vec![surface_trace];

        if let Some(segment) = &scene.segment {
            data.push(json!({
                "type": "scatter3d",
                "mode": "lines",
                "name": "Current vs Model",
                "x": [segment.rate, segment.rate],
                "y": [segment.underlying_price, segment.underlying_price],
                "z": [segment.from_value, segment.to_value],
                "line": { "color": "red", "width": 6 },
                "showlegend": true,
            }));
        }

        for marker in &scene.markers {
            data.push(json!({
                "type": "scatter3d",
                "mode": "markers",
                "name": marker.name(),
                "x": [marker.rate],
                "y": [marker.underlying_price],
                "z": [marker.value],
                "marker": {
                    "size": 10,
                    "color": marker.role.color(),
                    "symbol": "circle",
                    "line": { "color": "black", "width": 2 },
                },
                "showlegend": true,
            }));
        }

        let mut xaxis = json!({
            "title": { "text": scene.labels.rate },
            "tickformat": ".1%",
        });
        if let Some(range) = surface.rate_range() {
            xaxis["range"] = json!([range.min, range.max]);
        }

        let layout = json!({
            "title": { "text": scene.labels.title, "font": { "size": 20 } },
            "scene": {
                "xaxis": xaxis,
                "yaxis": { "title": { "text": scene.labels.underlying } },
                "zaxis": { "title": { "text": scene.labels.value } },
                "camera": { "eye": { "x": 1.5, "y": -1.5, "z": 1.2 } },
            },
            "width": scene.width,
            "height": scene.height,
            "margin": { "l": 0, "r": 0, "t": 80, "b": 0 },
            "legend": {
                "x": 0.02,
                "y": 0.98,
                "bgcolor": "rgba(255, 255, 255, 0.8)",
                "bordercolor": "black",
                "borderwidth": 1,
            },
        });

        Ok(json!({ "data": data, "layout": layout }))
    }
}

impl ChartBackend for PlotlyBackend {
    fn name(&self) -> &'static str {
        "plotly"
    }

    fn file_extension(&self) -> &'static str {
        "html"
    }

    fn render(&self, scene: &ChartScene<'_>) -> Result<String, RenderError> {
        let figure = self.figure(scene)?;
        // Keep string content from closing the script element
        let figure_json = serde_json::to_string(&figure)?.replace("</", "<\\/");

        let caption = scene
            .caption
            .as_deref()
            .map(|text| format!("  <pre class=\"summary\">{}</pre>\n", escape_xml(text)))
            .unwrap_or_default();

        Ok(format!(
            r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>{title}</title>
  <script src="{cdn}"></script>
  <style>
    body {{ font-family: sans-serif; margin: 24px; }}
    pre.summary {{ background: #f6f8fa; padding: 12px; border: 1px solid #d0d7de; }}
  </style>
</head>
<body>
  <div id="chart"></div>
{caption}  <script>
    const figure = {figure_json};
    Plotly.newPlot("chart", figure.data, figure.layout, {{ responsive: true }});
  </script>
</body>
</html>
"#,
            title = escape_xml(&scene.labels.title),
            cdn = PLOTLY_CDN,
            caption = caption,
            figure_json = figure_json,
        ))
    }
}
