//! Static SVG backend
//!
//! Orthographic projection of the surface with painter's-algorithm quads,
//! shaded with a coolwarm ramp, plus colour bar, axes, markers and legend.
//! Elevation/azimuth follow the usual 3D-plot convention: azimuth is measured
//! in the x-y plane from +x, elevation above that plane.

use super::{escape_xml, ChartBackend, ChartScene, MarkerRole, RenderError};
use std::fmt::Write;

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 130.0;
const MARGIN_TOP: f64 = 70.0;
const MARGIN_BOTTOM: f64 = 60.0;
const TICKS: usize = 5;

/// Coolwarm ramp: blue -> light grey -> red
const COOLWARM: [(f64, [f64; 3]); 3] = [
    (0.0, [59.0, 76.0, 192.0]),
    (0.5, [221.0, 221.0, 221.0]),
    (1.0, [180.0, 4.0, 38.0]),
];

/// Static projected-surface renderer
#[derive(Debug, Clone)]
pub struct SvgBackend {
    pub elevation_deg: f64,
    pub azimuth_deg: f64,
}

impl SvgBackend {
    pub fn new(elevation_deg: f64, azimuth_deg: f64) -> Self {
        Self {
            elevation_deg,
            azimuth_deg,
        }
    }
}

impl Default for SvgBackend {
    fn default() -> Self {
        Self::new(20.0, -45.0)
    }
}

/// Colour at `t` in [0, 1]
fn coolwarm(t: f64) -> String {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.5 };
    let (lo, hi) = if t <= COOLWARM[1].0 {
        (COOLWARM[0], COOLWARM[1])
    } else {
        (COOLWARM[1], COOLWARM[2])
    };
    let f = (t - lo.0) / (hi.0 - lo.0);
    let channel = |i: usize| (lo.1[i] + (hi.1[i] - lo.1[i]) * f).round() as u8;
    format!("#{:02x}{:02x}{:02x}", channel(0), channel(1), channel(2))
}

/// Maps a data range onto [-0.5, 0.5]
#[derive(Debug, Clone, Copy)]
struct AxisScale {
    min: f64,
    max: f64,
}

impl AxisScale {
    fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn unit(&self, v: f64) -> f64 {
        let span = self.max - self.min;
        if span.abs() < f64::EPSILON {
            0.0
        } else {
            (v - self.min) / span - 0.5
        }
    }

    fn fraction(&self, v: f64) -> f64 {
        self.unit(v) + 0.5
    }

    fn ticks(&self) -> impl Iterator<Item = f64> + '_ {
        (0..TICKS).map(move |i| self.min + (self.max - self.min) * i as f64 / (TICKS - 1) as f64)
    }
}

/// Orthographic camera fitted to the plot area
struct Projection {
    right: [f64; 3],
    up: [f64; 3],
    view: [f64; 3],
    scale: f64,
    origin_x: f64,
    origin_y: f64,
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

impl Projection {
    fn new(elevation_deg: f64, azimuth_deg: f64, area: (f64, f64, f64, f64)) -> Self {
        let (e, a) = (elevation_deg.to_radians(), azimuth_deg.to_radians());
        let right = [-a.sin(), a.cos(), 0.0];
        let up = [-e.sin() * a.cos(), -e.sin() * a.sin(), e.cos()];
        let view = [e.cos() * a.cos(), e.cos() * a.sin(), e.sin()];

        // Fit the unit cube's projection into the plot area
        let (mut min_x, mut max_x, mut min_y, mut max_y) =
            (f64::MAX, f64::MIN, f64::MAX, f64::MIN);
        for &x in &[-0.5, 0.5] {
            for &y in &[-0.5, 0.5] {
                for &z in &[-0.5, 0.5] {
                    let p = [x, y, z];
                    min_x = min_x.min(dot(p, right));
                    max_x = max_x.max(dot(p, right));
                    min_y = min_y.min(dot(p, up));
                    max_y = max_y.max(dot(p, up));
                }
            }
        }

        let (left, top, width, height) = area;
        let scale = (width / (max_x - min_x)).min(height / (max_y - min_y));
        let origin_x = left + width / 2.0 - scale * (min_x + max_x) / 2.0;
        let origin_y = top + height / 2.0 + scale * (min_y + max_y) / 2.0;

        Self {
            right,
            up,
            view,
            scale,
            origin_x,
            origin_y,
        }
    }

    /// Screen coordinates of a unit-cube point
    fn screen(&self, p: [f64; 3]) -> (f64, f64) {
        (
            self.origin_x + self.scale * dot(p, self.right),
            self.origin_y - self.scale * dot(p, self.up),
        )
    }

    /// Larger is closer to the viewer
    fn depth(&self, p: [f64; 3]) -> f64 {
        dot(p, self.view)
    }
}

struct Quad {
    depth: f64,
    color: String,
    corners: [(f64, f64); 4],
}

impl ChartBackend for SvgBackend {
    fn name(&self) -> &'static str {
        "svg"
    }

    fn file_extension(&self) -> &'static str {
        "svg"
    }

    fn render(&self, scene: &ChartScene<'_>) -> Result<String, RenderError> {
        scene.validate()?;
        let surface = scene.surface;
        let (width, height) = (f64::from(scene.width), f64::from(scene.height));

        let rate_range = surface.rate_range().ok_or(RenderError::EmptySurface)?;
        let price_range = surface.price_range().ok_or(RenderError::EmptySurface)?;
        let (value_min, value_max) = scene.value_bounds().ok_or(RenderError::EmptySurface)?;

        let xs = AxisScale::new(rate_range.min, rate_range.max);
        let ys = AxisScale::new(price_range.min, price_range.max);
        let zs = AxisScale::new(value_min, value_max);
        let unit =
            |rate: f64, price: f64, value: f64| [xs.unit(rate), ys.unit(price), zs.unit(value)];

        let plot_w = (width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0);
        let plot_h = (height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0);
        let proj = Projection::new(
            self.elevation_deg,
            self.azimuth_deg,
            (MARGIN_LEFT, MARGIN_TOP, plot_w, plot_h),
        );

        let mut svg = String::new();
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
            w = scene.width,
            h = scene.height
        )?;
        writeln!(svg, "<title>{}</title>", escape_xml(&scene.labels.title))?;
        if let Some(caption) = &scene.caption {
            writeln!(svg, "<desc>{}</desc>", escape_xml(caption))?;
        }
        writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#)?;

        // Axis lines along the floor and the back-left vertical edge
        let axes = [
            ([-0.5, -0.5, -0.5], [0.5, -0.5, -0.5]),
            ([0.5, -0.5, -0.5], [0.5, 0.5, -0.5]),
            ([-0.5, -0.5, -0.5], [-0.5, -0.5, 0.5]),
        ];
        for (from, to) in axes {
            let (x1, y1) = proj.screen(from);
            let (x2, y2) = proj.screen(to);
            writeln!(
                svg,
                r##"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" stroke="#555" stroke-width="1"/>"##
            )?;
        }

        // Surface quads, far to near
        let rows = surface.underlying_prices.len();
        let cols = surface.rates.len();
        let mut quads = Vec::with_capacity(rows.saturating_sub(1) * cols.saturating_sub(1));
        for i in 0..rows.saturating_sub(1) {
            for j in 0..cols.saturating_sub(1) {
                let cell = [(i, j), (i, j + 1), (i + 1, j + 1), (i + 1, j)];
                let points = cell.map(|(r, c)| {
                    unit(
                        surface.rates[c],
                        surface.underlying_prices[r],
                        surface.values[r][c],
                    )
                });
                let mean_value =
                    cell.iter().map(|&(r, c)| surface.values[r][c]).sum::<f64>() / 4.0;
                quads.push(Quad {
                    depth: points.iter().map(|&p| proj.depth(p)).sum::<f64>() / 4.0,
                    color: coolwarm(zs.fraction(mean_value)),
                    corners: points.map(|p| proj.screen(p)),
                });
            }
        }
        quads.sort_by(|a, b| a.depth.total_cmp(&b.depth));

        writeln!(svg, r#"<g stroke-linejoin="round">"#)?;
        for quad in &quads {
            let points = quad
                .corners
                .iter()
                .map(|(x, y)| format!("{x:.2},{y:.2}"))
                .collect::<Vec<_>>()
                .join(" ");
            let stroke = if scene.wireframe {
                r##"stroke="#000" stroke-width="0.4" stroke-opacity="0.6""##.to_string()
            } else {
                format!(r#"stroke="{}" stroke-width="0.5""#, quad.color)
            };
            writeln!(
                svg,
                r#"<polygon points="{points}" fill="{}" {stroke}/>"#,
                quad.color
            )?;
        }
        writeln!(svg, "</g>")?;

        // Degenerate grids have no quads; draw the sampled line instead
        if quads.is_empty() {
            let line = surface
                .points()
                .map(|p| proj.screen(unit(p.rate, p.underlying_price, p.fair_value)))
                .map(|(x, y)| format!("{x:.2},{y:.2}"))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(
                svg,
                r##"<polyline points="{line}" fill="none" stroke="#3b4cc0" stroke-width="2"/>"##
            )?;
        }

        self.write_ticks(&mut svg, &proj, scene, (xs, ys, zs))?;

        if let Some(segment) = &scene.segment {
            let (x1, y1) =
                proj.screen(unit(segment.rate, segment.underlying_price, segment.from_value));
            let (x2, y2) =
                proj.screen(unit(segment.rate, segment.underlying_price, segment.to_value));
            writeln!(
                svg,
                r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" stroke="red" stroke-width="4"/>"#
            )?;
        }

        for marker in &scene.markers {
            let (x, y) = proj.screen(unit(marker.rate, marker.underlying_price, marker.value));
            write_marker_shape(&mut svg, marker.role, x, y, 6.0)?;
        }

        self.write_colorbar(&mut svg, scene, value_min, value_max)?;
        write_legend(&mut svg, scene)?;

        writeln!(
            svg,
            r#"<text x="{:.1}" y="32" font-size="18" font-weight="bold" text-anchor="middle">{}</text>"#,
            width / 2.0,
            escape_xml(&scene.labels.title)
        )?;
        writeln!(svg, "</svg>")?;

        tracing::debug!(quads = quads.len(), bytes = svg.len(), "Rendered SVG chart");
        Ok(svg)
    }
}

impl SvgBackend {
    fn write_ticks(
        &self,
        svg: &mut String,
        proj: &Projection,
        scene: &ChartScene<'_>,
        (xs, ys, zs): (AxisScale, AxisScale, AxisScale),
    ) -> Result<(), RenderError> {
        for v in xs.ticks() {
            let text = format!("{:.1}%", v * 100.0);
            write_label(svg, proj, [xs.unit(v), -0.5, -0.5], (-4.0, 16.0), "middle", &text)?;
        }
        for v in ys.ticks() {
            let text = format!("{v:.0}");
            write_label(svg, proj, [0.5, ys.unit(v), -0.5], (8.0, 14.0), "start", &text)?;
        }
        for v in zs.ticks() {
            let text = format!("{v:.0}");
            write_label(svg, proj, [-0.5, -0.5, zs.unit(v)], (-8.0, 4.0), "end", &text)?;
        }

        let labels = &scene.labels;
        write_label(svg, proj, [0.0, -0.5, -0.5], (-24.0, 36.0), "middle", &labels.rate)?;
        write_label(svg, proj, [0.5, 0.0, -0.5], (40.0, 34.0), "middle", &labels.underlying)?;
        write_label(svg, proj, [-0.5, -0.5, 0.62], (0.0, -4.0), "middle", &labels.value)?;
        Ok(())
    }

    fn write_colorbar(
        &self,
        svg: &mut String,
        scene: &ChartScene<'_>,
        value_min: f64,
        value_max: f64,
    ) -> Result<(), RenderError> {
        let height = f64::from(scene.height);
        let x = f64::from(scene.width) - MARGIN_RIGHT + 40.0;
        let top = MARGIN_TOP + 40.0;
        let bar_h = (height - MARGIN_TOP - MARGIN_BOTTOM - 80.0).max(40.0);

        writeln!(svg, r#"<defs><linearGradient id="coolwarm" x1="0" y1="1" x2="0" y2="0">"#)?;
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            writeln!(svg, r#"<stop offset="{:.1}" stop-color="{}"/>"#, t, coolwarm(t))?;
        }
        writeln!(svg, "</linearGradient></defs>")?;
        writeln!(
            svg,
            r##"<rect x="{x:.1}" y="{top:.1}" width="16" height="{bar_h:.1}" fill="url(#coolwarm)" stroke="#333" stroke-width="0.5"/>"##
        )?;

        let scale = AxisScale::new(value_min, value_max);
        for v in scale.ticks() {
            let y = top + bar_h * (1.0 - scale.fraction(v));
            writeln!(
                svg,
                r#"<text x="{:.1}" y="{:.1}" font-size="10" dominant-baseline="middle">{v:.0}</text>"#,
                x + 22.0,
                y
            )?;
        }

        let label_x = x + 70.0;
        let label_y = top + bar_h / 2.0;
        writeln!(
            svg,
            r#"<text x="{label_x:.1}" y="{label_y:.1}" font-size="12" text-anchor="middle" transform="rotate(90 {label_x:.1} {label_y:.1})">{}</text>"#,
            escape_xml(&scene.labels.value)
        )?;
        Ok(())
    }
}

/// Small text anchored at a projected point, offset in pixels
fn write_label(
    svg: &mut String,
    proj: &Projection,
    p: [f64; 3],
    (dx, dy): (f64, f64),
    anchor: &str,
    text: &str,
) -> Result<(), RenderError> {
    let (x, y) = proj.screen(p);
    writeln!(
        svg,
        r##"<text x="{:.1}" y="{:.1}" font-size="10" fill="#333" text-anchor="{anchor}">{}</text>"##,
        x + dx,
        y + dy,
        escape_xml(text)
    )?;
    Ok(())
}

fn write_marker_shape(
    svg: &mut String,
    role: MarkerRole,
    x: f64,
    y: f64,
    r: f64,
) -> Result<(), RenderError> {
    match role {
        // Diamond for the point on the surface
        MarkerRole::Model => writeln!(
            svg,
            r#"<polygon points="{:.2},{:.2} {:.2},{:.2} {:.2},{:.2} {:.2},{:.2}" fill="{}" stroke="black" stroke-width="2"/>"#,
            x,
            y - r,
            x + r,
            y,
            x,
            y + r,
            x - r,
            y,
            role.color()
        )?,
        MarkerRole::Market | MarkerRole::Projected => writeln!(
            svg,
            r#"<circle cx="{x:.2}" cy="{y:.2}" r="{r}" fill="{}" stroke="black" stroke-width="2"/>"#,
            role.color()
        )?,
    }
    Ok(())
}

fn write_legend(svg: &mut String, scene: &ChartScene<'_>) -> Result<(), RenderError> {
    let entries = scene.markers.len() + usize::from(scene.segment.is_some());
    if entries == 0 {
        return Ok(());
    }

    let (x, y) = (16.0, 52.0);
    let row = 18.0;
    writeln!(
        svg,
        r#"<rect x="{x}" y="{y}" width="200" height="{:.1}" fill="white" fill-opacity="0.8" stroke="black" stroke-width="1"/>"#,
        row * entries as f64 + 8.0
    )?;

    let mut cy = y + 4.0 + row / 2.0;
    if scene.segment.is_some() {
        writeln!(
            svg,
            r#"<line x1="{:.1}" y1="{cy:.1}" x2="{:.1}" y2="{cy:.1}" stroke="red" stroke-width="4"/>"#,
            x + 6.0,
            x + 22.0
        )?;
        writeln!(
            svg,
            r#"<text x="{:.1}" y="{cy:.1}" font-size="11" dominant-baseline="middle">Current vs Model</text>"#,
            x + 30.0
        )?;
        cy += row;
    }
    for marker in &scene.markers {
        write_marker_shape(svg, marker.role, x + 14.0, cy, 5.0)?;
        writeln!(
            svg,
            r#"<text x="{:.1}" y="{cy:.1}" font-size="11" dominant-baseline="middle">{}</text>"#,
            x + 30.0,
            escape_xml(&marker.name())
        )?;
        cy += row;
    }
    Ok(())
}
