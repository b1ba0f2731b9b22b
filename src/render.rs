//! SVG rendering surfaces.
//!
//! A [`Surface`] accepts polylines together with axis limits and an
//! equal-aspect flag. [`SvgSurface`] keeps what was plotted and lays it out
//! when serialized, so limits may be set before or after plotting.
//! [`Figure`] arranges several surfaces in a grid inside one document.

use crate::error::Result;
use crate::geometry::{Curve, ViewBounds};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Stroke widths are given in points of a 10-inch-wide figure.
const POINTS_ACROSS_DEFAULT_FIGURE: f64 = 720.0;

/// Anything a curve can be drawn on.
pub trait Surface {
    /// Axis limits `((min_x, max_x), (min_y, max_y))`.
    fn set_bounds(&mut self, bounds: ViewBounds);

    /// Keep one unit in x as long as one unit in y.
    fn set_equal_aspect(&mut self, equal: bool);

    /// Draw `curve` as a connected polyline.
    fn plot(&mut self, curve: &Curve, stroke_width: f64) -> Result<()>;
}

/// Stroke width thinned by the log of the point count so dense curves stay
/// legible.
pub fn scaled_stroke_width(base: f64, point_count: usize) -> f64 {
    base / (point_count.max(2) as f64).ln()
}

#[derive(Debug, Clone)]
pub struct SvgStyle {
    pub background: String,
    pub stroke_color: String,
    pub frame_color: String,
}

impl Default for SvgStyle {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            stroke_color: "#1f77b4".to_string(),
            frame_color: "#333333".to_string(),
        }
    }
}

pub struct SvgSurface {
    pub width: u32,
    pub height: u32,
    pub style: SvgStyle,
    title: Option<String>,
    bounds: Option<ViewBounds>,
    equal_aspect: bool,
    curves: Vec<(Curve, f64)>,
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self::new(1000, 700)
    }
}

impl SvgSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            style: SvgStyle::default(),
            title: None,
            bounds: None,
            equal_aspect: false,
            curves: Vec::new(),
        }
    }

    pub fn with_style(mut self, style: SvgStyle) -> Self {
        self.style = style;
        self
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Number of curves plotted so far.
    pub fn curve_count(&self) -> usize {
        self.curves.len()
    }

    /// Scale factor from points to pixels.
    fn scale(&self) -> f64 {
        self.width as f64 / POINTS_ACROSS_DEFAULT_FIGURE
    }

    /// Limits actually used for layout: explicit bounds, or the plotted
    /// data with a small margin, widened for equal aspect if requested.
    pub fn view(&self) -> ViewBounds {
        let view = self.bounds.unwrap_or_else(|| self.data_bounds());
        if self.equal_aspect && self.height > 0 {
            view.with_aspect(self.width as f64 / self.height as f64)
        } else {
            view
        }
    }

    fn data_bounds(&self) -> ViewBounds {
        let boxes: Vec<ViewBounds> = self
            .curves
            .iter()
            .filter_map(|(curve, _)| curve.bounding_box())
            .collect();
        let Some(first) = boxes.first() else {
            return ViewBounds::new((0.0, 1.0), (0.0, 1.0));
        };
        let b = boxes.iter().fold(*first, |acc, b| {
            ViewBounds::new(
                (acc.x.0.min(b.x.0), acc.x.1.max(b.x.1)),
                (acc.y.0.min(b.y.0), acc.y.1.max(b.y.1)),
            )
        });
        let mx = (b.width() * 0.05).max(1e-6);
        let my = (b.height() * 0.05).max(1e-6);
        ViewBounds::new((b.x.0 - mx, b.x.1 + mx), (b.y.0 - my, b.y.1 + my))
    }

    /// Map a world coordinate to canvas pixels, y pointing down.
    pub fn to_canvas(&self, view: &ViewBounds, x: f64, y: f64) -> (f64, f64) {
        let px = (x - view.x.0) / view.width() * self.width as f64;
        let py = self.height as f64 - (y - view.y.0) / view.height() * self.height as f64;
        (px, py)
    }

    fn polyline(&self, view: &ViewBounds, curve: &Curve, stroke_width: f64) -> String {
        if curve.len() < 2 {
            return String::new();
        }

        let mut d = String::with_capacity(curve.len() * 16);
        for (i, p) in curve.points().iter().enumerate() {
            let (x, y) = self.to_canvas(view, p.re, p.im);
            let cmd = if i == 0 { 'M' } else { 'L' };
            let _ = write!(d, "{}{:.2} {:.2} ", cmd, x, y);
        }

        format!(
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{:.3}" stroke-linejoin="round" stroke-linecap="round"/>"#,
            d.trim_end(),
            self.style.stroke_color,
            stroke_width * self.scale()
        )
    }

    /// This surface as a nested `<svg>` element placed at `(x, y)`.
    pub fn fragment(&self, x: u32, y: u32) -> String {
        let view = self.view();
        let mut body = String::new();
        let _ = writeln!(
            body,
            r#"<rect width="100%" height="100%" fill="{}" stroke="{}" stroke-width="1"/>"#,
            self.style.background, self.style.frame_color
        );
        for (curve, stroke_width) in &self.curves {
            body.push_str(&self.polyline(&view, curve, *stroke_width));
            body.push('\n');
        }
        if let Some(title) = &self.title {
            let _ = writeln!(
                body,
                r#"<text x="{:.1}" y="20" text-anchor="middle" font-family="sans-serif" font-size="14">{}</text>"#,
                self.width as f64 / 2.0,
                escape_xml(title)
            );
        }

        format!(
            r#"<svg x="{}" y="{}" width="{}" height="{}" viewBox="0 0 {} {}" overflow="hidden">
{}</svg>"#,
            x, y, self.width, self.height, self.width, self.height, body
        )
    }

    pub fn to_svg(&self) -> String {
        wrap_svg(self.width, self.height, &self.fragment(0, 0))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_svg())?;
        tracing::info!(path = %path.display(), curves = self.curves.len(), "wrote svg");
        Ok(())
    }
}

impl Surface for SvgSurface {
    fn set_bounds(&mut self, bounds: ViewBounds) {
        self.bounds = Some(bounds);
    }

    fn set_equal_aspect(&mut self, equal: bool) {
        self.equal_aspect = equal;
    }

    fn plot(&mut self, curve: &Curve, stroke_width: f64) -> Result<()> {
        self.curves.push((curve.clone(), stroke_width));
        Ok(())
    }
}

/// A grid of surfaces rendered into one SVG document.
pub struct Figure {
    pub rows: usize,
    pub cols: usize,
    panel_width: u32,
    panel_height: u32,
    panels: Vec<SvgSurface>,
}

impl Figure {
    pub fn new(rows: usize, cols: usize, width: u32, height: u32, style: SvgStyle) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let panel_width = width / cols as u32;
        let panel_height = height / rows as u32;
        let panels = (0..rows * cols)
            .map(|_| SvgSurface::new(panel_width, panel_height).with_style(style.clone()))
            .collect();
        Self {
            rows,
            cols,
            panel_width,
            panel_height,
            panels,
        }
    }

    pub fn panel_mut(&mut self, row: usize, col: usize) -> Option<&mut SvgSurface> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.panels.get_mut(row * self.cols + col)
    }

    /// Panels in row-major order.
    pub fn panels_mut(&mut self) -> impl Iterator<Item = &mut SvgSurface> {
        self.panels.iter_mut()
    }

    pub fn to_svg(&self) -> String {
        let content = self
            .panels
            .iter()
            .enumerate()
            .map(|(i, panel)| {
                let x = (i % self.cols) as u32 * self.panel_width;
                let y = (i / self.cols) as u32 * self.panel_height;
                panel.fragment(x, y)
            })
            .collect::<Vec<_>>()
            .join("\n");
        wrap_svg(
            self.panel_width * self.cols as u32,
            self.panel_height * self.rows as u32,
            &content,
        )
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_svg())?;
        tracing::info!(path = %path.display(), panels = self.panels.len(), "wrote figure");
        Ok(())
    }
}

fn wrap_svg(width: u32, height: u32, content: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}">
{}
</svg>"#,
        width, height, width, height, content
    )
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::CurveFamily;

    #[test]
    fn stroke_width_thins_with_point_count() {
        let base = 3.0;
        assert!((scaled_stroke_width(base, 2) - 3.0 / 2f64.ln()).abs() < 1e-12);
        assert!(scaled_stroke_width(base, 1025) < scaled_stroke_width(base, 9));
        // single points use the two-point width instead of dividing by zero
        assert_eq!(scaled_stroke_width(base, 1), scaled_stroke_width(base, 2));
    }

    #[test]
    fn bounds_map_to_canvas_corners() {
        let mut surface = SvgSurface::new(200, 100);
        surface.set_bounds(ViewBounds::new((0.0, 2.0), (0.0, 1.0)));
        let view = surface.view();
        assert_eq!(surface.to_canvas(&view, 0.0, 0.0), (0.0, 100.0));
        assert_eq!(surface.to_canvas(&view, 2.0, 1.0), (200.0, 0.0));
    }

    #[test]
    fn equal_aspect_widens_view_to_canvas_ratio() {
        let mut surface = SvgSurface::new(200, 100);
        surface.set_bounds(ViewBounds::new((0.0, 1.0), (0.0, 1.0)));
        surface.set_equal_aspect(true);
        let view = surface.view();
        assert!((view.width() / view.height() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn plotted_curve_becomes_a_path() {
        let mut surface = SvgSurface::new(100, 100);
        surface.set_bounds(ViewBounds::new((0.0, 1.0), (0.0, 1.0)));
        surface.plot(&Curve::base_segment(), 1.0).unwrap();
        let svg = surface.to_svg();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"d="M0.00 100.00 L100.00 100.00""#));
        assert_eq!(svg.matches("<path").count(), 1);
    }

    #[test]
    fn figure_places_panels_in_a_grid() {
        let mut figure = Figure::new(2, 2, 400, 300, SvgStyle::default());
        for (panel, family) in figure.panels_mut().zip(CurveFamily::all()) {
            panel.set_title(family.display_name());
            panel.plot(&family.generate(3).unwrap(), 1.0).unwrap();
        }
        assert!(figure.panel_mut(2, 0).is_none());
        let svg = figure.to_svg();
        assert_eq!(svg.matches("<path").count(), 3);
        assert!(svg.contains(r#"<svg x="200" y="150""#));
        assert!(svg.contains("Lévy C curve"));
    }
}
