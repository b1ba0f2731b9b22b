//! Fixed (non-animated) display of a generated curve.
//!
//! A curve can be drawn on a caller's surface or on a fresh SVG canvas,
//! saved as a coordinate file, and described by a JSON sidecar.

use crate::coords::{family_dir, output_path, write_coordinates};
use crate::curves::{validate_order, CurveFamily};
use crate::error::{CurveError, Result};
use crate::geometry::{Curve, ViewBounds};
use crate::render::{scaled_stroke_width, Figure, Surface, SvgStyle, SvgSurface};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Create `path` and its parents; an existing directory is success.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

#[derive(Debug, Clone)]
pub struct DisplayOptions {
    /// Draw the curve.
    pub plot: bool,
    /// Write the coordinate file.
    pub save: bool,
    /// Write a JSON description next to the other outputs.
    pub save_metadata: bool,
    /// Root of the per-family output directories.
    pub output_dir: PathBuf,
    /// Canvas size used when no target surface is given.
    pub width: u32,
    pub height: u32,
    pub style: SvgStyle,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            plot: true,
            save: false,
            save_metadata: false,
            output_dir: PathBuf::from("output"),
            width: 1000,
            height: 700,
            style: SvgStyle::default(),
        }
    }
}

/// What a display call produced.
#[derive(Debug, Clone)]
pub struct DisplayReport {
    pub family: CurveFamily,
    pub order: u32,
    pub points: usize,
    pub stroke_width: f64,
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Serialize)]
struct CurveMetadata<'a> {
    family: CurveFamily,
    name: &'a str,
    order: u32,
    points: usize,
    segments: usize,
    bounds: ViewBounds,
    extent: Option<ViewBounds>,
    stroke_width: f64,
}

/// Generate `family` at `order` and plot and/or save it.
///
/// When `target` is `None` and plotting is requested, the curve is drawn on
/// a new SVG canvas written to `<output>/<family>/<family>_<order>.svg`.
/// The drawn stroke width is `stroke_width / ln(point_count)`.
pub fn fixed_display(
    family: CurveFamily,
    order: i64,
    bounds: ViewBounds,
    stroke_width: f64,
    target: Option<&mut dyn Surface>,
    options: &DisplayOptions,
) -> Result<DisplayReport> {
    let curve = family.generate(order)?;
    let order = validate_order(order)?;
    let scaled = scaled_stroke_width(stroke_width, curve.len());
    let mut files = Vec::new();

    tracing::info!(
        curve = family.name(),
        order,
        points = curve.len(),
        "generated curve"
    );

    let writes_files =
        options.save || options.save_metadata || (options.plot && target.is_none());
    if writes_files {
        ensure_dir(&family_dir(&options.output_dir, family))?;
    }

    if options.plot {
        match target {
            Some(surface) => draw(surface, &curve, bounds, scaled)?,
            None => {
                let mut surface = SvgSurface::new(options.width, options.height)
                    .with_style(options.style.clone());
                surface.set_title(format!("{} (order {})", family.display_name(), order));
                draw(&mut surface, &curve, bounds, scaled)?;
                let path = output_path(&options.output_dir, family, order, "svg");
                surface.save(&path)?;
                files.push(path);
            }
        }
    }

    if options.save {
        let path = output_path(&options.output_dir, family, order, "csv");
        write_coordinates(&path, &curve)?;
        files.push(path);
    }

    if options.save_metadata {
        let metadata = CurveMetadata {
            family,
            name: family.name(),
            order,
            points: curve.len(),
            segments: curve.segment_count(),
            bounds,
            extent: curve.bounding_box(),
            stroke_width: scaled,
        };
        let path = output_path(&options.output_dir, family, order, "json");
        fs::write(&path, serde_json::to_string_pretty(&metadata)?)?;
        tracing::info!(path = %path.display(), "wrote metadata");
        files.push(path);
    }

    Ok(DisplayReport {
        family,
        order,
        points: curve.len(),
        stroke_width: scaled,
        files,
    })
}

fn draw(
    surface: &mut dyn Surface,
    curve: &Curve,
    bounds: ViewBounds,
    stroke_width: f64,
) -> Result<()> {
    surface.plot(curve, stroke_width)?;
    surface.set_equal_aspect(true);
    surface.set_bounds(bounds);
    Ok(())
}

/// One panel per `(family, order)` in a two-column figure, saved to `path`.
pub fn gallery(
    entries: &[(CurveFamily, i64)],
    stroke_width: f64,
    path: &Path,
    options: &DisplayOptions,
) -> Result<Vec<DisplayReport>> {
    if entries.is_empty() {
        return Err(CurveError::invalid("gallery needs at least one curve"));
    }

    let cols = 2;
    let rows = entries.len().div_ceil(cols);
    let mut figure = Figure::new(
        rows,
        cols,
        options.width,
        options.height,
        options.style.clone(),
    );

    let mut reports = Vec::with_capacity(entries.len());
    for (panel, &(family, order)) in figure.panels_mut().zip(entries) {
        panel.set_title(format!("{} (order {})", family.display_name(), order));
        let report = fixed_display(
            family,
            order,
            family.default_bounds(),
            stroke_width,
            Some(panel as &mut dyn Surface),
            options,
        )?;
        reports.push(report);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    figure.save(path)?;
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::read_coordinates;
    use tempfile::TempDir;

    fn options(dir: &Path) -> DisplayOptions {
        DisplayOptions {
            output_dir: dir.to_path_buf(),
            width: 200,
            height: 140,
            ..DisplayOptions::default()
        }
    }

    #[test]
    fn ensure_dir_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("dragon_curve");
        ensure_dir(&target).unwrap();
        ensure_dir(&target).unwrap();
        assert!(target.is_dir());
    }

    #[test]
    fn plots_onto_given_surface_without_writing() {
        let dir = TempDir::new().unwrap();
        let mut surface = SvgSurface::new(100, 100);
        let report = fixed_display(
            CurveFamily::Dragon,
            4,
            CurveFamily::Dragon.default_bounds(),
            2.0,
            Some(&mut surface as &mut dyn Surface),
            &options(dir.path()),
        )
        .unwrap();

        assert_eq!(report.points, 17);
        assert!((report.stroke_width - 2.0 / 17f64.ln()).abs() < 1e-12);
        assert!(report.files.is_empty());
        assert_eq!(surface.curve_count(), 1);
        assert!(!dir.path().join("dragon_curve").exists());
    }

    #[test]
    fn saves_svg_and_coordinates() {
        let dir = TempDir::new().unwrap();
        let opts = DisplayOptions {
            save: true,
            ..options(dir.path())
        };
        let report = fixed_display(
            CurveFamily::Levy,
            5,
            CurveFamily::Levy.default_bounds(),
            3.0,
            None,
            &opts,
        )
        .unwrap();

        let svg = dir.path().join("levy_curve/levy_curve_5.svg");
        let csv = dir.path().join("levy_curve/levy_curve_5.csv");
        assert_eq!(report.files, vec![svg.clone(), csv.clone()]);
        assert!(fs::read_to_string(&svg).unwrap().contains("<path"));
        assert_eq!(read_coordinates(&csv).unwrap(), CurveFamily::Levy.generate(5).unwrap());

        // a second save into the existing directory succeeds
        let bounds = CurveFamily::Levy.default_bounds();
        fixed_display(CurveFamily::Levy, 5, bounds, 3.0, None, &opts).unwrap();
    }

    #[test]
    fn metadata_describes_the_curve() {
        let dir = TempDir::new().unwrap();
        let opts = DisplayOptions {
            plot: false,
            save_metadata: true,
            ..options(dir.path())
        };
        let report = fixed_display(
            CurveFamily::Sierpinski,
            2,
            CurveFamily::Sierpinski.default_bounds(),
            2.0,
            None,
            &opts,
        )
        .unwrap();

        assert_eq!(report.files.len(), 1);
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&report.files[0]).unwrap()).unwrap();
        assert_eq!(json["family"], "sierpinski");
        assert_eq!(json["name"], "sierpinski_triangle");
        assert_eq!(json["points"], 10);
        assert_eq!(json["segments"], 9);
    }

    #[test]
    fn negative_order_fails_before_touching_disk() {
        let dir = TempDir::new().unwrap();
        let opts = DisplayOptions {
            save: true,
            ..options(dir.path())
        };
        let bounds = CurveFamily::Dragon.default_bounds();
        let err = fixed_display(CurveFamily::Dragon, -3, bounds, 2.0, None, &opts).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(!dir.path().join("dragon_curve").exists());
    }

    #[test]
    fn gallery_writes_one_figure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("figures/gallery.svg");
        let entries: Vec<(CurveFamily, i64)> =
            CurveFamily::all().into_iter().map(|f| (f, 4)).collect();
        let reports = gallery(&entries, 2.0, &path, &options(dir.path())).unwrap();

        assert_eq!(reports.len(), 3);
        let svg = fs::read_to_string(&path).unwrap();
        assert_eq!(svg.matches("<path").count(), 3);
        assert!(gallery(&[], 2.0, &path, &options(dir.path())).is_err());
    }
}
