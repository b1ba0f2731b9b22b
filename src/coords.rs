//! Coordinate files.
//!
//! One file per (family, order): `<dir>/<family>/<family>_<order>.csv`,
//! two columns (real, imaginary), no header, rows ended by `\r`.

use crate::curves::CurveFamily;
use crate::error::{CurveError, Result};
use crate::geometry::{Curve, Point};
use std::path::{Path, PathBuf};

/// Directory holding every file for `family`.
pub fn family_dir(output_dir: &Path, family: CurveFamily) -> PathBuf {
    output_dir.join(family.name())
}

/// `<output_dir>/<family>/<family>_<order>.<extension>`
pub fn output_path(output_dir: &Path, family: CurveFamily, order: u32, extension: &str) -> PathBuf {
    family_dir(output_dir, family).join(format!("{}_{}.{}", family.name(), order, extension))
}

pub fn coordinate_path(output_dir: &Path, family: CurveFamily, order: u32) -> PathBuf {
    output_path(output_dir, family, order, "csv")
}

/// Write one `real,imaginary` row per point.
pub fn write_coordinates(path: &Path, curve: &Curve) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\r'))
        .from_path(path)?;

    for p in curve.points() {
        writer.write_record([p.re.to_string(), p.im.to_string()])?;
    }

    writer.flush()?;
    tracing::info!(path = %path.display(), points = curve.len(), "wrote coordinates");
    Ok(())
}

/// Read a coordinate file back into a curve.
pub fn read_coordinates(path: &Path) -> Result<Curve> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut points = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        if record.len() != 2 {
            return Err(CurveError::Parse {
                line,
                value: record.iter().collect::<Vec<_>>().join(","),
            });
        }
        let re = parse_field(&record[0], line)?;
        let im = parse_field(&record[1], line)?;
        points.push(Point::new(re, im));
    }

    Ok(Curve::from_points(points))
}

fn parse_field(field: &str, line: u64) -> Result<f64> {
    field.trim().parse().map_err(|_| CurveError::Parse {
        line,
        value: field.to_string(),
    })
}
