//! Points, curves and view bounds in the complex plane.
//!
//! A point is a `Complex64` whose real part is x and imaginary part is y.
//! A curve is an ordered polyline of such points.

use crate::error::{CurveError, Result};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

pub type Point = Complex64;

/// An ordered sequence of points; adjacent points are joined by a segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    points: Vec<Point>,
}

impl Curve {
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// The order-0 curve shared by every family: `(0,0) -> (1,0)`.
    pub fn base_segment() -> Self {
        Self {
            points: vec![Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
        }
    }

    /// Build a curve from separate x and y columns.
    pub fn from_xy(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(CurveError::invalid(format!(
                "coordinate columns differ in length ({} x, {} y)",
                xs.len(),
                ys.len()
            )));
        }
        let points = xs
            .iter()
            .zip(ys)
            .map(|(&x, &y)| Complex64::new(x, y))
            .collect();
        Ok(Self { points })
    }

    /// Split into real (x) and imaginary (y) columns.
    pub fn to_xy(&self) -> (Vec<f64>, Vec<f64>) {
        self.points.iter().map(|p| (p.re, p.im)).unzip()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Consecutive `(start, end)` pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Smallest axis-aligned box containing every point.
    pub fn bounding_box(&self) -> Option<ViewBounds> {
        let first = self.points.first()?;
        let init = ViewBounds::new((first.re, first.re), (first.im, first.im));
        Some(self.points.iter().fold(init, |b, p| ViewBounds {
            x: (b.x.0.min(p.re), b.x.1.max(p.re)),
            y: (b.y.0.min(p.im), b.y.1.max(p.im)),
        }))
    }
}

/// Axis limits `((min_x, max_x), (min_y, max_y))`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBounds {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl ViewBounds {
    pub const fn new(x: (f64, f64), y: (f64, f64)) -> Self {
        Self { x, y }
    }

    pub fn width(&self) -> f64 {
        self.x.1 - self.x.0
    }

    pub fn height(&self) -> f64 {
        self.y.1 - self.y.0
    }

    pub fn contains(&self, p: Point) -> bool {
        p.re >= self.x.0 && p.re <= self.x.1 && p.im >= self.y.0 && p.im <= self.y.1
    }

    /// Grow the shorter side about its centre so that `width / height`
    /// equals `aspect`. Mirrors an equal-aspect axis that adjusts its limits.
    pub fn with_aspect(&self, aspect: f64) -> Self {
        let (w, h) = (self.width(), self.height());
        if w <= 0.0 || h <= 0.0 || aspect <= 0.0 {
            return *self;
        }
        if w / h < aspect {
            let new_w = h * aspect;
            let cx = (self.x.0 + self.x.1) / 2.0;
            Self::new((cx - new_w / 2.0, cx + new_w / 2.0), self.y)
        } else {
            let new_h = w / aspect;
            let cy = (self.y.0 + self.y.1) / 2.0;
            Self::new(self.x, (cy - new_h / 2.0, cy + new_h / 2.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_segment_is_unit_interval() {
        let base = Curve::base_segment();
        assert_eq!(
            base.points(),
            &[Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)]
        );
        assert_eq!(base.segment_count(), 1);
    }

    #[test]
    fn xy_columns_round_trip() {
        let curve = Curve::from_points(vec![
            Complex64::new(0.0, 0.0),
            Complex64::new(0.5, 0.5),
            Complex64::new(1.0, 0.0),
        ]);
        let (xs, ys) = curve.to_xy();
        assert_eq!(xs, vec![0.0, 0.5, 1.0]);
        assert_eq!(ys, vec![0.0, 0.5, 0.0]);
        assert_eq!(Curve::from_xy(&xs, &ys).unwrap(), curve);
    }

    #[test]
    fn mismatched_columns_are_rejected() {
        let err = Curve::from_xy(&[0.0, 1.0], &[0.0]).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn bounding_box_covers_points() {
        let curve = Curve::from_points(vec![
            Complex64::new(0.0, 0.0),
            Complex64::new(-0.5, 0.25),
            Complex64::new(1.0, -1.0),
        ]);
        let bounds = curve.bounding_box().unwrap();
        assert_eq!(bounds, ViewBounds::new((-0.5, 1.0), (-1.0, 0.25)));
        assert!(Curve::from_points(Vec::new()).bounding_box().is_none());
    }

    #[test]
    fn aspect_widens_the_short_side() {
        let square = ViewBounds::new((0.0, 1.0), (0.0, 1.0));
        let wide = square.with_aspect(2.0);
        assert_eq!(wide.y, (0.0, 1.0));
        assert!((wide.width() - 2.0).abs() < 1e-12);
        assert!((wide.x.0 + 0.5).abs() < 1e-12);

        let tall = square.with_aspect(0.5);
        assert_eq!(tall.x, (0.0, 1.0));
        assert!((tall.height() - 2.0).abs() < 1e-12);
    }
}
