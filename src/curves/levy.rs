//! Lévy C curve.
//!
//! Each segment is replaced by the two legs of the right isosceles triangle
//! built on its left side.

use crate::curves::{require_segment, CurveRule};
use crate::error::Result;
use crate::geometry::Curve;
use num_complex::Complex64;

const APEX: Complex64 = Complex64::new(0.5, 0.5);

#[derive(Debug, Clone, Copy, Default)]
pub struct LevyRule;

impl CurveRule for LevyRule {
    fn name(&self) -> &'static str {
        "levy_curve"
    }

    fn growth_factor(&self) -> usize {
        2
    }

    fn refine(&self, curve: &Curve) -> Result<Curve> {
        require_segment(curve, self.name())?;

        let mut points = Vec::with_capacity(curve.segment_count() * 2 + 1);
        points.push(curve.points()[0]);
        for (a, b) in curve.segments() {
            points.push(a + (b - a) * APEX);
            points.push(b);
        }
        Ok(Curve::from_points(points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn c(re: f64, im: f64) -> Point {
        Complex64::new(re, im)
    }

    #[test]
    fn order_two_is_half_square() {
        assert_eq!(
            LevyRule.generate(2).unwrap().points(),
            &[c(0.0, 0.0), c(0.0, 0.5), c(0.5, 0.5), c(1.0, 0.5), c(1.0, 0.0)]
        );
    }

    #[test]
    fn symmetric_about_the_perpendicular_bisector() {
        for order in 1..10 {
            let curve = LevyRule.generate(order).unwrap();
            let p = curve.points();
            let n = p.len() - 1;
            for j in 0..=n {
                let mirrored = c(1.0, 0.0) - p[j].conj();
                assert!((p[n - j] - mirrored).norm() < 1e-12, "order {} index {}", order, j);
            }
        }
    }

    #[test]
    fn every_apex_is_on_the_left() {
        let base = Curve::base_segment();
        let next = LevyRule.refine(&base).unwrap();
        assert!(next.points()[1].im > 0.0);
    }

    #[test]
    fn empty_curve_is_invalid() {
        let err = LevyRule.refine(&Curve::from_points(Vec::new())).unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
