//! Sierpinski arrowhead curve.
//!
//! A segment `a -> b` becomes three half-length segments that bend by 60°
//! around the side of an equilateral triangle. The bend side alternates
//! along the curve, and the side of the first segment flips with each
//! order, which keeps every order inside the triangle standing on the base
//! segment. Order `n` has `3^n` segments, so the order, and with it the
//! starting side, can be read back from the segment count.

use crate::curves::{require_segment, CurveRule};
use crate::error::{CurveError, Result};
use crate::geometry::Curve;
use num_complex::Complex64;

const SQRT_3_OVER_2: f64 = 0.866_025_403_784_438_6;

/// `e^{iπ/3}` and its conjugate.
const TURN_LEFT: Complex64 = Complex64::new(0.5, SQRT_3_OVER_2);
const TURN_RIGHT: Complex64 = Complex64::new(0.5, -SQRT_3_OVER_2);

#[derive(Debug, Clone, Copy, Default)]
pub struct SierpinskiRule;

impl SierpinskiRule {
    /// Order of a curve with `segments` segments, if it is a power of three.
    pub fn order_of(segments: usize) -> Option<u32> {
        if segments == 0 {
            return None;
        }
        let mut remaining = segments;
        let mut order = 0;
        while remaining % 3 == 0 {
            remaining /= 3;
            order += 1;
        }
        (remaining == 1).then_some(order)
    }
}

impl CurveRule for SierpinskiRule {
    fn name(&self) -> &'static str {
        "sierpinski_triangle"
    }

    fn growth_factor(&self) -> usize {
        3
    }

    fn refine(&self, curve: &Curve) -> Result<Curve> {
        require_segment(curve, self.name())?;
        let order = Self::order_of(curve.segment_count()).ok_or_else(|| {
            CurveError::invalid(format!(
                "{} segments is not a power of three, not an arrowhead curve",
                curve.segment_count()
            ))
        })?;

        let mut points = Vec::with_capacity(curve.segment_count() * 3 + 1);
        points.push(curve.points()[0]);
        let even_order = order % 2 == 0;
        for (i, (a, b)) in curve.segments().enumerate() {
            let turn = if (i % 2 == 0) == even_order {
                TURN_LEFT
            } else {
                TURN_RIGHT
            };
            let half = (b - a) * 0.5;
            let p1 = a + half * turn;
            let p2 = p1 + half;
            points.push(p1);
            points.push(p2);
            points.push(b);
        }
        Ok(Curve::from_points(points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn inside_base_triangle(p: Point) -> bool {
        let eps = 1e-9;
        let slope = 3f64.sqrt();
        p.im >= -eps && p.im <= slope * p.re + eps && p.im <= slope * (1.0 - p.re) + eps
    }

    #[test]
    fn order_one_is_a_trapezoid() {
        let curve = SierpinskiRule.generate(1).unwrap();
        assert_eq!(curve.len(), 4);
        let p = curve.points();
        assert!((p[1] - Complex64::new(0.25, SQRT_3_OVER_2 / 2.0)).norm() < 1e-12);
        assert!((p[2] - Complex64::new(0.75, SQRT_3_OVER_2 / 2.0)).norm() < 1e-12);
        assert_eq!(p[3], Complex64::new(1.0, 0.0));
    }

    #[test]
    fn every_order_stays_in_the_base_triangle() {
        for order in 0..8 {
            let curve = SierpinskiRule.generate(order).unwrap();
            assert!(curve.points().iter().all(|p| inside_base_triangle(*p)), "order {}", order);
        }
    }

    #[test]
    fn symmetric_about_the_perpendicular_bisector() {
        for order in 1..7 {
            let curve = SierpinskiRule.generate(order).unwrap();
            let p = curve.points();
            let n = p.len() - 1;
            for j in 0..=n {
                let mirrored = Complex64::new(1.0, 0.0) - p[j].conj();
                assert!((p[n - j] - mirrored).norm() < 1e-9, "order {} index {}", order, j);
            }
        }
    }

    #[test]
    fn order_is_recovered_from_segment_count() {
        assert_eq!(SierpinskiRule::order_of(1), Some(0));
        assert_eq!(SierpinskiRule::order_of(27), Some(3));
        assert_eq!(SierpinskiRule::order_of(0), None);
        assert_eq!(SierpinskiRule::order_of(6), None);
    }

    #[test]
    fn rejects_curves_that_are_not_arrowheads() {
        let curve = Curve::from_points(vec![
            Complex64::new(0.0, 0.0),
            Complex64::new(0.5, 0.0),
            Complex64::new(1.0, 0.0),
        ]);
        assert!(SierpinskiRule.refine(&curve).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn triples_segments_per_order() {
        for order in 0..6u32 {
            let curve = SierpinskiRule.generate(order as i64).unwrap();
            assert_eq!(curve.len(), 3usize.pow(order) + 1);
        }
    }
}
