//! Heighway dragon curve.
//!
//! Every segment `a -> b` gains a midpoint pushed out by a right isosceles
//! triangle, `a + (b - a)(1 ± i)/2`. The side alternates from one segment
//! to the next, starting on the left.

use crate::curves::{require_segment, CurveRule};
use crate::error::Result;
use crate::geometry::Curve;
use num_complex::Complex64;

const LEFT: Complex64 = Complex64::new(0.5, 0.5);
const RIGHT: Complex64 = Complex64::new(0.5, -0.5);

#[derive(Debug, Clone, Copy, Default)]
pub struct DragonRule;

impl CurveRule for DragonRule {
    fn name(&self) -> &'static str {
        "dragon_curve"
    }

    fn growth_factor(&self) -> usize {
        2
    }

    fn refine(&self, curve: &Curve) -> Result<Curve> {
        require_segment(curve, self.name())?;

        let mut points = Vec::with_capacity(curve.segment_count() * 2 + 1);
        points.push(curve.points()[0]);
        for (i, (a, b)) in curve.segments().enumerate() {
            let turn = if i % 2 == 0 { LEFT } else { RIGHT };
            points.push(a + (b - a) * turn);
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
    fn first_orders_match_construction() {
        let rule = DragonRule;
        assert_eq!(
            rule.generate(1).unwrap().points(),
            &[c(0.0, 0.0), c(0.5, 0.5), c(1.0, 0.0)]
        );
        assert_eq!(
            rule.generate(2).unwrap().points(),
            &[c(0.0, 0.0), c(0.0, 0.5), c(0.5, 0.5), c(0.5, 0.0), c(1.0, 0.0)]
        );
    }

    #[test]
    fn order_three_has_nine_points() {
        let curve = DragonRule.generate(3).unwrap();
        assert_eq!(curve.len(), 9);
        assert_eq!(curve.first(), Some(c(0.0, 0.0)));
        assert_eq!(curve.last(), Some(c(1.0, 0.0)));
    }

    #[test]
    fn second_half_is_first_half_turned_a_quarter() {
        // p[N - j] = 1 + i * p[j]: the halves meet at a right angle.
        for order in 1..10 {
            let curve = DragonRule.generate(order).unwrap();
            let p = curve.points();
            let n = p.len() - 1;
            for j in 0..=n / 2 {
                let expected = c(1.0, 0.0) + Complex64::i() * p[j];
                assert!((p[n - j] - expected).norm() < 1e-12, "order {} index {}", order, j);
            }
        }
    }

    #[test]
    fn doubles_segments_per_order() {
        let mut curve = Curve::base_segment();
        for _ in 0..8 {
            let next = DragonRule.refine(&curve).unwrap();
            assert_eq!(next.segment_count(), curve.segment_count() * 2);
            curve = next;
        }
    }

    #[test]
    fn single_point_cannot_be_refined() {
        let curve = Curve::from_points(vec![c(0.0, 0.0)]);
        assert!(DragonRule.refine(&curve).unwrap_err().is_invalid_argument());
    }
}
