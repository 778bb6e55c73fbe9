//! Optimum solvers over threshold-indexed curves.
//!
//! The selection engine only depends on the `OptimumSolver` trait; `SminSolver`
//! is the default implementation (minimum semantic distance).

use crate::domain::{Optimum, Point};

/// Turn a curve into its scalar optimum and the point/threshold achieving it.
///
/// Implementations must accept points in any order and return
/// `Optimum::UNDEFINED` (NaN value) when no meaningful optimum exists.
pub trait OptimumSolver: Sync {
    fn solve(&self, points: &[Point], thresholds: &[f64]) -> Optimum;
}

/// Minimum semantic distance: `min_tau sqrt(ru(tau)^2 + mi(tau)^2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SminSolver;

impl OptimumSolver for SminSolver {
    fn solve(&self, points: &[Point], thresholds: &[f64]) -> Optimum {
        let mut best = Optimum::UNDEFINED;

        for (p, &tau) in points.iter().zip(thresholds) {
            let d = semantic_distance(*p);
            if !d.is_finite() {
                continue;
            }
            // Strict `<` keeps the lowest-index point on ties.
            if best.value.is_nan() || d < best.value {
                best = Optimum {
                    value: d,
                    point: *p,
                    threshold: tau,
                };
            }
        }

        best
    }
}

/// Euclidean distance of a (ru, mi) point from the origin.
pub fn semantic_distance(p: Point) -> f64 {
    p.x.hypot(p.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(v: &[(f64, f64)]) -> Vec<Point> {
        v.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn picks_closest_point_to_origin() {
        let points = pts(&[(10.0, 1.0), (3.0, 4.0), (1.0, 9.0)]);
        let opt = SminSolver.solve(&points, &[0.1, 0.2, 0.3]);
        assert!((opt.value - 5.0).abs() < 1e-12);
        assert_eq!(opt.point, Point::new(3.0, 4.0));
        assert!((opt.threshold - 0.2).abs() < 1e-12);
    }

    #[test]
    fn order_of_points_does_not_matter() {
        let a = SminSolver.solve(&pts(&[(1.0, 9.0), (3.0, 4.0), (10.0, 1.0)]), &[0.3, 0.2, 0.1]);
        let b = SminSolver.solve(&pts(&[(10.0, 1.0), (1.0, 9.0), (3.0, 4.0)]), &[0.1, 0.3, 0.2]);
        assert_eq!(a, b);
    }

    #[test]
    fn ties_keep_first_point() {
        let opt = SminSolver.solve(&pts(&[(3.0, 4.0), (4.0, 3.0)]), &[0.4, 0.5]);
        assert_eq!(opt.point, Point::new(3.0, 4.0));
        assert!((opt.threshold - 0.4).abs() < 1e-12);
    }

    #[test]
    fn empty_curve_is_undefined() {
        let opt = SminSolver.solve(&[], &[]);
        assert!(!opt.is_defined());
        assert!(opt.point.x.is_nan());
    }

    #[test]
    fn non_finite_points_are_ignored() {
        let points = pts(&[(f64::NAN, 1.0), (f64::INFINITY, 0.0), (2.0, 0.0)]);
        let opt = SminSolver.solve(&points, &[0.1, 0.2, 0.3]);
        assert!((opt.value - 2.0).abs() < 1e-12);

        let only_nan = pts(&[(f64::NAN, f64::NAN)]);
        assert!(!SminSolver.solve(&only_nan, &[0.5]).is_defined());
    }
}
