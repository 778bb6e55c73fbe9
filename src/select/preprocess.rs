//! Curve preprocessing applied before any optimum computation.

use crate::domain::Curve;

/// Remove every point whose threshold is exactly `0.00`.
///
/// At tau = 0 every term is predicted, which yields a degenerate point with
/// huge misinformation. Points and thresholds are dropped in lock-step; all
/// other fields are copied unchanged.
pub fn strip_null_threshold(curve: &Curve) -> Curve {
    let (points, thresholds) = curve
        .points
        .iter()
        .zip(&curve.thresholds)
        .filter(|&(_, &tau)| tau != 0.0)
        .map(|(&p, &tau)| (p, tau))
        .unzip();

    Curve {
        id: curve.id.clone(),
        points,
        thresholds,
        coverage: curve.coverage,
        covered_count: curve.covered_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Point;
    use proptest::prelude::*;

    fn curve(points: &[(f64, f64)], thresholds: &[f64]) -> Curve {
        Curve {
            id: "M1".to_string(),
            points: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            thresholds: thresholds.to_vec(),
            coverage: 0.8,
            covered_count: 40,
        }
    }

    #[test]
    fn removes_only_the_zero_threshold_point() {
        let c = curve(&[(100.0, 100.0), (3.0, 2.0), (4.0, 1.0)], &[0.0, 0.01, 0.02]);
        let out = strip_null_threshold(&c);
        assert_eq!(out.points, vec![Point::new(3.0, 2.0), Point::new(4.0, 1.0)]);
        assert_eq!(out.thresholds, vec![0.01, 0.02]);
        assert_eq!(out.coverage, c.coverage);
        assert_eq!(out.covered_count, c.covered_count);
    }

    #[test]
    fn curve_without_zero_threshold_is_unchanged() {
        let c = curve(&[(3.0, 2.0), (4.0, 1.0)], &[0.5, 0.6]);
        assert_eq!(strip_null_threshold(&c), c);
    }

    #[test]
    fn zero_threshold_anywhere_is_removed() {
        let c = curve(&[(3.0, 2.0), (9.0, 9.0), (4.0, 1.0)], &[0.5, 0.0, 0.6]);
        let out = strip_null_threshold(&c);
        assert_eq!(out.thresholds, vec![0.5, 0.6]);
        assert_eq!(out.points, vec![Point::new(3.0, 2.0), Point::new(4.0, 1.0)]);
    }

    proptest! {
        #[test]
        fn prop_stripping_is_idempotent(
            raw in prop::collection::vec((0.0f64..50.0, 0.0f64..50.0, 0u8..5), 0..30)
        ) {
            let points: Vec<(f64, f64)> = raw.iter().map(|&(x, y, _)| (x, y)).collect();
            // Roughly one in five thresholds lands on exactly zero.
            let taus: Vec<f64> = raw.iter().map(|&(_, _, t)| f64::from(t) * 0.25).collect();
            let c = curve(&points, &taus);
            let once = strip_null_threshold(&c);
            let twice = strip_null_threshold(&once);
            prop_assert_eq!(&once, &twice);
            prop_assert_eq!(once.points.len(), once.thresholds.len());
            prop_assert!(once.thresholds.iter().all(|&t| t != 0.0));
        }
    }
}
