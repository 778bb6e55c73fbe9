//! Pareto-frontier reduction of a curve ("smaller is better" on both axes).
//!
//! Not part of the ranking path; exposed as a standalone primitive and via
//! `pfp frontier`.

use crate::domain::Point;

/// `true` when `q` is strictly smaller than `p` in both coordinates.
pub fn dominates(q: Point, p: Point) -> bool {
    q.x < p.x && q.y < p.y
}

/// Keep only points not strictly dominated by another point.
///
/// Thresholds are filtered in lock-step. Points equal to a would-be dominator
/// are kept. Input order is preserved.
pub fn reduce(points: &[Point], thresholds: &[f64]) -> (Vec<Point>, Vec<f64>) {
    let mut kept_points = Vec::with_capacity(points.len());
    let mut kept_thresholds = Vec::with_capacity(thresholds.len());

    for (i, (&p, &tau)) in points.iter().zip(thresholds).enumerate() {
        let dominated = points
            .iter()
            .enumerate()
            .any(|(j, &q)| j != i && dominates(q, p));
        if !dominated {
            kept_points.push(p);
            kept_thresholds.push(tau);
        }
    }

    (kept_points, kept_thresholds)
}
