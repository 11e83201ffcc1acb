//! Which acini overlap.
//!
//! Two acini of equal radius `r` are neighbors when their centers are
//! strictly closer than `2r` and not coincident. The relation is symmetric
//! and ignores list order.

use crate::math::Point3;

/// Returns `true` if spheres of radius `radius` at `a` and `b` overlap.
#[must_use]
pub fn is_neighbor(a: &Point3, b: &Point3, radius: f64) -> bool {
    let d = (a - b).norm();
    d > 0.0 && d < 2.0 * radius
}

/// All centers in `centers` that overlap `candidate`, in list order.
///
/// `candidate` itself is skipped; duplicates of it count as coincident and
/// are skipped too.
#[must_use]
pub fn neighbors(candidate: &Point3, centers: &[Point3], radius: f64) -> Vec<Point3> {
    centers
        .iter()
        .filter(|c| is_neighbor(candidate, c, radius))
        .copied()
        .collect()
}

/// Indices of the centers overlapping `centers[index]`.
#[must_use]
pub fn neighbor_indices(index: usize, centers: &[Point3], radius: f64) -> Vec<usize> {
    let Some(candidate) = centers.get(index) else {
        return Vec::new();
    };
    centers
        .iter()
        .enumerate()
        .filter(|(_, c)| is_neighbor(candidate, c, radius))
        .map(|(i, _)| i)
        .collect()
}

/// Every overlapping pair `(i, j)` with `i < j`.
#[must_use]
pub fn overlapping_pairs(centers: &[Point3], radius: f64) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, a) in centers.iter().enumerate() {
        for (j, b) in centers.iter().enumerate().skip(i + 1) {
            if is_neighbor(a, b, radius) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}
