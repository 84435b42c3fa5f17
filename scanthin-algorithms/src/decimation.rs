//! Radius-based thinning of point sets
//!
//! Thinning visits candidate points in ascending index order ("scan order").
//! Each visited point that is still active is kept, and every other active
//! point within the radius of it is deactivated. The result is a maximal
//! subset whose members are pairwise farther apart than the radius.
//!
//! The spatial index is built once over the full point set and never updated;
//! the active set alone decides which points are still candidates.

use crate::nearest_neighbor::KdTree;
use scanthin_core::{Error, Params, Point3d, PointCloud, Result, SpatialIndex};
use std::collections::BTreeSet;

/// Membership mask over point indices, tracking which candidates may still be
/// kept or suppress others. Only ever shrinks.
struct ActiveSet {
    mask: Vec<bool>,
}

impl ActiveSet {
    fn new<'a>(len: usize, members: impl IntoIterator<Item = &'a usize>) -> Self {
        let mut mask = vec![false; len];
        for &i in members {
            mask[i] = true;
        }
        Self { mask }
    }

    fn contains(&self, index: usize) -> bool {
        self.mask.get(index).copied().unwrap_or(false)
    }

    /// Remove `index`, returning whether it was present.
    fn remove(&mut self, index: usize) -> bool {
        match self.mask.get_mut(index) {
            Some(active) => std::mem::replace(active, false),
            None => false,
        }
    }
}

/// Counts from one thinning pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecimationStats {
    /// Number of candidate indices considered
    pub candidates: usize,
    /// Number of points kept
    pub kept: usize,
    /// Number of candidates deactivated by a kept neighbor
    pub suppressed: usize,
}

fn validate(points: &PointCloud<Point3d>, candidate_indices: &BTreeSet<usize>, radius: f64) -> Result<()> {
    if !(radius.is_finite() && radius >= 0.0) {
        return Err(Error::InvalidArgument(format!(
            "radius must be finite and non-negative, got {radius}"
        )));
    }

    // Sorted set: only the largest index can be out of range.
    if let Some(&index) = candidate_indices.last() {
        if index >= points.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: points.len(),
            });
        }
    }

    Ok(())
}

/// Thin `points` so that kept candidates are pairwise farther apart than `radius`.
///
/// Candidates are visited in ascending index order and the output preserves that
/// order. The KD-tree is built over all of `points`, so neighbors outside
/// `candidate_indices` may be returned by queries; they are ignored.
///
/// At radius zero only exact duplicates collapse, keeping the lowest index.
///
/// # Errors
/// * `Error::InvalidArgument` if `radius` is negative or not finite
/// * `Error::IndexOutOfRange` if a candidate index is not a valid index into `points`
///
/// # Example
/// ```rust
/// use std::collections::BTreeSet;
/// use scanthin_core::{PointCloud, Point3d};
/// use scanthin_algorithms::decimate;
///
/// fn main() -> scanthin_core::Result<()> {
///     let cloud = PointCloud::from_points(vec![
///         Point3d::new(0.0, 0.0, 0.0),
///         Point3d::new(0.05, 0.0, 0.0),
///         Point3d::new(10.0, 0.0, 0.0),
///     ]);
///     let candidates: BTreeSet<usize> = (0..cloud.len()).collect();
///
///     let thinned = decimate(&cloud, &candidates, 0.1)?;
///     assert_eq!(thinned.len(), 2);
///     Ok(())
/// }
/// ```
pub fn decimate(
    points: &PointCloud<Point3d>,
    candidate_indices: &BTreeSet<usize>,
    radius: f64,
) -> Result<PointCloud<Point3d>> {
    validate(points, candidate_indices, radius)?;
    if candidate_indices.is_empty() {
        return Ok(PointCloud::new());
    }

    let index = KdTree::new(&points.points)?;
    let (output, _) = thin_pass(&index, points, candidate_indices, radius);
    Ok(output)
}

/// Thin every point of `points`; see [`decimate`].
pub fn decimate_all(points: &PointCloud<Point3d>, radius: f64) -> Result<PointCloud<Point3d>> {
    let candidates: BTreeSet<usize> = (0..points.len()).collect();
    decimate(points, &candidates, radius)
}

/// Same as [`decimate`], but queries a caller-supplied index instead of
/// building a KD-tree. `index` must have been built over exactly `points`.
///
/// Also returns the pass statistics.
pub fn decimate_with<S: SpatialIndex>(
    index: &S,
    points: &PointCloud<Point3d>,
    candidate_indices: &BTreeSet<usize>,
    radius: f64,
) -> Result<(PointCloud<Point3d>, DecimationStats)> {
    validate(points, candidate_indices, radius)?;
    if index.len() != points.len() {
        return Err(Error::InvalidArgument(format!(
            "spatial index holds {} points but the point set has {}",
            index.len(),
            points.len()
        )));
    }

    Ok(thin_pass(index, points, candidate_indices, radius))
}

fn thin_pass<S: SpatialIndex>(
    index: &S,
    points: &PointCloud<Point3d>,
    candidate_indices: &BTreeSet<usize>,
    radius: f64,
) -> (PointCloud<Point3d>, DecimationStats) {
    let mut active = ActiveSet::new(points.len(), candidate_indices);
    let mut output = PointCloud::new();
    let mut stats = DecimationStats {
        candidates: candidate_indices.len(),
        ..Default::default()
    };

    // Iterate the caller's set, not `active`: removals never disturb the visit order.
    for &i in candidate_indices {
        if !active.contains(i) {
            continue;
        }

        let center = points[i];
        output.push(center);
        stats.kept += 1;

        for (j, _) in index.radius_query(&center, radius) {
            if j != i && active.remove(j) {
                stats.suppressed += 1;
            }
        }
    }

    log::debug!(
        "thinned {} candidates to {} points at radius {} ({} suppressed)",
        stats.candidates,
        stats.kept,
        radius,
        stats.suppressed
    );

    (output, stats)
}

/// A thinning pass configured with one radius.
///
/// The scan pipeline uses two of these: one for new scans (`rNew`) and one for
/// the accumulated map (`rMap`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialThinner {
    radius: f64,
}

impl SpatialThinner {
    pub fn new(radius: f64) -> Result<Self> {
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(Error::InvalidArgument(format!(
                "radius must be finite and non-negative, got {radius}"
            )));
        }
        Ok(Self { radius })
    }

    /// Thinner for incoming scans
    pub fn for_new_scans(params: &Params) -> Result<Self> {
        Self::new(params.r_new)
    }

    /// Thinner for the accumulated map
    pub fn for_map(params: &Params) -> Result<Self> {
        Self::new(params.r_map)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn thin(&self, points: &PointCloud<Point3d>, candidate_indices: &BTreeSet<usize>) -> Result<PointCloud<Point3d>> {
        decimate(points, candidate_indices, self.radius)
    }

    pub fn thin_all(&self, points: &PointCloud<Point3d>) -> Result<PointCloud<Point3d>> {
        decimate_all(points, self.radius)
    }
}
