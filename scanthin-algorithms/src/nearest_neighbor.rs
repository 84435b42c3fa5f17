//! Spatial index implementations

use kiddo::float::distance::SquaredEuclidean;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use scanthin_core::{squared_distance, Error, Point3d, PointCoords, Result, SpatialIndex};

/// Leaf bucket size used by [`KdTree::new`].
pub const DEFAULT_BUCKET_SIZE: usize = 32;

/// KD-tree for radius queries over a fixed point set.
///
/// Built on kiddo's `ImmutableKdTree`, constructed once from the full point
/// set and never modified afterwards. `B` is the leaf bucket size; it tunes
/// performance only and never changes query results.
///
/// The tree stores `u32` items mapping back to positions in the source points,
/// so at most `u32::MAX` points can be indexed.
pub struct KdTree<const B: usize = DEFAULT_BUCKET_SIZE> {
    tree: ImmutableKdTree<f64, u32, 3, B>,
    coords: Vec<[f64; 3]>,
}

impl KdTree {
    /// Build a tree with the default bucket size.
    pub fn new<P: PointCoords>(points: &[P]) -> Result<Self> {
        Self::build(points)
    }
}

impl<const B: usize> KdTree<B> {
    /// Build a tree with bucket size `B`.
    pub fn build<P: PointCoords>(points: &[P]) -> Result<Self> {
        if points.len() > u32::MAX as usize {
            return Err(Error::InvalidArgument(format!(
                "cannot index {} points, the limit is {}",
                points.len(),
                u32::MAX
            )));
        }

        let coords: Vec<[f64; 3]> = points.iter().map(PointCoords::to_array).collect();
        let tree = ImmutableKdTree::new_from_slice(&coords);

        Ok(Self { tree, coords })
    }
}

impl<const B: usize> SpatialIndex for KdTree<B> {
    fn radius_query(&self, center: &Point3d, radius: f64) -> Vec<(usize, f64)> {
        let query = center.to_array();
        if self.coords.is_empty()
            || !(radius.is_finite() && radius >= 0.0)
            || !query.iter().all(|v| v.is_finite())
        {
            return Vec::new();
        }

        let radius_sq = radius * radius;

        // kiddo's `within_unsorted` is strict `<`. Widen the query slightly so
        // points on the boundary (and coincident points at radius zero) are
        // returned, then filter on the exact distance.
        let query_radius_sq = radius_sq * (1.0 + 1e-9) + f64::EPSILON;

        self.tree
            .within_unsorted::<SquaredEuclidean>(&query, query_radius_sq)
            .into_iter()
            .filter_map(|nn| {
                let index = nn.item as usize;
                let [x, y, z] = self.coords[index];
                let d2 = squared_distance(center, &Point3d::new(x, y, z));
                (d2 <= radius_sq).then_some((index, d2))
            })
            .collect()
    }

    fn len(&self) -> usize {
        self.coords.len()
    }
}

/// Simple brute force search for small datasets and for checking the KD-tree
pub struct BruteForceSearch {
    points: Vec<Point3d>,
}

impl BruteForceSearch {
    pub fn new<P: PointCoords>(points: &[P]) -> Self {
        Self {
            points: points
                .iter()
                .map(|p| {
                    let [x, y, z] = p.to_array();
                    Point3d::new(x, y, z)
                })
                .collect(),
        }
    }
}

impl SpatialIndex for BruteForceSearch {
    fn radius_query(&self, center: &Point3d, radius: f64) -> Vec<(usize, f64)> {
        if !(radius.is_finite() && radius >= 0.0) {
            return Vec::new();
        }

        let radius_sq = radius * radius;
        self.points
            .iter()
            .enumerate()
            .filter_map(|(idx, point)| {
                let d2 = squared_distance(center, point);
                (d2 <= radius_sq).then_some((idx, d2))
            })
            .collect()
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}
