//! Core traits for scanthin

use crate::point::Point3d;

/// A read-only spatial index over a fixed point set.
///
/// Indices returned by queries refer to positions in the point set the index
/// was built from. Implementations must be deterministic: identical contents
/// and query parameters always produce the same set of matches.
pub trait SpatialIndex {
    /// Find every indexed point whose Euclidean distance to `center` is at
    /// most `radius`.
    ///
    /// Returns `(index, squared_distance)` pairs in unspecified order. The
    /// point at `center` itself is included when it is indexed, for any
    /// `radius >= 0`. A negative or non-finite radius matches nothing.
    fn radius_query(&self, center: &Point3d, radius: f64) -> Vec<(usize, f64)>;

    /// Number of indexed points
    fn len(&self) -> usize;

    /// Whether the index holds no points
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
