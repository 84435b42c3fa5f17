//! Sensor range filtering
//!
//! Scans are expressed in the sensor frame, so the range of a point is its
//! distance from the origin. Points outside `[min_range, max_range]` are not
//! considered for thinning.

use scanthin_core::{Error, Point3d, PointCloud, Result};
use std::collections::BTreeSet;

fn check_range(min_range: f64, max_range: f64) -> Result<()> {
    if !(min_range.is_finite() && min_range >= 0.0) {
        return Err(Error::InvalidArgument(format!(
            "min_range must be finite and non-negative, got {min_range}"
        )));
    }
    if max_range.is_nan() || max_range < min_range {
        return Err(Error::InvalidArgument(format!(
            "max_range ({max_range}) must not be below min_range ({min_range})"
        )));
    }
    Ok(())
}

/// Indices of points whose distance from the sensor lies in `[min_range, max_range]`.
///
/// The result is the candidate set handed to [`crate::decimate`] when thinning
/// a new scan.
///
/// # Example
/// ```rust
/// use scanthin_core::{PointCloud, Point3d};
/// use scanthin_algorithms::sensor_range_indices;
///
/// fn main() -> scanthin_core::Result<()> {
///     let cloud = PointCloud::from_points(vec![
///         Point3d::new(0.5, 0.0, 0.0),  // too close
///         Point3d::new(10.0, 0.0, 0.0),
///         Point3d::new(0.0, 200.0, 0.0), // too far
///     ]);
///
///     let candidates = sensor_range_indices(&cloud, 1.0, 100.0)?;
///     assert_eq!(candidates.into_iter().collect::<Vec<_>>(), vec![1]);
///     Ok(())
/// }
/// ```
pub fn sensor_range_indices(
    cloud: &PointCloud<Point3d>,
    min_range: f64,
    max_range: f64,
) -> Result<BTreeSet<usize>> {
    check_range(min_range, max_range)?;

    let min_sq = min_range * min_range;
    let max_sq = max_range * max_range;

    Ok(cloud
        .iter()
        .enumerate()
        .filter(|(_, p)| {
            let r_sq = p.coords.norm_squared();
            r_sq >= min_sq && r_sq <= max_sq
        })
        .map(|(idx, _)| idx)
        .collect())
}

/// Copy of `cloud` restricted to points within `[min_range, max_range]` of the sensor.
pub fn range_filter(cloud: &PointCloud<Point3d>, min_range: f64, max_range: f64) -> Result<PointCloud<Point3d>> {
    let indices = sensor_range_indices(cloud, min_range, max_range)?;
    Ok(cloud.select(indices))
}
