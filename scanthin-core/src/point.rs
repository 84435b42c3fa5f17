//! Point types and related functionality

use nalgebra::{Point3, Vector3};

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// Access to the raw `[x, y, z]` coordinates of a point, used when feeding
/// points into spatial indices that store plain arrays.
pub trait PointCoords {
    fn to_array(&self) -> [f64; 3];
}

impl PointCoords for Point3d {
    fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl PointCoords for [f64; 3] {
    fn to_array(&self) -> [f64; 3] {
        *self
    }
}

/// Squared Euclidean distance between two points.
pub fn squared_distance(a: &Point3d, b: &Point3d) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    dx * dx + dy * dy + dz * dz
}
