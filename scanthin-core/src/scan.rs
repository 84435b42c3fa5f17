//! Raw scans in structure-of-arrays layout, as they come off disk.

use crate::error::{Error, Result};
use crate::point::Point3d;
use crate::point_cloud::PointCloud;
use serde::{Deserialize, Serialize};

/// A single LiDAR scan stored as three parallel coordinate arrays.
///
/// The arrays always have equal lengths; deserialization goes through
/// [`Scan::from_xyz`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScan")]
pub struct Scan {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
}

#[derive(Deserialize)]
struct RawScan {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
}

impl TryFrom<RawScan> for Scan {
    type Error = Error;

    fn try_from(raw: RawScan) -> Result<Self> {
        Scan::from_xyz(raw.x, raw.y, raw.z)
    }
}

impl Scan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
            z: Vec::with_capacity(capacity),
        }
    }

    /// Build a scan from parallel arrays, which must have equal lengths.
    pub fn from_xyz(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() || x.len() != z.len() {
            return Err(Error::InvalidData(format!(
                "coordinate arrays differ in length: x={}, y={}, z={}",
                x.len(),
                y.len(),
                z.len()
            )));
        }
        Ok(Self { x, y, z })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn push(&mut self, point: &Point3d) {
        self.x.push(point.x);
        self.y.push(point.y);
        self.z.push(point.z);
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn z(&self) -> &[f64] {
        &self.z
    }

    /// Points in scan order
    pub fn iter(&self) -> impl Iterator<Item = Point3d> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .map(|((&x, &y), &z)| Point3d::new(x, y, z))
    }

    pub fn point(&self, index: usize) -> Option<Point3d> {
        Some(Point3d::new(
            *self.x.get(index)?,
            *self.y.get(index)?,
            *self.z.get(index)?,
        ))
    }

    /// Convert into an array-of-structs point cloud, preserving order.
    pub fn to_point_cloud(&self) -> PointCloud<Point3d> {
        self.iter().collect()
    }
}

impl From<&PointCloud<Point3d>> for Scan {
    fn from(cloud: &PointCloud<Point3d>) -> Self {
        let mut scan = Scan::with_capacity(cloud.len());
        for point in cloud {
            scan.push(point);
        }
        scan
    }
}

impl From<&Scan> for PointCloud<Point3d> {
    fn from(scan: &Scan) -> Self {
        scan.to_point_cloud()
    }
}
