//! Six-parameter rigid poses and their homogeneous transform form
//!
//! Rotations follow the roll-pitch-yaw convention applied as `Rz(yaw) * Ry(pitch) * Rx(roll)`.

use crate::point::{Point3d, Vector3d};
use nalgebra::{Isometry3, Matrix4, Rotation3, Translation3, UnitQuaternion};
use serde::{Deserialize, Serialize};

/// A rigid pose given as three rotation angles (radians) and a translation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Pose {
    pub fn new(roll: f64, pitch: f64, yaw: f64, x: f64, y: f64, z: f64) -> Self {
        Self { roll, pitch, yaw, x, y, z }
    }

    /// The identity pose
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn translation(&self) -> Vector3d {
        Vector3d::new(self.x, self.y, self.z)
    }

    /// Build the 4x4 homogeneous transform for this pose.
    pub fn to_homogeneous(&self) -> Matrix4<f64> {
        let (sr, cr) = self.roll.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        let (sy, cy) = self.yaw.sin_cos();

        Matrix4::new(
            cy * cp, cy * sp * sr - sy * cr, cy * sp * cr + sy * sr, self.x,
            sy * cp, sy * sp * sr + cy * cr, sy * sp * cr - cy * sr, self.y,
            -sp,     cp * sr,                cp * cr,                self.z,
            0.0,     0.0,                    0.0,                    1.0,
        )
    }

    /// Decompose a homogeneous transform back into pose parameters.
    ///
    /// Pitch is recovered with `asin`, so it lies in `[-pi/2, pi/2]`.
    pub fn from_homogeneous(t: &Matrix4<f64>) -> Self {
        Self {
            roll: t[(2, 1)].atan2(t[(2, 2)]),
            pitch: (-t[(2, 0)]).clamp(-1.0, 1.0).asin(),
            yaw: t[(1, 0)].atan2(t[(0, 0)]),
            x: t[(0, 3)],
            y: t[(1, 3)],
            z: t[(2, 3)],
        }
    }

    pub fn to_isometry(&self) -> Isometry3<f64> {
        let rotation = Rotation3::from_euler_angles(self.roll, self.pitch, self.yaw);
        Isometry3::from_parts(
            Translation3::new(self.x, self.y, self.z),
            UnitQuaternion::from_rotation_matrix(&rotation),
        )
    }

    /// Apply the pose to a point
    pub fn transform_point(&self, point: &Point3d) -> Point3d {
        self.to_isometry().transform_point(point)
    }

    /// The upper 3x4 block of the homogeneous transform in row-major order:
    /// `R00 R01 R02 Tx R10 R11 R12 Ty R20 R21 R22 Tz`.
    pub fn to_row_major_3x4(&self) -> [f64; 12] {
        let t = self.to_homogeneous();
        let mut out = [0.0; 12];
        for row in 0..3 {
            for col in 0..4 {
                out[row * 4 + col] = t[(row, col)];
            }
        }
        out
    }

    /// Inverse of [`Pose::to_row_major_3x4`].
    pub fn from_row_major_3x4(values: &[f64; 12]) -> Self {
        let mut t = Matrix4::identity();
        for row in 0..3 {
            for col in 0..4 {
                t[(row, col)] = values[row * 4 + col];
            }
        }
        Self::from_homogeneous(&t)
    }
}

impl From<&Pose> for Matrix4<f64> {
    fn from(pose: &Pose) -> Self {
        pose.to_homogeneous()
    }
}
