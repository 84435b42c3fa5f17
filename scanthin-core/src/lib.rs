//! Core data structures and traits for scanthin
//! 
//! This crate provides the fundamental types shared by the thinning engine and
//! its collaborators: points, point clouds, raw scans, poses, run parameters,
//! errors, and the spatial index trait.

pub mod point;
pub mod point_cloud;
pub mod scan;
pub mod traits;
pub mod transform;
pub mod config;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use scan::*;
pub use traits::*;
pub use transform::*;
pub use config::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Matrix3, Matrix4, Isometry3};
