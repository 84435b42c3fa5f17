//! # scanthin Algorithms
//!
//! Spatial indexing and point cloud thinning.
//!
//! The centrepiece is [`decimate`], which reduces a point set to a subset whose
//! members are pairwise farther apart than a given radius, visiting points in
//! scan order. It is backed by the KD-tree in [`nearest_neighbor`].

pub mod decimation;
pub mod filtering;
pub mod nearest_neighbor;

// Re-export commonly used items
pub use decimation::*;
pub use filtering::*;
pub use nearest_neighbor::*;
