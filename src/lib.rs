//! # scanthin
//!
//! Radius-based thinning of LiDAR point clouds.
//!
//! This is the umbrella crate that provides convenient access to all scanthin
//! functionality. You can use this crate to get everything in one place, or use
//! individual crates for more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: Points, point clouds, scans, poses, run parameters and errors
//! - **Algorithms**: KD-tree radius search, the spatial thinner, sensor range filtering
//! - **I/O**: KITTI scans, pose results and run config records
//!
//! ## Quick Start
//!
//! ```rust
//! use scanthin::prelude::*;
//!
//! let cloud = PointCloud::from_points(vec![
//!     Point3d::new(0.0, 0.0, 0.0),
//!     Point3d::new(0.05, 0.0, 0.0),
//!     Point3d::new(10.0, 0.0, 0.0),
//! ]);
//!
//! let thinned = decimate_all(&cloud, 0.1).unwrap();
//! assert_eq!(thinned.len(), 2);
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables core, algorithms and io
//! - `algorithms`: Spatial index and thinning
//! - `io`: File format support
//! - `cli`: Builds the `scanthin` binary

// Re-export core functionality
pub use scanthin_core::*;

// Re-export sub-crates
#[cfg(feature = "algorithms")]
pub use scanthin_algorithms as algorithms;

#[cfg(feature = "io")]
pub use scanthin_io as io;

/// Convenient imports for common use cases
pub mod prelude {
    pub use scanthin_core::*;

    #[cfg(feature = "algorithms")]
    pub use scanthin_algorithms::*;

    #[cfg(feature = "io")]
    pub use scanthin_io::{
        config_record_path, list_scans, read_point_cloud, read_poses, read_poses_file, read_scan,
        scan_number, scan_progress, write_config_record, write_point_cloud, write_poses, write_results,
        write_run_record, write_scan, IoError, KittiBin, ScanReader, ScanWriter,
    };
}
