//! I/O operations for scanthin
//! 
//! This crate reads and writes KITTI velodyne scans, writes pose results with
//! their run config record, and provides the progress bar used while
//! processing a scan sequence.

pub mod kitti;
pub mod results;
pub mod progress;
pub mod error;

pub use error::*;
pub use kitti::{KittiBin, list_scans, read_scan, scan_number, write_scan};
pub use results::{
    config_record_path, read_poses, read_poses_file, write_config_record, write_poses,
    write_results, write_run_record,
};
pub use progress::scan_progress;

use scanthin_core::{Point3d, PointCloud, Result, Scan};
use std::path::Path;

/// Trait for reading scans from files
pub trait ScanReader {
    fn read_scan<P: AsRef<Path>>(path: P) -> Result<Scan>;
}

/// Trait for writing scans to files
pub trait ScanWriter {
    fn write_scan<P: AsRef<Path>>(scan: &Scan, path: P) -> Result<()>;
}

/// Auto-detect format and read a scan as a point cloud
pub fn read_point_cloud<P: AsRef<Path>>(path: P) -> Result<PointCloud<Point3d>> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("bin") => Ok(KittiBin::read_scan(path)?.to_point_cloud()),
        _ => Err(IoError::InvalidFormat {
            format: format!("Unsupported scan format: {:?}", path.extension()),
        }
        .into()),
    }
}

/// Auto-detect format and write a point cloud as a scan
pub fn write_point_cloud<P: AsRef<Path>>(cloud: &PointCloud<Point3d>, path: P) -> Result<()> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("bin") => KittiBin::write_scan(&Scan::from(cloud), path),
        _ => Err(IoError::InvalidFormat {
            format: format!("Unsupported scan format: {:?}", path.extension()),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_cloud_roundtrip_through_bin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("000001.bin");
        let cloud = PointCloud::from_points(vec![
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(1.0, 2.0, 3.0),
        ]);

        write_point_cloud(&cloud, &path).unwrap();
        assert_eq!(read_point_cloud(&path).unwrap(), cloud);
    }

    #[test]
    fn test_unsupported_extension() {
        let cloud = PointCloud::new();
        assert!(write_point_cloud(&cloud, "cloud.ply").is_err());
        assert!(read_point_cloud("cloud.ply").is_err());
    }
}
