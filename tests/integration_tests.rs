//! Integration tests for scanthin
//!
//! These tests exercise the thinner through the umbrella crate, and the scan
//! pipeline end to end: scans on disk, sensor range filtering, thinning with
//! both configured radii, and result writing.

use scanthin::prelude::*;
use std::collections::BTreeSet;
use std::fs;

fn cloud(coords: &[[f64; 3]]) -> PointCloud<Point3d> {
    coords.iter().map(|&[x, y, z]| Point3d::new(x, y, z)).collect()
}

fn all_indices(cloud: &PointCloud<Point3d>) -> BTreeSet<usize> {
    (0..cloud.len()).collect()
}

/// A jittered grid with spacing `step`, deterministic and free of duplicates
fn jittered_grid(n: usize, step: f64) -> PointCloud<Point3d> {
    let mut points = Vec::with_capacity(n * n * n);
    let mut k = 0u32;
    for i in 0..n {
        for j in 0..n {
            for l in 0..n {
                let jitter = (k as f64 * 0.618_033_988_7).fract() * 0.1 * step;
                points.push(Point3d::new(
                    i as f64 * step + jitter,
                    j as f64 * step - jitter,
                    l as f64 * step + 0.5 * jitter,
                ));
                k += 1;
            }
        }
    }
    PointCloud::from_points(points)
}

fn params(dir: &std::path::Path) -> Params {
    Params {
        path: dir.join("scans").display().to_string(),
        sigma: 0.3,
        r_map: 1.5,
        r_new: 0.5,
        convergence_tolerance: 1e-6,
        max_sensor_range: 50.0,
        min_sensor_range: 1.0,
        output_file_name: dir.join("poses.txt").display().to_string(),
        verbose: false,
    }
}

#[test]
fn test_nearby_point_suppressed_by_lower_index() {
    let points = cloud(&[[0.0, 0.0, 0.0], [0.05, 0.0, 0.0], [10.0, 0.0, 0.0]]);
    let thinned = decimate(&points, &all_indices(&points), 0.1).unwrap();
    assert_eq!(thinned, cloud(&[[0.0, 0.0, 0.0], [10.0, 0.0, 0.0]]));
}

#[test]
fn test_zero_radius_keeps_input_except_duplicates() {
    let distinct = cloud(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    assert_eq!(decimate_all(&distinct, 0.0).unwrap(), distinct);

    let with_duplicates = cloud(&[[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 0.0]]);
    assert_eq!(
        decimate_all(&with_duplicates, 0.0).unwrap(),
        cloud(&[[1.0, 0.0, 0.0], [0.0, 0.0, 0.0]])
    );
}

#[test]
fn test_empty_candidates_give_empty_output() {
    let points = jittered_grid(3, 1.0);
    assert!(decimate(&points, &BTreeSet::new(), 0.5).unwrap().is_empty());
}

#[test]
fn test_radius_larger_than_extent_keeps_first_point() {
    let points = jittered_grid(4, 1.0);
    let thinned = decimate_all(&points, 1000.0).unwrap();
    assert_eq!(thinned.points, vec![points[0]]);
}

#[test]
fn test_grid_thinning_spacing_and_idempotence() {
    let points = jittered_grid(12, 0.2);
    let radius = 0.45;

    let thinned = decimate_all(&points, radius).unwrap();
    assert!(thinned.len() < points.len());
    assert!(!thinned.is_empty());

    for (a, p) in thinned.iter().enumerate() {
        for q in thinned.iter().skip(a + 1) {
            assert!(squared_distance(p, q) > radius * radius);
        }
    }

    assert_eq!(decimate_all(&thinned, radius).unwrap(), thinned);
}

#[test]
fn test_kdtree_and_brute_force_thin_identically() {
    let points = jittered_grid(8, 0.3);
    let candidates: BTreeSet<usize> = (0..points.len()).filter(|i| i % 3 != 0).collect();

    let brute = BruteForceSearch::new(&points.points);
    let (expected, stats) = decimate_with(&brute, &points, &candidates, 0.7).unwrap();

    assert_eq!(decimate(&points, &candidates, 0.7).unwrap(), expected);
    assert_eq!(stats.candidates, candidates.len());
    assert_eq!(stats.kept, expected.len());
    assert!(stats.kept + stats.suppressed <= stats.candidates);
}

#[test]
fn test_errors_leave_no_output() {
    let points = jittered_grid(2, 1.0);
    assert!(matches!(decimate_all(&points, -1.0), Err(Error::InvalidArgument(_))));

    let candidates: BTreeSet<usize> = [0, points.len()].into_iter().collect();
    assert!(matches!(
        decimate(&points, &candidates, 1.0),
        Err(Error::IndexOutOfRange { .. })
    ));
}

#[test]
fn test_prelude_error_types_convert() {
    let dir = tempfile::tempdir().unwrap();
    let missing: Error = IoError::FileNotFound {
        path: dir.path().join("missing.bin").display().to_string(),
    }
    .into();
    assert!(matches!(missing, Error::InvalidData(_)));

    let result: Result<Scan> = read_scan(dir.path().join("missing.bin"));
    assert!(matches!(result, Err(Error::InvalidData(_))));
}

#[test]
fn test_scan_pipeline_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let params = params(dir.path());
    params.validate().unwrap();

    let scan_dir = dir.path().join("scans");
    fs::create_dir(&scan_dir).unwrap();

    // Two scans around the sensor, shifted so none of the grid sits at the origin.
    for (frame, offset) in [(10u32, 2.0), (9, 3.0)] {
        let mut scan_cloud = jittered_grid(6, 0.25);
        scan_cloud.transform(&Pose::new(0.0, 0.0, 0.0, offset, offset, 0.0));
        scan_cloud.push(Point3d::new(0.1, 0.0, 0.0)); // inside min range
        scan_cloud.push(Point3d::new(80.0, 0.0, 0.0)); // beyond max range
        write_scan(&Scan::from(&scan_cloud), scan_dir.join(format!("{frame:06}.bin"))).unwrap();
    }

    let scans = list_scans(&params.path).unwrap();
    assert_eq!(scans.len(), 2);
    assert!(scans[0].ends_with("000009.bin"));

    let new_scans = SpatialThinner::for_new_scans(&params).unwrap();
    let map_thinner = SpatialThinner::for_map(&params).unwrap();

    let mut map = PointCloud::new();
    for path in &scans {
        let scan_cloud = read_point_cloud(path).unwrap();
        let candidates =
            sensor_range_indices(&scan_cloud, params.min_sensor_range, params.max_sensor_range).unwrap();
        assert_eq!(candidates.len(), scan_cloud.len() - 2);

        let thinned = new_scans.thin(&scan_cloud, &candidates).unwrap();
        assert!(thinned.len() < candidates.len());
        assert!(thinned.iter().all(|p| p.coords.norm() >= params.min_sensor_range));
        map.extend(thinned);
    }

    let map_thinned = map_thinner.thin_all(&map).unwrap();
    assert!(map_thinned.len() < map.len());

    let poses = vec![Pose::identity(), Pose::new(0.0, 0.0, 0.1, 1.0, 0.0, 0.0)];
    let config = write_results(&params, &poses, &params.output_file_name, 1.25).unwrap();

    let written = read_poses_file(&params.output_file_name).unwrap();
    assert_eq!(written.len(), 2);
    approx::assert_relative_eq!(written[1].yaw, 0.1, epsilon = 1e-12);

    let record = fs::read_to_string(config).unwrap();
    assert!(record.contains("avg time per scan [ms] : 1.25"));
    assert!(record.contains("rMap [m]               = 1.5"));
}
