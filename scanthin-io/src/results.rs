//! Pose results and the run config record
//!
//! Poses are written one per line as the upper 3x4 block of their homogeneous
//! transform, row-major and space-separated:
//! `R00 R01 R02 Tx R10 R11 R12 Ty R20 R21 R22 Tz`. A sibling file named
//! `<results>_config` records when the run finished, its average time per scan,
//! and the parameters it ran with.

use crate::error::IoError;
use scanthin_core::{Params, Pose, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Write one line per pose.
pub fn write_poses<W: Write>(writer: &mut W, poses: &[Pose]) -> Result<()> {
    for pose in poses {
        // `+ 0.0` turns -0 into 0, so axis-aligned rotations print cleanly.
        let fields: Vec<String> = pose
            .to_row_major_3x4()
            .iter()
            .map(|v| (v + 0.0).to_string())
            .collect();
        writeln!(writer, "{}", fields.join(" "))?;
    }
    Ok(())
}

/// Parse poses written by [`write_poses`]. Blank lines are ignored.
pub fn read_poses<R: BufRead>(reader: R) -> Result<Vec<Pose>> {
    let mut poses = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let values = line
            .split_whitespace()
            .map(|field| {
                field.parse::<f64>().map_err(|e| IoError::ParseError {
                    message: format!("line {}: invalid number {:?}: {}", line_no + 1, field, e),
                })
            })
            .collect::<std::result::Result<Vec<f64>, IoError>>()?;

        let values: [f64; 12] = values.as_slice().try_into().map_err(|_| IoError::ParseError {
            message: format!("line {}: expected 12 fields, found {}", line_no + 1, values.len()),
        })?;
        poses.push(Pose::from_row_major_3x4(&values));
    }

    Ok(poses)
}

/// Read a pose results file
pub fn read_poses_file<P: AsRef<Path>>(path: P) -> Result<Vec<Pose>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => IoError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => IoError::Io(e),
    })?;
    read_poses(BufReader::new(file))
}

/// Write the run config record.
pub fn write_config_record<W: Write>(
    writer: &mut W,
    params: &Params,
    output_config_file_name: &str,
    avg_time_per_scan_ms: f64,
    finished_at: SystemTime,
) -> Result<()> {
    let finished = finished_at
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    writeln!(writer, "computation finished at : {finished}")?;
    writeln!(writer, "avg time per scan [ms] : {avg_time_per_scan_ms}")?;
    writeln!(writer)?;
    write!(writer, "{}", params.summary(true))?;
    writeln!(writer, "{:<22} = {}", "outputConfigFileName", output_config_file_name)?;
    Ok(())
}

/// Path of the config record that accompanies `output_path`.
pub fn config_record_path(output_path: &Path) -> PathBuf {
    let mut name = output_path.as_os_str().to_owned();
    name.push("_config");
    PathBuf::from(name)
}

/// Write `poses` to `output_path` and the config record next to it.
///
/// Returns the path of the config record.
pub fn write_results<P: AsRef<Path>>(
    params: &Params,
    poses: &[Pose],
    output_path: P,
    avg_time_per_scan_ms: f64,
) -> Result<PathBuf> {
    let output_path = output_path.as_ref();

    let mut writer = BufWriter::new(File::create(output_path)?);
    write_poses(&mut writer, poses)?;
    writer.flush()?;

    let config_path = config_record_path(output_path);
    write_run_record(params, &config_path, avg_time_per_scan_ms)?;

    log::info!("wrote {} poses to {}", poses.len(), output_path.display());
    Ok(config_path)
}

/// Write only the config record, for runs that produce no poses.
pub fn write_run_record<P: AsRef<Path>>(params: &Params, config_path: P, avg_time_per_scan_ms: f64) -> Result<()> {
    let config_path = config_path.as_ref();
    let mut writer = BufWriter::new(File::create(config_path)?);
    write_config_record(
        &mut writer,
        params,
        &config_path.display().to_string(),
        avg_time_per_scan_ms,
        SystemTime::now(),
    )?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::fs;
    use std::io::Cursor;
    use std::time::Duration;

    fn params() -> Params {
        Params {
            path: "/data/seq00".to_string(),
            sigma: 0.3,
            r_map: 2.0,
            r_new: 0.5,
            convergence_tolerance: 1e-6,
            max_sensor_range: 80.0,
            min_sensor_range: 5.0,
            output_file_name: "poses.txt".to_string(),
            verbose: false,
        }
    }

    #[test]
    fn test_identity_pose_line() {
        let mut out = Vec::new();
        write_poses(&mut out, &[Pose::new(0.0, 0.0, 0.0, 1.5, -2.0, 3.0)]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1 0 0 1.5 0 1 0 -2 0 0 1 3\n");
    }

    #[test]
    fn test_poses_read_back() {
        let poses = vec![
            Pose::identity(),
            Pose::new(0.05, -0.1, 1.2, 10.0, 0.5, -0.25),
        ];
        let mut out = Vec::new();
        write_poses(&mut out, &poses).unwrap();

        let back = read_poses(Cursor::new(out)).unwrap();
        assert_eq!(back.len(), 2);
        for (a, b) in poses.iter().zip(&back) {
            assert_relative_eq!(a.to_homogeneous(), b.to_homogeneous(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_read_rejects_short_line() {
        let err = read_poses(Cursor::new("1 0 0 0 0 1 0 0 0 0 1\n")).unwrap_err();
        assert!(err.to_string().contains("expected 12 fields"));
    }

    #[test]
    fn test_read_rejects_bad_number() {
        let err = read_poses(Cursor::new("\n1 0 0 x 0 1 0 0 0 0 1 0\n")).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_read_poses_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_poses_file(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, scanthin_core::Error::InvalidData(_)));
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_read_poses_file_on_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_poses_file(dir.path()).unwrap_err();
        assert!(matches!(err, scanthin_core::Error::Io(_)));
        assert!(!err.to_string().contains("File not found"));
    }

    #[test]
    fn test_config_record_layout() {
        let mut out = Vec::new();
        write_config_record(
            &mut out,
            &params(),
            "poses.txt_config",
            12.5,
            UNIX_EPOCH + Duration::from_secs(1_700_000_000),
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "computation finished at : 1700000000");
        assert_eq!(lines[1], "avg time per scan [ms] : 12.5");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "scansFolderPath        = \"/data/seq00\"");
        assert_eq!(lines.last().copied(), Some("outputConfigFileName   = poses.txt_config"));
        assert_eq!(lines.len(), 12);
    }

    #[test]
    fn test_write_results_creates_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("poses.txt");

        let config = write_results(&params(), &[Pose::identity(), Pose::identity()], &output, 3.0).unwrap();

        assert_eq!(config, dir.path().join("poses.txt_config"));
        assert_eq!(fs::read_to_string(&output).unwrap().lines().count(), 2);
        assert!(fs::read_to_string(&config).unwrap().contains("rNew [m]               = 0.5"));
        assert_eq!(read_poses_file(&output).unwrap().len(), 2);
    }
}
