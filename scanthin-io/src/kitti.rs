//! KITTI velodyne scan files
//!
//! Each scan is a flat little-endian array of `f32` quadruples
//! `x y z intensity`. Scans in a sequence are named by their frame number
//! (`000000.bin`, `000001.bin`, ...) and must be processed in numeric order.

use crate::error::IoError;
use crate::{ScanReader, ScanWriter};
use scanthin_core::{Point3d, Result, Scan};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Bytes per point record
const RECORD_SIZE: usize = 16;

/// Reader and writer for KITTI `.bin` scans
pub struct KittiBin;

impl KittiBin {
    /// Decode a scan from raw `.bin` bytes. Intensity is dropped.
    pub fn decode(bytes: &[u8]) -> Result<Scan> {
        if bytes.len() % RECORD_SIZE != 0 {
            return Err(IoError::InvalidFormat {
                format: format!(
                    "KITTI scan length {} is not a multiple of {} bytes",
                    bytes.len(),
                    RECORD_SIZE
                ),
            }
            .into());
        }

        let mut scan = Scan::with_capacity(bytes.len() / RECORD_SIZE);
        for record in bytes.chunks_exact(RECORD_SIZE) {
            let field = |i: usize| {
                let mut buf = [0u8; 4];
                buf.copy_from_slice(&record[i * 4..i * 4 + 4]);
                f32::from_le_bytes(buf) as f64
            };
            scan.push(&Point3d::new(field(0), field(1), field(2)));
        }
        Ok(scan)
    }

    /// Encode a scan as `.bin` bytes with zero intensity.
    pub fn encode(scan: &Scan) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(scan.len() * RECORD_SIZE);
        for point in scan.iter() {
            bytes.extend_from_slice(&(point.x as f32).to_le_bytes());
            bytes.extend_from_slice(&(point.y as f32).to_le_bytes());
            bytes.extend_from_slice(&(point.z as f32).to_le_bytes());
            bytes.extend_from_slice(&0f32.to_le_bytes());
        }
        bytes
    }
}

impl ScanReader for KittiBin {
    fn read_scan<P: AsRef<Path>>(path: P) -> Result<Scan> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IoError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let mut bytes = Vec::new();
        BufReader::new(File::open(path)?).read_to_end(&mut bytes)?;
        Self::decode(&bytes)
    }
}

impl ScanWriter for KittiBin {
    fn write_scan<P: AsRef<Path>>(scan: &Scan, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(&Self::encode(scan))?;
        writer.flush()?;
        Ok(())
    }
}

/// Read a KITTI `.bin` scan
pub fn read_scan<P: AsRef<Path>>(path: P) -> Result<Scan> {
    KittiBin::read_scan(path)
}

/// Write a KITTI `.bin` scan
pub fn write_scan<P: AsRef<Path>>(scan: &Scan, path: P) -> Result<()> {
    KittiBin::write_scan(scan, path)
}

/// Frame number encoded in a scan's file stem, e.g. `42` for `000042.bin`.
pub fn scan_number(path: &Path) -> Option<u64> {
    path.file_stem()?.to_str()?.parse().ok()
}

/// List the `.bin` scans in `dir`, sorted by frame number.
///
/// Files whose stem is not a frame number are skipped.
pub fn list_scans<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(IoError::FileNotFound {
            path: dir.display().to_string(),
        }
        .into());
    }

    let mut scans = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("bin") {
            continue;
        }
        match scan_number(&path) {
            Some(n) => scans.push((n, path)),
            None => log::warn!("skipping {}: file name is not a frame number", path.display()),
        }
    }

    scans.sort();
    log::info!("found {} scans in {}", scans.len(), dir.display());
    Ok(scans.into_iter().map(|(_, path)| path).collect())
}
