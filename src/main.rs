//! `scanthin`: thin every scan of a KITTI sequence with the new-scan radius.
//!
//! Thinned scans are written as `<outputFileName>/<frame>.bin`, and a run record
//! as `<outputFileName>_config`.

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use scanthin_algorithms::{sensor_range_indices, SpatialThinner};
use scanthin_core::{Params, Scan};
use scanthin_io::{config_record_path, list_scans, read_scan, scan_progress, write_run_record, write_scan};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "scanthin", version, about = "Radius-based thinning of LiDAR scan sequences")]
struct Args {
    /// Directory holding the scans (`<frame>.bin`)
    #[arg(long)]
    path: String,

    #[arg(long)]
    sigma: f64,

    /// Map thinning radius [m]
    #[arg(long = "rMap")]
    r_map: f64,

    /// New scan thinning radius [m]
    #[arg(long = "rNew")]
    r_new: f64,

    #[arg(long = "convergenceTolerance")]
    convergence_tolerance: f64,

    /// Points farther from the sensor are dropped [m]
    #[arg(long = "maxSensorRange")]
    max_sensor_range: f64,

    /// Points closer to the sensor are dropped [m]
    #[arg(long = "minSensorRange")]
    min_sensor_range: f64,

    /// Output directory for thinned scans; the run record goes next to it
    #[arg(long = "outputFileName")]
    output_file_name: String,

    #[arg(long)]
    verbose: bool,
}

impl From<Args> for Params {
    fn from(args: Args) -> Self {
        Params {
            path: args.path,
            sigma: args.sigma,
            r_map: args.r_map,
            r_new: args.r_new,
            convergence_tolerance: args.convergence_tolerance,
            max_sensor_range: args.max_sensor_range,
            min_sensor_range: args.min_sensor_range,
            output_file_name: args.output_file_name,
            verbose: args.verbose,
        }
    }
}

struct ScanOutcome {
    points_in: usize,
    points_out: usize,
    elapsed_ms: f64,
}

fn thin_scan(thinner: &SpatialThinner, params: &Params, scan_path: &Path, out_dir: &Path) -> Result<ScanOutcome> {
    let scan = read_scan(scan_path).with_context(|| format!("reading {}", scan_path.display()))?;
    let cloud = scan.to_point_cloud();

    let start = Instant::now();
    let candidates = sensor_range_indices(&cloud, params.min_sensor_range, params.max_sensor_range)?;
    let thinned = thinner.thin(&cloud, &candidates)?;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    let file_name = scan_path
        .file_name()
        .with_context(|| format!("{} has no file name", scan_path.display()))?;
    let out_path = out_dir.join(file_name);
    write_scan(&Scan::from(&thinned), &out_path).with_context(|| format!("writing {}", out_path.display()))?;

    Ok(ScanOutcome {
        points_in: cloud.len(),
        points_out: thinned.len(),
        elapsed_ms,
    })
}

fn run(params: &Params) -> Result<()> {
    let thinner = SpatialThinner::for_new_scans(params)?;
    let scans = list_scans(&params.path)?;

    let out_dir = PathBuf::from(&params.output_file_name);
    std::fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let pb = scan_progress(scans.len(), params.verbose);
    let outcomes = scans
        .par_iter()
        .map(|scan_path| {
            let outcome = thin_scan(&thinner, params, scan_path, &out_dir);
            pb.inc(1);
            outcome
        })
        .collect::<Result<Vec<_>>>()?;
    pb.finish_and_clear();

    let points_in: usize = outcomes.iter().map(|o| o.points_in).sum();
    let points_out: usize = outcomes.iter().map(|o| o.points_out).sum();
    let avg_time_ms = if outcomes.is_empty() {
        0.0
    } else {
        outcomes.iter().map(|o| o.elapsed_ms).sum::<f64>() / outcomes.len() as f64
    };

    let record = config_record_path(&out_dir);
    write_run_record(params, &record, avg_time_ms)?;

    log::info!(
        "thinned {} scans: {} -> {} points, {:.3} ms per scan",
        outcomes.len(),
        points_in,
        points_out,
        avg_time_ms
    );
    log::info!("run record written to {}", record.display());
    Ok(())
}

fn main() -> Result<()> {
    let params = Params::from(Args::parse());

    let default_filter = if params.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    params.validate().context("invalid parameters")?;

    if params.verbose {
        println!("--------------------");
        println!("PARAMETERS ---------");
        println!("--------------------");
        print!("{}", params.summary(false));
        println!("--------------------");
    }

    run(&params)
}
