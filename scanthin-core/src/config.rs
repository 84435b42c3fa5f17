//! Run parameters shared by the scan pipeline and the thinner

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Parameters of one scan-processing run.
///
/// The thinner only consumes `r_new` (thinning incoming scans) and `r_map`
/// (thinning the accumulated map); the rest is carried for the surrounding
/// pipeline and for the run's config record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// Directory holding the scans
    pub path: String,
    pub sigma: f64,
    /// Thinning radius for the map, in meters
    pub r_map: f64,
    /// Thinning radius for new scans, in meters
    pub r_new: f64,
    pub convergence_tolerance: f64,
    /// Points farther than this from the sensor are dropped, in meters
    pub max_sensor_range: f64,
    /// Points closer than this to the sensor are dropped, in meters
    pub min_sensor_range: f64,
    pub output_file_name: String,
    #[serde(default)]
    pub verbose: bool,
}

impl Params {
    /// Check the parameters for values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.path.is_empty() {
            return Err(Error::Config("path must not be empty".to_string()));
        }
        if self.output_file_name.is_empty() {
            return Err(Error::Config("output file name must not be empty".to_string()));
        }
        check_radius("rMap", self.r_map)?;
        check_radius("rNew", self.r_new)?;
        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(Error::Config(format!("sigma must be positive, got {}", self.sigma)));
        }
        if !(self.convergence_tolerance.is_finite() && self.convergence_tolerance > 0.0) {
            return Err(Error::Config(format!(
                "convergence tolerance must be positive, got {}",
                self.convergence_tolerance
            )));
        }
        if !(self.min_sensor_range.is_finite() && self.min_sensor_range >= 0.0) {
            return Err(Error::Config(format!(
                "minimum sensor range must be non-negative, got {}",
                self.min_sensor_range
            )));
        }
        if self.max_sensor_range.is_nan() || self.max_sensor_range <= self.min_sensor_range {
            return Err(Error::Config(format!(
                "maximum sensor range ({}) must exceed minimum sensor range ({})",
                self.max_sensor_range, self.min_sensor_range
            )));
        }
        Ok(())
    }

    /// Render the `name = value` parameter block.
    ///
    /// With `units` set, length parameters are labelled with `[m]` as in the
    /// config record written next to the results.
    pub fn summary(&self, units: bool) -> String {
        let m = if units { " [m]" } else { "" };
        let rows = [
            ("scansFolderPath".to_string(), format!("\"{}\"", self.path)),
            (format!("sigma{m}"), self.sigma.to_string()),
            (format!("rMap{m}"), self.r_map.to_string()),
            (format!("rNew{m}"), self.r_new.to_string()),
            ("convergenceTolerance".to_string(), self.convergence_tolerance.to_string()),
            (format!("maxSensorRange{m}"), self.max_sensor_range.to_string()),
            (format!("minSensorRange{m}"), self.min_sensor_range.to_string()),
            ("outputFileName".to_string(), self.output_file_name.clone()),
        ];

        let mut out = String::new();
        for (name, value) in rows {
            // Writing into a String cannot fail.
            let _ = writeln!(out, "{name:<22} = {value}");
        }
        out
    }
}

fn check_radius(name: &str, radius: f64) -> Result<()> {
    if radius.is_finite() && radius >= 0.0 {
        Ok(())
    } else {
        Err(Error::Config(format!("{name} must be a non-negative radius, got {radius}")))
    }
}
