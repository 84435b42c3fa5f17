//! Progress reporting over a sequence of scans

use indicatif::{ProgressBar, ProgressStyle};

/// A progress bar over `len` scans. Hidden unless `visible`.
pub fn scan_progress(len: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:60.cyan/blue}] {pos}/{len} scans ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("||-"),
    );
    pb
}
