//! Shared helpers for the batch job commands.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

/// Serialize a record array to its output file, replacing any previous run.
///
/// Output is pretty-printed with a trailing newline and contains nothing
/// run-dependent, so re-running against an unchanged mirror is
/// byte-identical. Failures here are environment problems and abort the job.
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create output directory {}", parent.display()))?;
    }
    let mut json = serde_json::to_string_pretty(records).context("cannot encode output")?;
    json.push('\n');
    fs::write(path, json).with_context(|| format!("cannot write {}", path.display()))?;
    Ok(())
}

/// Progress bar for a job with a known item count.
pub fn job_progress(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:30.cyan} {pos}/{len} {msg}")
            .expect("static template"),
    );
    pb
}

/// Spinner for jobs scanning an unknown number of inputs.
pub fn job_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("static template"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
