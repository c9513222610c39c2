//! Schedule inspection: `validate` and `ticks`

use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use pacer_core::{RateSchedule, RateScheduleDriver};
use std::path::Path;

/// Load a schedule and describe it
pub fn handle_validate(schedule_path: &Path, format: OutputFormat) -> Result<String> {
    let schedule = RateSchedule::from_path(schedule_path)
        .with_context(|| format!("Invalid rate schedule {}", schedule_path.display()))?;
    let summary = schedule.summary();

    let output = match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?
        }
        OutputFormat::Text => format!(
            "{}: {} seconds, min {} users, max {} users, mean {:.1} users",
            schedule_path.display(),
            summary.seconds,
            summary.min.unwrap_or_default(),
            summary.max.unwrap_or_default(),
            summary.mean.unwrap_or_default()
        ),
    };

    Ok(output)
}

/// One output line per requested elapsed time
pub fn handle_ticks(schedule_path: &Path, spawn_rate: f64, at: &[f64]) -> Result<Vec<String>> {
    let schedule = RateSchedule::from_path(schedule_path)
        .with_context(|| format!("Invalid rate schedule {}", schedule_path.display()))?;
    let driver = RateScheduleDriver::new(schedule, spawn_rate)?;

    at.iter()
        .map(|&elapsed| {
            if !(elapsed >= 0.0) {
                anyhow::bail!("Elapsed time must be non-negative, got {}", elapsed);
            }
            Ok(match driver.tick(elapsed) {
                Some(command) => format!(
                    "t={:.3}s target={} spawn_rate={}",
                    elapsed, command.target_users, command.spawn_rate
                ),
                None => format!("t={:.3}s stop", elapsed),
            })
        })
        .collect()
}
