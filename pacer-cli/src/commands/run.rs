//! `run`: replay the configured rate schedule

use anyhow::{Context, Result};
use pacer_config::PacerConfig;
use pacer_core::{ConstantPacing, RateScheduleDriver};
use pacer_runtime::{RunSummary, ShapeRunner, SimulatedUserPool};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};

/// Command-line overrides for the shape configuration
#[derive(Debug, Default)]
pub struct RunOverrides {
    pub schedule: Option<PathBuf>,
    pub spawn_rate: Option<f64>,
    pub poll_interval_ms: Option<u64>,
}

impl RunOverrides {
    /// Apply the overrides and re-validate
    pub fn apply(self, mut config: PacerConfig) -> Result<PacerConfig> {
        if let Some(schedule) = self.schedule {
            config.shape.schedule_path = schedule;
        }
        if let Some(spawn_rate) = self.spawn_rate {
            config.shape.spawn_rate = spawn_rate;
        }
        if let Some(ms) = self.poll_interval_ms {
            config.shape.poll_interval = Duration::from_millis(ms);
        }

        config
            .validate_all()
            .context("Invalid run configuration")?;
        Ok(config)
    }
}

/// Log the effective configuration once at start
fn log_config(config: &PacerConfig) -> Result<()> {
    let pacing =
        ConstantPacing::from_config(&config.pacing).context("Invalid pacing configuration")?;

    info!(
        schedule = %config.shape.schedule_path.display(),
        spawn_rate = config.shape.spawn_rate,
        poll_interval_ms = config.shape.poll_interval.as_millis() as u64,
        "Load shape configuration"
    );
    info!(
        request_rate_per_user = config.pacing.request_rate_per_user,
        wait_interval_ms = pacing.interval().as_millis() as u64,
        random_seed = config.pacing.resolve_seed(),
        seeded = config.pacing.random_seed.is_some(),
        "Pacing configuration"
    );
    Ok(())
}

/// Replay the schedule until exhausted or interrupted
pub async fn handle_run(config: &PacerConfig) -> Result<RunSummary> {
    log_config(config)?;

    let driver = RateScheduleDriver::from_config(&config.shape).with_context(|| {
        format!(
            "Failed to load rate schedule {}",
            config.shape.schedule_path.display()
        )
    })?;
    let runner = ShapeRunner::from_config(Arc::new(driver), &config.shape)?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received shutdown signal");
            let _ = shutdown_tx.send(true);
        } else {
            warn!("Failed to listen for ctrl+c; run will end with the schedule");
            // Keep the sender alive so the runner does not treat it as closed early
            std::future::pending::<()>().await;
        }
    });

    let mut pool = SimulatedUserPool::new();
    let summary = runner.run(&mut pool, shutdown_rx).await?;
    Ok(summary)
}

pub fn render_summary(summary: &RunSummary, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(summary).context("Failed to serialize summary");
    }

    Ok(format!(
        "Run finished ({}): {} commands, peak {} users, {:.1}s",
        summary.stop_reason,
        summary.commands,
        summary.peak_users,
        summary.elapsed.as_secs_f64()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_overrides_apply() {
        let overrides = RunOverrides {
            schedule: Some(PathBuf::from("trace.txt")),
            spawn_rate: Some(5.0),
            poll_interval_ms: Some(250),
        };

        let config = overrides.apply(PacerConfig::default()).unwrap();
        assert_eq!(config.shape.schedule_path, PathBuf::from("trace.txt"));
        assert_eq!(config.shape.spawn_rate, 5.0);
        assert_eq!(config.shape.poll_interval, Duration::from_millis(250));
    }

    #[test]
    fn test_non_positive_spawn_rate_override_is_fatal() {
        let overrides = RunOverrides {
            spawn_rate: Some(0.0),
            ..Default::default()
        };
        assert!(overrides.apply(PacerConfig::default()).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_run_replays_schedule() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"2\n4\n").unwrap();

        let config = RunOverrides {
            schedule: Some(file.path().to_path_buf()),
            spawn_rate: Some(10.0),
            poll_interval_ms: None,
        }
        .apply(PacerConfig::default())
        .unwrap();

        let summary = handle_run(&config).await.unwrap();
        assert_eq!(summary.commands, 2);
        assert_eq!(summary.peak_users, 4);

        let text = render_summary(&summary, false).unwrap();
        assert!(text.starts_with("Run finished (schedule exhausted): 2 commands, peak 4 users"));
    }

    #[tokio::test]
    async fn test_handle_run_missing_schedule() {
        let config = RunOverrides {
            schedule: Some(PathBuf::from("/no/such/schedule.txt")),
            ..Default::default()
        }
        .apply(PacerConfig::default())
        .unwrap();

        let err = handle_run(&config).await.unwrap_err();
        assert!(format!("{:#}", err).contains("/no/such/schedule.txt"));
    }

    #[tokio::test]
    async fn test_handle_run_rejects_out_of_range_request_rate() {
        let mut config = PacerConfig::default();
        config.pacing.request_rate_per_user = 1e-30;

        let err = handle_run(&config).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid pacing configuration"));
    }
}
