//! End-to-end replay: configuration file, schedule file, driver, runner and pool

use anyhow::Result;
use async_trait::async_trait;
use pacer_config::{ConfigLoader, PacerConfig};
use pacer_core::{ConstantPacing, RateScheduleDriver, ShapeCommand};
use pacer_runtime::{RuntimeError, ShapeRunner, SimulatedUserPool, StopReason, UserPool};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::watch;

// Prefix nobody sets, so ambient PACER_* variables cannot leak into these tests
const ENV_PREFIX: &str = "PACER_E2E_UNSET";

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn load(path: &Path) -> PacerConfig {
    ConfigLoader::with_prefix(ENV_PREFIX).from_file(path).unwrap()
}

/// Pool that samples the target it was told to reach every poll
#[derive(Default)]
struct TracePool {
    seen: Vec<i64>,
}

#[async_trait]
impl UserPool for TracePool {
    async fn converge(&mut self, command: ShapeCommand, _elapsed: Duration) -> Result<(), RuntimeError> {
        self.seen.push(command.target_users);
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), RuntimeError> {
        Ok(())
    }

    fn active_users(&self) -> u64 {
        self.seen.last().map(|&t| t.max(0) as u64).unwrap_or(0)
    }
}

#[tokio::test(start_paused = true)]
async fn test_yaml_config_drives_full_replay() -> Result<()> {
    pacer_logging::init_simple_tracing("debug")?;

    let dir = tempfile::tempdir()?;
    let schedule = write(&dir, "rps.txt", "3\n3\n9\n-2\n6\n");
    let config_path = write(
        &dir,
        "pacer.yaml",
        &format!(
            "shape:\n  schedule_path: {:?}\n  spawn_rate: 4\n  poll_interval: 1s\n",
            schedule.display().to_string()
        ),
    );

    let config = load(&config_path);
    let driver = Arc::new(RateScheduleDriver::from_config(&config.shape)?);
    let runner = ShapeRunner::from_config(driver, &config.shape)?;

    let (_tx, rx) = watch::channel(false);
    let mut pool = TracePool::default();
    let summary = runner.run(&mut pool, rx).await?;

    // Negative entries reach the engine untouched
    assert_eq!(pool.seen, vec![3, 3, 9, -2, 6]);
    assert_eq!(summary.commands, 5);
    assert_eq!(summary.stop_reason, StopReason::ScheduleExhausted);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_legacy_json_config_with_simulated_pool() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let schedule = write(&dir, "rps.txt", "10\n10\n10\n");
    let config_path = write(
        &dir,
        "locust_stats_config.json",
        r#"{ "SPAWN_RATE": 5, "REQUEST_RATE_PER_USER": 2.0, "CSV_STATS_INTERVAL_SEC": 60 }"#,
    );

    let mut config = load(&config_path);
    config.shape.schedule_path = schedule;

    let pacing = ConstantPacing::from_config(&config.pacing)?;
    assert_eq!(pacing.interval(), Duration::from_millis(500));

    let driver = Arc::new(RateScheduleDriver::from_config(&config.shape)?);
    assert_eq!(driver.spawn_rate(), 5.0);

    let runner = ShapeRunner::from_config(driver, &config.shape)?;
    let (_tx, rx) = watch::channel(false);
    let mut pool = SimulatedUserPool::new();
    let summary = runner.run(&mut pool, rx).await?;

    // 0 users at t=0, +5 at t=1, +5 at t=2
    assert_eq!(summary.peak_users, 10);
    assert_eq!(pool.active_users(), 0);
    Ok(())
}

#[test]
fn test_malformed_schedule_stops_before_any_tick() {
    let dir = tempfile::tempdir().unwrap();
    let schedule = write(&dir, "rps.txt", "1\n2\nabc\n");
    let config_path = write(
        &dir,
        "pacer.yaml",
        &format!("shape:\n  schedule_path: {:?}\n", schedule.display().to_string()),
    );

    let config = load(&config_path);
    let err = RateScheduleDriver::from_config(&config.shape).unwrap_err();
    assert!(err.to_string().contains("line 3"));
}

#[test]
fn test_zero_spawn_rate_rejected_at_startup() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write(&dir, "pacer.yaml", "shape:\n  spawn_rate: 0\n");

    let result = ConfigLoader::with_prefix(ENV_PREFIX).from_file(&config_path);
    assert!(result.is_err());
}
