//! Rate schedule replay driver

use crate::error::{ConfigurationError, ScheduleLoadError};
use crate::schedule::RateSchedule;
use crate::shape::{LoadShape, ShapeCommand};
use once_cell::sync::OnceCell;
use pacer_config::ShapeConfig;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Replays a [`RateSchedule`] as a live sequence of [`ShapeCommand`]s
///
/// The driver is keyed on elapsed run time rather than on how many times it has been
/// polled, so a poller running late or early still gets the entry for the second it
/// is actually in. The only mutable state is the run start instant, written once.
#[derive(Debug)]
pub struct RateScheduleDriver {
    schedule: RateSchedule,
    spawn_rate: f64,
    started_at: OnceCell<Instant>,
}

impl RateScheduleDriver {
    /// Create a driver for an already loaded schedule
    pub fn new(schedule: RateSchedule, spawn_rate: f64) -> Result<Self, ConfigurationError> {
        if !(spawn_rate.is_finite() && spawn_rate > 0.0) {
            return Err(ConfigurationError::InvalidSpawnRate(spawn_rate));
        }

        debug!(
            "Creating rate schedule driver: {} seconds, spawn rate {}",
            schedule.len(),
            spawn_rate
        );

        Ok(Self {
            schedule,
            spawn_rate,
            started_at: OnceCell::new(),
        })
    }

    /// Load the configured schedule file and build a driver for it
    pub fn from_config(config: &ShapeConfig) -> Result<Self, DriverInitError> {
        let schedule = RateSchedule::from_path(&config.schedule_path)?;
        Ok(Self::new(schedule, config.spawn_rate)?)
    }

    /// Command for `elapsed_seconds` into the run
    ///
    /// Returns `schedule[floor(elapsed_seconds)]` paired with the spawn rate while
    /// that index is inside the schedule, `None` afterwards.
    pub fn tick(&self, elapsed_seconds: f64) -> Option<ShapeCommand> {
        debug_assert!(
            elapsed_seconds >= 0.0,
            "elapsed time must be non-negative, got {elapsed_seconds}"
        );

        let index = elapsed_seconds.floor();
        if index < self.schedule.len() as f64 {
            self.schedule
                .get(index as usize)
                .map(|target| ShapeCommand::new(target, self.spawn_rate))
        } else {
            None
        }
    }

    /// Command for the current wall-clock time
    ///
    /// The first call fixes the run start.
    pub fn tick_now(&self) -> Option<ShapeCommand> {
        self.tick(self.run_time().as_secs_f64())
    }

    /// Time since the run start, starting the run if needed
    pub fn run_time(&self) -> Duration {
        let started_at = self.started_at.get_or_init(|| {
            info!(
                "Rate schedule run started ({} seconds)",
                self.schedule.len()
            );
            Instant::now()
        });
        started_at.elapsed()
    }

    /// Whether the run start has been fixed
    pub fn started(&self) -> bool {
        self.started_at.get().is_some()
    }

    pub fn schedule(&self) -> &RateSchedule {
        &self.schedule
    }

    pub fn spawn_rate(&self) -> f64 {
        self.spawn_rate
    }
}

impl LoadShape for RateScheduleDriver {
    fn tick(&self, elapsed_seconds: f64) -> Option<ShapeCommand> {
        RateScheduleDriver::tick(self, elapsed_seconds)
    }

    fn time_limit(&self) -> Option<Duration> {
        Some(self.schedule.time_limit())
    }
}

/// Failure to build a driver from configuration
#[derive(Debug, thiserror::Error)]
pub enum DriverInitError {
    #[error(transparent)]
    Schedule(#[from] ScheduleLoadError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}
