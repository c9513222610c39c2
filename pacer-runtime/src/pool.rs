//! User pool seam and a count-only simulated engine

use crate::error::RuntimeError;
use async_trait::async_trait;
use pacer_core::ShapeCommand;
use std::time::Duration;
use tracing::{debug, info};

/// The engine that owns virtual users
///
/// The runner hands it one absolute target per poll; ramping toward that target at
/// no more than `spawn_rate` users per second is the engine's job.
#[async_trait]
pub trait UserPool: Send {
    /// Move toward `command.target_users`; `elapsed` is the run time of this poll
    async fn converge(&mut self, command: ShapeCommand, elapsed: Duration)
        -> Result<(), RuntimeError>;

    /// End the run and release every virtual user
    async fn stop(&mut self) -> Result<(), RuntimeError>;

    /// Virtual users currently running
    fn active_users(&self) -> u64;
}

/// Engine that only counts users
///
/// Each poll it may add or remove up to `spawn_rate × time since the previous poll`
/// users; unused fractions of that budget carry over while a ramp is in progress.
/// Negative targets are treated as zero.
#[derive(Debug, Default)]
pub struct SimulatedUserPool {
    active: u64,
    peak: u64,
    ramp_credit: f64,
    last_elapsed: Duration,
    stopped: bool,
}

impl SimulatedUserPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn peak_users(&self) -> u64 {
        self.peak
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

#[async_trait]
impl UserPool for SimulatedUserPool {
    async fn converge(
        &mut self,
        command: ShapeCommand,
        elapsed: Duration,
    ) -> Result<(), RuntimeError> {
        if self.stopped {
            return Err(RuntimeError::Pool("pool already stopped".to_string()));
        }

        let target = command.target_users.max(0) as u64;
        let since_last = elapsed.saturating_sub(self.last_elapsed);
        self.last_elapsed = elapsed;

        if target == self.active {
            self.ramp_credit = 0.0;
            return Ok(());
        }

        let budget = self.ramp_credit + command.spawn_rate * since_last.as_secs_f64();
        let gap = self.active.abs_diff(target);
        let step = budget.floor().min(gap as f64) as u64;

        if step == gap {
            self.ramp_credit = 0.0;
        } else {
            self.ramp_credit = budget - step as f64;
        }

        if target > self.active {
            self.active += step;
        } else {
            self.active -= step;
        }
        self.peak = self.peak.max(self.active);

        debug!(
            "Simulated pool at {} users (target {}, step {})",
            self.active, target, step
        );
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), RuntimeError> {
        info!("Stopping simulated pool with {} active users", self.active);
        self.active = 0;
        self.ramp_credit = 0.0;
        self.stopped = true;
        Ok(())
    }

    fn active_users(&self) -> u64 {
        self.active
    }
}
