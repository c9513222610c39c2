//! Fixed-interval polling loop driving a user pool from a load shape

use crate::error::RuntimeError;
use crate::pool::UserPool;
use chrono::{DateTime, Utc};
use pacer_config::ShapeConfig;
use pacer_core::LoadShape;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The shape returned no further target
    ScheduleExhausted,
    /// A shutdown signal arrived first
    Shutdown,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::ScheduleExhausted => write!(f, "schedule exhausted"),
            StopReason::Shutdown => write!(f, "shutdown"),
        }
    }
}

/// Outcome of a finished run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Commands forwarded to the pool
    pub commands: u64,
    pub peak_users: u64,
    pub elapsed: Duration,
    pub stop_reason: StopReason,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Polls a [`LoadShape`] once per `poll_interval`
///
/// Elapsed time is measured from the first poll, so a late poll still asks the
/// shape about the second it actually falls in.
pub struct ShapeRunner<S: ?Sized> {
    shape: Arc<S>,
    poll_interval: Duration,
}

impl<S: LoadShape + ?Sized> ShapeRunner<S> {
    pub fn new(shape: Arc<S>, poll_interval: Duration) -> Result<Self, RuntimeError> {
        if poll_interval.is_zero() {
            return Err(RuntimeError::InvalidConfig(
                "poll interval must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            shape,
            poll_interval,
        })
    }

    pub fn from_config(shape: Arc<S>, config: &ShapeConfig) -> Result<Self, RuntimeError> {
        Self::new(shape, config.poll_interval)
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Drive `pool` until the shape is exhausted or `shutdown` turns `true`
    ///
    /// The pool is stopped before returning, including when `converge` fails.
    pub async fn run<P>(
        &self,
        pool: &mut P,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<RunSummary, RuntimeError>
    where
        P: UserPool + ?Sized,
    {
        let mut interval = tokio::time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let started = Instant::now();
        let started_at = Utc::now();
        let mut shutdown_open = true;
        let mut commands = 0u64;
        let mut peak_users = 0u64;
        let mut last_target = None;

        info!(
            "Starting load shape run (poll interval {:?}, time limit {:?})",
            self.poll_interval,
            self.shape.time_limit()
        );

        let outcome = loop {
            tokio::select! {
                _ = interval.tick() => {
                    let elapsed = started.elapsed();
                    let Some(command) = self.shape.tick(elapsed.as_secs_f64()) else {
                        break Ok(StopReason::ScheduleExhausted);
                    };

                    if last_target != Some(command.target_users) {
                        info!(
                            "t={:.3}s target {} users (spawn rate {}/s)",
                            elapsed.as_secs_f64(),
                            command.target_users,
                            command.spawn_rate
                        );
                        last_target = Some(command.target_users);
                    } else {
                        debug!("t={:.3}s target unchanged", elapsed.as_secs_f64());
                    }

                    if let Err(e) = pool.converge(command, elapsed).await {
                        break Err(e);
                    }
                    commands += 1;
                    peak_users = peak_users.max(pool.active_users());
                }
                changed = shutdown.changed(), if shutdown_open => {
                    match changed {
                        Ok(()) => {
                            if *shutdown.borrow_and_update() {
                                info!("Shutdown requested, ending run early");
                                break Ok(StopReason::Shutdown);
                            }
                        }
                        // Sender gone: no shutdown can arrive any more
                        Err(_) => shutdown_open = false,
                    }
                }
            }
        };

        let stop_reason = match outcome {
            Ok(stop_reason) => stop_reason,
            Err(e) => {
                error!("User pool failed after {} commands: {}", commands, e);
                if let Err(stop_err) = pool.stop().await {
                    warn!("Failed to stop user pool after error: {}", stop_err);
                }
                return Err(e);
            }
        };

        pool.stop().await?;

        let summary = RunSummary {
            commands,
            peak_users,
            elapsed: started.elapsed(),
            stop_reason,
            started_at,
            finished_at: Utc::now(),
        };

        info!(
            "Load shape run finished ({}): {} commands, peak {} users, {:.1}s",
            summary.stop_reason,
            summary.commands,
            summary.peak_users,
            summary.elapsed.as_secs_f64()
        );

        Ok(summary)
    }
}
