//! Constant pacing between the task starts of one virtual user
//!
//! A virtual user that should issue `r` requests per second waits `1/r` seconds
//! between task starts, minus however long the previous task took. A task that
//! overruns the interval is followed immediately by the next one.
//!
//! The simulated pool only counts users and issues no tasks, so nothing in this
//! workspace sleeps on these waits. A load engine plugged in behind
//! `pacer_runtime::UserPool` keeps one [`ConstantPacing`] per virtual user and sleeps
//! for [`ConstantPacing::next_wait`] after every task. `pacer run` builds one from the
//! pacing configuration to reject intervals that are out of range.

use crate::error::ConfigurationError;
use pacer_config::PacingConfig;
use std::time::{Duration, Instant};

/// Wait-time calculator for one virtual user
#[derive(Debug, Clone)]
pub struct ConstantPacing {
    interval: Duration,
    last_run: Option<Instant>,
    last_wait: Duration,
}

impl ConstantPacing {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: None,
            last_wait: Duration::ZERO,
        }
    }

    /// Pacing for `requests_per_second` task starts per second
    pub fn from_request_rate(requests_per_second: f64) -> Result<Self, ConfigurationError> {
        if !(requests_per_second.is_finite() && requests_per_second > 0.0) {
            return Err(ConfigurationError::InvalidRequestRate(requests_per_second));
        }
        let interval = Duration::try_from_secs_f64(1.0 / requests_per_second)
            .map_err(|_| ConfigurationError::InvalidRequestRate(requests_per_second))?;
        Ok(Self::new(interval))
    }

    pub fn from_config(config: &PacingConfig) -> Result<Self, ConfigurationError> {
        Self::from_request_rate(config.request_rate_per_user)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// How long to sleep before the next task, measured at `now`
    ///
    /// Called once after every task. The time spent since the previous call, less
    /// the wait that was handed out then, is the task's run time.
    pub fn next_wait_at(&mut self, now: Instant) -> Duration {
        let run_time = match self.last_run {
            Some(last_run) => now
                .saturating_duration_since(last_run)
                .saturating_sub(self.last_wait),
            None => Duration::ZERO,
        };

        self.last_wait = self.interval.saturating_sub(run_time);
        self.last_run = Some(now);
        self.last_wait
    }

    pub fn next_wait(&mut self) -> Duration {
        self.next_wait_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_wait_is_full_interval() {
        let mut pacing = ConstantPacing::new(Duration::from_secs(1));
        assert_eq!(pacing.next_wait_at(Instant::now()), Duration::from_secs(1));
    }

    #[test]
    fn test_subtracts_task_run_time() {
        let start = Instant::now();
        let mut pacing = ConstantPacing::new(Duration::from_secs(1));
        assert_eq!(pacing.next_wait_at(start), Duration::from_secs(1));

        // Slept the full second, then the task took 300ms
        let after_task = start + Duration::from_millis(1300);
        assert_eq!(pacing.next_wait_at(after_task), Duration::from_millis(700));

        // Slept 700ms, task took 100ms
        let after_next = after_task + Duration::from_millis(800);
        assert_eq!(pacing.next_wait_at(after_next), Duration::from_millis(900));
    }

    #[test]
    fn test_overrunning_task_gets_no_wait() {
        let start = Instant::now();
        let mut pacing = ConstantPacing::new(Duration::from_millis(500));
        pacing.next_wait_at(start);

        let late = start + Duration::from_millis(500) + Duration::from_secs(2);
        assert_eq!(pacing.next_wait_at(late), Duration::ZERO);
    }

    #[test]
    fn test_from_request_rate() {
        let pacing = ConstantPacing::from_request_rate(4.0).unwrap();
        assert_eq!(pacing.interval(), Duration::from_millis(250));

        assert!(ConstantPacing::from_request_rate(0.0).is_err());
        assert!(ConstantPacing::from_request_rate(f64::NAN).is_err());
    }

    #[test]
    fn test_interval_out_of_range() {
        assert_eq!(
            ConstantPacing::from_request_rate(1e-30).unwrap_err(),
            ConfigurationError::InvalidRequestRate(1e-30)
        );
        assert!(ConstantPacing::from_request_rate(f64::MIN_POSITIVE).is_err());
    }

    #[test]
    fn test_from_config() {
        let config = PacingConfig {
            request_rate_per_user: 2.0,
            random_seed: None,
        };
        let pacing = ConstantPacing::from_config(&config).unwrap();
        assert_eq!(pacing.interval(), Duration::from_millis(500));
    }
}
