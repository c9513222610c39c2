//! Per-user pacing configuration

use crate::error::ConfigResult;
use crate::validation::{validate_finite, validate_positive, Validatable};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// How often each virtual user starts a task
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PacingConfig {
    /// Requests per second issued by a single virtual user
    #[serde(default = "default_request_rate_per_user")]
    pub request_rate_per_user: f64,

    /// Seed for workload randomness; wall-clock derived when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub random_seed: Option<u64>,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            request_rate_per_user: default_request_rate_per_user(),
            random_seed: None,
        }
    }
}

impl PacingConfig {
    /// Interval between consecutive task starts of one virtual user
    ///
    /// Fails when the rate is so small that `1 / rate` does not fit a [`Duration`].
    pub fn wait_interval(&self) -> ConfigResult<Duration> {
        Duration::try_from_secs_f64(1.0 / self.request_rate_per_user).map_err(|_| {
            self.validation_error(format!(
                "request_rate_per_user {} gives a wait interval that is out of range",
                self.request_rate_per_user
            ))
        })
    }

    /// Configured seed, or the current Unix time in nanoseconds
    ///
    /// Resolved once per run and logged so an engine's randomised request mix can
    /// be replayed with the same seed.
    pub fn resolve_seed(&self) -> u64 {
        self.random_seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or_default()
        })
    }
}

impl Validatable for PacingConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_finite(
            self.request_rate_per_user,
            "request_rate_per_user",
            self.domain_name(),
        )?;
        validate_positive(
            self.request_rate_per_user,
            "request_rate_per_user",
            self.domain_name(),
        )?;
        self.wait_interval()?;
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "pacing"
    }
}

fn default_request_rate_per_user() -> f64 {
    1.0
}
