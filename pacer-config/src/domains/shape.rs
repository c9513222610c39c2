//! Load shape configuration

use crate::error::ConfigResult;
use crate::validation::{validate_finite, validate_positive, validate_required_string, Validatable};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Rate schedule replay configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShapeConfig {
    /// Newline-delimited file with one target user count per second
    #[serde(default = "default_schedule_path")]
    pub schedule_path: PathBuf,

    /// Maximum ramp speed in users per second
    #[serde(default = "default_spawn_rate")]
    pub spawn_rate: f64,

    /// How often the engine polls the shape
    #[serde(with = "humantime_serde", default = "default_poll_interval")]
    pub poll_interval: Duration,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            schedule_path: default_schedule_path(),
            spawn_rate: default_spawn_rate(),
            poll_interval: default_poll_interval(),
        }
    }
}

impl Validatable for ShapeConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(
            &self.schedule_path.to_string_lossy(),
            "schedule_path",
            self.domain_name(),
        )?;

        validate_finite(self.spawn_rate, "spawn_rate", self.domain_name())?;
        validate_positive(self.spawn_rate, "spawn_rate", self.domain_name())?;

        if self.poll_interval.is_zero() {
            return Err(self.validation_error("poll_interval must be greater than 0"));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "shape"
    }
}

// Default value functions
fn default_schedule_path() -> PathBuf {
    PathBuf::from("rps.txt")
}

fn default_spawn_rate() -> f64 {
    100.0
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(1)
}
