//! Pre-recorded per-second concurrency trace

use crate::error::ScheduleLoadError;
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Ordered target concurrency values, one per second of run time
///
/// Immutable once built. Cloning is cheap, so the schedule can be handed to
/// pollers and workers on other threads without locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateSchedule {
    rates: Arc<[i64]>,
}

/// Shape statistics of a schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScheduleSummary {
    pub seconds: usize,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub mean: Option<f64>,
}

impl RateSchedule {
    /// Build a schedule from in-memory values
    pub fn from_values(rates: impl Into<Vec<i64>>) -> Self {
        let rates: Vec<i64> = rates.into();
        Self {
            rates: rates.into(),
        }
    }

    /// Parse a newline-delimited list of integers
    ///
    /// `resource` only names the input in error messages. Whitespace around a value
    /// is ignored; a blank line is rejected like any other non-integer line.
    pub fn parse(resource: &str, text: &str) -> Result<Self, ScheduleLoadError> {
        let rates = text
            .lines()
            .enumerate()
            .map(|(index, line)| {
                line.trim()
                    .parse::<i64>()
                    .map_err(|source| ScheduleLoadError::InvalidLine {
                        resource: resource.to_string(),
                        line: index + 1,
                        content: line.to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if rates.is_empty() {
            return Err(ScheduleLoadError::Empty {
                resource: resource.to_string(),
            });
        }

        debug!("Parsed {} schedule entries from {}", rates.len(), resource);
        Ok(Self::from_values(rates))
    }

    /// Read and parse a schedule file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScheduleLoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ScheduleLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let schedule = Self::parse(&path.display().to_string(), &text)?;
        info!(
            "Loaded rate schedule from {} ({} seconds)",
            path.display(),
            schedule.len()
        );
        Ok(schedule)
    }

    /// Read and parse a schedule from any reader
    pub fn from_reader(resource: &str, mut reader: impl Read) -> Result<Self, ScheduleLoadError> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|source| ScheduleLoadError::Io {
                path: resource.into(),
                source,
            })?;
        Self::parse(resource, &text)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Target for second `index`
    pub fn get(&self, index: usize) -> Option<i64> {
        self.rates.get(index).copied()
    }

    pub fn values(&self) -> &[i64] {
        &self.rates
    }

    /// Run length, one second per entry
    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.rates.len() as u64)
    }

    pub fn summary(&self) -> ScheduleSummary {
        let mean = if self.rates.is_empty() {
            None
        } else {
            let total: i128 = self.rates.iter().map(|&r| r as i128).sum();
            Some(total as f64 / self.rates.len() as f64)
        };

        ScheduleSummary {
            seconds: self.rates.len(),
            min: self.rates.iter().copied().min(),
            max: self.rates.iter().copied().max(),
            mean,
        }
    }
}
