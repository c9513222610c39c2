//! Core error types for pacer

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a rate schedule
///
/// All of them are fatal: a run cannot start without a rate plan.
#[derive(Debug, Error)]
pub enum ScheduleLoadError {
    #[error("Failed to read rate schedule {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Rate schedule {resource} is empty")]
    Empty { resource: String },

    #[error("Rate schedule {resource}, line {line}: {content:?} is not an integer")]
    InvalidLine {
        resource: String,
        line: usize,
        content: String,
        #[source]
        source: ParseIntError,
    },
}

/// Invalid driver or pacing parameters
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Spawn rate must be a positive finite number, got {0}")]
    InvalidSpawnRate(f64),

    #[error("Request rate per user must be a positive finite number, got {0}")]
    InvalidRequestRate(f64),
}
