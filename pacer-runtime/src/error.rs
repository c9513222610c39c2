//! Runtime error types

use thiserror::Error;

/// Errors reported by a user pool while following the shape
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("User pool error: {0}")]
    Pool(String),

    #[error("Invalid runtime configuration: {0}")]
    InvalidConfig(String),
}
