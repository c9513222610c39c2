//! Domain-driven configuration management for pacer
//!
//! Configuration is split by functional domain, validated once at start-up and
//! passed by reference to whichever component needs it. Values come from a YAML or
//! JSON file with `PACER_*` environment variable overrides.

pub mod compat;
pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

// Re-export domain configurations
pub use domains::{
    logging::{LogFormat, LogLevel, LoggingConfig},
    pacing::PacingConfig,
    shape::ShapeConfig,
    PacerConfig,
};

pub use validation::Validatable;
