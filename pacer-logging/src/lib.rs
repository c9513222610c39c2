//! Logging initialisation for pacer
//!
//! All crates log through `tracing`; this crate installs the global subscriber
//! according to [`LoggingConfig`](pacer_config::LoggingConfig).

pub mod init;

pub use init::{build_env_filter, init_logging_from_config, init_simple_tracing};
