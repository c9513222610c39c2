//! Load-shape runtime for pacer
//!
//! [`ShapeRunner`] polls a [`LoadShape`](pacer_core::LoadShape) on a fixed interval
//! and forwards every command to a [`UserPool`], the seam where the engine that owns
//! the virtual users plugs in.

pub mod error;
pub mod pool;
pub mod runner;

pub use error::RuntimeError;
pub use pool::{SimulatedUserPool, UserPool};
pub use runner::{RunSummary, ShapeRunner, StopReason};
