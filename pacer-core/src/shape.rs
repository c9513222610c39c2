//! Load shape abstraction polled by a load engine

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Target state a load engine should converge toward
///
/// `target_users` is absolute, not a delta: receiving the same value twice asks for
/// no additional ramping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeCommand {
    /// Desired number of concurrent virtual users
    pub target_users: i64,

    /// Maximum users per second to add or remove while ramping
    pub spawn_rate: f64,
}

impl ShapeCommand {
    pub fn new(target_users: i64, spawn_rate: f64) -> Self {
        Self {
            target_users,
            spawn_rate,
        }
    }
}

/// A time-varying load profile
pub trait LoadShape: Send + Sync {
    /// Command for the given elapsed run time, or `None` to end the run
    fn tick(&self, elapsed_seconds: f64) -> Option<ShapeCommand>;

    /// Total run length, when the shape has one
    fn time_limit(&self) -> Option<Duration> {
        None
    }
}
