//! Core types for pacer
//!
//! A [`RateSchedule`] is a pre-recorded trace of target concurrency values, one per
//! second of run time. The [`RateScheduleDriver`] turns it into the sequence of
//! [`ShapeCommand`]s a load engine polls once per tick, and reports `None` once the
//! trace is exhausted.
//!
//! [`ConstantPacing`] is the per-user wait calculator for engines that issue real
//! requests behind the runtime's user pool seam.

pub mod driver;
pub mod error;
pub mod pacing;
pub mod schedule;
pub mod shape;

pub use driver::{DriverInitError, RateScheduleDriver};
pub use error::{ConfigurationError, ScheduleLoadError};
pub use pacing::ConstantPacing;
pub use schedule::{RateSchedule, ScheduleSummary};
pub use shape::{LoadShape, ShapeCommand};
