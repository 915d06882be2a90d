//! Project time tracking: elapsed time between two `yyyy-MM-dd HH:mm`
//! timestamps, rendered in the largest sensible unit, plus a small SQLite
//! log of tracked spans.

pub mod config;
pub mod database;
pub mod error;
pub mod format;
pub mod logging;
pub mod timestamp;
pub mod tracker;

pub use error::{ElapsedError, Endpoint, Error, Result};
pub use tracker::ElapsedDurationTracker;
