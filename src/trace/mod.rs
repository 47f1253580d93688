//! Diagnostic trace output: the line-oriented sink and the snapshot runner.

pub mod runner;
pub mod sink;

pub use runner::{SnapshotRunner, SNAPSHOT_LOG_NAME};
pub use sink::TraceSink;
