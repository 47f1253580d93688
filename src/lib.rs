//! Build-range diagnostic snapshot tool.
//!
//! Given two build identifiers from a CI server, correlates the in-memory
//! build-result model with the persisted relational records and writes a
//! structured, line-oriented trace to a dedicated log file. Two thin
//! triggers drive the same snapshot runner: an on-demand command taking the
//! two identifiers explicitly, and a startup hook that fires a detached
//! background snapshot using configured default identifiers.

pub mod config;
pub mod db;
pub mod snapshot_cmd;
pub mod startup_cmd;
pub mod store;
pub mod trace;
pub mod trigger;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("build {0} not found")]
    BuildNotFound(i64),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Sql(#[from] rusqlite::Error),
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub type SnapshotResult<T> = Result<T, SnapshotError>;
