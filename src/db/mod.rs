//! Read-only access to the persisted relational store.

pub mod executor;
pub mod schema;

pub use executor::SqlExecutor;
pub use schema::{PersistedBuildStateRow, PersistedTestStatusRow};
