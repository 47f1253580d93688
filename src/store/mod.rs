//! Build store accessor: resolves build identifiers to in-memory snapshots.

pub mod memory;
pub mod traits;

pub use memory::InMemoryBuildStore;
pub use traits::{BuildHandle, BuildStore, OrderedBuildRef, TestFailureRecord};
