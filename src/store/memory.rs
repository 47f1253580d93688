//! In-memory build store.

use std::collections::HashMap;

use super::traits::{BuildHandle, BuildStore};

/// Build store backed by a map of pre-resolved handles.
///
/// Serves as the host adapter for the standalone tool (populated from the
/// config file's build model) and as the store implementation in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBuildStore {
    builds: HashMap<i64, BuildHandle>,
}

impl InMemoryBuildStore {
    pub fn new() -> Self {
        InMemoryBuildStore::default()
    }

    /// Register a build under its own identifier.
    pub fn with_build(mut self, handle: BuildHandle) -> Self {
        self.builds.insert(handle.build_id, handle);
        self
    }

    pub fn insert(&mut self, handle: BuildHandle) {
        self.builds.insert(handle.build_id, handle);
    }

    pub fn len(&self) -> usize {
        self.builds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builds.is_empty()
    }
}

impl BuildStore for InMemoryBuildStore {
    fn resolve_build(&self, id: i64) -> Option<BuildHandle> {
        self.builds.get(&id).cloned()
    }
}
