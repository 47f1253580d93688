//! Build store trait and the build-snapshot data types it hands out.

use std::fmt;

use serde::Deserialize;

/// Read contract of the host's build store.
///
/// Resolution happens once per snapshot; the returned handle is an
/// immutable view of the build's state at resolution time.
pub trait BuildStore {
    /// Resolve a numeric build identifier, or `None` if it maps to nothing.
    fn resolve_build(&self, id: i64) -> Option<BuildHandle>;
}

/// One failed test as reported by the in-memory build-result model.
#[derive(Debug, Clone)]
pub struct TestFailureRecord {
    pub test_name: String,
    pub test_id: i64,
    pub test_name_id: i64,
    pub is_new_failure: bool,
    pub test_run_id: i32,
}

/// A predecessor build in the build-type's ordering chain.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderedBuildRef {
    pub build_id: i64,
    pub build_type_id: String,
}

impl fmt::Display for OrderedBuildRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "build {} ({})", self.build_id, self.build_type_id)
    }
}

/// A resolved build: identifier, build-type, failed tests and the
/// predecessor chain, all materialized at resolution time.
#[derive(Debug, Clone)]
pub struct BuildHandle {
    pub build_id: i64,
    pub build_type_id: String,
    failed_tests: Vec<TestFailureRecord>,
    predecessors: Vec<OrderedBuildRef>,
}

impl BuildHandle {
    pub fn new(build_id: i64, build_type_id: impl Into<String>) -> Self {
        BuildHandle {
            build_id,
            build_type_id: build_type_id.into(),
            failed_tests: Vec::new(),
            predecessors: Vec::new(),
        }
    }

    /// Add a failed test to the handle's short statistics.
    pub fn with_failed_test(mut self, test: TestFailureRecord) -> Self {
        self.failed_tests.push(test);
        self
    }

    /// Set the predecessor chain, most recent first.
    pub fn with_predecessors(mut self, predecessors: Vec<OrderedBuildRef>) -> Self {
        self.predecessors = predecessors;
        self
    }

    /// Failed tests in the order the model reports them (not re-sorted).
    pub fn failed_tests(&self) -> &[TestFailureRecord] {
        &self.failed_tests
    }

    /// Builds ordered before this one, per the build-type's ordering support.
    pub fn predecessors_in_order(&self) -> &[OrderedBuildRef] {
        &self.predecessors
    }
}

impl fmt::Display for BuildHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.build_type_id, self.build_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_display_names_type_and_id() {
        let handle = BuildHandle::new(42, "Bt7");
        assert_eq!(handle.to_string(), "Bt7#42");
    }

    #[test]
    fn test_ordered_build_display() {
        let ordered = OrderedBuildRef {
            build_id: 99,
            build_type_id: "Bt7".to_string(),
        };
        assert_eq!(ordered.to_string(), "build 99 (Bt7)");
    }

    #[test]
    fn test_failed_tests_preserve_insertion_order() {
        let handle = BuildHandle::new(1, "Bt1")
            .with_failed_test(TestFailureRecord {
                test_name: "b".to_string(),
                test_id: 2,
                test_name_id: 20,
                is_new_failure: false,
                test_run_id: 1,
            })
            .with_failed_test(TestFailureRecord {
                test_name: "a".to_string(),
                test_id: 1,
                test_name_id: 10,
                is_new_failure: true,
                test_run_id: 2,
            });
        let names: Vec<_> = handle.failed_tests().iter().map(|t| t.test_name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
    }
}
