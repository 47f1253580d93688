//! Snapshot configuration and the TOML build-model loader.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::store::{BuildHandle, InMemoryBuildStore, OrderedBuildRef, TestFailureRecord};
use crate::{SnapshotError, SnapshotResult};

/// Fallback identifiers for the startup trigger when the config sets none.
const DEFAULT_BUILD1: i64 = 725290;
const DEFAULT_BUILD2: i64 = 725299;

/// Explicit configuration for one snapshot host.
///
/// Everything the runner needs is carried here; nothing is read from
/// ambient global state.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotConfig {
    /// Directory the trace file is written into.
    pub log_dir: PathBuf,
    /// SQLite file holding the persisted build history.
    pub db_path: PathBuf,
    /// Build ids used by the startup trigger.
    #[serde(default = "default_build1")]
    pub default_build1: i64,
    #[serde(default = "default_build2")]
    pub default_build2: i64,
}

fn default_build1() -> i64 {
    DEFAULT_BUILD1
}

fn default_build2() -> i64 {
    DEFAULT_BUILD2
}

#[derive(Debug, Deserialize)]
struct RawFailedTest {
    name: String,
    test_id: i64,
    test_name_id: i64,
    #[serde(default)]
    is_new_failure: bool,
    #[serde(default)]
    test_run_id: i32,
}

#[derive(Debug, Deserialize)]
struct RawBuild {
    id: i64,
    build_type_id: String,
    #[serde(default, rename = "failed_test")]
    failed_tests: Vec<RawFailedTest>,
    #[serde(default, rename = "predecessor")]
    predecessors: Vec<OrderedBuildRef>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(flatten)]
    config: SnapshotConfig,
    #[serde(default, rename = "build")]
    builds: Vec<RawBuild>,
}

/// Load the host configuration and the build model it declares.
///
/// The `[[build]]` tables describe the in-memory build store the way the
/// hosting server would supply it: per build, its type, its failed-test
/// short statistics and its predecessor chain.
pub fn load_config(path: &Path) -> SnapshotResult<(SnapshotConfig, InMemoryBuildStore)> {
    let text = std::fs::read_to_string(path)?;
    let raw: RawConfig = toml::from_str(&text)
        .map_err(|e| SnapshotError::Message(format!("bad config {}: {e}", path.display())))?;

    let mut store = InMemoryBuildStore::new();
    for build in raw.builds {
        let mut handle = BuildHandle::new(build.id, build.build_type_id);
        for test in build.failed_tests {
            handle = handle.with_failed_test(TestFailureRecord {
                test_name: test.name,
                test_id: test.test_id,
                test_name_id: test.test_name_id,
                is_new_failure: test.is_new_failure,
                test_run_id: test.test_run_id,
            });
        }
        store.insert(handle.with_predecessors(build.predecessors));
    }
    Ok((raw.config, store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::BuildStore;

    fn write_config(dir: &tempfile::TempDir, text: &str) -> PathBuf {
        let path = dir.path().join("snapshot.toml");
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_default_build_ids_fall_back_to_literals() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "log_dir = \"logs\"\ndb_path = \"ci.sqlite\"\n");

        let (config, store) = load_config(&path).unwrap();
        assert_eq!(config.default_build1, 725290);
        assert_eq!(config.default_build2, 725299);
        assert!(store.is_empty());
    }

    #[test]
    fn test_build_model_materializes_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
log_dir = "logs"
db_path = "ci.sqlite"
default_build1 = 100
default_build2 = 200

[[build]]
id = 100
build_type_id = "Bt7"

[[build.failed_test]]
name = "auth::login_times_out"
test_id = 11
test_name_id = 110
is_new_failure = true
test_run_id = 9

[[build.predecessor]]
build_id = 99
build_type_id = "Bt7"

[[build]]
id = 200
build_type_id = "Bt7"
"#,
        );

        let (config, store) = load_config(&path).unwrap();
        assert_eq!(config.default_build1, 100);
        assert_eq!(store.len(), 2);

        let handle = store.resolve_build(100).unwrap();
        assert_eq!(handle.failed_tests().len(), 1);
        assert_eq!(handle.failed_tests()[0].test_name, "auth::login_times_out");
        assert!(handle.failed_tests()[0].is_new_failure);
        assert_eq!(handle.predecessors_in_order().len(), 1);
        assert!(store.resolve_build(200).unwrap().failed_tests().is_empty());
    }

    #[test]
    fn test_malformed_config_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "log_dir = 3\n");

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("snapshot.toml"));
    }
}
