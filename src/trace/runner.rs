//! The snapshot runner: drives one build-range diagnostic session.

use std::path::PathBuf;

use rusqlite::params;
use tracing::{error, info};

use crate::db::schema::{PersistedBuildStateRow, PersistedTestStatusRow};
use crate::db::SqlExecutor;
use crate::store::{BuildHandle, BuildStore};
use crate::trace::sink::TraceSink;
use crate::{SnapshotError, SnapshotResult};

/// Fixed file name of the trace artifact; each session overwrites it.
pub const SNAPSHOT_LOG_NAME: &str = "build-snapshot.log";

const SEPARATOR: &str = "------------";

/// Hard cap on emitted predecessor entries, against unbounded chains.
const PREDECESSOR_LIMIT: usize = 8;

/// Statuses greater than 2 denote failing-class test results.
const FAILED_TESTS_SQL: &str = "select ti.test_name_id, ti.test_id, ti.status \
     from test_info ti where ti.build_id = ?1 and ti.status > 2";

const BUILD_STATE_SQL: &str = "select bs.build_id, bs.modification_id, bs.branch_name, \
     bs.is_deleted, bs.is_canceled, bs.is_personal \
     from build_state bs where bs.build_type_id = ?1 and \
     bs.build_id between ?2 and ?3 order by bs.build_id desc";

/// Runs one diagnostic snapshot over two builds.
///
/// The only observable effect is the contents of the trace file. `run`
/// never propagates an error: every failure is reported once to the
/// operational log and swallowed, and the sink is closed regardless of
/// which step failed — a mid-section failure leaves a truncated section
/// behind rather than no section.
pub struct SnapshotRunner<S: BuildStore> {
    store: S,
    executor: SqlExecutor,
    log_path: PathBuf,
}

impl<S: BuildStore> SnapshotRunner<S> {
    pub fn new(store: S, executor: SqlExecutor, log_dir: impl Into<PathBuf>) -> Self {
        SnapshotRunner {
            store,
            executor,
            log_path: log_dir.into().join(SNAPSHOT_LOG_NAME),
        }
    }

    /// Path of the trace file this runner writes.
    pub fn log_path(&self) -> &std::path::Path {
        &self.log_path
    }

    /// Take a snapshot of builds `b1` and `b2`, in that order.
    pub fn run(&self, b1: i64, b2: i64) {
        info!(b1, b2, path = %self.log_path.display(), "writing build-range snapshot");
        let mut sink = match TraceSink::open(&self.log_path) {
            Ok(sink) => sink,
            Err(e) => {
                error!(error = %e, "failed to open snapshot trace file");
                return;
            }
        };
        if let Err(e) = self.write_snapshot(&mut sink, b1, b2) {
            error!(b1, b2, error = %e, "snapshot failed");
        }
        sink.close();
    }

    fn write_snapshot(&self, sink: &mut TraceSink, b1: i64, b2: i64) -> SnapshotResult<()> {
        sink.write_line(&format!(
            "=================== Snapshot data between {b1} and {b2} ==========================="
        ))?;

        let h1 = self
            .store
            .resolve_build(b1)
            .ok_or(SnapshotError::BuildNotFound(b1))?;
        let h2 = self
            .store
            .resolve_build(b2)
            .ok_or(SnapshotError::BuildNotFound(b2))?;

        self.build_section(sink, &h1)?;
        sink.write_line(SEPARATOR)?;
        sink.write_line(SEPARATOR)?;

        self.build_section(sink, &h2)?;
        sink.write_line(SEPARATOR)?;
        sink.write_line(SEPARATOR)?;

        self.between_builds_section(sink, &h1, &h2)
    }

    fn build_section(&self, sink: &mut TraceSink, handle: &BuildHandle) -> SnapshotResult<()> {
        self.failed_tests_from_model(sink, handle)?;
        self.failed_tests_from_store(sink, handle)?;
        self.builds_before(sink, handle)
    }

    /// Failed tests as the in-memory model reports them, in model order.
    fn failed_tests_from_model(
        &self,
        sink: &mut TraceSink,
        handle: &BuildHandle,
    ) -> SnapshotResult<()> {
        sink.write_line(&format!("Failed tests from build {handle}"))?;
        sink.write_line(SEPARATOR)?;
        for test in handle.failed_tests() {
            sink.write_line(&format!(
                "{},{},{},{},{}",
                test.test_name, test.test_id, test.test_name_id, test.is_new_failure, test.test_run_id
            ))?;
        }
        sink.write_line(SEPARATOR)?;
        Ok(())
    }

    /// Failing-class rows of the persisted test-info relation for one build.
    fn failed_tests_from_store(
        &self,
        sink: &mut TraceSink,
        handle: &BuildHandle,
    ) -> SnapshotResult<()> {
        sink.write_line(&format!("Failed tests table from build {handle}"))?;
        sink.write_line(SEPARATOR)?;
        sink.write_line("ti.test_name_id, ti.test_id, ti.status")?;
        self.executor
            .for_each_row(FAILED_TESTS_SQL, params![handle.build_id], |row| {
                let status = PersistedTestStatusRow::from_row(row)?;
                sink.write_line(&status.trace_line())
            })?;
        sink.write_line(SEPARATOR)?;
        Ok(())
    }

    fn builds_before(&self, sink: &mut TraceSink, handle: &BuildHandle) -> SnapshotResult<()> {
        sink.write_line(&format!("Builds before {handle}"))?;
        sink.write_line(SEPARATOR)?;
        for ordered in handle.predecessors_in_order().iter().take(PREDECESSOR_LIMIT) {
            sink.write_line(&ordered.to_string())?;
        }
        sink.write_line(SEPARATOR)?;
        Ok(())
    }

    /// Persisted build-state rows between the two builds, build_id descending.
    ///
    /// The range is bound literally as `h1.build_id - 1 .. h2.build_id + 1`:
    /// when h1's id exceeds h2's the BETWEEN predicate is inverted and the
    /// section is legitimately empty.
    fn between_builds_section(
        &self,
        sink: &mut TraceSink,
        h1: &BuildHandle,
        h2: &BuildHandle,
    ) -> SnapshotResult<()> {
        sink.write_line(SEPARATOR)?;
        sink.write_line(
            "bs.build_id, bs.modification_id, bs.branch_name, bs.is_deleted, bs.is_canceled, bs.is_personal",
        )?;
        self.executor.for_each_row(
            BUILD_STATE_SQL,
            params![h1.build_type_id, h1.build_id - 1, h2.build_id + 1],
            |row| {
                let state = PersistedBuildStateRow::from_row(row)?;
                sink.write_line(&state.trace_line())
            },
        )
    }
}
