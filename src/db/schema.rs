//! Row projections for the two relations the snapshot queries, plus
//! reference DDL used by integration tests to build fixture databases.

use rusqlite::Row;

/// Failing-test projection of the `test_info` relation.
///
/// Independent of the in-memory model's failed-test list and not
/// guaranteed consistent with it; surfacing that divergence is what the
/// snapshot is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTestStatusRow {
    pub test_name_id: i64,
    pub test_id: i64,
    pub status: i32,
}

impl PersistedTestStatusRow {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(PersistedTestStatusRow {
            test_name_id: row.get(0)?,
            test_id: row.get(1)?,
            status: row.get(2)?,
        })
    }

    /// Comma-joined trace line, fields verbatim and unescaped.
    pub fn trace_line(&self) -> String {
        format!("{},{},{}", self.test_name_id, self.test_id, self.status)
    }
}

/// One persisted build-state record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBuildStateRow {
    pub build_id: i64,
    pub modification_id: i64,
    pub branch_name: Option<String>,
    pub is_deleted: bool,
    pub is_canceled: bool,
    pub is_personal: bool,
}

impl PersistedBuildStateRow {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(PersistedBuildStateRow {
            build_id: row.get(0)?,
            modification_id: row.get(1)?,
            branch_name: row.get(2)?,
            is_deleted: row.get(3)?,
            is_canceled: row.get(4)?,
            is_personal: row.get(5)?,
        })
    }

    /// Comma-joined trace line; a NULL branch renders as the empty string.
    pub fn trace_line(&self) -> String {
        format!(
            "{},{},{},{},{},{}",
            self.build_id,
            self.modification_id,
            self.branch_name.as_deref().unwrap_or(""),
            self.is_deleted,
            self.is_canceled,
            self.is_personal
        )
    }
}

/// DDL for the relations touched by the fixed snapshot queries.
pub const TEST_INFO_DDL: &str = "create table if not exists test_info (
    build_id integer not null,
    test_id integer not null,
    test_name_id integer not null,
    status integer not null
)";

pub const BUILD_STATE_DDL: &str = "create table if not exists build_state (
    build_id integer not null,
    build_type_id text not null,
    modification_id integer not null,
    branch_name text,
    is_deleted integer not null default 0,
    is_canceled integer not null default 0,
    is_personal integer not null default 0
)";
