//! Parameterized read-only query execution with row streaming.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags, Params, Row};

use crate::SnapshotResult;

/// Executes one parameterized query per call against a SQLite file.
///
/// Each call opens its own read-only connection, runs the statement inside
/// a single transaction, streams the rows one at a time to the caller's
/// handler and releases the connection on the way out, success or failure.
/// A handler error aborts the row loop and surfaces as the call's error.
#[derive(Debug, Clone)]
pub struct SqlExecutor {
    db_path: PathBuf,
}

impl SqlExecutor {
    pub fn new(db_path: impl AsRef<Path>) -> Self {
        SqlExecutor {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Run `sql` with positionally bound `params`, invoking `on_row` once
    /// per result row in statement order.
    pub fn for_each_row<P, F>(&self, sql: &str, params: P, mut on_row: F) -> SnapshotResult<()>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> SnapshotResult<()>,
    {
        let mut conn = Connection::open_with_flags(
            &self.db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(sql)?;
            let mut rows = stmt.query(params)?;
            while let Some(row) = rows.next()? {
                on_row(row)?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SnapshotError;

    fn fixture_db(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("fixture.sqlite");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "create table t (id integer primary key, label text);
             insert into t (id, label) values (1, 'one'), (2, 'two'), (3, 'three');",
        )
        .unwrap();
        path
    }

    #[test]
    fn test_streams_rows_in_statement_order() {
        let dir = tempfile::tempdir().unwrap();
        let executor = SqlExecutor::new(fixture_db(&dir));

        let mut ids = Vec::new();
        executor
            .for_each_row("select id from t order by id desc", [], |row| {
                ids.push(row.get::<_, i64>(0)?);
                Ok(())
            })
            .unwrap();
        assert_eq!(ids, [3, 2, 1]);
    }

    #[test]
    fn test_handler_error_aborts_query() {
        let dir = tempfile::tempdir().unwrap();
        let executor = SqlExecutor::new(fixture_db(&dir));

        let mut seen = 0;
        let result = executor.for_each_row("select id from t order by id", [], |_row| {
            seen += 1;
            if seen == 2 {
                return Err(SnapshotError::Message("handler gave up".to_string()));
            }
            Ok(())
        });
        assert!(matches!(result, Err(SnapshotError::Message(_))));
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_missing_db_is_an_error_not_a_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.sqlite");
        let executor = SqlExecutor::new(&path);

        let result = executor.for_each_row("select 1", [], |_row| Ok(()));
        assert!(result.is_err());
        assert!(!path.exists());
    }
}
