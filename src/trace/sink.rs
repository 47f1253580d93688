//! Line-oriented trace sink with a never-fail close.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::error;

use crate::{SnapshotError, SnapshotResult};

/// Append-only text sink owned for the duration of one snapshot session.
///
/// Lines are written in call order, each followed by a newline. `close`
/// flushes and releases the file; it is safe to call more than once, and
/// its own I/O failure is reported to the operational log rather than
/// returned — cleanup never raises.
#[derive(Debug)]
pub struct TraceSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl TraceSink {
    /// Open the sink, truncating any previous session's file.
    pub fn open(path: impl AsRef<Path>) -> SnapshotResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        Ok(TraceSink {
            path,
            writer: Some(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_line(&mut self, line: &str) -> SnapshotResult<()> {
        let writer = self.writer.as_mut().ok_or_else(|| {
            SnapshotError::Message(format!("trace sink {} already closed", self.path.display()))
        })?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    pub fn close(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            if let Err(e) = writer.flush() {
                error!(path = %self.path.display(), error = %e, "failed to flush trace sink");
            }
        }
    }
}

impl Drop for TraceSink {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_are_newline_terminated_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.log");

        let mut sink = TraceSink::open(&path).unwrap();
        sink.write_line("first").unwrap();
        sink.write_line("second").unwrap();
        sink.close();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }

    #[test]
    fn test_open_truncates_previous_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.log");
        std::fs::write(&path, "stale contents\n").unwrap();

        let mut sink = TraceSink::open(&path).unwrap();
        sink.write_line("fresh").unwrap();
        sink.close();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh\n");
    }

    #[test]
    fn test_close_is_idempotent_and_write_after_close_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.log");

        let mut sink = TraceSink::open(&path).unwrap();
        sink.write_line("only").unwrap();
        sink.close();
        sink.close();

        let result = sink.write_line("late");
        assert!(matches!(result, Err(SnapshotError::Message(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "only\n");
    }
}
