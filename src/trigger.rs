//! Fire-and-forget background trigger for the startup snapshot.

use std::thread::{self, JoinHandle};

use tracing::error;

use crate::store::BuildStore;
use crate::trace::SnapshotRunner;

/// Spawn the startup snapshot on its own named thread.
///
/// Fire-and-forget: the snapshot's own failures are logged inside
/// `SnapshotRunner::run` and never reach the caller, and the caller is
/// free to drop the returned handle — nothing joins it during host
/// startup. Only the spawn itself can fail, and that too is logged,
/// never raised.
pub fn spawn_startup_snapshot<S>(
    runner: SnapshotRunner<S>,
    b1: i64,
    b2: i64,
) -> Option<JoinHandle<()>>
where
    S: BuildStore + Send + 'static,
{
    let spawned = thread::Builder::new()
        .name("snapshot-startup".to_string())
        .spawn(move || runner.run(b1, b2));
    match spawned {
        Ok(handle) => Some(handle),
        Err(e) => {
            error!(error = %e, "failed to spawn startup snapshot thread");
            None
        }
    }
}
