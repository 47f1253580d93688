//! Startup trigger: snapshot the configured default builds in the background.

use std::path::Path;

use crate::config;
use crate::db::SqlExecutor;
use crate::trace::SnapshotRunner;
use crate::{trigger, SnapshotResult};

/// Model the server-startup hook: spawn the snapshot detached with the
/// configured default build ids. The wait at the end is process-level glue
/// only, so the CLI host does not exit before its worker finishes.
pub fn run(config_path: &Path) -> SnapshotResult<()> {
    let (config, store) = config::load_config(config_path)?;
    std::fs::create_dir_all(&config.log_dir)?;

    let b1 = config.default_build1;
    let b2 = config.default_build2;
    let runner = SnapshotRunner::new(store, SqlExecutor::new(&config.db_path), config.log_dir);

    if let Some(handle) = trigger::spawn_startup_snapshot(runner, b1, b2) {
        let _ = handle.join();
    }
    Ok(())
}
