//! On-demand trigger: snapshot two explicitly named builds.

use std::path::Path;

use crate::config;
use crate::db::SqlExecutor;
use crate::trace::SnapshotRunner;
use crate::SnapshotResult;

/// Load the host configuration and run one snapshot synchronously.
///
/// Errors here are configuration errors only; once the runner starts, its
/// failures go to the operational log and the command still succeeds with
/// whatever trace the runner managed to write.
pub fn run(config_path: &Path, b1: i64, b2: i64) -> SnapshotResult<()> {
    let (config, store) = config::load_config(config_path)?;
    std::fs::create_dir_all(&config.log_dir)?;

    let runner = SnapshotRunner::new(store, SqlExecutor::new(&config.db_path), config.log_dir);
    runner.run(b1, b2);
    println!("snapshot written to {}", runner.log_path().display());
    Ok(())
}
