//! Detached background-refresh process.

use std::process::{Command, Stdio};

use droplet_core::refresh::BackgroundSpawner;

/// Re-invokes the current executable with the hidden `background-refresh`
/// subcommand, detached from this process's stdio. Spawn failures are
/// logged and dropped; the next stale search will try again.
pub struct ProcessSpawner;

impl BackgroundSpawner for ProcessSpawner {
    fn spawn_refresh(&self) {
        let exe = match std::env::current_exe() {
            Ok(exe) => exe,
            Err(err) => {
                tracing::warn!(error = %err, "cannot locate own executable, skipping background refresh");
                return;
            }
        };

        let spawned = Command::new(exe)
            .arg("background-refresh")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => {
                // Deliberately not waited on; the child outlives this run.
                tracing::debug!(pid = child.id(), "background refresh spawned");
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to spawn background refresh");
            }
        }
    }
}
