//! Foreground and background mirror refresh.

use droplet_core::AppConfig;

use crate::commands::open_mirror;
use crate::feedback::Feedback;
use crate::render;

/// Foreground refresh: re-fetch everything now and confirm.
pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let mut feedback = Feedback::new();
    match open_mirror(config) {
        Ok(mirror) => {
            mirror.refresh_all().await;
            feedback.push(render::notice(
                "Local caches have been refreshed",
                "The mirror now holds the latest bookmarks, collections and tags",
            ));
        }
        Err(err) => {
            tracing::warn!(error = %err, "cannot refresh without credentials");
            feedback.push(render::auth_notice());
        }
    }
    feedback.emit()
}

/// The detached worker behind the refresh coordinator. No UI exists back
/// here: without credentials it exits silently instead of prompting.
pub async fn run_background(config: &AppConfig) -> anyhow::Result<()> {
    let mirror = match open_mirror(config) {
        Ok(mirror) => mirror,
        Err(err) => {
            tracing::debug!(error = %err, "skipping background refresh, no usable credentials");
            return Ok(());
        }
    };
    mirror.refresh_all().await;
    Ok(())
}
