//! Cache staleness decisions and background refresh coordination.
//!
//! The interactive path never refreshes inline; it only decides whether a
//! refresh is due, debounces repeated triggers through a marker file, and
//! hands the actual work to a fire-and-forget spawner. The marker records
//! when a refresh was *requested*, not when one completed; only its age is
//! ever consulted.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::cache::FileCache;
use crate::error::Error;
use crate::models::ResourceKind;

/// Minimum time between two background-refresh requests. A second trigger
/// inside the window is assumed to race a refresh already in flight.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_secs(60);

const MARKER_FILE: &str = "background_refresh_timestamp.txt";

/// Detached execution of one full mirror refresh. Implementations must
/// return immediately; the caller never observes completion or failure.
pub trait BackgroundSpawner {
    fn spawn_refresh(&self);
}

/// Timestamp file recording the last background-refresh request.
#[derive(Debug, Clone)]
pub struct RefreshMarker {
    path: PathBuf,
}

impl RefreshMarker {
    pub fn in_dir(dir: &Path) -> Self {
        Self { path: dir.join(MARKER_FILE) }
    }

    /// Record "a refresh was requested now". The content is an opaque
    /// timestamp string; only the file's mtime is read back.
    pub fn touch(&self) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(Error::Marker)?;
        }
        fs::write(&self.path, chrono::Utc::now().to_rfc3339()).map_err(Error::Marker)
    }

    pub fn age(&self) -> Option<Duration> {
        let modified = fs::metadata(&self.path).ok()?.modified().ok()?;
        Some(SystemTime::now().duration_since(modified).unwrap_or_default())
    }

    /// True while the last request is younger than `window`.
    pub fn recently_triggered(&self, window: Duration) -> bool {
        self.age().is_some_and(|age| age < window)
    }
}

/// True when the mirrored payload is absent or at least `interval` old.
pub fn should_refresh(age: Option<Duration>, interval: Duration) -> bool {
    match age {
        Some(age) => age >= interval,
        None => true,
    }
}

/// The coordinator: check staleness, debounce, mark, spawn.
///
/// Returns whether a refresh was actually requested. A failed marker write
/// is logged but does not suppress the request; the marker is a cooperative
/// heuristic, not a lock.
pub fn maybe_refresh(
    cache: &FileCache,
    marker: &RefreshMarker,
    spawner: &dyn BackgroundSpawner,
    interval: Duration,
) -> bool {
    if !should_refresh(cache.age(ResourceKind::Bookmarks), interval) {
        return false;
    }
    if marker.recently_triggered(DEBOUNCE_WINDOW) {
        tracing::debug!("background refresh already requested recently, skipping");
        return false;
    }
    if let Err(err) = marker.touch() {
        tracing::warn!(error = %err, "failed to update refresh marker");
    }
    tracing::info!("bookmark mirror is stale, requesting background refresh");
    spawner.spawn_refresh();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingSpawner {
        calls: Cell<usize>,
    }

    impl CountingSpawner {
        fn new() -> Self {
            Self { calls: Cell::new(0) }
        }
    }

    impl BackgroundSpawner for CountingSpawner {
        fn spawn_refresh(&self) {
            self.calls.set(self.calls.get() + 1);
        }
    }

    #[test]
    fn test_should_refresh_when_cache_is_absent() {
        assert!(should_refresh(None, Duration::from_secs(60)));
    }

    #[test]
    fn test_should_refresh_is_inclusive_at_the_interval() {
        let interval = Duration::from_secs(60);
        assert!(!should_refresh(Some(Duration::from_secs(59)), interval));
        assert!(should_refresh(Some(interval), interval));
        assert!(should_refresh(Some(Duration::from_secs(61)), interval));
    }

    #[test]
    fn test_marker_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let marker = RefreshMarker::in_dir(dir.path());
        assert!(marker.age().is_none());
        assert!(!marker.recently_triggered(DEBOUNCE_WINDOW));

        marker.touch().unwrap();
        assert!(marker.recently_triggered(DEBOUNCE_WINDOW));
        assert!(!marker.recently_triggered(Duration::ZERO));
    }

    #[test]
    fn test_two_triggers_within_the_window_spawn_once() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path());
        let marker = RefreshMarker::in_dir(dir.path());
        let spawner = CountingSpawner::new();
        let interval = Duration::from_secs(3600);

        // No bookmark cache at all: stale, so the first trigger spawns.
        assert!(maybe_refresh(&cache, &marker, &spawner, interval));
        // Still stale, but the marker is fresh: debounced.
        assert!(!maybe_refresh(&cache, &marker, &spawner, interval));
        assert_eq!(spawner.calls.get(), 1);
    }

    #[test]
    fn test_fresh_cache_does_not_trigger() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path());
        cache.write::<crate::models::Bookmark>(ResourceKind::Bookmarks, &[]).unwrap();
        let marker = RefreshMarker::in_dir(dir.path());
        let spawner = CountingSpawner::new();

        assert!(!maybe_refresh(&cache, &marker, &spawner, Duration::from_secs(3600)));
        assert_eq!(spawner.calls.get(), 0);
        // And the marker stays untouched.
        assert!(marker.age().is_none());
    }
}
