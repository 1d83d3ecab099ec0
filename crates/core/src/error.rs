//! Unified error types for droplet-core.

/// Errors from the file-backed cache and the refresh marker.
///
/// A missing, stale or unparseable cache file is never an error; reads
/// report those as a plain miss. Only failures to persist surface here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Writing a cache file failed.
    #[error("cache write failed for {kind}: {source}")]
    CacheWrite {
        kind: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Serializing a cache payload failed.
    #[error("cache serialize failed for {kind}: {source}")]
    CacheSerialize {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Updating the refresh marker failed.
    #[error("refresh marker update failed: {0}")]
    Marker(#[source] std::io::Error),
}
