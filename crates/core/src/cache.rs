//! File-backed cache store with age-aware read policies.
//!
//! One JSON file per mirrored resource, all sharing the `{"items": [...]}`
//! envelope the remote list endpoints use. Freshness is derived from the
//! backing file's modification time only; no metadata is embedded in the
//! payload. Writes go to a temp file in the same directory and are renamed
//! into place, so a concurrent reader sees either the old or the new
//! complete file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::ResourceKind;

/// How much to trust an existing cache file when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadPolicy {
    /// Use whatever is stored, regardless of age. An absent file is a miss.
    Trust,
    /// Use the stored payload only while it is strictly younger than the
    /// given age.
    Check(Duration),
    /// Never use the stored payload; the caller refetches.
    Force,
}

/// Envelope shared by cache files and the remote list endpoints.
///
/// A missing or null `items` field is a cache miss, not an error.
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemsEnvelope<T> {
    pub items: Option<Vec<T>>,
}

#[derive(Serialize)]
struct ItemsRef<'a, T> {
    items: &'a [T],
}

/// Keyed JSON-blob persistence rooted at one cache directory.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, kind: ResourceKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    /// Age of the stored payload, from the backing file's mtime.
    /// `None` when the file does not exist.
    pub fn age(&self, kind: ResourceKind) -> Option<Duration> {
        let modified = fs::metadata(self.path(kind)).ok()?.modified().ok()?;
        Some(SystemTime::now().duration_since(modified).unwrap_or_default())
    }

    /// Read the stored payload under `policy`. Every abnormal condition
    /// (absent file, stale file, unreadable or malformed content) is a
    /// miss; malformed content is additionally logged.
    pub fn read<T: DeserializeOwned>(&self, kind: ResourceKind, policy: ReadPolicy) -> Option<Vec<T>> {
        match policy {
            ReadPolicy::Force => return None,
            ReadPolicy::Check(max_age) => {
                if self.age(kind)? >= max_age {
                    return None;
                }
            }
            ReadPolicy::Trust => {}
        }

        let raw = fs::read(self.path(kind)).ok()?;
        match serde_json::from_slice::<ItemsEnvelope<T>>(&raw) {
            Ok(envelope) => envelope.items,
            Err(err) => {
                tracing::warn!(kind = %kind, error = %err, "malformed cache file, treating as miss");
                None
            }
        }
    }

    /// Replace the stored payload wholesale, atomically with respect to
    /// concurrent readers.
    pub fn write<T: Serialize>(&self, kind: ResourceKind, items: &[T]) -> Result<(), Error> {
        let body = serde_json::to_vec(&ItemsRef { items })
            .map_err(|source| Error::CacheSerialize { kind: kind.name(), source })?;

        let io_err = |source| Error::CacheWrite { kind: kind.name(), source };
        fs::create_dir_all(&self.dir).map_err(io_err)?;

        let target = self.path(kind);
        let staging = target.with_extension("json.tmp");
        let mut file = fs::File::create(&staging).map_err(io_err)?;
        file.write_all(&body).map_err(io_err)?;
        drop(file);
        fs::rename(&staging, &target).map_err(io_err)?;
        Ok(())
    }
}
