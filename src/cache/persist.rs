//! Persistence Module
//!
//! Mirrors the cache contents to a single JSON file so entries survive a
//! process restart. Every failure here is logged and swallowed: the
//! in-memory map stays authoritative for the life of the process.
//!
//! Startup (`prepare`, `load`) is synchronous. `save` runs on the request
//! path and uses `tokio::fs` so a slow disk suspends the task rather than
//! blocking a runtime worker.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::fs as async_fs;
use tracing::{debug, info, warn};

use crate::cache::CacheEntry;
use crate::error::PersistError;

/// Name of the file owned by the store inside the cache directory.
pub const CACHE_FILE_NAME: &str = "cache_data.json";

// == On-Disk Layout ==
// { "cache": { "<key>": [<value>, "<expiry rfc3339>"], ... } }

#[derive(Serialize)]
struct SnapshotRef<'a, V> {
    cache: BTreeMap<&'a str, (&'a V, DateTime<Utc>)>,
}

#[derive(Deserialize)]
struct Snapshot<V> {
    cache: HashMap<String, (V, DateTime<Utc>)>,
}

// == Persistence Store ==
/// Optional on-disk mirror of the cache map.
#[derive(Debug, Clone)]
pub struct PersistenceStore {
    /// Directory holding the cache file
    dir: PathBuf,
    /// When false, `load` and `save` are no-ops
    enabled: bool,
}

impl PersistenceStore {
    /// Creates a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>, enabled: bool) -> Self {
        Self {
            dir: dir.into(),
            enabled,
        }
    }

    /// Creates a memory-only store.
    pub fn disabled() -> Self {
        Self::new(PathBuf::new(), false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the backing file.
    pub fn file_path(&self) -> PathBuf {
        self.dir.join(CACHE_FILE_NAME)
    }

    // == Prepare ==
    /// Creates the cache directory if it does not exist yet.
    pub fn prepare(&self) {
        if !self.enabled {
            return;
        }
        if let Err(e) = self.ensure_dir() {
            warn!("Failed to create cache directory: {}", e);
        }
    }

    // == Load ==
    /// Reads the backing file into a map, dropping entries expired at `now`.
    ///
    /// A missing file yields an empty map. A corrupt or unreadable file is
    /// logged and also yields an empty map.
    pub fn load<V: DeserializeOwned>(&self, now: DateTime<Utc>) -> HashMap<String, CacheEntry<V>> {
        if !self.enabled {
            return HashMap::new();
        }

        match self.try_load(now) {
            Ok(Some((entries, dropped))) => {
                info!(
                    "Loaded {} cache entries from disk (removed {} expired)",
                    entries.len(),
                    dropped
                );
                entries
            }
            Ok(None) => {
                debug!("No cache file at {}", self.file_path().display());
                HashMap::new()
            }
            Err(e) => {
                warn!("Failed to load cache from disk: {}", e);
                HashMap::new()
            }
        }
    }

    fn try_load<V: DeserializeOwned>(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Option<(HashMap<String, CacheEntry<V>>, usize)>, PersistError> {
        let path = self.file_path();
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(PersistError::Io { path, source }),
        };

        let snapshot: Snapshot<V> = serde_json::from_slice(&bytes)?;
        let total = snapshot.cache.len();

        let entries: HashMap<String, CacheEntry<V>> = snapshot
            .cache
            .into_iter()
            .map(|(key, (value, expires_at))| (key, CacheEntry { value, expires_at }))
            .filter(|(_, entry)| entry.is_fresh_at(now))
            .collect();

        let dropped = total - entries.len();
        Ok(Some((entries, dropped)))
    }

    // == Save ==
    /// Writes the full map to the backing file.
    pub async fn save<V: Serialize>(&self, entries: &HashMap<String, CacheEntry<V>>) {
        if !self.enabled {
            return;
        }

        let encoded = Self::encode(entries);
        let count = entries.len();

        let result = match encoded {
            Ok(bytes) => self.write(bytes).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => debug!("Persisted {} cache entries", count),
            Err(e) => warn!("Failed to save cache to disk: {}", e),
        }
    }

    fn encode<V: Serialize>(
        entries: &HashMap<String, CacheEntry<V>>,
    ) -> Result<Vec<u8>, PersistError> {
        let snapshot = SnapshotRef {
            cache: entries
                .iter()
                .map(|(key, entry)| (key.as_str(), (&entry.value, entry.expires_at)))
                .collect(),
        };
        Ok(serde_json::to_vec(&snapshot)?)
    }

    async fn write(&self, bytes: Vec<u8>) -> Result<(), PersistError> {
        async_fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| PersistError::Io {
                path: self.dir.clone(),
                source,
            })?;

        // Write to a sibling and rename so readers never see a half-written file
        let path = self.file_path();
        let tmp = path.with_extension("json.tmp");
        async_fs::write(&tmp, bytes)
            .await
            .map_err(|source| PersistError::Io {
                path: tmp.clone(),
                source,
            })?;
        async_fs::rename(&tmp, &path)
            .await
            .map_err(|source| PersistError::Io { path, source })
    }

    fn ensure_dir(&self) -> Result<(), PersistError> {
        fs::create_dir_all(&self.dir).map_err(|source| PersistError::Io {
            path: self.dir.clone(),
            source,
        })
    }
}
