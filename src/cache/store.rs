//! Cache Store Module
//!
//! Main cache engine: a HashMap of expiring entries plus hit/miss counters,
//! guarded by one async mutex and mirrored to disk on every mutation.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::cache::{CacheEntry, CacheStats, Clock, PersistenceStore, StatsSnapshot, SystemClock};
use crate::config::Config;

/// Mutable state covered by the cache lock.
#[derive(Debug)]
struct CacheState<V> {
    entries: HashMap<String, CacheEntry<V>>,
    stats: CacheStats,
}

// == TTL Cache ==
/// Expiring, concurrency-safe key-value store with optional durability.
///
/// The cache is content-agnostic: `V` is any serializable payload, JSON by
/// default. Share it between tasks behind an `Arc`.
#[derive(Debug)]
pub struct TtlCache<V = Value> {
    /// Entries and counters
    state: Mutex<CacheState<V>>,
    /// On-disk mirror, possibly disabled
    persistence: PersistenceStore,
    /// Time source for expiry computations
    clock: Arc<dyn Clock>,
}

impl<V> TtlCache<V>
where
    V: Clone + Serialize + DeserializeOwned + Send,
{
    // == Constructor ==
    /// Creates a cache backed by `persistence`, hydrating it from disk.
    pub fn new(persistence: PersistenceStore) -> Self {
        Self::with_clock(persistence, Arc::new(SystemClock))
    }

    /// Creates a cache that reads time from `clock`.
    pub fn with_clock(persistence: PersistenceStore, clock: Arc<dyn Clock>) -> Self {
        persistence.prepare();
        let entries = persistence.load(clock.now());

        if persistence.is_enabled() {
            info!(
                "Cache initialized with persistence at {}",
                persistence.dir().display()
            );
        } else {
            info!("Cache initialized (in-memory only)");
        }

        Self {
            state: Mutex::new(CacheState {
                entries,
                stats: CacheStats::new(),
            }),
            persistence,
            clock,
        }
    }

    /// Creates a memory-only cache.
    pub fn in_memory() -> Self {
        Self::new(PersistenceStore::disabled())
    }

    /// Creates a cache from the `CACHE_DIR` / `CACHE_PERSIST` settings.
    pub fn from_config(config: &Config) -> Self {
        Self::new(PersistenceStore::new(&config.cache_dir, config.cache_persist))
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns the value if found and not expired. Expired entries are
    /// removed (and the removal persisted) and counted as misses.
    pub async fn get(&self, key: &str) -> Option<V> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        let now = self.clock.now();

        let expired = match state.entries.get(key) {
            Some(entry) if entry.is_fresh_at(now) => {
                let value = entry.value.clone();
                state.stats.record_hit();
                debug!(key, "cache hit");
                return Some(value);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            state.entries.remove(key);
            self.persistence.save(&state.entries).await;
            debug!(key, "cache miss (expired)");
        } else {
            debug!(key, "cache miss");
        }
        state.stats.record_miss();
        None
    }

    // == Set ==
    /// Stores a value for `ttl_seconds`, replacing any prior entry.
    ///
    /// A zero or negative TTL stores an entry that the next `get` treats as a
    /// miss.
    pub async fn set(&self, key: impl Into<String>, value: V, ttl_seconds: i64) {
        let key = key.into();
        let mut guard = self.state.lock().await;
        let entry = CacheEntry::new(value, ttl_seconds, self.clock.now());

        debug!(key = %key, ttl_seconds, "cache set");
        guard.entries.insert(key, entry);
        self.persistence.save(&guard.entries).await;
    }

    // == Clear ==
    /// Drops every entry and resets the hit/miss counters.
    pub async fn clear(&self) {
        let mut guard = self.state.lock().await;
        let removed = guard.entries.len();
        guard.entries.clear();
        guard.stats.reset();
        self.persistence.save(&guard.entries).await;
        info!("Cache cleared ({} entries removed)", removed);
    }

    // == Stats ==
    /// Returns a snapshot of the counters; never mutates them.
    pub async fn stats(&self) -> StatsSnapshot {
        let guard = self.state.lock().await;
        guard
            .stats
            .snapshot(guard.entries.len(), self.persistence.is_enabled())
    }

    // == Length ==
    /// Number of entries physically stored, expired ones included.
    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.entries.is_empty()
    }

    pub fn persistence_enabled(&self) -> bool {
        self.persistence.is_enabled()
    }
}
