//! Read-Through Module
//!
//! `get_or_compute`: the single entry point route handlers use to read data.
//! On a miss the producer runs outside the cache lock; only present values
//! are stored, so absences and failures are never cached.

use std::future::Future;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::cache::TtlCache;

impl<V> TtlCache<V>
where
    V: Clone + Serialize + DeserializeOwned + Send,
{
    // == Get Or Compute ==
    /// Returns the cached value for `key`, or runs `producer` and caches its
    /// result for `ttl_seconds`.
    ///
    /// - Hit: returns immediately, `producer` is not invoked.
    /// - Miss: `producer` is invoked exactly once. `Ok(Some(v))` is stored and
    ///   returned, `Ok(None)` is returned without being stored, and `Err(e)`
    ///   is propagated unchanged without being stored.
    ///
    /// Concurrent misses on the same key each run their own producer; the
    /// last one to finish wins.
    pub async fn get_or_compute<F, Fut, E>(
        &self,
        key: &str,
        producer: F,
        ttl_seconds: i64,
    ) -> Result<Option<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<V>, E>>,
    {
        if let Some(value) = self.get(key).await {
            return Ok(Some(value));
        }

        match producer().await {
            Ok(Some(value)) => {
                self.set(key, value.clone(), ttl_seconds).await;
                Ok(Some(value))
            }
            Ok(None) => {
                debug!(key, "producer returned no data, not caching");
                Ok(None)
            }
            Err(e) => {
                warn!(key, "producer failed, not caching");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ManualClock, PersistenceStore};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Barrier;

    #[derive(Debug, PartialEq)]
    struct Upstream502;

    fn manual_cache() -> (TtlCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::starting_now());
        let cache = TtlCache::with_clock(PersistenceStore::disabled(), clock.clone());
        (cache, clock)
    }

    #[tokio::test]
    async fn test_miss_invokes_producer_and_caches() {
        let (cache, _clock) = manual_cache();
        let calls = &AtomicUsize::new(0);

        for _ in 0..3 {
            let result = cache
                .get_or_compute(
                    "drivers:current",
                    move || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok::<_, Upstream502>(Some(json!(["norris"])))
                    },
                    86400,
                )
                .await;
            assert_eq!(result, Ok(Some(json!(["norris"]))));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let stats = cache.stats().await;
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 2);
    }

    #[tokio::test]
    async fn test_refetch_after_expiry() {
        let (cache, clock) = manual_cache();
        let calls = &AtomicUsize::new(0);

        let fetch = move || async move {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, Upstream502>(Some(json!(n)))
        };

        assert_eq!(cache.get_or_compute("race:last", fetch, 1800).await, Ok(Some(json!(0))));
        clock.advance_secs(1800);
        assert_eq!(cache.get_or_compute("race:last", fetch, 1800).await, Ok(Some(json!(1))));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_absence_is_not_cached() {
        let (cache, _clock) = manual_cache();
        let calls = &AtomicUsize::new(0);

        for _ in 0..2 {
            let result = cache
                .get_or_compute(
                    "race:2025:99",
                    move || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok::<Option<Value>, Upstream502>(None)
                    },
                    86400,
                )
                .await;
            assert_eq!(result, Ok(None));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let (cache, _clock) = manual_cache();

        let failed = cache
            .get_or_compute("standings:drivers", || async { Err(Upstream502) }, 3600)
            .await;
        assert_eq!(failed, Err(Upstream502));
        assert!(cache.is_empty().await);

        let recovered = cache
            .get_or_compute(
                "standings:drivers",
                || async { Ok::<_, Upstream502>(Some(json!([{"position": "1"}]))) },
                3600,
            )
            .await;
        assert_eq!(recovered, Ok(Some(json!([{"position": "1"}]))));
        assert_eq!(cache.get("standings:drivers").await, Some(json!([{"position": "1"}])));
    }

    #[tokio::test]
    async fn test_hit_skips_producer() {
        let (cache, _clock) = manual_cache();
        let calls = &AtomicUsize::new(0);
        cache.set("schedule:current", json!([]), 60).await;

        let result = cache
            .get_or_compute(
                "schedule:current",
                move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, Upstream502>(Some(json!(["fresh"])))
                },
                60,
            )
            .await;
        assert_eq!(result, Ok(Some(json!([]))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_slow_producer_does_not_block_other_reads() {
        let cache: Arc<TtlCache> = Arc::new(TtlCache::in_memory());
        cache.set("other", json!("ready"), 60).await;
        let gate = Arc::new(tokio::sync::Notify::new());
        let (started_tx, started_rx) = tokio::sync::oneshot::channel();

        let slow = {
            let cache = cache.clone();
            let gate = gate.clone();
            tokio::spawn(async move {
                cache
                    .get_or_compute(
                        "slow",
                        || async move {
                            let _ = started_tx.send(());
                            gate.notified().await;
                            Ok::<_, Upstream502>(Some(json!("late")))
                        },
                        60,
                    )
                    .await
            })
        };

        // Wait until the producer is in flight before reading another key
        started_rx.await.unwrap();
        let read = tokio::time::timeout(Duration::from_secs(1), cache.get("other")).await;
        assert_eq!(read.unwrap(), Some(json!("ready")));

        gate.notify_one();
        assert_eq!(slow.await.unwrap(), Ok(Some(json!("late"))));
    }

    #[tokio::test]
    async fn test_concurrent_misses_each_fetch() {
        let cache: Arc<TtlCache> = Arc::new(TtlCache::in_memory());
        let calls = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(2));

        let handles: Vec<_> = (0..2)
            .map(|i| {
                let cache = cache.clone();
                let calls = calls.clone();
                let barrier = barrier.clone();
                tokio::spawn(async move {
                    cache
                        .get_or_compute(
                            "drivers:all:stats",
                            || async move {
                                calls.fetch_add(1, Ordering::SeqCst);
                                // Both producers are in flight before either commits
                                barrier.wait().await;
                                Ok::<_, Upstream502>(Some(json!(i)))
                            },
                            60,
                        )
                        .await
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().unwrap().is_some());
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len().await, 1);
    }
}
