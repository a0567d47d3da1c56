//! Cache Statistics Module
//!
//! Tracks lookup hits and misses and renders the monitoring snapshot.

use serde::Serialize;

// == Cache Stats ==
/// Process-lifetime lookup counters, reset by an explicit clear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups that returned a non-expired value
    pub hits: u64,
    /// Lookups that found no entry or an expired one
    pub misses: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Hit rate as a percentage string with two decimals, e.g. `"66.67%"`.
    pub fn hit_rate_percent(&self) -> String {
        format!("{:.2}%", self.hit_rate() * 100.0)
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Reset ==
    /// Zeroes both counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Builds the read-only snapshot exposed to monitoring.
    pub fn snapshot(&self, entries: usize, persistence_enabled: bool) -> StatsSnapshot {
        StatsSnapshot {
            entries,
            hits: self.hits,
            misses: self.misses,
            hit_rate: self.hit_rate_percent(),
            persistence_enabled,
        }
    }
}

// == Stats Snapshot ==
/// Point-in-time view of the cache, serialized verbatim by `/cache/stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    /// Entries physically stored (may include expired ones not yet reclaimed)
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    /// Percentage string, `"0.00%"` when no lookups occurred
    pub hit_rate: String,
    pub persistence_enabled: bool,
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
        assert_eq!(stats.hit_rate_percent(), "0.00%");
    }

    #[test]
    fn test_hit_rate_all_hits() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        assert_eq!(stats.hit_rate(), 1.0);
        assert_eq!(stats.hit_rate_percent(), "100.00%");
    }

    #[test]
    fn test_hit_rate_all_misses() {
        let mut stats = CacheStats::new();
        stats.record_miss();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_two_thirds() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate_percent(), "66.67%");
    }

    #[test]
    fn test_reset() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();
        stats.reset();
        assert_eq!(stats, CacheStats::new());
    }

    #[test]
    fn test_snapshot_serialize() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();

        let json = serde_json::to_value(stats.snapshot(4, true)).unwrap();
        assert_eq!(json["entries"], 4);
        assert_eq!(json["hits"], 1);
        assert_eq!(json["misses"], 1);
        assert_eq!(json["hit_rate"], "50.00%");
        assert_eq!(json["persistence_enabled"], true);
    }
}
