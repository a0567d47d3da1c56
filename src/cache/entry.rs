//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use chrono::{DateTime, Duration, Utc};

/// Largest TTL honoured, in seconds (roughly a century). Longer TTLs are clamped.
pub const MAX_TTL_SECONDS: i64 = 100 * 365 * 24 * 60 * 60;

// == Cache Entry ==
/// A stored value together with its absolute expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Instant at which the entry stops being valid
    pub expires_at: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry that expires `ttl_seconds` after `now`.
    ///
    /// A zero or negative TTL produces an entry that is already expired.
    pub fn new(value: V, ttl_seconds: i64, now: DateTime<Utc>) -> Self {
        Self {
            value,
            expires_at: expiry_after(now, ttl_seconds),
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired at `now`.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`, so it
    /// is never served at the exact instant its TTL window closes.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Inverse of [`CacheEntry::is_expired_at`].
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_expired_at(now)
    }
}

// == Utility Functions ==
/// Computes `now + ttl_seconds`, clamping the TTL to [`MAX_TTL_SECONDS`].
pub fn expiry_after(now: DateTime<Utc>, ttl_seconds: i64) -> DateTime<Utc> {
    let ttl = ttl_seconds.clamp(-MAX_TTL_SECONDS, MAX_TTL_SECONDS);
    now.checked_add_signed(Duration::seconds(ttl))
        .unwrap_or(now)
}
