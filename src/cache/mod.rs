//! Cache Module
//!
//! Provides the TTL cache behind every data route: expiring entries, hit/miss
//! statistics, an optional on-disk mirror and read-through orchestration.

mod clock;
mod entry;
mod persist;
mod read_through;
mod stats;
mod store;


// Re-export public types
#[cfg(test)]
pub use clock::ManualClock;
pub use clock::{Clock, SystemClock};
pub use entry::{expiry_after, CacheEntry, MAX_TTL_SECONDS};
pub use persist::{PersistenceStore, CACHE_FILE_NAME};
pub use stats::{CacheStats, StatsSnapshot};
pub use store::TtlCache;
