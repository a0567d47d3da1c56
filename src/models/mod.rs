//! Response models for the proxy API
//!
//! DTOs serialized into the bodies of the service endpoints. Data routes
//! return the upstream JSON untouched and need no model.

pub mod responses;

// Re-export commonly used types
pub use responses::{CacheHealth, CacheStatsResponse, ClearResponse, HealthResponse, RootResponse};
