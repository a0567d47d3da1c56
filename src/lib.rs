//! Paddock - A read-through caching proxy for motorsport statistics
//!
//! Serves schedules, standings and race results to a dashboard, caching
//! upstream responses with per-entry TTLs and optional disk persistence.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod upstream;

pub use api::AppState;
pub use cache::TtlCache;
pub use config::Config;
