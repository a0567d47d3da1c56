//! Upstream Module
//!
//! Data producers invoked by the route layer on cache misses: the live
//! Ergast-compatible HTTP client, and the bundled mock tables used when
//! `USE_MOCK_DATA` is on.

mod client;
pub mod mock;

pub use client::{count_podiums, extract_first_race, extract_standings, ErgastClient, UpstreamError};

use crate::config::Config;

/// Where the route handlers get their data from.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Bundled reference tables, no cache involved
    Mock,
    /// Live upstream API, read through the cache
    Live(ErgastClient),
}

impl DataSource {
    /// Picks the source selected by `USE_MOCK_DATA`.
    pub fn from_config(config: &Config) -> Result<Self, UpstreamError> {
        if config.use_mock_data {
            Ok(DataSource::Mock)
        } else {
            let client = ErgastClient::new(&config.upstream_base_url, config.http_timeout)?;
            Ok(DataSource::Live(client))
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, DataSource::Mock)
    }

    /// Short label used by `/` and `/health`.
    pub fn mode(&self) -> &'static str {
        match self {
            DataSource::Mock => "mock",
            DataSource::Live(_) => "live",
        }
    }
}
