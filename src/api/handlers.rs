//! API Handlers
//!
//! HTTP request handlers for each proxy endpoint. Data handlers answer from
//! the mock tables in mock mode, and otherwise read through the cache with
//! the matching upstream fetch as producer.

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{CacheStatsResponse, ClearResponse, HealthResponse, RootResponse};
use crate::upstream::{mock, DataSource, ErgastClient, UpstreamError};

// == TTLs per data category (seconds) ==
/// Rosters, calendars, race results and career stats
pub const TTL_DAILY: i64 = 86_400;
/// Championship standings
pub const TTL_STANDINGS: i64 = 3_600;
/// Latest race results
pub const TTL_LAST_RACE: i64 = 1_800;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide cache
    pub cache: Arc<TtlCache>,
    /// Mock tables or live upstream client
    pub source: DataSource,
}

impl AppState {
    /// Creates a new AppState with the given cache and data source.
    pub fn new(cache: TtlCache, source: DataSource) -> Self {
        Self {
            cache: Arc::new(cache),
            source,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> std::result::Result<Self, UpstreamError> {
        let source = DataSource::from_config(config)?;
        Ok(Self::new(TtlCache::from_config(config), source))
    }

    /// Live upstream client, or `None` in mock mode.
    fn live(&self) -> Option<&ErgastClient> {
        match &self.source {
            DataSource::Mock => None,
            DataSource::Live(client) => Some(client),
        }
    }
}

/// Runs `producer` through the cache, mapping upstream failures to 502.
async fn read_through<F, Fut>(
    cache: &TtlCache,
    key: &str,
    resource: &str,
    ttl_seconds: i64,
    producer: F,
) -> Result<Option<Value>>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = std::result::Result<Option<Value>, UpstreamError>>,
{
    cache
        .get_or_compute(key, producer, ttl_seconds)
        .await
        .map_err(|e| ApiError::upstream(resource, e))
}

/// Handler for GET /
pub async fn root_handler(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse::new(state.source.is_mock()))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let stats = state.cache.stats().await;
    Json(HealthResponse::healthy(&stats, state.source.mode()))
}

/// Handler for GET /cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    Json(CacheStatsResponse::new(state.cache.stats().await))
}

/// Handler for POST /cache/clear
pub async fn cache_clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.cache.clear().await;
    Json(ClearResponse::new())
}

/// Handler for GET /drivers/current
pub async fn current_drivers_handler(State(state): State<AppState>) -> Result<Json<Value>> {
    let Some(client) = state.live() else {
        return Ok(Json(mock::drivers()));
    };
    let data = read_through(&state.cache, "drivers:current", "drivers", TTL_DAILY, || {
        client.current_drivers()
    })
    .await?;
    Ok(Json(data.unwrap_or_default()))
}

/// Handler for GET /constructors/current
pub async fn current_constructors_handler(State(state): State<AppState>) -> Result<Json<Value>> {
    let Some(client) = state.live() else {
        return Ok(Json(mock::constructors()));
    };
    let data = read_through(
        &state.cache,
        "constructors:current",
        "constructors",
        TTL_DAILY,
        || client.current_constructors(),
    )
    .await?;
    Ok(Json(data.unwrap_or_default()))
}

/// Handler for GET /standings/drivers
pub async fn driver_standings_handler(State(state): State<AppState>) -> Result<Json<Value>> {
    let Some(client) = state.live() else {
        return Ok(Json(mock::driver_standings()));
    };
    let data = read_through(
        &state.cache,
        "standings:drivers",
        "driverStandings",
        TTL_STANDINGS,
        || client.driver_standings(),
    )
    .await?;
    Ok(Json(data.unwrap_or_default()))
}

/// Handler for GET /standings/constructors
pub async fn constructor_standings_handler(State(state): State<AppState>) -> Result<Json<Value>> {
    let Some(client) = state.live() else {
        return Ok(Json(mock::constructor_standings()));
    };
    let data = read_through(
        &state.cache,
        "standings:constructors",
        "constructorStandings",
        TTL_STANDINGS,
        || client.constructor_standings(),
    )
    .await?;
    Ok(Json(data.unwrap_or_default()))
}

/// Handler for GET /schedule/current
pub async fn schedule_handler(State(state): State<AppState>) -> Result<Json<Value>> {
    let Some(client) = state.live() else {
        return Ok(Json(mock::schedule()));
    };
    let data = read_through(&state.cache, "schedule:current", "schedule", TTL_DAILY, || {
        client.current_schedule()
    })
    .await?;
    Ok(Json(data.unwrap_or_default()))
}

/// Handler for GET /race/last
///
/// Answers `null` before the first race of the season.
pub async fn last_race_handler(State(state): State<AppState>) -> Result<Json<Value>> {
    let Some(client) = state.live() else {
        return Ok(Json(mock::last_race()));
    };
    let data = read_through(&state.cache, "race:last", "last race", TTL_LAST_RACE, || {
        client.last_race()
    })
    .await?;
    Ok(Json(data.unwrap_or_default()))
}

/// Handler for GET /race/:season/:round
pub async fn race_result_handler(
    State(state): State<AppState>,
    Path((season, round)): Path<(String, String)>,
) -> Result<Json<Value>> {
    let data = match state.live() {
        None => mock::race_result(&season, &round),
        Some(client) => {
            read_through(
                &state.cache,
                &format!("race:{}:{}", season, round),
                "race result",
                TTL_DAILY,
                || client.race_result(&season, &round),
            )
            .await?
        }
    };

    data.map(Json).ok_or_else(|| {
        ApiError::NotFound(format!(
            "Results not available for race {}/{}",
            season, round
        ))
    })
}

/// Handler for GET /drivers/stats
pub async fn all_driver_stats_handler(State(state): State<AppState>) -> Result<Json<Value>> {
    let Some(client) = state.live() else {
        return Ok(Json(mock::all_driver_stats()));
    };
    let data = read_through(
        &state.cache,
        "drivers:all:stats",
        "all driver stats",
        TTL_DAILY,
        || client.all_driver_stats(),
    )
    .await?;
    Ok(Json(data.unwrap_or_default()))
}

/// Handler for GET /driver/:driver_id/stats
pub async fn driver_stats_handler(
    State(state): State<AppState>,
    Path(driver_id): Path<String>,
) -> Result<Json<Value>> {
    let Some(client) = state.live() else {
        return Ok(Json(mock::driver_stats(&driver_id)));
    };
    let data = read_through(
        &state.cache,
        &format!("driver:{}:stats", driver_id),
        "driver stats",
        TTL_DAILY,
        || client.driver_stats(&driver_id),
    )
    .await?;
    Ok(Json(data.unwrap_or_default()))
}
