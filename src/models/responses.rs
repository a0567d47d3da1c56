//! Response DTOs for the proxy API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::StatsSnapshot;

/// Paths advertised by the root endpoint
pub const ENDPOINTS: &[&str] = &[
    "/drivers/current",
    "/constructors/current",
    "/standings/drivers",
    "/standings/constructors",
    "/schedule/current",
    "/race/last",
    "/race/{season}/{round}",
    "/drivers/stats",
    "/driver/{driver_id}/stats",
    "/cache/stats",
];

/// Response body for the service banner (GET /)
#[derive(Debug, Clone, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    /// "MOCK DATA" or "LIVE DATA"
    pub mode: String,
    pub endpoints: Vec<String>,
}

impl RootResponse {
    /// Creates the banner for the given data mode
    pub fn new(mock: bool) -> Self {
        Self {
            message: "🏎️ F1 Dashboard API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            mode: if mock { "MOCK DATA" } else { "LIVE DATA" }.to_string(),
            endpoints: ENDPOINTS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// Cache section of the health report
#[derive(Debug, Clone, Serialize)]
pub struct CacheHealth {
    pub status: String,
    pub entries: usize,
    /// "enabled" or "disabled"
    pub persistence: String,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    pub cache: CacheHealth,
    /// "mock" or "live"
    pub mode: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(stats: &StatsSnapshot, mode: &str) -> Self {
        Self {
            status: "healthy".to_string(),
            cache: CacheHealth {
                status: "active".to_string(),
                entries: stats.entries,
                persistence: if stats.persistence_enabled {
                    "enabled"
                } else {
                    "disabled"
                }
                .to_string(),
            },
            mode: mode.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for the stats endpoint (GET /cache/stats)
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub cache: StatsSnapshot,
    pub status: String,
}

impl CacheStatsResponse {
    pub fn new(cache: StatsSnapshot) -> Self {
        Self {
            cache,
            status: "active".to_string(),
        }
    }
}

/// Response body for the clear endpoint (POST /cache/clear)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
}

impl ClearResponse {
    pub fn new() -> Self {
        Self {
            message: "Cache cleared successfully".to_string(),
        }
    }
}

impl Default for ClearResponse {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStats;

    #[test]
    fn test_root_response_modes() {
        assert_eq!(RootResponse::new(true).mode, "MOCK DATA");
        assert_eq!(RootResponse::new(false).mode, "LIVE DATA");
        assert_eq!(RootResponse::new(true).message, "🏎️ F1 Dashboard API");
        assert!(RootResponse::new(true)
            .endpoints
            .contains(&"/cache/stats".to_string()));
    }

    #[test]
    fn test_health_response_serialize() {
        let stats = CacheStats::new().snapshot(3, false);
        let resp = HealthResponse::healthy(&stats, "live");
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["status"], "healthy");
        assert_eq!(json["cache"]["entries"], 3);
        assert_eq!(json["cache"]["persistence"], "disabled");
        assert_eq!(json["mode"], "live");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_cache_stats_response_serialize() {
        let resp = CacheStatsResponse::new(CacheStats::new().snapshot(0, true));
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["status"], "active");
        assert_eq!(json["cache"]["hit_rate"], "0.00%");
        assert_eq!(json["cache"]["persistence_enabled"], true);
    }

    #[test]
    fn test_clear_response_serialize() {
        let json = serde_json::to_string(&ClearResponse::new()).unwrap();
        assert!(json.contains("cleared"));
    }
}
