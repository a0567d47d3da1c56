//! API Routes
//!
//! Configures the Axum router with all proxy endpoints.

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::handlers::{
    all_driver_stats_handler, cache_clear_handler, cache_stats_handler,
    constructor_standings_handler, current_constructors_handler, current_drivers_handler,
    driver_standings_handler, driver_stats_handler, health_handler, last_race_handler,
    race_result_handler, root_handler, schedule_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: `frontend_origin`, or any origin when it is `*`
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState, frontend_origin: &str) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/cache/stats", get(cache_stats_handler))
        .route("/cache/clear", post(cache_clear_handler))
        .route("/drivers/current", get(current_drivers_handler))
        .route("/constructors/current", get(current_constructors_handler))
        .route("/standings/drivers", get(driver_standings_handler))
        .route("/standings/constructors", get(constructor_standings_handler))
        .route("/schedule/current", get(schedule_handler))
        .route("/race/last", get(last_race_handler))
        .route("/race/:season/:round", get(race_result_handler))
        .route("/drivers/stats", get(all_driver_stats_handler))
        .route("/driver/:driver_id/stats", get(driver_stats_handler))
        .layer(cors_layer(frontend_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(frontend_origin: &str) -> CorsLayer {
    let origin = match frontend_origin {
        "*" => AllowOrigin::any(),
        origin => match HeaderValue::from_str(origin) {
            Ok(value) => AllowOrigin::exact(value),
            Err(_) => {
                warn!("Invalid FRONTEND_ORIGIN {:?}, allowing any origin", origin);
                AllowOrigin::any()
            }
        },
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
