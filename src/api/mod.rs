//! API Module
//!
//! HTTP handlers and routing for the proxy REST API.
//!
//! # Endpoints
//! - `GET /` - Service banner
//! - `GET /health` - Health check with cache summary
//! - `GET /cache/stats` - Cache statistics
//! - `POST /cache/clear` - Empty the cache
//! - `GET /drivers/current`, `/constructors/current` - Season rosters
//! - `GET /standings/drivers`, `/standings/constructors` - Championship tables
//! - `GET /schedule/current` - Season calendar
//! - `GET /race/last`, `/race/:season/:round` - Race results
//! - `GET /drivers/stats`, `/driver/:driver_id/stats` - Career statistics

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
