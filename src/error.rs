//! Error types for the proxy
//!
//! Provides unified error handling using thiserror.

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::upstream::UpstreamError;

// == API Error Enum ==
/// Errors surfaced to HTTP clients.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Requested data does not exist upstream
    #[error("{0}")]
    NotFound(String),

    /// Upstream API call failed on a cache miss
    #[error("{0}")]
    Upstream(String),
}

impl ApiError {
    /// Wraps an upstream failure, naming the resource that was being fetched.
    pub fn upstream(resource: &str, err: UpstreamError) -> Self {
        ApiError::Upstream(format!("F1 API error ({}): {}", resource, err))
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        };

        let body = Json(json!({
            "detail": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Persistence Error ==
/// Failures of the cache persistence file. Logged, never surfaced.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("I/O error on {}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed cache file: {0}")]
    Format(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for route handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
