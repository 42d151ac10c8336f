use axum::Json;

use super::{ApiError, HealthResponse};
use crate::constants::SERVICE_NAME;

/// GET /health
///
/// Liveness only; the store is not consulted.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
    })
}

pub async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}
