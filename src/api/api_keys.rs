use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiKeyDto, AppState, ListResponse};

/// GET /apikeys
///
/// Lists every key with its owner's username, tokens included.
pub async fn list_api_keys(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListResponse<ApiKeyDto>>, ApiError> {
    let rows = state
        .store()
        .list_api_keys()
        .await
        .map_err(|e| ApiError::database("Failed to fetch API keys", &e))?;

    Ok(Json(ListResponse::new(
        rows.into_iter().map(ApiKeyDto::from).collect(),
    )))
}
