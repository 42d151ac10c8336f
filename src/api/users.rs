use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::{json_body, require_user_fields};
use super::{ApiError, AppState, CreateUserRequest, ItemResponse, ListResponse, UserDto};

/// GET /users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListResponse<UserDto>>, ApiError> {
    let rows = state
        .store()
        .list_users()
        .await
        .map_err(|e| ApiError::database("Failed to fetch users", &e))?;

    Ok(Json(ListResponse::new(
        rows.into_iter().map(UserDto::from).collect(),
    )))
}

/// POST /users
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ItemResponse<UserDto>>), ApiError> {
    let payload = json_body(body)?;
    require_user_fields(&payload.username, &payload.email)?;

    let id = state
        .store()
        .create_user(&payload.username, &payload.email)
        .await
        .map_err(|e| ApiError::database("Failed to create user", &e))?;

    tracing::info!(user_id = id, "User created: {}", payload.username);

    let user = UserDto {
        id,
        username: payload.username,
        email: payload.email,
        created_at: None,
    };

    Ok((
        StatusCode::CREATED,
        Json(ItemResponse::with_message(user, "User created successfully")),
    ))
}
