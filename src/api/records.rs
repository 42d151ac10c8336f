use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::{json_body, parse_record_id, require_record_name};
use super::{
    ApiError, AppState, ItemResponse, ListResponse, MessageResponse, RecordDto, RecordPayload,
};

/// GET /data
pub async fn list_records(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListResponse<RecordDto>>, ApiError> {
    let rows = state
        .store()
        .list_records()
        .await
        .map_err(|e| ApiError::database("Failed to fetch records", &e))?;

    let records = rows.into_iter().map(RecordDto::from).collect();
    Ok(Json(ListResponse::new(records)))
}

/// POST /data
pub async fn create_record(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RecordPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<ItemResponse<RecordDto>>), ApiError> {
    let payload = json_body(body)?;
    require_record_name(&payload.name)?;

    let id = state
        .store()
        .create_record(&payload.name, &payload.value)
        .await
        .map_err(|e| ApiError::database("Failed to create record", &e))?;

    tracing::info!(record_id = id, "Record created");

    let record = RecordDto {
        id,
        name: payload.name,
        value: payload.value,
        created_at: None,
        updated_at: None,
    };

    Ok((
        StatusCode::CREATED,
        Json(ItemResponse::with_message(
            record,
            "Record created successfully",
        )),
    ))
}

/// GET /data/{id}
pub async fn get_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ItemResponse<RecordDto>>, ApiError> {
    let id = parse_record_id(&id)?;

    let row = state
        .store()
        .get_record(id)
        .await
        .map_err(|e| ApiError::database("Failed to fetch record", &e))?
        .ok_or_else(ApiError::record_not_found)?;

    Ok(Json(ItemResponse::new(RecordDto::from(row))))
}

/// PUT /data/{id}
///
/// Replaces both name and value. Unlike create, an empty name is accepted.
pub async fn update_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<RecordPayload>, JsonRejection>,
) -> Result<Json<ItemResponse<RecordDto>>, ApiError> {
    let id = parse_record_id(&id)?;
    let payload = json_body(body)?;

    let updated = state
        .store()
        .update_record(id, &payload.name, &payload.value)
        .await
        .map_err(|e| ApiError::database("Failed to update record", &e))?;

    if !updated {
        return Err(ApiError::record_not_found());
    }

    let record = RecordDto {
        id,
        name: payload.name,
        value: payload.value,
        created_at: None,
        updated_at: None,
    };

    Ok(Json(ItemResponse::with_message(
        record,
        "Record updated successfully",
    )))
}

/// DELETE /data/{id}
pub async fn delete_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_record_id(&id)?;

    let deleted = state
        .store()
        .delete_record(id)
        .await
        .map_err(|e| ApiError::database("Failed to delete record", &e))?;

    if !deleted {
        return Err(ApiError::record_not_found());
    }

    tracing::info!(record_id = id, "Record deleted");

    Ok(Json(MessageResponse::new("Record deleted successfully")))
}
