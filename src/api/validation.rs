use axum::{Json, extract::rejection::JsonRejection};

use super::ApiError;

/// Parse a path id the way the routes accept it: any base-10 integer, sign allowed.
pub fn parse_record_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::validation("Invalid record ID"))
}

/// Unwrap a JSON body extractor, turning any rejection into a 400.
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match body {
        Ok(Json(payload)) => Ok(payload),
        Err(rejection) => {
            tracing::debug!("Rejected request body: {rejection}");
            Err(ApiError::invalid_body())
        }
    }
}

pub fn require_record_name(name: &str) -> Result<(), ApiError> {
    if name.is_empty() {
        return Err(ApiError::validation("Name is required"));
    }
    Ok(())
}

pub fn require_user_fields(username: &str, email: &str) -> Result<(), ApiError> {
    if username.is_empty() || email.is_empty() {
        return Err(ApiError::validation("Username and email are required"));
    }
    Ok(())
}
