use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ErrorBody;
use crate::db::StoreError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    /// `message` is sent to the client, `cause` only to the log.
    DatabaseError { message: String, cause: String },

    ValidationError(String),

    Unauthorized(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::DatabaseError { message, cause } => {
                write!(f, "Database error: {}: {}", message, cause)
            }
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::DatabaseError { message, cause } => {
                tracing::error!("{}: {}", message, cause);
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        let body = ErrorBody {
            error: error_message,
        };
        (status, Json(body)).into_response()
    }
}

impl ApiError {
    pub fn record_not_found() -> Self {
        ApiError::NotFound("Record not found".to_string())
    }

    pub fn invalid_body() -> Self {
        ApiError::ValidationError("Invalid request body".to_string())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::ValidationError(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        ApiError::Unauthorized(msg.into())
    }

    /// A store failure reported to the client as `message`.
    pub fn database(message: impl Into<String>, err: &StoreError) -> Self {
        ApiError::DatabaseError {
            message: message.into(),
            cause: err.to_string(),
        }
    }
}
