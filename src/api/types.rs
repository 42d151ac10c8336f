use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};

use crate::db::{ApiKeyRow, RecordRow, UserRow};

/// `{"data": [...], "count": n, "success": true}`
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub count: usize,
    pub success: bool,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            count: data.len(),
            data,
            success: true,
        }
    }
}

/// Single-item envelope; `message` is present only on mutations.
#[derive(Debug, Serialize)]
pub struct ItemResponse<T> {
    pub data: T,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ItemResponse<T> {
    pub const fn new(data: T) -> Self {
        Self {
            data,
            success: true,
            message: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            success: true,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Body of every error response: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// Stored timestamps carry no zone and are read as server-local time.
fn local_time(naive: NaiveDateTime) -> DateTime<Local> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| Local.from_utc_datetime(&naive))
}

#[derive(Debug, Serialize)]
pub struct RecordDto {
    pub id: i64,
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Local>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Local>>,
}

impl From<RecordRow> for RecordDto {
    fn from(row: RecordRow) -> Self {
        Self {
            id: i64::from(row.id),
            name: row.name,
            value: row.value,
            created_at: Some(local_time(row.created_at)),
            updated_at: Some(local_time(row.updated_at)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Local>>,
}

impl From<UserRow> for UserDto {
    fn from(row: UserRow) -> Self {
        Self {
            id: i64::from(row.id),
            username: row.username,
            email: row.email,
            created_at: Some(local_time(row.created_at)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiKeyDto {
    pub id: i32,
    pub key_name: String,
    pub api_key: String,
    pub user_id: i32,
    pub username: String,
    pub is_active: bool,
}

impl From<ApiKeyRow> for ApiKeyDto {
    fn from(row: ApiKeyRow) -> Self {
        Self {
            id: row.id,
            key_name: row.key_name,
            api_key: row.api_key,
            user_id: row.user_id,
            username: row.username,
            is_active: row.is_active,
        }
    }
}

/// Missing and `null` string fields both read as empty.
fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of record create and update.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RecordPayload {
    #[serde(deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(deserialize_with = "string_or_empty")]
    pub value: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateUserRequest {
    #[serde(deserialize_with = "string_or_empty")]
    pub username: String,
    #[serde(deserialize_with = "string_or_empty")]
    pub email: String,
}
