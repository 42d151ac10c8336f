use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::constants::API_KEY_HEADER;

/// Gate for the protected route group.
///
/// The key in `X-API-Key` must name a row in `api_keys` whose `is_active`
/// flag is set. A missing key is rejected before the store is consulted.
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(key) = extract_api_key(&headers) else {
        return Err(ApiError::unauthorized("API key required"));
    };

    let status = match state.store().api_key_status(&key).await {
        Ok(status) => status,
        Err(e) => {
            tracing::warn!("API key lookup failed: {e}");
            None
        }
    };

    match status {
        None => Err(ApiError::unauthorized("Invalid API key")),
        Some(status) if !status.is_active => Err(ApiError::unauthorized("API key is inactive")),
        Some(_) => Ok(next.run(request).await),
    }
}

/// Raw header value; an empty header is treated as absent.
fn extract_api_key(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(API_KEY_HEADER)?;
    if value.is_empty() {
        return None;
    }

    Some(String::from_utf8_lossy(value.as_bytes()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderName, HeaderValue};

    #[test]
    fn test_extract_api_key() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_api_key(&headers), None);

        headers.insert("x-api-key", HeaderValue::from_static(""));
        assert_eq!(extract_api_key(&headers), None);

        headers.insert("x-api-key", HeaderValue::from_static("demo-key-123"));
        assert_eq!(extract_api_key(&headers).as_deref(), Some("demo-key-123"));
    }

    #[test]
    fn test_header_name_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_bytes(b"X-API-KEY").unwrap(),
            HeaderValue::from_static("k"),
        );
        assert_eq!(extract_api_key(&headers).as_deref(), Some("k"));
    }
}
