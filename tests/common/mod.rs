use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use records_api::api::{AppState, router};
use records_api::db::Store;
use records_api::entities::prelude::{ApiKeys, Records, Users};
use sea_orm::{ConnectionTrait, Schema};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Router backed by a fresh in-memory SQLite store with the three tables created.
pub async fn spawn_app() -> (Router, Store) {
    let store = Store::with_pool_options("sqlite::memory:", 1, 1)
        .await
        .expect("Failed to open in-memory database");

    let backend = store.conn.get_database_backend();
    let schema = Schema::new(backend);
    let tables = [
        schema.create_table_from_entity(Users),
        schema.create_table_from_entity(Records),
        schema.create_table_from_entity(ApiKeys),
    ];
    for table in &tables {
        store
            .conn
            .execute(backend.build(table))
            .await
            .expect("Failed to create table");
    }

    let state = Arc::new(AppState::new(store.clone()));
    (router(state), store)
}

pub async fn seed_api_key(store: &Store, user_id: i64, key_name: &str, key: &str, active: bool) {
    store
        .execute(
            "INSERT INTO api_keys (key_name, api_key, user_id, is_active, created_at) \
             VALUES (?, ?, ?, ?, CURRENT_TIMESTAMP)",
            [key_name.into(), key.into(), user_id.into(), active.into()],
        )
        .await
        .expect("Failed to seed api key");
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    api_key: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = api_key {
        builder = builder.header("X-API-Key", key);
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None, None).await
}
