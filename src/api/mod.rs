use axum::{
    Router,
    http::HeaderName,
    middleware,
    routing::get,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::constants::cors;
use crate::db::Store;

mod api_keys;
pub mod auth;
mod error;
mod observability;
mod records;
mod system;
mod types;
mod users;
mod validation;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
}

impl AppState {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }
}

/// Connect to the store described by `config` and wrap it in shared state.
pub async fn create_app_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let store = Store::new(&config.database.url()).await?;
    Ok(Arc::new(AppState::new(store)))
}

pub fn router(state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .route(
            "/data",
            get(records::list_records).post(records::create_record),
        )
        .route(
            "/data/{id}",
            get(records::get_record)
                .put(records::update_record)
                .delete(records::delete_record),
        )
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/apikeys", get(api_keys::list_api_keys))
        .nest("/protected", create_protected_router(state.clone()))
        .with_state(state);

    Router::new()
        .route("/health", get(system::health))
        .nest("/api", api_router)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

/// Every path under the prefix is gated, including ones with no route.
fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/data",
            get(records::list_records).post(records::create_record),
        )
        .fallback(system::route_not_found)
        .layer(middleware::from_fn_with_state(state, auth::require_api_key))
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(cors::ALLOWED_METHODS)
        .allow_headers(cors::ALLOWED_HEADERS.map(HeaderName::from_static))
}
