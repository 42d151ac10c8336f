use sea_orm::FromQueryResult;

use crate::db::{Store, StoreResult};

/// An API key joined with the username of its owner.
#[derive(Debug, Clone, FromQueryResult)]
pub struct ApiKeyRow {
    pub id: i32,
    pub key_name: String,
    pub api_key: String,
    pub user_id: i32,
    pub is_active: bool,
    pub username: String,
}

#[derive(Debug, Clone, Copy, FromQueryResult)]
pub struct ApiKeyStatus {
    pub is_active: bool,
}

pub struct ApiKeyRepository<'a> {
    store: &'a Store,
}

impl<'a> ApiKeyRepository<'a> {
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub async fn list_with_owner(&self) -> StoreResult<Vec<ApiKeyRow>> {
        self.store
            .query_many(
                "SELECT ak.id, ak.key_name, ak.api_key, ak.user_id, ak.is_active, u.username \
                 FROM api_keys ak \
                 JOIN users u ON ak.user_id = u.id \
                 ORDER BY ak.created_at DESC, ak.id DESC",
                [],
            )
            .await
    }

    /// Activation flag of the key with exactly this token, if any.
    pub async fn status(&self, api_key: &str) -> StoreResult<Option<ApiKeyStatus>> {
        self.store
            .query_one(
                "SELECT is_active FROM api_keys WHERE api_key = ?",
                [api_key.into()],
            )
            .await
    }
}
