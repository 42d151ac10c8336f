use crate::db::{Store, StoreError, StoreResult};

pub use crate::entities::users::Model as UserRow;

pub struct UserRepository<'a> {
    store: &'a Store,
}

impl<'a> UserRepository<'a> {
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> StoreResult<Vec<UserRow>> {
        self.store
            .query_many(
                "SELECT id, username, email, created_at FROM users \
                 ORDER BY created_at DESC, id DESC",
                [],
            )
            .await
    }

    pub async fn create(&self, username: &str, email: &str) -> StoreResult<i64> {
        let result = self
            .store
            .execute(
                "INSERT INTO users (username, email, created_at) VALUES (?, ?, CURRENT_TIMESTAMP)",
                [username.into(), email.into()],
            )
            .await?;

        i64::try_from(result.last_insert_id)
            .map_err(|_| StoreError::IdOutOfRange(result.last_insert_id))
    }
}
