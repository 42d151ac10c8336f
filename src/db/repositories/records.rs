use crate::db::{Store, StoreError, StoreResult};

pub use crate::entities::records::Model as RecordRow;

const SELECT_COLUMNS: &str = "SELECT id, name, value, created_at, updated_at FROM records";

pub struct RecordRepository<'a> {
    store: &'a Store,
}

impl<'a> RecordRepository<'a> {
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Newest first; rows sharing a creation second fall back to id order.
    pub async fn list(&self) -> StoreResult<Vec<RecordRow>> {
        let sql = format!("{SELECT_COLUMNS} ORDER BY created_at DESC, id DESC");
        self.store.query_many(&sql, []).await
    }

    pub async fn get(&self, id: i64) -> StoreResult<Option<RecordRow>> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?");
        self.store.query_one(&sql, [id.into()]).await
    }

    pub async fn create(&self, name: &str, value: &str) -> StoreResult<i64> {
        let result = self
            .store
            .execute(
                "INSERT INTO records (name, value, created_at, updated_at) \
                 VALUES (?, ?, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)",
                [name.into(), value.into()],
            )
            .await?;

        i64::try_from(result.last_insert_id)
            .map_err(|_| StoreError::IdOutOfRange(result.last_insert_id))
    }

    pub async fn update(&self, id: i64, name: &str, value: &str) -> StoreResult<bool> {
        let result = self
            .store
            .execute(
                "UPDATE records SET name = ?, value = ?, updated_at = CURRENT_TIMESTAMP \
                 WHERE id = ?",
                [name.into(), value.into(), id.into()],
            )
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = self
            .store
            .execute("DELETE FROM records WHERE id = ?", [id.into()])
            .await?;

        Ok(result.rows_affected > 0)
    }
}
