use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, FromQueryResult,
    Statement, Value,
};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::constants::pool;

pub mod repositories;

pub use repositories::api_keys::{ApiKeyRow, ApiKeyStatus};
pub use repositories::records::RecordRow;
pub use repositories::users::UserRow;

/// Failures surfaced by the store gateway.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to connect to database: {0}")]
    Connect(#[source] DbErr),

    #[error("database ping failed: {0}")]
    Ping(#[source] DbErr),

    #[error(transparent)]
    Query(#[from] DbErr),

    #[error("generated id {0} does not fit in a signed 64-bit integer")]
    IdOutOfRange(u64),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome of a statement that does not return rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Execution {
    pub rows_affected: u64,
    /// Generated key of the last inserted row; zero for non-insert statements.
    pub last_insert_id: u64,
}

/// Pooled handle to the relational store.
///
/// Every statement goes through [`Store::query_many`], [`Store::query_one`]
/// or [`Store::execute`] with positional `?` placeholders, so values are
/// always bound by the driver and never spliced into SQL text.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> StoreResult<Self> {
        Self::with_pool_options(db_url, pool::MAX_CONNECTIONS, pool::MIN_CONNECTIONS).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> StoreResult<Self> {
        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await.map_err(StoreError::Connect)?;
        let store = Self { conn };
        store.ping().await?;

        info!(
            "Database connected (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(store)
    }

    pub async fn ping(&self) -> StoreResult<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await
            .map_err(StoreError::Ping)?;
        Ok(())
    }

    /// Release the pool. Consumes the handle; clones held elsewhere become unusable.
    pub async fn close(self) -> StoreResult<()> {
        self.conn.close().await?;
        info!("Database connection closed");
        Ok(())
    }

    fn statement<I>(&self, sql: &str, values: I) -> Statement
    where
        I: IntoIterator<Item = Value>,
    {
        Statement::from_sql_and_values(self.conn.get_database_backend(), sql, values)
    }

    /// Run a query and decode every row into `T`.
    ///
    /// Rows that fail to decode are dropped from the result rather than
    /// failing the whole query.
    pub async fn query_many<T, I>(&self, sql: &str, values: I) -> StoreResult<Vec<T>>
    where
        T: FromQueryResult,
        I: IntoIterator<Item = Value>,
    {
        let rows = self.conn.query_all(self.statement(sql, values)).await?;
        let total = rows.len();

        let decoded: Vec<T> = rows
            .iter()
            .filter_map(|row| match T::from_query_result(row, "") {
                Ok(item) => Some(item),
                Err(e) => {
                    debug!("Skipping undecodable row: {e}");
                    None
                }
            })
            .collect();

        if decoded.len() < total {
            debug!(skipped = total - decoded.len(), "Partial result set");
        }

        Ok(decoded)
    }

    /// Run a query expected to match at most one row; `None` means no row.
    pub async fn query_one<T, I>(&self, sql: &str, values: I) -> StoreResult<Option<T>>
    where
        T: FromQueryResult,
        I: IntoIterator<Item = Value>,
    {
        let row = self.conn.query_one(self.statement(sql, values)).await?;

        match row {
            Some(row) => Ok(Some(T::from_query_result(&row, "")?)),
            None => Ok(None),
        }
    }

    pub async fn execute<I>(&self, sql: &str, values: I) -> StoreResult<Execution>
    where
        I: IntoIterator<Item = Value>,
    {
        let result = self.conn.execute(self.statement(sql, values)).await?;

        Ok(Execution {
            rows_affected: result.rows_affected(),
            last_insert_id: result.last_insert_id(),
        })
    }

    const fn record_repo(&self) -> repositories::records::RecordRepository<'_> {
        repositories::records::RecordRepository::new(self)
    }

    const fn user_repo(&self) -> repositories::users::UserRepository<'_> {
        repositories::users::UserRepository::new(self)
    }

    const fn api_key_repo(&self) -> repositories::api_keys::ApiKeyRepository<'_> {
        repositories::api_keys::ApiKeyRepository::new(self)
    }

    pub async fn list_records(&self) -> StoreResult<Vec<RecordRow>> {
        self.record_repo().list().await
    }

    pub async fn get_record(&self, id: i64) -> StoreResult<Option<RecordRow>> {
        self.record_repo().get(id).await
    }

    pub async fn create_record(&self, name: &str, value: &str) -> StoreResult<i64> {
        self.record_repo().create(name, value).await
    }

    /// Returns `false` when no record has the given id.
    pub async fn update_record(&self, id: i64, name: &str, value: &str) -> StoreResult<bool> {
        self.record_repo().update(id, name, value).await
    }

    /// Returns `false` when no record has the given id.
    pub async fn delete_record(&self, id: i64) -> StoreResult<bool> {
        self.record_repo().delete(id).await
    }

    pub async fn list_users(&self) -> StoreResult<Vec<UserRow>> {
        self.user_repo().list().await
    }

    pub async fn create_user(&self, username: &str, email: &str) -> StoreResult<i64> {
        self.user_repo().create(username, email).await
    }

    pub async fn list_api_keys(&self) -> StoreResult<Vec<ApiKeyRow>> {
        self.api_key_repo().list_with_owner().await
    }

    pub async fn api_key_status(&self, api_key: &str) -> StoreResult<Option<ApiKeyStatus>> {
        self.api_key_repo().status(api_key).await
    }
}
