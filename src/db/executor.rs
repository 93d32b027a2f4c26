//! Statement execution helper.
//!
//! Runs single parameterized statements or multi-statement transactions
//! against pooled connections. Backend errors cross into domain error kinds
//! here (via the `From<sqlx::Error>` translation in `error.rs`); repositories
//! never see raw driver errors.

use futures::future::BoxFuture;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::{Query, QueryAs, QueryScalar};
use sqlx::{FromRow, Postgres, Transaction};

use crate::{
    config::DatabaseConfig,
    db::pool::ConnectionPool,
    error::Result,
};

/// Cloneable handle that runs statements on the shared pool
#[derive(Clone)]
pub struct Database {
    pool: ConnectionPool,
}

impl Database {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    /// Open a pool and wrap it in one step
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        Ok(Self::new(ConnectionPool::connect(config).await?))
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Run one statement and return the affected-row count.
    ///
    /// Zero rows on an update/delete is a count, not an error; the caller
    /// decides whether it means "not found".
    pub async fn execute(&self, query: Query<'_, Postgres, PgArguments>) -> Result<u64> {
        let mut conn = self.pool.acquire().await?;
        let result = query.execute(&mut *conn).await?;
        Ok(result.rows_affected())
    }

    /// Run a query guaranteed to produce a row (`INSERT .. RETURNING`).
    pub async fn fetch_one<T>(&self, query: QueryAs<'_, Postgres, T, PgArguments>) -> Result<T>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let mut conn = self.pool.acquire().await?;
        Ok(query.fetch_one(&mut *conn).await?)
    }

    /// Run a query expected to produce at most one row.
    pub async fn fetch_optional<T>(
        &self,
        query: QueryAs<'_, Postgres, T, PgArguments>,
    ) -> Result<Option<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let mut conn = self.pool.acquire().await?;
        Ok(query.fetch_optional(&mut *conn).await?)
    }

    /// Run a query and collect every row.
    pub async fn fetch_all<T>(&self, query: QueryAs<'_, Postgres, T, PgArguments>) -> Result<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let mut conn = self.pool.acquire().await?;
        Ok(query.fetch_all(&mut *conn).await?)
    }

    /// Run a single-value query (counts, aggregates).
    pub async fn fetch_scalar<T>(
        &self,
        query: QueryScalar<'_, Postgres, T, PgArguments>,
    ) -> Result<T>
    where
        (T,): for<'r> FromRow<'r, PgRow>,
        T: Send + Unpin,
    {
        let mut conn = self.pool.acquire().await?;
        Ok(query.fetch_one(&mut *conn).await?)
    }

    /// Run `body` inside one transaction on one connection.
    ///
    /// Commits when the body returns Ok, rolls back and re-raises on Err.
    /// If the future is dropped mid-body (cancellation), the transaction
    /// guard rolls back when it leaves scope, so the connection is always
    /// released in a clean state. Acquisition goes through the pool and
    /// honors the configured timeout.
    pub async fn transaction<T, F>(&self, body: F) -> Result<T>
    where
        T: Send,
        F: for<'t> FnOnce(&'t mut Transaction<'static, Postgres>) -> BoxFuture<'t, Result<T>>
            + Send,
    {
        let mut tx = self.pool.inner().begin().await?;
        match body(&mut tx).await {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(error = %rollback_err, "Transaction rollback failed");
                }
                Err(err)
            }
        }
    }
}
