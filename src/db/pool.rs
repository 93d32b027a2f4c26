//! Connection pool management

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Postgres;

use crate::{
    config::DatabaseConfig,
    error::{Error, Result},
};

/// Acquire attempts before giving up with `PoolExhausted`
const ACQUIRE_ATTEMPTS: u32 = 3;
/// Base delay between acquire attempts; doubled each retry, plus jitter
const ACQUIRE_RETRY_BASE: Duration = Duration::from_millis(50);

/// Bounded set of live database connections.
///
/// Constructed once from [`DatabaseConfig`] and shared by reference; cloning
/// is cheap and refers to the same underlying pool.
#[derive(Clone)]
pub struct ConnectionPool {
    pool: PgPool,
    healthy: Arc<AtomicBool>,
}

impl ConnectionPool {
    /// Open the pool against the configured backend.
    ///
    /// `min_connections` is the pre-warmed floor, `max_connections` the hard
    /// ceiling, and `connection_timeout_secs` bounds every `acquire`. Fails
    /// with `ConnectionUnavailable` when the backend cannot be reached.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
            // broken connections are discarded on checkout and replaced lazily
            .test_before_acquire(true)
            .connect_with(config.connect_options())
            .await
            .map_err(|e| Error::ConnectionUnavailable(e.to_string()))?;

        tracing::info!(
            min = config.min_connections,
            max = config.max_connections,
            "Database connection pool initialized"
        );

        Ok(Self {
            pool,
            healthy: Arc::new(AtomicBool::new(true)),
        })
    }

    /// Wrap an externally constructed pool (used by tests).
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pool,
            healthy: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Build the pool without connecting; connections are established on
    /// first demand. Useful when the catalog starts before the database.
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        let pool = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
            .test_before_acquire(true)
            .connect_lazy_with(config.connect_options());
        Self::from_pool(pool)
    }

    /// Check out a connection: an idle one if available, a new one while
    /// below the ceiling, otherwise wait until one is released.
    ///
    /// The returned guard puts the connection back into the idle set when
    /// dropped, on every exit path including cancellation. Waits that exceed
    /// the configured timeout are retried a bounded number of times with
    /// jittered backoff, then surface as `PoolExhausted`.
    pub async fn acquire(&self) -> Result<PoolConnection<Postgres>> {
        let mut delay = ACQUIRE_RETRY_BASE;
        for attempt in 1..=ACQUIRE_ATTEMPTS {
            match self.pool.acquire().await {
                Ok(conn) => return Ok(conn),
                Err(sqlx::Error::PoolTimedOut) if attempt < ACQUIRE_ATTEMPTS => {
                    let jitter = rand::thread_rng().gen_range(0..=delay.as_millis() as u64 / 2);
                    tracing::warn!(attempt, "Connection pool timed out, retrying acquire");
                    tokio::time::sleep(delay + Duration::from_millis(jitter)).await;
                    delay *= 2;
                }
                Err(sqlx::Error::PoolTimedOut) => return Err(Error::PoolExhausted),
                Err(e) => return Err(e.into()),
            }
        }
        Err(Error::PoolExhausted)
    }

    /// Issue a trivial round-trip query and record the outcome.
    ///
    /// A failing pool is flagged unhealthy but not torn down; callers decide
    /// what to report.
    pub async fn health_check(&self) -> bool {
        let ok = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .is_ok();
        if !ok {
            tracing::error!("Database health check failed");
        }
        self.healthy.store(ok, Ordering::Relaxed);
        ok
    }

    /// Outcome of the most recent `health_check`
    pub fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::Relaxed)
    }

    /// Apply the schema migrations shipped with the crate.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::from(e)))?;
        tracing::info!("Database migrations completed");
        Ok(())
    }

    /// Teardown: drain idle connections and reject new acquisitions.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connection pool closed");
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// Live connections, idle and checked out
    pub fn size(&self) -> u32 {
        self.pool.size()
    }

    pub fn num_idle(&self) -> usize {
        self.pool.num_idle()
    }

    pub(crate) fn inner(&self) -> &PgPool {
        &self.pool
    }
}
