//! PostgreSQL pool management
//!
//! The pool is built on first use. A failed attempt leaves the holder empty so the
//! next call tries again; concurrent first callers wait on the same attempt.

use crate::error::PersistenceError;
use crate::schema;
use compliance_agent_config::DatabaseConfig;
use deadpool_postgres::{Config as PgConfig, Pool, PoolConfig, Runtime, Timeouts};
use std::time::Duration;
use tokio::sync::OnceCell;
use tokio_postgres::NoTls;

/// Lazily connected PostgreSQL client
pub struct PgClient {
    config: DatabaseConfig,
    pool: OnceCell<Pool>,
}

impl PgClient {
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            pool: OnceCell::new(),
        }
    }

    pub fn database_name(&self) -> &str {
        &self.config.name
    }

    /// The shared pool, connecting and ensuring the schema on first call
    pub async fn pool(&self) -> Result<&Pool, PersistenceError> {
        self.pool.get_or_try_init(|| self.connect()).await
    }

    async fn connect(&self) -> Result<Pool, PersistenceError> {
        let timeout = Duration::from_secs(self.config.connect_timeout_secs);
        tracing::info!(
            database = %self.config.name,
            max_size = self.config.pool_max_size,
            "Connecting to PostgreSQL"
        );

        let mut cfg = PgConfig::new();
        cfg.url = Some(self.config.connection_url());
        cfg.connect_timeout = Some(timeout);
        let mut timeouts = Timeouts::new();
        timeouts.wait = Some(timeout);
        timeouts.create = Some(timeout);
        let mut pool_config = PoolConfig::new(self.config.pool_max_size);
        pool_config.timeouts = timeouts;
        cfg.pool = Some(pool_config);

        let pool = cfg
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| PersistenceError::Connection(format!("Failed to create pool: {}", e)))?;

        let conn = pool.get().await.map_err(|e| {
            tracing::error!(error = %e, "Database pool creation failed");
            PersistenceError::Connection(e.to_string())
        })?;
        conn.batch_execute("SELECT 1").await?;
        schema::create_tables(&conn).await?;

        tracing::info!("Database connection successful");
        Ok(pool)
    }
}
