use deadpool_sqlite::{Config as DeadpoolSqliteConfig, Runtime};

use crate::config::BinderConfig;
use crate::error::BinderError;
use crate::pool::BinderPool;

impl BinderPool {
    /// Build a SQLite pool from the configured path.
    ///
    /// # Errors
    /// Returns `ConfigError` if the pool cannot be created.
    pub(crate) async fn new_sqlite(config: &BinderConfig) -> Result<Self, BinderError> {
        let mut cfg = DeadpoolSqliteConfig::new(config.sqlite_path());
        cfg.pool = Some(deadpool::managed::PoolConfig::new(config.max_pool_size));

        let pool = cfg.create_pool(Runtime::Tokio1).map_err(|e| {
            BinderError::ConfigError(format!("failed to create SQLite pool: {e}"))
        })?;

        // WAL lets pooled readers coexist with a writer.
        {
            let conn = pool.get().await.map_err(BinderError::PoolErrorSqlite)?;
            conn.interact(|conn| {
                conn.execute_batch("PRAGMA journal_mode = WAL;")
                    .map_err(BinderError::SqliteError)
            })
            .await??;
        }

        Ok(BinderPool::Sqlite(pool))
    }
}
