use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::NoTls;

use crate::config::BinderConfig;
use crate::error::BinderError;
use crate::pool::BinderPool;

impl BinderPool {
    /// Build a Postgres pool from the configured URL and credentials.
    ///
    /// Pool creation does not open a connection; an unreachable host shows up
    /// on first acquire, a malformed URL here.
    ///
    /// # Errors
    /// Returns `ConfigError` if the URL does not parse or the pool cannot be
    /// built.
    pub(crate) fn new_postgres(config: &BinderConfig) -> Result<Self, BinderError> {
        let mut pg_config: tokio_postgres::Config = config.url.parse().map_err(|e| {
            BinderError::ConfigError(format!("invalid Postgres URL {}: {e}", config.url))
        })?;
        if !config.username.is_empty() {
            pg_config.user(&config.username);
        }
        if !config.password.is_empty() {
            pg_config.password(&config.password);
        }

        let manager = Manager::from_config(
            pg_config,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );
        let pool = Pool::builder(manager)
            .max_size(config.max_pool_size)
            .build()
            .map_err(|e| {
                BinderError::ConfigError(format!("failed to create Postgres pool: {e}"))
            })?;

        Ok(BinderPool::Postgres(pool))
    }
}
