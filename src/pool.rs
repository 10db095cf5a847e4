#[cfg(feature = "postgres")]
use deadpool_postgres::{Object as PostgresObject, Pool as DeadpoolPostgresPool};

#[cfg(feature = "sqlite")]
use deadpool_sqlite::{Object as SqliteObject, Pool as DeadpoolSqlitePool};

use crate::config::BinderConfig;
use crate::error::BinderError;
use crate::types::DatabaseType;

/// Connection pool for database access
///
/// This enum wraps the pool types of the supported backends.
#[derive(Debug, Clone)]
pub enum BinderPool {
    /// `PostgreSQL` connection pool
    #[cfg(feature = "postgres")]
    Postgres(DeadpoolPostgresPool),
    /// `SQLite` connection pool
    #[cfg(feature = "sqlite")]
    Sqlite(DeadpoolSqlitePool),
}

/// A single pooled connection, checked out for the duration of one call.
///
/// Dropping this returns the connection to the pool, which is what guarantees
/// release on every exit path.
#[derive(Debug)]
pub enum BinderConnection {
    #[cfg(feature = "postgres")]
    Postgres(PostgresObject),
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteObject),
}

impl BinderPool {
    /// Build the pool matching the configured URL scheme.
    pub(crate) async fn connect(config: &BinderConfig) -> Result<Self, BinderError> {
        match config.database_type()? {
            #[cfg(feature = "postgres")]
            DatabaseType::Postgres => Self::new_postgres(config),
            #[cfg(feature = "sqlite")]
            DatabaseType::Sqlite => Self::new_sqlite(config).await,
        }
    }

    /// Check out one connection, blocking until the pool has one available.
    pub(crate) async fn acquire(&self) -> Result<BinderConnection, BinderError> {
        match self {
            #[cfg(feature = "postgres")]
            BinderPool::Postgres(pool) => {
                let conn: PostgresObject = pool
                    .get()
                    .await
                    .map_err(BinderError::PoolErrorPostgres)?;
                Ok(BinderConnection::Postgres(conn))
            }
            #[cfg(feature = "sqlite")]
            BinderPool::Sqlite(pool) => {
                let conn: SqliteObject = pool
                    .get()
                    .await
                    .map_err(BinderError::PoolErrorSqlite)?;
                Ok(BinderConnection::Sqlite(conn))
            }
        }
    }
}
