use thiserror::Error;

#[cfg(feature = "sqlite")]
use deadpool_sqlite::rusqlite;

/// Errors surfaced by the binder.
///
/// Driver and pool errors pass through transparently; the remaining variants
/// cover the binder's own failure modes: bad configuration, rejected binds,
/// failed execution, and row-to-type mapping.
#[derive(Debug, Error)]
pub enum BinderError {
    #[cfg(feature = "postgres")]
    #[error(transparent)]
    PostgresError(#[from] tokio_postgres::Error),

    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[cfg(feature = "postgres")]
    #[error(transparent)]
    PoolErrorPostgres(#[from] deadpool::managed::PoolError<tokio_postgres::Error>),

    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    PoolErrorSqlite(#[from] deadpool::managed::PoolError<rusqlite::Error>),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("bind error: {0}")]
    BindError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    #[error("row mapping error: {0}")]
    MappingError(String),
}

#[cfg(feature = "sqlite")]
impl From<deadpool_sqlite::InteractError> for BinderError {
    fn from(err: deadpool_sqlite::InteractError) -> Self {
        BinderError::ExecutionError(format!("sqlite interact error: {err}"))
    }
}
