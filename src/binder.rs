//! The query binder: pooled fetch/execute helpers with default bind scopes.

use crate::bind::{Bind, BindPlan};
use crate::config::BinderConfig;
use crate::error::BinderError;
use crate::logging;
use crate::pool::{BinderConnection, BinderPool};
use crate::results::{FromRow, ResultSet};
use crate::types::DatabaseType;

/// A connection pool wrapped with parameter binding and row mapping.
///
/// Each call checks out one pooled connection, binds its parameters, runs the
/// statement, and returns the connection on every exit path. The binder holds
/// no per-call state; default bind sets live in an explicit
/// [`ScopedBinder`] obtained from [`QueryBinder::scope`].
///
/// ```no_run
/// use sql_binder::prelude::*;
///
/// # async fn demo() -> Result<(), BinderError> {
/// let binder = QueryBinder::connect(BinderConfig::new(
///     "postgres://db.internal:5432/app",
///     "app",
///     "secret",
/// ))
/// .await?;
///
/// let n = binder
///     .execute(
///         "UPDATE people SET name = :name WHERE id = $1",
///         &[Bind::pos(1, 42i64), Bind::named("name", "alice")],
///     )
///     .await?;
/// # let _ = n;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct QueryBinder {
    pool: BinderPool,
    db_type: DatabaseType,
}

impl QueryBinder {
    /// Validate the config, set process-wide logging verbosity, and build the
    /// backend pool.
    ///
    /// # Errors
    /// Returns `ConfigError` for a zero pool size, a malformed URL, or an
    /// unrecognized URL scheme.
    pub async fn connect(config: BinderConfig) -> Result<Self, BinderError> {
        config.validate()?;
        logging::init(config.log_level);
        let db_type = config.database_type()?;
        let pool = BinderPool::connect(&config).await?;
        tracing::debug!(?db_type, max_pool_size = config.max_pool_size, "pool ready");
        Ok(Self { pool, db_type })
    }

    /// The backend this binder talks to.
    #[must_use]
    pub fn database_type(&self) -> DatabaseType {
        self.db_type
    }

    /// Start a scope with its own default bind set.
    ///
    /// Defaults set on the scope apply to every call made through it, before
    /// the call's own binds, until [`ScopedBinder::clear`] is called.
    #[must_use]
    pub fn scope(&self) -> ScopedBinder<'_> {
        ScopedBinder {
            binder: self,
            defaults: Vec::new(),
        }
    }

    /// Run a query and map every row to `T`. Zero matching rows is an empty
    /// `Vec`, not an error.
    pub async fn fetch<T: FromRow>(
        &self,
        sql: &str,
        binds: &[Bind],
    ) -> Result<Vec<T>, BinderError> {
        self.fetch_with::<T>(&[], sql, binds).await
    }

    /// Run a mutation statement and return the affected-row count. Zero is a
    /// normal outcome.
    pub async fn execute(&self, sql: &str, binds: &[Bind]) -> Result<usize, BinderError> {
        self.execute_with(&[], sql, binds).await
    }

    /// Run a query and return its first mapped row, or `default` when nothing
    /// matches. The query executes exactly once.
    pub async fn fetch_one<T: FromRow>(
        &self,
        sql: &str,
        binds: &[Bind],
        default: T,
    ) -> Result<T, BinderError> {
        self.fetch_one_with(&[], sql, binds, default).await
    }

    pub(crate) async fn fetch_with<T: FromRow>(
        &self,
        defaults: &[Bind],
        sql: &str,
        binds: &[Bind],
    ) -> Result<Vec<T>, BinderError> {
        let result_set = self.run_select(defaults, sql, binds).await?;
        result_set.rows.iter().map(T::from_row).collect()
    }

    pub(crate) async fn execute_with(
        &self,
        defaults: &[Bind],
        sql: &str,
        binds: &[Bind],
    ) -> Result<usize, BinderError> {
        let plan = BindPlan::resolve(defaults, binds)?;
        tracing::debug!(sql, binds = plan.len(), "execute");
        let conn = self.pool.acquire().await?;
        match &conn {
            #[cfg(feature = "postgres")]
            BinderConnection::Postgres(client) => {
                crate::postgres::execute_dml(client, sql, plan).await
            }
            #[cfg(feature = "sqlite")]
            BinderConnection::Sqlite(client) => {
                crate::sqlite::execute_dml(client, sql, plan).await
            }
        }
    }

    pub(crate) async fn fetch_one_with<T: FromRow>(
        &self,
        defaults: &[Bind],
        sql: &str,
        binds: &[Bind],
        default: T,
    ) -> Result<T, BinderError> {
        let mut rows = self.fetch_with::<T>(defaults, sql, binds).await?;
        if rows.is_empty() {
            Ok(default)
        } else {
            Ok(rows.swap_remove(0))
        }
    }

    async fn run_select(
        &self,
        defaults: &[Bind],
        sql: &str,
        binds: &[Bind],
    ) -> Result<ResultSet, BinderError> {
        let plan = BindPlan::resolve(defaults, binds)?;
        tracing::debug!(sql, binds = plan.len(), "fetch");
        let conn = self.pool.acquire().await?;
        match &conn {
            #[cfg(feature = "postgres")]
            BinderConnection::Postgres(client) => {
                crate::postgres::execute_select(client, sql, plan).await
            }
            #[cfg(feature = "sqlite")]
            BinderConnection::Sqlite(client) => {
                crate::sqlite::execute_select(client, sql, plan).await
            }
        }
    }
}

/// A binder handle carrying an explicit default bind set.
///
/// This replaces ambient thread-keyed default binds with a context the caller
/// threads through: defaults apply to every call made on this scope, before
/// the call's own binds, so a per-call bind for the same key overrides the
/// default. Scopes are independent of each other and of the underlying
/// binder.
#[derive(Debug)]
pub struct ScopedBinder<'a> {
    binder: &'a QueryBinder,
    defaults: Vec<Bind>,
}

impl ScopedBinder<'_> {
    /// Replace this scope's default bind set.
    pub fn set_defaults(&mut self, binds: Vec<Bind>) {
        self.defaults = binds;
    }

    /// Drop this scope's default bind set. Idempotent; a cleared scope
    /// behaves exactly like a fresh one.
    pub fn clear(&mut self) {
        self.defaults.clear();
    }

    /// The defaults currently applied to calls on this scope.
    #[must_use]
    pub fn defaults(&self) -> &[Bind] {
        &self.defaults
    }

    /// [`QueryBinder::fetch`] with this scope's defaults applied first.
    pub async fn fetch<T: FromRow>(
        &self,
        sql: &str,
        binds: &[Bind],
    ) -> Result<Vec<T>, BinderError> {
        self.binder.fetch_with::<T>(&self.defaults, sql, binds).await
    }

    /// [`QueryBinder::execute`] with this scope's defaults applied first.
    pub async fn execute(&self, sql: &str, binds: &[Bind]) -> Result<usize, BinderError> {
        self.binder.execute_with(&self.defaults, sql, binds).await
    }

    /// [`QueryBinder::fetch_one`] with this scope's defaults applied first.
    pub async fn fetch_one<T: FromRow>(
        &self,
        sql: &str,
        binds: &[Bind],
        default: T,
    ) -> Result<T, BinderError> {
        self.binder
            .fetch_one_with(&self.defaults, sql, binds, default)
            .await
    }
}
