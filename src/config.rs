use crate::error::BinderError;
use crate::types::{DatabaseType, LogLevel};

/// Default maximum pool size when none is configured.
pub const DEFAULT_MAX_POOL_SIZE: usize = 5;

/// Connection settings for a [`QueryBinder`](crate::binder::QueryBinder).
///
/// The backend is chosen from the URL scheme: `postgres://` (or
/// `postgresql://`) selects Postgres, `sqlite://` or a bare filesystem path
/// selects SQLite. A bare path may not contain a `:` before its first `/`,
/// so a mistyped scheme is rejected rather than opened as a SQLite file;
/// this also rules out `:memory:`, which would give every pooled connection
/// a private database. Credentials are ignored by the SQLite backend.
#[derive(Debug, Clone)]
pub struct BinderConfig {
    pub url: String,
    pub username: String,
    pub password: String,
    pub max_pool_size: usize,
    pub log_level: LogLevel,
}

impl BinderConfig {
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
            max_pool_size: DEFAULT_MAX_POOL_SIZE,
            log_level: LogLevel::default(),
        }
    }

    #[must_use]
    pub fn with_max_pool_size(mut self, max_pool_size: usize) -> Self {
        self.max_pool_size = max_pool_size;
        self
    }

    #[must_use]
    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    /// Determine the backend from the URL scheme.
    ///
    /// # Errors
    /// Returns `ConfigError` for an unrecognized scheme or a backend that is
    /// not enabled in this build.
    pub fn database_type(&self) -> Result<DatabaseType, BinderError> {
        let url = self.url.as_str();
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            #[cfg(feature = "postgres")]
            return Ok(DatabaseType::Postgres);
            #[cfg(not(feature = "postgres"))]
            return Err(BinderError::ConfigError(
                "postgres support is not enabled in this build".to_string(),
            ));
        }
        let bare_path = !url.contains("://");
        if bare_path && url.split('/').next().is_some_and(|head| head.contains(':')) {
            return Err(BinderError::ConfigError(format!(
                "malformed database URL: {url}"
            )));
        }
        if url.starts_with("sqlite://") || bare_path {
            #[cfg(feature = "sqlite")]
            return Ok(DatabaseType::Sqlite);
            #[cfg(not(feature = "sqlite"))]
            return Err(BinderError::ConfigError(
                "sqlite support is not enabled in this build".to_string(),
            ));
        }
        Err(BinderError::ConfigError(format!(
            "unrecognized database URL: {url}"
        )))
    }

    /// Validate settings that must hold regardless of backend.
    pub(crate) fn validate(&self) -> Result<(), BinderError> {
        if self.url.is_empty() {
            return Err(BinderError::ConfigError("empty database URL".to_string()));
        }
        // An empty path would open a private temporary database per pooled
        // connection, so writes through one connection vanish on the next.
        if self.url.strip_prefix("sqlite://").is_some_and(str::is_empty) {
            return Err(BinderError::ConfigError(
                "sqlite URL has no database path".to_string(),
            ));
        }
        if self.max_pool_size == 0 {
            return Err(BinderError::ConfigError(
                "max_pool_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The SQLite database path encoded in the URL.
    #[cfg(feature = "sqlite")]
    pub(crate) fn sqlite_path(&self) -> &str {
        self.url.strip_prefix("sqlite://").unwrap_or(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_selects_backend() {
        #[cfg(feature = "postgres")]
        assert_eq!(
            BinderConfig::new("postgres://h:5432/db", "u", "p")
                .database_type()
                .unwrap(),
            DatabaseType::Postgres
        );
        #[cfg(feature = "sqlite")]
        assert_eq!(
            BinderConfig::new("/tmp/app.db", "", "")
                .database_type()
                .unwrap(),
            DatabaseType::Sqlite
        );
    }

    #[test]
    fn unknown_scheme_is_rejected() {
        let err = BinderConfig::new("mongodb://h/db", "u", "p")
            .database_type()
            .unwrap_err();
        assert!(matches!(err, BinderError::ConfigError(_)));
    }

    #[test]
    fn pathless_sqlite_url_is_rejected() {
        let err = BinderConfig::new("sqlite://", "", "").validate().unwrap_err();
        assert!(matches!(err, BinderError::ConfigError(_)));
    }

    #[test]
    fn mistyped_scheme_is_not_a_sqlite_path() {
        let err = BinderConfig::new("postgres:/host/db", "u", "p")
            .database_type()
            .unwrap_err();
        assert!(matches!(err, BinderError::ConfigError(_)));

        let err = BinderConfig::new(":memory:", "", "")
            .database_type()
            .unwrap_err();
        assert!(matches!(err, BinderError::ConfigError(_)));
    }

    #[test]
    fn zero_pool_size_is_rejected() {
        let cfg = BinderConfig::new("/tmp/app.db", "", "").with_max_pool_size(0);
        assert!(matches!(
            cfg.validate(),
            Err(BinderError::ConfigError(_))
        ));
    }
}
