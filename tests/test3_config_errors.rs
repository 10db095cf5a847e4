use sql_binder::prelude::*;
use tokio::runtime::Runtime;

#[test]
fn zero_pool_size_fails_construction() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let cfg = BinderConfig::new("/tmp/never-opened.db", "", "").with_max_pool_size(0);
        let err = QueryBinder::connect(cfg).await.unwrap_err();
        assert!(matches!(err, BinderError::ConfigError(_)));
    });
}

#[test]
fn unknown_scheme_fails_construction() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let cfg = BinderConfig::new("mongodb://somewhere/db", "u", "p");
        let err = QueryBinder::connect(cfg).await.unwrap_err();
        assert!(matches!(err, BinderError::ConfigError(_)));
    });
}

#[test]
fn empty_url_fails_construction() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let cfg = BinderConfig::new("", "", "");
        let err = QueryBinder::connect(cfg).await.unwrap_err();
        assert!(matches!(err, BinderError::ConfigError(_)));
    });
}

#[test]
fn pathless_sqlite_url_fails_construction() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        // "sqlite://" with nothing after the scheme would open a private
        // temporary database per pooled connection.
        let cfg = BinderConfig::new("sqlite://", "", "").with_max_pool_size(3);
        let err = QueryBinder::connect(cfg).await.unwrap_err();
        assert!(matches!(err, BinderError::ConfigError(_)));
    });
}

#[test]
fn mistyped_scheme_fails_construction() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        // A single-slash scheme must not be treated as a relative SQLite path.
        let cfg = BinderConfig::new("postgres:/host/db", "u", "p");
        let err = QueryBinder::connect(cfg).await.unwrap_err();
        assert!(matches!(err, BinderError::ConfigError(_)));
    });
}

#[cfg(feature = "postgres")]
#[test]
fn malformed_postgres_url_fails_construction() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        // Invalid port: rejected while parsing, before any connection attempt.
        let cfg = BinderConfig::new("postgres://host:not-a-port/db", "u", "p");
        let err = QueryBinder::connect(cfg).await.unwrap_err();
        assert!(matches!(err, BinderError::ConfigError(_)));
    });
}

#[cfg(feature = "sqlite")]
#[test]
fn default_pool_size_is_five() {
    let cfg = BinderConfig::new("/tmp/app.db", "", "");
    assert_eq!(cfg.max_pool_size, sql_binder::config::DEFAULT_MAX_POOL_SIZE);
    assert_eq!(cfg.max_pool_size, 5);
    assert_eq!(cfg.log_level, LogLevel::Error);
}
