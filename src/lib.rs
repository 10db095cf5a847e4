//! Thin convenience layer over pooled SQL clients.
//!
//! `sql-binder` wraps a connection pool and a driver behind three helpers:
//! [`fetch`](binder::QueryBinder::fetch) maps query rows onto typed values,
//! [`execute`](binder::QueryBinder::execute) returns affected-row counts, and
//! [`fetch_one`](binder::QueryBinder::fetch_one) returns the first row or a
//! caller-supplied default. Parameters are bound positionally, by name, or
//! from the fields of a [`Bindable`](bind::Bindable) value; a
//! [`ScopedBinder`](binder::ScopedBinder) carries a default bind set applied
//! ahead of every call's own binds until cleared.
//!
//! Pooling, statement preparation, and row decoding are delegated to
//! `deadpool-postgres`/`tokio-postgres` and `deadpool-sqlite`/`rusqlite`;
//! backends are feature-gated and selected by URL scheme.

pub mod bind;
pub mod binder;
pub mod config;
pub mod error;
mod logging;
pub mod pool;
pub mod prelude;
pub mod results;
pub mod types;

#[cfg(feature = "postgres")]
mod postgres;
#[cfg(feature = "sqlite")]
mod sqlite;
#[cfg(feature = "postgres")]
mod translation;

pub use bind::{Bind, Bindable};
pub use binder::{QueryBinder, ScopedBinder};
pub use config::BinderConfig;
pub use error::BinderError;
pub use results::{FromRow, ResultSet, Row};
pub use types::{DatabaseType, LogLevel, SqlValue};
