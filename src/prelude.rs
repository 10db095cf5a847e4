//! Convenience re-exports for the common API surface.
//!
//! ```rust
//! use sql_binder::prelude::*;
//! ```

pub use crate::bind::{Bind, Bindable};
pub use crate::binder::{QueryBinder, ScopedBinder};
pub use crate::config::BinderConfig;
pub use crate::error::BinderError;
pub use crate::results::{FromRow, ResultSet, Row};
pub use crate::types::{DatabaseType, LogLevel, SqlValue};
