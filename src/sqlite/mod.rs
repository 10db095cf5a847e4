//! SQLite backend: pool construction and statement execution over
//! `deadpool-sqlite` / `rusqlite`.

mod config;
mod executor;
mod params;

pub(crate) use executor::{execute_dml, execute_select};
