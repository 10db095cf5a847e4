use deadpool_sqlite::rusqlite;
use rusqlite::Statement;

use crate::bind::{BindPlan, PlannedBind};
use crate::error::BinderError;
use crate::types::SqlValue;

/// Convert a binder value into rusqlite's owned value type.
pub(crate) fn to_sqlite(value: &SqlValue) -> rusqlite::types::Value {
    match value {
        SqlValue::Int(i) => rusqlite::types::Value::Integer(*i),
        SqlValue::Float(f) => rusqlite::types::Value::Real(*f),
        SqlValue::Text(s) => rusqlite::types::Value::Text(s.clone()),
        SqlValue::Bool(b) => rusqlite::types::Value::Integer(i64::from(*b)),
        SqlValue::Timestamp(dt) => {
            let formatted = dt.format("%F %T%.f").to_string();
            rusqlite::types::Value::Text(formatted)
        }
        SqlValue::Null => rusqlite::types::Value::Null,
        SqlValue::Json(jsval) => rusqlite::types::Value::Text(jsval.to_string()),
        SqlValue::Blob(bytes) => rusqlite::types::Value::Blob(bytes.clone()),
    }
}

/// Apply a bind plan to a prepared statement via raw binding.
///
/// Entries are applied in plan order; rebinding the same parameter index
/// overwrites the earlier value, which is how per-call binds override scope
/// defaults. Positional indexes are 1-based, matching `?1` placeholders.
pub(crate) fn apply_binds(stmt: &mut Statement<'_>, plan: &BindPlan) -> Result<(), BinderError> {
    for bind in plan.entries() {
        match bind {
            PlannedBind::Position(index, value) => {
                stmt.raw_bind_parameter(*index, to_sqlite(value))
                    .map_err(|e| {
                        BinderError::BindError(format!("positional bind {index} rejected: {e}"))
                    })?;
            }
            PlannedBind::Name {
                name,
                value,
                from_fields,
            } => {
                let placeholder = format!(":{name}");
                match stmt.parameter_index(&placeholder)? {
                    Some(index) => {
                        stmt.raw_bind_parameter(index, to_sqlite(value))?;
                    }
                    // Field sets may carry more than the statement uses.
                    None if *from_fields => {}
                    None => {
                        return Err(BinderError::BindError(format!(
                            "no such placeholder: {placeholder}"
                        )));
                    }
                }
            }
        }
    }
    Ok(())
}
