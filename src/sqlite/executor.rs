use std::sync::Arc;

use deadpool_sqlite::Object;
use deadpool_sqlite::rusqlite;
use rusqlite::Statement;

use super::params::apply_binds;
use crate::bind::BindPlan;
use crate::error::BinderError;
use crate::results::{ResultSet, Row};
use crate::types::SqlValue;

fn extract_value(row: &rusqlite::Row, idx: usize) -> Result<SqlValue, BinderError> {
    match row.get_ref(idx) {
        Err(e) => Err(BinderError::SqliteError(e)),
        Ok(rusqlite::types::ValueRef::Null) => Ok(SqlValue::Null),
        Ok(rusqlite::types::ValueRef::Integer(i)) => Ok(SqlValue::Int(i)),
        Ok(rusqlite::types::ValueRef::Real(f)) => Ok(SqlValue::Float(f)),
        Ok(rusqlite::types::ValueRef::Text(bytes)) => {
            Ok(SqlValue::Text(String::from_utf8_lossy(bytes).into_owned()))
        }
        Ok(rusqlite::types::ValueRef::Blob(b)) => Ok(SqlValue::Blob(b.to_vec())),
    }
}

fn build_result_set(stmt: &mut Statement) -> Result<ResultSet, BinderError> {
    let column_names: Vec<String> = stmt.column_names().iter().map(|s| (*s).to_string()).collect();
    let column_names = Arc::new(column_names);

    let mut result_set = ResultSet::default();
    let mut rows_iter = stmt.raw_query();
    while let Some(row) = rows_iter.next()? {
        let mut values = Vec::with_capacity(column_names.len());
        for i in 0..column_names.len() {
            values.push(extract_value(row, i)?);
        }
        result_set.add_row(Row::new(column_names.clone(), values));
    }

    Ok(result_set)
}

/// Run a SELECT on a pooled connection; blocking work goes through `interact`.
pub(crate) async fn execute_select(
    client: &Object,
    query: &str,
    plan: BindPlan,
) -> Result<ResultSet, BinderError> {
    let query_owned = query.to_owned();
    client
        .interact(move |conn| -> Result<ResultSet, BinderError> {
            let mut stmt = conn.prepare(&query_owned)?;
            apply_binds(&mut stmt, &plan)?;
            build_result_set(&mut stmt)
        })
        .await?
}

/// Run a DML statement and return the number of rows it affected.
pub(crate) async fn execute_dml(
    client: &Object,
    query: &str,
    plan: BindPlan,
) -> Result<usize, BinderError> {
    let query_owned = query.to_owned();
    client
        .interact(move |conn| -> Result<usize, BinderError> {
            let mut stmt = conn.prepare(&query_owned)?;
            apply_binds(&mut stmt, &plan)?;
            stmt.raw_execute().map_err(BinderError::SqliteError)
        })
        .await?
}
