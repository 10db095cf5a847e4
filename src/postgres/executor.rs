use std::sync::Arc;

use deadpool_postgres::Object;
use tokio_postgres::Statement;

use super::params::{as_refs, materialize};
use crate::bind::BindPlan;
use crate::error::BinderError;
use crate::results::{ResultSet, Row};
use crate::translation::rewrite_named;
use crate::types::SqlValue;

/// Extracts a [`SqlValue`] from a `tokio_postgres` row at the given index.
fn extract_value(row: &tokio_postgres::Row, idx: usize) -> Result<SqlValue, BinderError> {
    let type_name = row.columns()[idx].type_().name();
    match type_name {
        "int2" => {
            let val: Option<i16> = row.try_get(idx)?;
            Ok(val.map_or(SqlValue::Null, |v| SqlValue::Int(i64::from(v))))
        }
        "int4" => {
            let val: Option<i32> = row.try_get(idx)?;
            Ok(val.map_or(SqlValue::Null, |v| SqlValue::Int(i64::from(v))))
        }
        "int8" => {
            let val: Option<i64> = row.try_get(idx)?;
            Ok(val.map_or(SqlValue::Null, SqlValue::Int))
        }
        "float4" | "float8" => {
            let val: Option<f64> = row.try_get(idx)?;
            Ok(val.map_or(SqlValue::Null, SqlValue::Float))
        }
        "bool" => {
            let val: Option<bool> = row.try_get(idx)?;
            Ok(val.map_or(SqlValue::Null, SqlValue::Bool))
        }
        "timestamp" | "timestamptz" => {
            let val: Option<chrono::NaiveDateTime> = row.try_get(idx)?;
            Ok(val.map_or(SqlValue::Null, SqlValue::Timestamp))
        }
        "json" | "jsonb" => {
            let val: Option<serde_json::Value> = row.try_get(idx)?;
            Ok(val.map_or(SqlValue::Null, SqlValue::Json))
        }
        "bytea" => {
            let val: Option<Vec<u8>> = row.try_get(idx)?;
            Ok(val.map_or(SqlValue::Null, SqlValue::Blob))
        }
        _ => {
            let val: Option<String> = row.try_get(idx)?;
            Ok(val.map_or(SqlValue::Null, SqlValue::Text))
        }
    }
}

fn build_result_set(
    stmt: &Statement,
    rows: Vec<tokio_postgres::Row>,
) -> Result<ResultSet, BinderError> {
    let column_names: Vec<String> = stmt
        .columns()
        .iter()
        .map(|col| col.name().to_string())
        .collect();
    let column_names = Arc::new(column_names);

    let mut result_set = ResultSet::with_capacity(rows.len());
    for row in rows {
        let mut values = Vec::with_capacity(column_names.len());
        for i in 0..column_names.len() {
            values.push(extract_value(&row, i)?);
        }
        result_set.add_row(Row::new(column_names.clone(), values));
    }

    Ok(result_set)
}

/// Run a SELECT on a pooled connection.
pub(crate) async fn execute_select(
    client: &Object,
    query: &str,
    plan: BindPlan,
) -> Result<ResultSet, BinderError> {
    let rewritten = rewrite_named(query);
    let values = materialize(&plan, &rewritten)?;
    let stmt = client.prepare(&rewritten.sql).await?;
    let rows = client.query(&stmt, &as_refs(&values)).await?;
    build_result_set(&stmt, rows)
}

/// Run a DML statement and return the number of rows it affected.
pub(crate) async fn execute_dml(
    client: &Object,
    query: &str,
    plan: BindPlan,
) -> Result<usize, BinderError> {
    let rewritten = rewrite_named(query);
    let values = materialize(&plan, &rewritten)?;
    let stmt = client.prepare(&rewritten.sql).await?;
    let affected = client.execute(&stmt, &as_refs(&values)).await?;
    usize::try_from(affected)
        .map_err(|e| BinderError::ExecutionError(format!("affected row count overflow: {e}")))
}
