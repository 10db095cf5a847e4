use std::sync::Arc;

use crate::error::BinderError;
use crate::types::SqlValue;

/// A row from a database query result
///
/// Column names are shared across all rows in a result set.
#[derive(Debug, Clone)]
pub struct Row {
    pub column_names: Arc<Vec<String>>,
    pub values: Vec<SqlValue>,
}

impl Row {
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, values: Vec<SqlValue>) -> Self {
        Self {
            column_names,
            values,
        }
    }

    /// Get a value by column name, or `None` if the column is absent.
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&SqlValue> {
        self.column_names
            .iter()
            .position(|name| name == column_name)
            .and_then(|idx| self.values.get(idx))
    }

    /// Get a value by column index.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&SqlValue> {
        self.values.get(index)
    }

    /// Like [`Row::get`], but a missing column is a `MappingError`.
    pub fn require(&self, column_name: &str) -> Result<&SqlValue, BinderError> {
        self.get(column_name)
            .ok_or_else(|| BinderError::MappingError(format!("no such column: {column_name}")))
    }
}

/// Rows returned by a single query execution.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    pub rows: Vec<Row>,
}

impl ResultSet {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
        }
    }

    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Mapping seam between a decoded [`Row`] and a caller's type.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> Result<Self, BinderError>;
}

impl FromRow for Row {
    fn from_row(row: &Row) -> Result<Self, BinderError> {
        Ok(row.clone())
    }
}

// Scalar reads take the first column; handy for counts and single-value
// lookups.
impl FromRow for i64 {
    fn from_row(row: &Row) -> Result<Self, BinderError> {
        match row.get_index(0) {
            Some(SqlValue::Int(v)) => Ok(*v),
            other => Err(BinderError::MappingError(format!(
                "expected integer in column 0, got {other:?}"
            ))),
        }
    }
}

impl FromRow for f64 {
    fn from_row(row: &Row) -> Result<Self, BinderError> {
        match row.get_index(0) {
            Some(SqlValue::Float(v)) => Ok(*v),
            Some(SqlValue::Int(v)) => Ok(*v as f64),
            other => Err(BinderError::MappingError(format!(
                "expected float in column 0, got {other:?}"
            ))),
        }
    }
}

impl FromRow for String {
    fn from_row(row: &Row) -> Result<Self, BinderError> {
        match row.get_index(0) {
            Some(SqlValue::Text(v)) => Ok(v.clone()),
            other => Err(BinderError::MappingError(format!(
                "expected text in column 0, got {other:?}"
            ))),
        }
    }
}

impl FromRow for bool {
    fn from_row(row: &Row) -> Result<Self, BinderError> {
        row.get_index(0)
            .and_then(SqlValue::as_bool)
            .copied()
            .ok_or_else(|| {
                BinderError::MappingError("expected boolean in column 0".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> Row {
        Row::new(
            Arc::new(vec!["id".to_string(), "name".to_string()]),
            vec![SqlValue::Int(7), SqlValue::Text("ada".to_string())],
        )
    }

    #[test]
    fn get_by_name_and_index() {
        let row = sample_row();
        assert_eq!(row.get("id"), Some(&SqlValue::Int(7)));
        assert_eq!(row.get_index(1), Some(&SqlValue::Text("ada".to_string())));
        assert_eq!(row.get("missing"), None);
    }

    #[test]
    fn require_reports_missing_column() {
        let row = sample_row();
        assert!(matches!(
            row.require("missing"),
            Err(BinderError::MappingError(_))
        ));
    }

    #[test]
    fn scalar_from_row() {
        let row = sample_row();
        assert_eq!(i64::from_row(&row).unwrap(), 7);
        assert!(String::from_row(&row).is_err());
    }
}
