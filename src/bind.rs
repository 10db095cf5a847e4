//! Bind entries and the plan that resolves them before execution.
//!
//! A [`Bind`] is either a positional pair, a named pair, or a set of fields
//! taken from a [`Bindable`] value. Resolution flattens default and per-call
//! entries into one ordered [`BindPlan`]; backends apply the plan in order, so
//! a later entry for the same placeholder overwrites an earlier one.

use crate::error::BinderError;
use crate::types::SqlValue;

/// Capability for binding a value's fields by name.
///
/// Replaces reflective "bean" introspection with an explicit, statically
/// checkable contract: the type decides which `(name, value)` pairs it
/// exposes, in which order.
pub trait Bindable {
    fn bind_fields(&self) -> Vec<(String, SqlValue)>;
}

/// A single bind entry supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Bind {
    /// Positional parameter; the index is the 1-based placeholder number
    /// (`?1` for SQLite, `$1` for Postgres).
    Positional(usize, SqlValue),
    /// Named parameter, matching a `:name` placeholder in the SQL text.
    Named(String, SqlValue),
    /// Field set captured from a [`Bindable`] value.
    Fields(Vec<(String, SqlValue)>),
}

impl Bind {
    /// Positional bind at the given 1-based placeholder index.
    pub fn pos(index: usize, value: impl Into<SqlValue>) -> Self {
        Bind::Positional(index, value.into())
    }

    /// Named bind for a `:name` placeholder. Names starting with `_` are
    /// reserved for caller metadata and are never sent to the statement.
    pub fn named(name: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Bind::Named(name.into(), value.into())
    }

    /// Capture the fields of a [`Bindable`] value, bound by name.
    pub fn fields(source: &dyn Bindable) -> Self {
        Bind::Fields(source.bind_fields())
    }
}

/// One resolved entry, ready for a backend to apply.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PlannedBind {
    Position(usize, SqlValue),
    Name {
        name: String,
        value: SqlValue,
        /// Entries expanded from a field set tolerate a missing placeholder;
        /// explicit named binds do not.
        from_fields: bool,
    },
}

/// Ordered, validated bind entries for one statement execution.
#[derive(Debug, Clone, Default)]
pub(crate) struct BindPlan {
    entries: Vec<PlannedBind>,
}

impl BindPlan {
    /// Flatten defaults followed by per-call binds into one ordered plan.
    ///
    /// Underscore-prefixed named entries are dropped here, so they can never
    /// reach a statement. Field sets are expanded in place; an empty field
    /// set is rejected, as is a positional index of 0.
    pub(crate) fn resolve(defaults: &[Bind], binds: &[Bind]) -> Result<Self, BinderError> {
        let mut entries = Vec::with_capacity(defaults.len() + binds.len());
        for bind in defaults.iter().chain(binds.iter()) {
            match bind {
                Bind::Positional(index, value) => {
                    if *index == 0 {
                        return Err(BinderError::BindError(
                            "positional bind index is 1-based; got 0".to_string(),
                        ));
                    }
                    entries.push(PlannedBind::Position(*index, value.clone()));
                }
                Bind::Named(name, value) => {
                    if name.starts_with('_') {
                        tracing::debug!(name = %name, "skipping reserved bind key");
                        continue;
                    }
                    entries.push(PlannedBind::Name {
                        name: name.clone(),
                        value: value.clone(),
                        from_fields: false,
                    });
                }
                Bind::Fields(fields) => {
                    if fields.is_empty() {
                        return Err(BinderError::BindError(
                            "bindable value exposes no fields".to_string(),
                        ));
                    }
                    for (name, value) in fields {
                        entries.push(PlannedBind::Name {
                            name: name.clone(),
                            value: value.clone(),
                            from_fields: true,
                        });
                    }
                }
            }
        }
        Ok(BindPlan { entries })
    }

    pub(crate) fn entries(&self) -> &[PlannedBind] {
        &self.entries
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
