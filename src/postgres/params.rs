use std::error::Error;

use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};
use tokio_util::bytes;

use crate::bind::{BindPlan, PlannedBind};
use crate::error::BinderError;
use crate::translation::RewrittenSql;
use crate::types::SqlValue;

/// Fill the statement's positional slots from a bind plan.
///
/// Entries are applied in plan order and later entries for the same slot win,
/// which gives per-call binds precedence over scope defaults. Every slot must
/// end up filled: the wire protocol has no notion of an unbound parameter.
pub(crate) fn materialize(
    plan: &BindPlan,
    rewritten: &RewrittenSql,
) -> Result<Vec<SqlValue>, BinderError> {
    let mut slots: Vec<Option<SqlValue>> = vec![None; rewritten.slot_count];
    for bind in plan.entries() {
        match bind {
            PlannedBind::Position(index, value) => {
                if *index > rewritten.slot_count {
                    return Err(BinderError::BindError(format!(
                        "no such placeholder: ${index}"
                    )));
                }
                slots[*index - 1] = Some(value.clone());
            }
            PlannedBind::Name {
                name,
                value,
                from_fields,
            } => match rewritten.names.get(name) {
                Some(slot) => slots[*slot - 1] = Some(value.clone()),
                // Field sets may carry more than the statement uses.
                None if *from_fields => {}
                None => {
                    return Err(BinderError::BindError(format!(
                        "no such placeholder: :{name}"
                    )));
                }
            },
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(i, slot)| {
            slot.ok_or_else(|| {
                BinderError::BindError(format!("no value bound for parameter ${}", i + 1))
            })
        })
        .collect()
}

pub(crate) fn as_refs(values: &[SqlValue]) -> Vec<&(dyn ToSql + Sync)> {
    values.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
}

impl ToSql for SqlValue {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut bytes::BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            SqlValue::Int(i) => (*i).to_sql(ty, out),
            SqlValue::Float(f) => (*f).to_sql(ty, out),
            SqlValue::Text(s) => s.to_sql(ty, out),
            SqlValue::Bool(b) => (*b).to_sql(ty, out),
            SqlValue::Timestamp(dt) => dt.to_sql(ty, out),
            SqlValue::Null => Ok(IsNull::Yes),
            SqlValue::Json(jsval) => jsval.to_sql(ty, out),
            SqlValue::Blob(bytes) => bytes.to_sql(ty, out),
        }
    }

    fn accepts(ty: &Type) -> bool {
        matches!(
            *ty,
            Type::INT2
                | Type::INT4
                | Type::INT8
                | Type::FLOAT4
                | Type::FLOAT8
                | Type::TEXT
                | Type::VARCHAR
                | Type::CHAR
                | Type::NAME
                | Type::BOOL
                | Type::TIMESTAMP
                | Type::TIMESTAMPTZ
                | Type::DATE
                | Type::JSON
                | Type::JSONB
                | Type::BYTEA
        )
    }

    to_sql_checked!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bind::Bind;
    use crate::translation::rewrite_named;

    #[test]
    fn later_binds_overwrite_earlier_slots() {
        let rewritten = rewrite_named("SELECT * FROM t WHERE name = :name");
        let plan = BindPlan::resolve(
            &[Bind::named("name", "default")],
            &[Bind::named("name", "override")],
        )
        .unwrap();
        let values = materialize(&plan, &rewritten).unwrap();
        assert_eq!(values, vec![SqlValue::Text("override".to_string())]);
    }

    #[test]
    fn unknown_named_placeholder_is_a_bind_error() {
        let rewritten = rewrite_named("SELECT 1");
        let plan = BindPlan::resolve(&[], &[Bind::named("nope", 1i64)]).unwrap();
        assert!(matches!(
            materialize(&plan, &rewritten),
            Err(BinderError::BindError(_))
        ));
    }

    #[test]
    fn unfilled_slot_is_a_bind_error() {
        let rewritten = rewrite_named("SELECT * FROM t WHERE a = :a AND b = :b");
        let plan = BindPlan::resolve(&[], &[Bind::named("a", 1i64)]).unwrap();
        assert!(matches!(
            materialize(&plan, &rewritten),
            Err(BinderError::BindError(_))
        ));
    }

    #[test]
    fn positional_and_named_share_the_slot_table() {
        let rewritten = rewrite_named("UPDATE t SET a = $1 WHERE b = :b");
        let plan =
            BindPlan::resolve(&[], &[Bind::pos(1, 10i64), Bind::named("b", 20i64)]).unwrap();
        let values = materialize(&plan, &rewritten).unwrap();
        assert_eq!(values, vec![SqlValue::Int(10), SqlValue::Int(20)]);
    }
}
