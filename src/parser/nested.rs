//! Nested-object normalizer.
//!
//! `{ "address": { "country": "Belgium" } }` under `data` resolves to the
//! same `AttributePath` as the flat text `data.address.country`. Each key is
//! parsed as a path fragment, so `"[0]"` steps into an array and
//! `"age::integer"` ends the path with a cast.

use serde_json::{Map, Value as JsonValue};

use crate::ast::operators::OPERATOR_KEYS;
use crate::ast::{AttributePath, ComparisonValue, JsonCondition, NestedCondition, Operator};
use crate::error::{suggest, PathError, SyntaxError};

use super::path::{parse_fragment, parse_path};

/// Marker object for an explicit SQL NULL test: `{ "$sqlNull": true }`.
pub const SQL_NULL_KEY: &str = "$sqlNull";

/// Resolve nested conditions under `base` into one condition per leaf.
///
/// `base` is itself path text, so `data.meta` is accepted. Siblings are
/// returned in insertion order; combining them (AND) is up to the caller.
pub fn normalize(base: &str, nested: &NestedCondition) -> Result<Vec<JsonCondition>, PathError> {
    let root = parse_path(base)?;
    let mut conditions = Vec::new();
    walk(&root, nested, &mut conditions)?;
    tracing::debug!(base, conditions = conditions.len(), "normalized nested conditions");
    Ok(conditions)
}

fn walk(
    prefix: &AttributePath,
    node: &NestedCondition,
    out: &mut Vec<JsonCondition>,
) -> Result<(), PathError> {
    match node {
        NestedCondition::Value(value) => {
            out.push(JsonCondition::new(prefix.clone(), Operator::Eq, value.clone()));
        }
        NestedCondition::Ops(ops) => {
            for (op, value) in ops {
                out.push(JsonCondition::new(prefix.clone(), *op, value.clone()));
            }
        }
        NestedCondition::Nested(entries) => {
            for (key, child) in entries {
                let nested_key_error = |source: SyntaxError| PathError::NestedKey {
                    key: key.clone(),
                    source,
                };
                let fragment = parse_fragment(key).map_err(nested_key_error)?;
                tracing::trace!(
                    key = %key,
                    index_step = fragment.starts_with_index(),
                    "nested key"
                );
                let path = prefix.join(fragment).map_err(nested_key_error)?;
                if path.has_modifiers() && matches!(child, NestedCondition::Nested(_)) {
                    return Err(nested_key_error(SyntaxError::ModifierNotTrailing {
                        position: key.len(),
                    }));
                }
                walk(&path, child, out)?;
            }
        }
    }
    Ok(())
}

impl TryFrom<JsonValue> for NestedCondition {
    type Error = PathError;

    /// Objects whose keys all start with `$` are operator expressions,
    /// other objects nest, everything else is a literal.
    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        match value {
            JsonValue::Object(map) => from_object(map),
            other => Ok(NestedCondition::Value(ComparisonValue::from(other))),
        }
    }
}

fn from_object(map: Map<String, JsonValue>) -> Result<NestedCondition, PathError> {
    let operator_keys = map.keys().filter(|k| k.starts_with('$')).count();

    if operator_keys == 0 {
        let entries = map
            .into_iter()
            .map(|(key, value)| Ok((key, NestedCondition::try_from(value)?)))
            .collect::<Result<Vec<_>, PathError>>()?;
        return Ok(NestedCondition::Nested(entries));
    }

    if operator_keys != map.len() {
        return Err(PathError::MixedOperatorKeys {
            keys: map.keys().cloned().collect::<Vec<_>>().join(", "),
        });
    }

    if let Some(flag) = sql_null_flag(&map) {
        return sql_null(flag).map(NestedCondition::Value);
    }

    let ops = map
        .into_iter()
        .map(|(key, value)| {
            let op = Operator::from_key(&key).ok_or_else(|| {
                let known: Vec<&str> = OPERATOR_KEYS.iter().map(|(k, _)| *k).collect();
                PathError::UnknownOperator {
                    suggestion: suggest(&key, &known),
                    key,
                }
            })?;
            Ok((op, operand(value)?))
        })
        .collect::<Result<Vec<_>, PathError>>()?;
    Ok(NestedCondition::Ops(ops))
}

fn operand(value: JsonValue) -> Result<ComparisonValue, PathError> {
    let flag = match &value {
        JsonValue::Object(map) => sql_null_flag(map),
        _ => None,
    };
    match flag {
        Some(flag) => sql_null(flag),
        None => Ok(ComparisonValue::from(value)),
    }
}

/// Value of a lone `$sqlNull` key.
fn sql_null_flag(map: &Map<String, JsonValue>) -> Option<&JsonValue> {
    match map.get(SQL_NULL_KEY) {
        Some(flag) if map.len() == 1 => Some(flag),
        _ => None,
    }
}

fn sql_null(flag: &JsonValue) -> Result<ComparisonValue, PathError> {
    match flag {
        JsonValue::Bool(true) => Ok(ComparisonValue::SqlNull),
        other => Err(PathError::InvalidSqlNull {
            found: other.to_string(),
        }),
    }
}
