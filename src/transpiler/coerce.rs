//! Value coercion.
//!
//! Decides how a comparison value is written next to an extracted path:
//! as JSON text (the extracted side is JSON), as a plain scalar (the path is
//! unquoted or cast), or not at all (an IS NULL test).

use serde::Serialize;
use serde_json::Value as JsonValue;

use super::traits::SqlGenerator;
use crate::ast::{AttributePath, ComparisonValue, Operator, Value};

/// Result of coercing one comparison value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoercedValue {
    /// Value to bind, `None` for IS NULL tests
    pub literal: Option<Value>,
    /// Inline SQL for `literal` in the target dialect
    pub literal_sql: Option<String>,
    /// Operator forced by the value, replacing the requested one
    pub operator_override: Option<Operator>,
    /// Path form the literal is compared against, when it differs from the
    /// condition's own path
    pub compare_path: Option<AttributePath>,
}

impl CoercedValue {
    /// Operator to emit for a condition that asked for `requested`.
    pub fn operator(&self, requested: Operator) -> Operator {
        self.operator_override.unwrap_or(requested)
    }

    fn null_test(operator_override: Option<Operator>) -> Self {
        Self {
            literal: None,
            literal_sql: None,
            operator_override,
            compare_path: None,
        }
    }

    fn compared(
        literal: Value,
        compare_path: Option<AttributePath>,
        generator: &dyn SqlGenerator,
    ) -> Self {
        Self {
            literal_sql: Some(generator.value_literal(&literal)),
            literal: Some(literal),
            operator_override: None,
            compare_path,
        }
    }
}

/// Coerce `value` for comparison with `path` under `op`.
///
/// `SqlNull` always turns into an IS NULL form (IS NOT NULL for negative
/// operators) and binds nothing. `JsonNull` is the JSON token `null`; it is
/// only visible in the JSON extraction, so it is compared there whatever
/// modifiers the path carries.
pub fn coerce(
    path: &AttributePath,
    op: Operator,
    value: &ComparisonValue,
    generator: &dyn SqlGenerator,
) -> CoercedValue {
    if op.is_null_test() {
        return CoercedValue::null_test(None);
    }

    let json = match value {
        ComparisonValue::SqlNull => {
            let forced = if op.is_negative() {
                Operator::IsNotNull
            } else {
                Operator::IsNull
            };
            return CoercedValue::null_test(Some(forced));
        }
        ComparisonValue::JsonNull => {
            let token = Value::Json("null".to_string());
            let literal = if op.is_list() {
                Value::Array(vec![token])
            } else {
                token
            };
            let json_path = path.without_modifiers();
            let compare_path = (json_path != *path).then_some(json_path);
            return CoercedValue::compared(literal, compare_path, generator);
        }
        ComparisonValue::Literal(json) => json,
    };

    // Engines whose extraction stops at objects and arrays read scalars
    // through the unquoted form.
    let compare_path = (path.compares_as_json()
        && generator.extracts_containers_only()
        && only_scalars(json, op))
    .then(|| path.clone().unquote());
    let target = compare_path.as_ref().unwrap_or(path);

    let literal = match json {
        JsonValue::Array(items) if op.is_list() => Value::Array(
            items
                .iter()
                .map(|item| literal_for(target, item, generator))
                .collect(),
        ),
        item if op.is_list() => Value::Array(vec![literal_for(target, item, generator)]),
        item => literal_for(target, item, generator),
    };
    CoercedValue::compared(literal, compare_path, generator)
}

fn literal_for(path: &AttributePath, value: &JsonValue, generator: &dyn SqlGenerator) -> Value {
    if path.compares_as_json() {
        Value::Json(value.to_string())
    } else if path.cast.is_some() {
        Value::from_json_scalar(value)
    } else {
        generator.unquoted_scalar(value)
    }
}

fn only_scalars(value: &JsonValue, op: Operator) -> bool {
    let is_scalar = |v: &JsonValue| {
        matches!(v, JsonValue::Bool(_) | JsonValue::Number(_) | JsonValue::String(_))
    };
    match value {
        JsonValue::Array(items) if op.is_list() => items.iter().all(is_scalar),
        other => is_scalar(other),
    }
}
