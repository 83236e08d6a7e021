use serde::{Deserialize, Serialize};

use crate::ast::{AttributePath, ComparisonValue, Operator};

/// One resolved condition: a path, an operator and the caller's value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonCondition {
    pub path: AttributePath,
    pub op: Operator,
    pub value: ComparisonValue,
}

impl JsonCondition {
    pub fn new(path: AttributePath, op: Operator, value: impl Into<ComparisonValue>) -> Self {
        Self {
            path,
            op,
            value: value.into(),
        }
    }

    pub fn eq(path: AttributePath, value: impl Into<ComparisonValue>) -> Self {
        Self::new(path, Operator::Eq, value)
    }
}

/// Nested-object addressing, e.g. `{ "address": { "country": "Belgium" } }`.
///
/// Keys are path fragments; entries keep their insertion order.
#[derive(Debug, Clone, PartialEq)]
pub enum NestedCondition {
    /// Terminal value, compared with `=`
    Value(ComparisonValue),
    /// Terminal operator expression, e.g. `{ "$gt": 18 }`
    Ops(Vec<(Operator, ComparisonValue)>),
    /// Another level of keys
    Nested(Vec<(String, NestedCondition)>),
}

impl NestedCondition {
    pub fn nested<K: Into<String>>(
        entries: impl IntoIterator<Item = (K, NestedCondition)>,
    ) -> Self {
        NestedCondition::Nested(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn value(value: impl Into<ComparisonValue>) -> Self {
        NestedCondition::Value(value.into())
    }

    pub fn op(op: Operator, value: impl Into<ComparisonValue>) -> Self {
        NestedCondition::Ops(vec![(op, value.into())])
    }
}
