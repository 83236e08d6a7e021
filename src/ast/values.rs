use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Right-hand side of a condition, as handed over by the caller.
///
/// `JsonNull` and `SqlNull` are never interchangeable: the first is the JSON
/// token `null` stored inside the document, the second asks for an IS NULL
/// test on the extracted value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ComparisonValue {
    JsonNull,
    SqlNull,
    Literal(JsonValue),
}

impl ComparisonValue {
    pub fn literal(value: impl Into<JsonValue>) -> Self {
        ComparisonValue::from(value.into())
    }
}

impl From<JsonValue> for ComparisonValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => ComparisonValue::JsonNull,
            other => ComparisonValue::Literal(other),
        }
    }
}

impl From<&str> for ComparisonValue {
    fn from(value: &str) -> Self {
        ComparisonValue::Literal(JsonValue::String(value.to_string()))
    }
}

impl From<String> for ComparisonValue {
    fn from(value: String) -> Self {
        ComparisonValue::Literal(JsonValue::String(value))
    }
}

impl From<i64> for ComparisonValue {
    fn from(value: i64) -> Self {
        ComparisonValue::Literal(JsonValue::from(value))
    }
}

impl From<i32> for ComparisonValue {
    fn from(value: i32) -> Self {
        ComparisonValue::Literal(JsonValue::from(value))
    }
}

impl From<f64> for ComparisonValue {
    fn from(value: f64) -> Self {
        ComparisonValue::from(JsonValue::from(value))
    }
}

impl From<bool> for ComparisonValue {
    fn from(value: bool) -> Self {
        ComparisonValue::Literal(JsonValue::Bool(value))
    }
}

/// A coerced literal, ready to be inlined or bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// JSON text compared against an extracted JSON value
    Json(String),
    /// IN / NOT IN list
    Array(Vec<Value>),
}

impl Value {
    pub fn is_json(&self) -> bool {
        matches!(self, Value::Json(_))
    }

    /// Plain SQL scalar for a JSON value, used once the extracted side is no
    /// longer JSON (cast paths).
    pub fn from_json_scalar(value: &JsonValue) -> Value {
        match value {
            JsonValue::Null => Value::String("null".to_string()),
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or_default()),
            },
            JsonValue::String(s) => Value::String(s.clone()),
            other => Value::String(other.to_string()),
        }
    }

    /// Text form of a JSON value with string quoting removed.
    pub fn unquoted_text(value: &JsonValue) -> Value {
        match value {
            JsonValue::String(s) => Value::String(s.clone()),
            other => Value::String(other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) | Value::Json(s) => write!(f, "{}", s),
            Value::Array(items) => {
                let items: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
        }
    }
}
