//! SQLite 3.38+ `->` / `->>` operators with SQL/JSON path strings.
//!
//! SQLite path labels have no escape syntax, and releases disagree on what a
//! backslash inside one means. Keys containing `"` or `\` are therefore read
//! through a `json_each` lookup instead of the path string.

use serde_json::Value as JsonValue;

use crate::ast::{PathSegment, Value};
use crate::transpiler::traits::{escape_identifier, json_path_with, SqlGenerator};

#[derive(Debug, Clone, Copy, Default)]
pub struct Sqlite;

impl Sqlite {
    fn path_operator(&self, column: &str, segments: &[PathSegment], as_text: bool) -> String {
        let mut expr = column.to_string();
        let mut rest = segments;
        while let Some((at, key)) = first_lookup_key(rest) {
            if at > 0 {
                expr = format!("{}->{}", expr, self.path_literal(&rest[..at]));
            }
            let last = at + 1 == rest.len();
            expr = self.key_lookup(&expr, key, as_text && last);
            rest = &rest[at + 1..];
        }

        if rest.is_empty() && (!segments.is_empty() || !as_text) {
            return expr;
        }
        let op = if as_text { "->>" } else { "->" };
        format!("{}{}{}", expr, op, self.path_literal(rest))
    }

    /// Quoted path string. Callers never pass keys holding `"` or `\`.
    fn path_literal(&self, segments: &[PathSegment]) -> String {
        self.string_literal(&json_path_with(segments, str::to_string))
    }

    /// Member `key` of the object `expr`. `value` already has `->>` semantics;
    /// the JSON form rebuilds the text `->` would return.
    fn key_lookup(&self, expr: &str, key: &str, as_text: bool) -> String {
        let column = if as_text {
            "value"
        } else {
            "CASE WHEN type IN ('object', 'array') THEN value \
             WHEN type IN ('true', 'false') THEN type \
             ELSE json_quote(value) END"
        };
        format!(
            "(SELECT {} FROM json_each({}) WHERE key = {})",
            column,
            expr,
            self.string_literal(key)
        )
    }
}

/// Position and name of the first key a SQLite path string cannot address.
fn first_lookup_key(segments: &[PathSegment]) -> Option<(usize, &str)> {
    segments.iter().enumerate().find_map(|(i, segment)| match segment {
        PathSegment::Property(name) if name.contains(['"', '\\']) => Some((i, name.as_str())),
        _ => None,
    })
}

impl SqlGenerator for Sqlite {
    fn quote_identifier(&self, name: &str) -> String {
        escape_identifier(name, '"', '"')
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn extract(&self, column: &str, segments: &[PathSegment]) -> String {
        self.path_operator(column, segments, false)
    }

    fn extract_and_unquote(&self, column: &str, segments: &[PathSegment]) -> String {
        self.path_operator(column, segments, true)
    }

    /// `->` yields minified JSON text; `json()` minifies the literal the same way.
    fn json_literal(&self, literal: &str) -> String {
        format!("json({})", literal)
    }

    fn bool_literal(&self, value: bool) -> String {
        if value { "1".to_string() } else { "0".to_string() }
    }

    /// `->>` returns native SQL values: numbers stay numbers, booleans are 1/0.
    fn unquoted_scalar(&self, value: &JsonValue) -> Value {
        match value {
            JsonValue::Bool(b) => Value::Int(i64::from(*b)),
            JsonValue::Number(_) => Value::from_json_scalar(value),
            other => Value::unquoted_text(other),
        }
    }
}
