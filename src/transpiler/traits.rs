use serde_json::Value as JsonValue;

use crate::ast::{AttributePath, PathSegment, Value};

/// Dialect-specific SQL spelling of JSON path access.
///
/// `extract`, `extract_and_unquote` and `cast` are the three capabilities a
/// dialect must provide; everything else has a standard-SQL default.
pub trait SqlGenerator: Send + Sync {
    /// Quote a column name.
    fn quote_identifier(&self, name: &str) -> String;

    /// Bind placeholder for the 1-based parameter `index`.
    fn placeholder(&self, index: usize) -> String;

    /// JSON value reached by following `segments` from `column`.
    /// With no segments this is the column itself.
    fn extract(&self, column: &str, segments: &[PathSegment]) -> String;

    /// Same traversal as `extract`, with string quoting removed from the
    /// result.
    fn extract_and_unquote(&self, column: &str, segments: &[PathSegment]) -> String;

    /// Cast `expr` to `target_type`, passed through verbatim.
    fn cast(&self, expr: &str, target_type: &str) -> String {
        format!("CAST({} AS {})", expr, target_type)
    }

    /// Wrap a literal holding JSON text so it compares as JSON.
    fn json_literal(&self, literal: &str) -> String;

    /// Wrap an extracted JSON value before comparing it with `json_literal`.
    fn json_comparable(&self, expr: &str) -> String {
        expr.to_string()
    }

    fn string_literal(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    fn bool_literal(&self, value: bool) -> String {
        if value { "TRUE".to_string() } else { "FALSE".to_string() }
    }

    /// Spelling of a JSON scalar compared against an unquoted extraction.
    /// Unquoting yields text in most engines.
    fn unquoted_scalar(&self, value: &JsonValue) -> Value {
        Value::unquoted_text(value)
    }

    /// True when `extract` only reaches objects and arrays, so scalar
    /// literals are compared through `extract_and_unquote` instead.
    fn extracts_containers_only(&self) -> bool {
        false
    }

    /// Test for the JSON token `null` at `segments`, for engines whose
    /// extractions read it as SQL NULL. With `None` the token is compared as
    /// a JSON literal; with `Some` nothing is bound.
    fn json_null_test(
        &self,
        _column: &str,
        _segments: &[PathSegment],
        _negated: bool,
    ) -> Option<String> {
        None
    }

    /// `IS NULL` / `IS NOT NULL` test.
    fn null_test(&self, expr: &str, negated: bool) -> String {
        if negated {
            format!("{} IS NOT NULL", expr)
        } else {
            format!("{} IS NULL", expr)
        }
    }

    /// Full path expression: extraction (unquoted when requested), then the
    /// cast around it. Never the other way round.
    fn path_expr(&self, path: &AttributePath) -> String {
        let column = self.quote_identifier(&path.base);
        let expr = if path.unquote {
            self.extract_and_unquote(&column, &path.segments)
        } else {
            self.extract(&column, &path.segments)
        };
        match &path.cast {
            Some(target_type) => self.cast(&expr, target_type),
            None => expr,
        }
    }

    /// Inline SQL for a coerced literal.
    fn value_literal(&self, value: &Value) -> String {
        match value {
            Value::Bool(b) => self.bool_literal(*b),
            Value::Int(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::String(s) => self.string_literal(s),
            Value::Json(s) => self.json_literal(&self.string_literal(s)),
            Value::Array(items) => {
                let items: Vec<String> = items.iter().map(|v| self.value_literal(v)).collect();
                format!("({})", items.join(", "))
            }
        }
    }
}

/// Quote an identifier with `open`/`close`, doubling embedded `close`.
pub fn escape_identifier(name: &str, open: char, close: char) -> String {
    let doubled = format!("{}{}", close, close);
    format!("{}{}{}", open, name.replace(close, &doubled), close)
}

/// SQL/JSON path text (`$.a[0]."b.c"`) used by the function-call dialects.
pub fn json_path_string(segments: &[PathSegment]) -> String {
    json_path_with(segments, |name| name.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Path text with quoted labels written by `quote_label`, which receives the
/// raw key and returns the text between the quotes.
pub fn json_path_with(segments: &[PathSegment], quote_label: impl Fn(&str) -> String) -> String {
    let mut path = String::from("$");
    for segment in segments {
        match segment {
            PathSegment::Property(name) if is_path_identifier(name) => {
                path.push('.');
                path.push_str(name);
            }
            PathSegment::Property(name) => {
                path.push_str(".\"");
                path.push_str(&quote_label(name));
                path.push('"');
            }
            PathSegment::Index(i) => {
                path.push('[');
                path.push_str(&i.to_string());
                path.push(']');
            }
        }
    }
    path
}

/// Keys that may appear unquoted in a SQL/JSON path.
fn is_path_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_identifier() {
        assert_eq!(escape_identifier("data", '"', '"'), "\"data\"");
        assert_eq!(escape_identifier("we\"ird", '"', '"'), "\"we\"\"ird\"");
        assert_eq!(escape_identifier("a]b", '[', ']'), "[a]]b]");
    }

    #[test]
    fn test_json_path_string() {
        let segments = vec![
            PathSegment::Property("address".into()),
            PathSegment::Index(3),
            PathSegment::Property("first name".into()),
            PathSegment::Property("a\"b".into()),
            PathSegment::Property("1st".into()),
        ];
        assert_eq!(
            json_path_string(&segments),
            r#"$.address[3]."first name"."a\"b"."1st""#
        );
        assert_eq!(json_path_string(&[]), "$");
    }
}
