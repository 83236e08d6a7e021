//! MySQL and MariaDB: `JSON_EXTRACT` with a string path, unquoted through
//! `JSON_UNQUOTE`.

use crate::ast::PathSegment;
use crate::transpiler::traits::{escape_identifier, json_path_string, SqlGenerator};

#[derive(Debug, Clone, Copy, Default)]
pub struct MySql;

/// Same path functions as MySQL, but no `JSON` cast target: both sides of a
/// JSON comparison are normalised with `JSON_COMPACT`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MariaDb;

fn json_extract(generator: &dyn SqlGenerator, column: &str, segments: &[PathSegment]) -> String {
    if segments.is_empty() {
        return column.to_string();
    }
    format!(
        "JSON_EXTRACT({}, {})",
        column,
        generator.string_literal(&json_path_string(segments))
    )
}

/// Backslashes are escape characters in MySQL string literals.
fn mysql_string_literal(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "''"))
}

impl SqlGenerator for MySql {
    fn quote_identifier(&self, name: &str) -> String {
        escape_identifier(name, '`', '`')
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn extract(&self, column: &str, segments: &[PathSegment]) -> String {
        json_extract(self, column, segments)
    }

    fn extract_and_unquote(&self, column: &str, segments: &[PathSegment]) -> String {
        format!("JSON_UNQUOTE({})", self.extract(column, segments))
    }

    fn json_literal(&self, literal: &str) -> String {
        format!("CAST({} AS JSON)", literal)
    }

    fn string_literal(&self, value: &str) -> String {
        mysql_string_literal(value)
    }
}

impl SqlGenerator for MariaDb {
    fn quote_identifier(&self, name: &str) -> String {
        escape_identifier(name, '`', '`')
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn extract(&self, column: &str, segments: &[PathSegment]) -> String {
        json_extract(self, column, segments)
    }

    fn extract_and_unquote(&self, column: &str, segments: &[PathSegment]) -> String {
        format!("JSON_UNQUOTE({})", self.extract(column, segments))
    }

    fn json_literal(&self, literal: &str) -> String {
        format!("JSON_COMPACT({})", literal)
    }

    fn json_comparable(&self, expr: &str) -> String {
        format!("JSON_COMPACT({})", expr)
    }

    fn string_literal(&self, value: &str) -> String {
        mysql_string_literal(value)
    }
}
