//! SQL Server: `JSON_QUERY` / `JSON_VALUE` with SQL/JSON path strings.
//!
//! `JSON_QUERY` only returns objects and arrays and `JSON_VALUE` only
//! scalars. Scalar comparisons and casts go through `JSON_VALUE`; the JSON
//! token `null`, which both read as SQL NULL, is found by its `OPENJSON` type.

use crate::ast::{AttributePath, PathSegment};
use crate::transpiler::traits::{escape_identifier, json_path_string, SqlGenerator};

#[derive(Debug, Clone, Copy, Default)]
pub struct MsSql;

impl SqlGenerator for MsSql {
    fn quote_identifier(&self, name: &str) -> String {
        escape_identifier(name, '[', ']')
    }

    fn placeholder(&self, index: usize) -> String {
        format!("@p{}", index)
    }

    fn extract(&self, column: &str, segments: &[PathSegment]) -> String {
        if segments.is_empty() {
            return column.to_string();
        }
        format!(
            "JSON_QUERY({}, {})",
            column,
            self.string_literal(&json_path_string(segments))
        )
    }

    fn extract_and_unquote(&self, column: &str, segments: &[PathSegment]) -> String {
        format!(
            "JSON_VALUE({}, {})",
            column,
            self.string_literal(&json_path_string(segments))
        )
    }

    /// A cast target is always scalar, which `JSON_QUERY` never returns.
    fn path_expr(&self, path: &AttributePath) -> String {
        let column = self.quote_identifier(&path.base);
        match &path.cast {
            Some(target_type) => {
                self.cast(&self.extract_and_unquote(&column, &path.segments), target_type)
            }
            None if path.unquote => self.extract_and_unquote(&column, &path.segments),
            None => self.extract(&column, &path.segments),
        }
    }

    fn json_literal(&self, literal: &str) -> String {
        literal.to_string()
    }

    fn extracts_containers_only(&self) -> bool {
        true
    }

    /// `OPENJSON` reports type 0 for a `null` member.
    fn json_null_test(
        &self,
        column: &str,
        segments: &[PathSegment],
        negated: bool,
    ) -> Option<String> {
        let (last, parent) = segments.split_last()?;
        let key = match last {
            PathSegment::Property(name) => name.clone(),
            PathSegment::Index(i) => i.to_string(),
        };
        Some(format!(
            "(SELECT [type] FROM OPENJSON({}, {}) WHERE [key] = {}) {} 0",
            column,
            self.string_literal(&json_path_string(parent)),
            self.string_literal(&key),
            if negated { "<>" } else { "=" }
        ))
    }

    fn string_literal(&self, value: &str) -> String {
        format!("N'{}'", value.replace('\'', "''"))
    }

    fn bool_literal(&self, value: bool) -> String {
        if value { "1".to_string() } else { "0".to_string() }
    }
}
