//! PostgreSQL JSON operators: `->`, `->>`, `#>`, `#>>`.

use crate::ast::PathSegment;
use crate::transpiler::traits::{escape_identifier, SqlGenerator};

/// `jsonb` columns.
///
/// Multi-step paths use one `#>` with a text-array path. A single step may
/// use the cheaper `->` instead; both read the same value.
#[derive(Debug, Clone, Copy)]
pub struct PostgresJsonb {
    pub single_step_shortcut: bool,
}

impl Default for PostgresJsonb {
    fn default() -> Self {
        Self {
            single_step_shortcut: true,
        }
    }
}

/// `json` columns. Paths are chains of `->` steps; `json` has no equality
/// operator, so JSON comparisons go through `jsonb`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresJson;

impl PostgresJsonb {
    fn path_operator(&self, column: &str, segments: &[PathSegment], as_text: bool) -> String {
        match segments {
            [] if !as_text => column.to_string(),
            [step] if self.single_step_shortcut => {
                let op = if as_text { "->>" } else { "->" };
                format!("{}{}{}", column, op, step_operand(self, step))
            }
            _ => {
                let op = if as_text { "#>>" } else { "#>" };
                format!("{} {} {}", column, op, self.string_literal(&text_array(segments)))
            }
        }
    }
}

impl SqlGenerator for PostgresJsonb {
    fn quote_identifier(&self, name: &str) -> String {
        escape_identifier(name, '"', '"')
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    fn extract(&self, column: &str, segments: &[PathSegment]) -> String {
        self.path_operator(column, segments, false)
    }

    fn extract_and_unquote(&self, column: &str, segments: &[PathSegment]) -> String {
        self.path_operator(column, segments, true)
    }

    fn cast(&self, expr: &str, target_type: &str) -> String {
        pg_cast(expr, target_type)
    }

    fn json_literal(&self, literal: &str) -> String {
        format!("{}::jsonb", literal)
    }
}

impl SqlGenerator for PostgresJson {
    fn quote_identifier(&self, name: &str) -> String {
        escape_identifier(name, '"', '"')
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    fn extract(&self, column: &str, segments: &[PathSegment]) -> String {
        let mut sql = column.to_string();
        for step in segments {
            sql.push_str("->");
            sql.push_str(&step_operand(self, step));
        }
        sql
    }

    fn extract_and_unquote(&self, column: &str, segments: &[PathSegment]) -> String {
        match segments.split_last() {
            Some((last, init)) => {
                format!("{}->>{}", self.extract(column, init), step_operand(self, last))
            }
            None => format!("{} #>> '{{}}'", column),
        }
    }

    fn cast(&self, expr: &str, target_type: &str) -> String {
        pg_cast(expr, target_type)
    }

    fn json_literal(&self, literal: &str) -> String {
        format!("{}::jsonb", literal)
    }

    fn json_comparable(&self, expr: &str) -> String {
        format!("({})::jsonb", expr)
    }
}

/// `(expr)::type`. Parenthesised because `::` binds tighter than `->>`.
fn pg_cast(expr: &str, target_type: &str) -> String {
    format!("({})::{}", expr, target_type)
}

/// Right-hand operand of `->`: a text key or an integer index.
fn step_operand(generator: &dyn SqlGenerator, step: &PathSegment) -> String {
    match step {
        PathSegment::Property(name) => generator.string_literal(name),
        PathSegment::Index(i) => i.to_string(),
    }
}

/// Text-array literal body for `#>`: `{address,0,"first name"}`.
pub fn text_array(segments: &[PathSegment]) -> String {
    let elements: Vec<String> = segments
        .iter()
        .map(|segment| match segment {
            PathSegment::Property(name) => array_element(name),
            PathSegment::Index(i) => i.to_string(),
        })
        .collect();
    format!("{{{}}}", elements.join(","))
}

fn array_element(name: &str) -> String {
    let needs_quotes = name.is_empty()
        || name.eq_ignore_ascii_case("null")
        || name
            .chars()
            .any(|c| matches!(c, '{' | '}' | ',' | '"' | '\\') || c.is_whitespace());
    if needs_quotes {
        format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        name.to_string()
    }
}
