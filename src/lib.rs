//! # qail-jsonpath
//!
//! One attribute-path notation for JSON columns, compiled to exact SQL for
//! PostgreSQL (`jsonb` and `json`), MySQL, MariaDB, SQLite and SQL Server.
//!
//! ```
//! use qail_jsonpath::prelude::*;
//!
//! let path = compile_attribute_path("meta.address.country:unquote").unwrap();
//! assert_eq!(
//!     emit_sql(&path, Dialect::Postgres).sql,
//!     r#""meta" #>> '{address,country}'"#
//! );
//! assert_eq!(
//!     emit_sql(&path, Dialect::MySql).sql,
//!     "JSON_UNQUOTE(JSON_EXTRACT(`meta`, '$.address.country'))"
//! );
//! ```
//!
//! Path syntax:
//!
//! - `base.name` property access, `base[0]` array index
//! - `base."a.b"` quoted property; `\"` and `\\` escape inside quotes
//! - `:unquote` reads the value as text, `::type` casts it; both trail the path
//!
//! Unquoting a value that is not a JSON string is not an error: engines
//! return its JSON text, so `:unquote` on `{"a":1}` compares against `{"a":1}`.

pub mod ast;
pub mod compiler;
pub mod config;
pub mod error;
pub mod parser;
pub mod transpiler;

pub use compiler::PathCompiler;
pub use config::CompilerConfig;
pub use error::{PathError, SyntaxError};

use ast::{AttributePath, ComparisonValue, JsonCondition, NestedCondition, Operator};
use transpiler::{CoercedValue, Dialect, ToSqlParameterized, TranspileResult};

/// Parse path text into an `AttributePath`.
pub fn compile_attribute_path(raw: &str) -> Result<AttributePath, SyntaxError> {
    parser::parse(raw)
}

/// Resolve nested-object conditions under `base` into flat conditions.
pub fn compile_nested_paths(
    base: &str,
    nested: &NestedCondition,
) -> Result<Vec<JsonCondition>, PathError> {
    parser::normalize(base, nested)
}

/// SQL expression reading `path` in `dialect`.
pub fn emit_sql(path: &AttributePath, dialect: Dialect) -> TranspileResult {
    TranspileResult::sql_only(dialect.generator().path_expr(path))
}

/// How `value` is written next to `path` under `op`.
pub fn coerce_comparison_value(
    path: &AttributePath,
    op: Operator,
    value: &ComparisonValue,
    dialect: Dialect,
) -> CoercedValue {
    transpiler::coerce(path, op, value, dialect.generator().as_ref())
}

/// Parameterized comparison of the path `raw` with `value`.
pub fn compile_condition(
    raw: &str,
    op: Operator,
    value: impl Into<ComparisonValue>,
    dialect: Dialect,
) -> Result<TranspileResult, PathError> {
    let path = compile_attribute_path(raw)?;
    Ok(JsonCondition::new(path, op, value).to_sql_parameterized_with_dialect(dialect))
}

pub mod prelude {
    pub use crate::ast::{
        AttributePath, ComparisonValue, JsonCondition, NestedCondition, Operator, PathSegment,
        Value,
    };
    pub use crate::compiler::PathCompiler;
    pub use crate::config::CompilerConfig;
    pub use crate::error::{PathError, SyntaxError};
    pub use crate::transpiler::{Dialect, ToSql, ToSqlParameterized, TranspileResult};
    pub use crate::{
        coerce_comparison_value, compile_attribute_path, compile_condition, compile_nested_paths,
        emit_sql,
    };
}
