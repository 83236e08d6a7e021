//! SQL transpiler for attribute paths.
//!
//! Converts parsed paths and conditions into dialect-specific SQL.

pub mod traits;
pub mod dialect;
pub mod dialects;
pub mod coerce;
pub mod conditions;

#[cfg(test)]
mod tests;

use serde::Serialize;

use crate::ast::*;
pub use coerce::{coerce, CoercedValue};
pub use conditions::{ConditionToSql, ParamContext};
pub use dialect::Dialect;
pub use traits::{escape_identifier, json_path_string, SqlGenerator};

/// Result of transpilation with extracted parameters.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TranspileResult {
    /// The SQL template with placeholders (e.g., $1, $2 or ?, ?)
    pub sql: String,
    /// The extracted parameter values in order
    pub params: Vec<Value>,
}

impl TranspileResult {
    /// Create a new TranspileResult.
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Create a result with no parameters.
    pub fn sql_only(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }
}

/// Trait for converting AST nodes to SQL.
pub trait ToSql {
    /// Convert this node to a SQL string using default dialect.
    fn to_sql(&self) -> String {
        self.to_sql_with_dialect(Dialect::default())
    }
    /// Convert this node to a SQL string with specific dialect.
    fn to_sql_with_dialect(&self, dialect: Dialect) -> String;
}

/// Trait for converting AST nodes to parameterized SQL.
pub trait ToSqlParameterized {
    /// Convert to SQL with extracted parameters (default dialect).
    fn to_sql_parameterized(&self) -> TranspileResult {
        self.to_sql_parameterized_with_dialect(Dialect::default())
    }
    /// Convert to SQL with extracted parameters for specific dialect.
    fn to_sql_parameterized_with_dialect(&self, dialect: Dialect) -> TranspileResult;
}

impl ToSql for AttributePath {
    fn to_sql_with_dialect(&self, dialect: Dialect) -> String {
        dialect.generator().path_expr(self)
    }
}

impl ToSql for JsonCondition {
    fn to_sql_with_dialect(&self, dialect: Dialect) -> String {
        self.to_sql_in(dialect.generator().as_ref())
    }
}

impl ToSqlParameterized for JsonCondition {
    fn to_sql_parameterized_with_dialect(&self, dialect: Dialect) -> TranspileResult {
        let mut params = ParamContext::new();
        let sql = self.to_sql_parameterized_in(dialect.generator().as_ref(), &mut params);
        TranspileResult::new(sql, params.params)
    }
}

impl ToSqlParameterized for [JsonCondition] {
    /// AND-joined conditions sharing one parameter sequence.
    fn to_sql_parameterized_with_dialect(&self, dialect: Dialect) -> TranspileResult {
        let generator = dialect.generator();
        let mut params = ParamContext::new();
        let parts: Vec<String> = self
            .iter()
            .map(|cond| cond.to_sql_parameterized_in(generator.as_ref(), &mut params))
            .collect();
        TranspileResult::new(parts.join(" AND "), params.params)
    }
}
