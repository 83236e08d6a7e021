//! Path compiler with memoization.
//!
//! Parsed paths and emitted path expressions are immutable, so they are
//! cached as `Arc`s keyed by raw text (and dialect). Entries are inserted
//! once and never replaced; once a cache is full, results are still computed
//! but no longer stored.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::ast::{AttributePath, ComparisonValue, JsonCondition, NestedCondition, Operator};
use crate::config::CompilerConfig;
use crate::error::{PathError, SyntaxError};
use crate::parser::{normalize, parse};
use crate::transpiler::{
    coerce, CoercedValue, ConditionToSql, Dialect, ParamContext, SqlGenerator, TranspileResult,
};

#[derive(Debug, Default)]
pub struct PathCompiler {
    config: CompilerConfig,
    paths: RwLock<HashMap<String, Arc<AttributePath>>>,
    expressions: RwLock<HashMap<(String, Dialect), Arc<str>>>,
}

impl PathCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CompilerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Generator for `dialect`, honouring this compiler's settings.
    pub fn generator(&self, dialect: Dialect) -> Box<dyn SqlGenerator> {
        dialect.generator_with(&self.config)
    }

    /// Parse `raw` into an `AttributePath`, reusing a cached AST when present.
    pub fn compile_attribute_path(&self, raw: &str) -> Result<Arc<AttributePath>, SyntaxError> {
        if let Some(path) = self.read_paths().get(raw) {
            tracing::trace!(raw, "path cache hit");
            return Ok(Arc::clone(path));
        }

        let path = Arc::new(parse(raw)?);
        tracing::debug!(raw, segments = path.segments.len(), "compiled attribute path");
        Ok(insert_once(&self.paths, raw.to_string(), path, self.config.cache_capacity))
    }

    /// Resolve nested-object conditions under `base`.
    pub fn compile_nested_paths(
        &self,
        base: &str,
        nested: &NestedCondition,
    ) -> Result<Vec<JsonCondition>, PathError> {
        normalize(base, nested)
    }

    /// SQL expression for a parsed path. Path keys are always inlined as
    /// escaped literals, so the result never carries parameters.
    pub fn emit_sql(&self, path: &AttributePath, dialect: Dialect) -> TranspileResult {
        TranspileResult::sql_only(self.generator(dialect).path_expr(path))
    }

    /// Parse and emit `raw` for `dialect`, memoized per dialect.
    pub fn path_sql(&self, raw: &str, dialect: Dialect) -> Result<Arc<str>, SyntaxError> {
        let key = (raw.to_string(), dialect);
        if let Some(sql) = self.read_expressions().get(&key) {
            tracing::trace!(raw, %dialect, "expression cache hit");
            return Ok(Arc::clone(sql));
        }

        let path = self.compile_attribute_path(raw)?;
        let sql: Arc<str> = Arc::from(self.emit_sql(&path, dialect).sql);
        Ok(insert_once(&self.expressions, key, sql, self.config.cache_capacity))
    }

    pub fn coerce_comparison_value(
        &self,
        path: &AttributePath,
        op: Operator,
        value: &ComparisonValue,
        dialect: Dialect,
    ) -> CoercedValue {
        coerce(path, op, value, self.generator(dialect).as_ref())
    }

    /// Full comparison for a raw path. Values are bound as parameters when
    /// the config asks for it, otherwise inlined.
    pub fn compile_condition(
        &self,
        raw: &str,
        op: Operator,
        value: impl Into<ComparisonValue>,
        dialect: Dialect,
    ) -> Result<TranspileResult, PathError> {
        let path = self.compile_attribute_path(raw)?;
        let condition = JsonCondition::new(AttributePath::clone(&path), op, value);
        Ok(self.condition_sql(std::slice::from_ref(&condition), dialect))
    }

    /// Nested-object conditions, AND-joined with one parameter sequence.
    pub fn compile_nested_conditions(
        &self,
        base: &str,
        nested: &NestedCondition,
        dialect: Dialect,
    ) -> Result<TranspileResult, PathError> {
        let conditions = self.compile_nested_paths(base, nested)?;
        Ok(self.condition_sql(&conditions, dialect))
    }

    /// `(entries, capacity)` of the parsed-path cache. The expression cache
    /// is bounded by the same capacity.
    pub fn cache_stats(&self) -> (usize, usize) {
        (self.read_paths().len(), self.config.cache_capacity)
    }

    pub fn clear_cache(&self) {
        self.paths.write().unwrap_or_else(PoisonError::into_inner).clear();
        self.expressions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        tracing::debug!("cleared path caches");
    }

    fn condition_sql(&self, conditions: &[JsonCondition], dialect: Dialect) -> TranspileResult {
        let generator = self.generator(dialect);
        if !self.config.parameterized {
            let parts: Vec<String> = conditions
                .iter()
                .map(|cond| cond.to_sql_in(generator.as_ref()))
                .collect();
            return TranspileResult::sql_only(parts.join(" AND "));
        }

        let mut params = ParamContext::new();
        let parts: Vec<String> = conditions
            .iter()
            .map(|cond| cond.to_sql_parameterized_in(generator.as_ref(), &mut params))
            .collect();
        TranspileResult::new(parts.join(" AND "), params.params)
    }

    fn read_paths(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Arc<AttributePath>>> {
        self.paths.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_expressions(
        &self,
    ) -> std::sync::RwLockReadGuard<'_, HashMap<(String, Dialect), Arc<str>>> {
        self.expressions.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Store `value` unless the key is already present or the cache is full.
/// Returns the entry that readers will see.
fn insert_once<K, V>(
    cache: &RwLock<HashMap<K, Arc<V>>>,
    key: K,
    value: Arc<V>,
    capacity: usize,
) -> Arc<V>
where
    K: std::hash::Hash + Eq,
    V: ?Sized,
{
    let mut map = cache.write().unwrap_or_else(PoisonError::into_inner);
    if let Some(existing) = map.get(&key) {
        return Arc::clone(existing);
    }
    if map.len() >= capacity {
        return value;
    }
    map.insert(key, Arc::clone(&value));
    value
}
