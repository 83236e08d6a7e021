use super::coerce::coerce;
use super::traits::SqlGenerator;
use crate::ast::*;

/// Context for parameterized query building.
#[derive(Debug, Default)]
pub struct ParamContext {
    /// Current parameter index (1-based for Postgres $1, $2, etc.)
    pub index: usize,
    /// Collected parameter values in order
    pub params: Vec<Value>,
}

impl ParamContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue numbering after `offset` parameters bound elsewhere.
    pub fn starting_at(offset: usize) -> Self {
        Self {
            index: offset,
            params: Vec::new(),
        }
    }

    /// Add a value and return the placeholder for it.
    pub fn add_param(&mut self, value: Value, generator: &dyn SqlGenerator) -> String {
        self.index += 1;
        self.params.push(value);
        generator.placeholder(self.index)
    }
}

pub trait ConditionToSql {
    /// Convert the condition to SQL with literals inlined.
    fn to_sql_in(&self, generator: &dyn SqlGenerator) -> String;

    /// Convert the condition to SQL with values bound as parameters.
    /// Path keys stay inline as escaped literals.
    fn to_sql_parameterized_in(
        &self,
        generator: &dyn SqlGenerator,
        params: &mut ParamContext,
    ) -> String;
}

impl ConditionToSql for JsonCondition {
    fn to_sql_in(&self, generator: &dyn SqlGenerator) -> String {
        build_condition(self, generator, None)
    }

    fn to_sql_parameterized_in(
        &self,
        generator: &dyn SqlGenerator,
        params: &mut ParamContext,
    ) -> String {
        build_condition(self, generator, Some(params))
    }
}

fn build_condition(
    cond: &JsonCondition,
    generator: &dyn SqlGenerator,
    mut params: Option<&mut ParamContext>,
) -> String {
    let coerced = coerce(&cond.path, cond.op, &cond.value, generator);
    let op = coerced.operator(cond.op);

    if let (ComparisonValue::JsonNull, Some(negated)) = (&cond.value, json_null_polarity(op)) {
        let column = generator.quote_identifier(&cond.path.base);
        if let Some(sql) = generator.json_null_test(&column, &cond.path.segments, negated) {
            return sql;
        }
    }

    let col = generator.path_expr(coerced.compare_path.as_ref().unwrap_or(&cond.path));

    let Some(literal) = coerced.literal else {
        return generator.null_test(&col, op == Operator::IsNotNull);
    };

    let mut render = |value: &Value| -> String {
        match params.as_deref_mut() {
            None => generator.value_literal(value),
            Some(ctx) => {
                let placeholder = ctx.add_param(value.clone(), generator);
                if value.is_json() {
                    generator.json_literal(&placeholder)
                } else {
                    placeholder
                }
            }
        }
    };

    match &literal {
        Value::Array(items) if items.is_empty() => match op {
            // Nothing is IN an empty list
            Operator::NotIn => "1 = 1".to_string(),
            _ => "1 = 0".to_string(),
        },
        Value::Array(items) => {
            let col = if items.iter().any(Value::is_json) {
                generator.json_comparable(&col)
            } else {
                col
            };
            let rendered: Vec<String> = items.iter().map(&mut render).collect();
            format!("{} {} ({})", col, op.sql_symbol(), rendered.join(", "))
        }
        value => {
            let col = if value.is_json() {
                generator.json_comparable(&col)
            } else {
                col
            };
            format!("{} {} {}", col, op.sql_symbol(), render(value))
        }
    }
}

/// Equality against the `null` token, or its negation. `IN (null)` is the
/// same test.
fn json_null_polarity(op: Operator) -> Option<bool> {
    match op {
        Operator::Eq | Operator::In => Some(false),
        Operator::Ne | Operator::NotIn => Some(true),
        _ => None,
    }
}
