//! qail-jsonpath: show the SQL an attribute path compiles to.
//!
//! ```text
//! qail-jsonpath 'meta.address.country:unquote' --all
//! qail-jsonpath 'meta.age::int' --op '>=' --value 18 --dialect mysql --params
//! qail-jsonpath meta --nested '{"address": {"country": "Belgium"}}'
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::*;
use serde_json::Value as JsonValue;

use qail_jsonpath::ast::{ComparisonValue, NestedCondition, Operator};
use qail_jsonpath::transpiler::{Dialect, TranspileResult};
use qail_jsonpath::{CompilerConfig, PathCompiler, PathError, SyntaxError};

#[derive(Parser, Debug)]
#[command(name = "qail-jsonpath", version, about = "Compile JSON attribute paths to SQL")]
struct Cli {
    /// Attribute path, e.g. `meta.tags[0]:unquote` (the base column with --nested)
    path: String,

    /// Target dialect: postgres, postgres-json, mysql, mariadb, sqlite, mssql
    #[arg(short, long)]
    dialect: Option<Dialect>,

    /// Emit for every dialect
    #[arg(short, long, conflicts_with = "dialect")]
    all: bool,

    /// Comparison operator (eq, ne, gt, gte, lt, lte, like, in, ... or =, !=, >)
    #[arg(short, long)]
    op: Option<Operator>,

    /// Comparison value as JSON; anything that is not valid JSON is a string
    #[arg(short, long, conflicts_with = "sql_null")]
    value: Option<String>,

    /// Compare with SQL NULL (IS NULL) instead of a value
    #[arg(long)]
    sql_null: bool,

    /// Bind values as parameters and list them
    #[arg(short, long)]
    params: bool,

    /// Print the parsed path as JSON
    #[arg(long)]
    ast: bool,

    /// Nested-object conditions as JSON, resolved under PATH
    #[arg(short, long, conflicts_with_all = ["op", "value", "sql_null"])]
    nested: Option<String>,

    /// Config file (default: <config dir>/qail/jsonpath.toml)
    #[arg(short, long, env = "QAIL_JSONPATH_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => CompilerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => CompilerConfig::discover().context("Failed to load default config")?,
    };
    if cli.params {
        config.parameterized = true;
    }

    let dialects = if cli.all {
        Dialect::ALL.to_vec()
    } else {
        vec![cli.dialect.unwrap_or(config.dialect)]
    };
    let compiler = PathCompiler::with_config(config);

    if let Some(nested) = &cli.nested {
        return run_nested(&compiler, &cli.path, nested, &dialects);
    }

    let path = match compiler.compile_attribute_path(&cli.path) {
        Ok(path) => path,
        Err(err) => {
            report_syntax_error(&cli.path, &err);
            bail!("invalid attribute path");
        }
    };

    if cli.ast {
        println!("{}", "📋 AST".cyan().bold());
        println!("{}", serde_json::to_string_pretty(&*path)?);
        println!("  {} {}", "canonical:".dimmed(), path.to_string().yellow());
        println!();
    }

    let value = comparison_value(&cli)?;
    for dialect in dialects {
        match (cli.op, &value) {
            (None, None) => {
                let sql = compiler.path_sql(&cli.path, dialect)?;
                print_sql(dialect, &TranspileResult::sql_only(sql.to_string()));
            }
            (op, value) => {
                let op = op.unwrap_or_default();
                let value = value.clone().unwrap_or(ComparisonValue::SqlNull);
                let result = compiler.compile_condition(&cli.path, op, value, dialect)?;
                print_sql(dialect, &result);
            }
        }
    }

    Ok(())
}

fn run_nested(
    compiler: &PathCompiler,
    base: &str,
    nested: &str,
    dialects: &[Dialect],
) -> Result<()> {
    let json: JsonValue = serde_json::from_str(nested).context("--nested must be valid JSON")?;
    let nested = NestedCondition::try_from(json)?;

    let conditions = match compiler.compile_nested_paths(base, &nested) {
        Ok(conditions) => conditions,
        Err(PathError::Syntax(err)) => {
            report_syntax_error(base, &err);
            bail!("invalid base path");
        }
        Err(err) => return Err(err.into()),
    };
    for cond in &conditions {
        println!("  {} {} {}", "→".dimmed(), cond.path.to_string().yellow(), cond.op);
    }
    println!();

    for &dialect in dialects {
        let result = compiler.compile_nested_conditions(base, &nested, dialect)?;
        print_sql(dialect, &result);
    }
    Ok(())
}

/// Value from `--sql-null` / `--value`, `None` when neither is given.
fn comparison_value(cli: &Cli) -> Result<Option<ComparisonValue>> {
    if cli.sql_null {
        return Ok(Some(ComparisonValue::SqlNull));
    }
    match &cli.value {
        Some(raw) => {
            let json = serde_json::from_str(raw).unwrap_or_else(|_| JsonValue::String(raw.clone()));
            Ok(Some(ComparisonValue::from(json)))
        }
        None => match cli.op {
            Some(op) if !op.is_null_test() => {
                bail!("--op {} needs --value or --sql-null", op)
            }
            _ => Ok(None),
        },
    }
}

fn print_sql(dialect: Dialect, result: &TranspileResult) {
    println!("{:>14}  {}", dialect.name().cyan(), result.sql.green());
    if !result.params.is_empty() {
        let params: Vec<String> = result.params.iter().map(|p| p.to_string()).collect();
        println!("{:>14}  {}", "params".dimmed(), params.join(", ").dimmed());
    }
}

fn report_syntax_error(raw: &str, err: &SyntaxError) {
    eprintln!("{} {}", "✗".red().bold(), err.to_string().red());
    eprintln!("  {}", raw);
    if let Some(position) = err.position() {
        let column = raw.get(..position).map_or(0, |prefix| prefix.chars().count());
        eprintln!("  {}{}", " ".repeat(column), "^".red().bold());
    }
}
