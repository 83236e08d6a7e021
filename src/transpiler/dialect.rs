use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::dialects::{MariaDb, MsSql, MySql, PostgresJson, PostgresJsonb, Sqlite};
use super::traits::SqlGenerator;
use crate::config::CompilerConfig;

/// Target SQL dialect. Threaded explicitly through every emitting call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Dialect {
    /// PostgreSQL `jsonb` columns
    #[default]
    #[serde(rename = "postgres")]
    Postgres,
    /// PostgreSQL `json` columns
    #[serde(rename = "postgres-json")]
    PostgresJson,
    #[serde(rename = "mysql")]
    MySql,
    #[serde(rename = "mariadb")]
    MariaDb,
    #[serde(rename = "sqlite")]
    Sqlite,
    #[serde(rename = "mssql")]
    MsSql,
}

impl Dialect {
    pub const ALL: [Dialect; 6] = [
        Dialect::Postgres,
        Dialect::PostgresJson,
        Dialect::MySql,
        Dialect::MariaDb,
        Dialect::Sqlite,
        Dialect::MsSql,
    ];

    /// Generator with default settings.
    pub fn generator(self) -> Box<dyn SqlGenerator> {
        self.generator_with(&CompilerConfig::default())
    }

    /// Generator honouring compiler settings.
    pub fn generator_with(self, config: &CompilerConfig) -> Box<dyn SqlGenerator> {
        match self {
            Dialect::Postgres => Box::new(PostgresJsonb {
                single_step_shortcut: config.single_step_shortcut,
            }),
            Dialect::PostgresJson => Box::new(PostgresJson),
            Dialect::MySql => Box::new(MySql),
            Dialect::MariaDb => Box::new(MariaDb),
            Dialect::Sqlite => Box::new(Sqlite),
            Dialect::MsSql => Box::new(MsSql),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Postgres => "postgres",
            Dialect::PostgresJson => "postgres-json",
            Dialect::MySql => "mysql",
            Dialect::MariaDb => "mariadb",
            Dialect::Sqlite => "sqlite",
            Dialect::MsSql => "mssql",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" | "jsonb" => Ok(Dialect::Postgres),
            "postgres-json" | "pg-json" | "json" => Ok(Dialect::PostgresJson),
            "mysql" => Ok(Dialect::MySql),
            "mariadb" | "maria" => Ok(Dialect::MariaDb),
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            "mssql" | "sqlserver" | "tsql" => Ok(Dialect::MsSql),
            other => Err(format!(
                "unknown dialect `{}` (expected one of: {})",
                other,
                Dialect::ALL.map(|d| d.name()).join(", ")
            )),
        }
    }
}
