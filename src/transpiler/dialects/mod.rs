//! One `SqlGenerator` per supported dialect.

pub mod postgres;
pub mod mysql;
pub mod sqlite;
pub mod mssql;

pub use self::mssql::MsSql;
pub use self::mysql::{MariaDb, MySql};
pub use self::postgres::{PostgresJson, PostgresJsonb};
pub use self::sqlite::Sqlite;
