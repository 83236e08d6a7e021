//! Compiler settings, loadable from TOML.
//!
//! ```toml
//! dialect = "mysql"
//! cache_capacity = 4096
//! single_step_shortcut = true
//! parameterized = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PathError;
use crate::transpiler::Dialect;

pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Default target for callers that do not pick a dialect, such as the
    /// `qail-jsonpath` CLI without `--dialect`. Compiler methods always take
    /// an explicit dialect.
    pub dialect: Dialect,
    /// Maximum memoized entries per cache; 0 disables caching
    pub cache_capacity: usize,
    /// Let single-step `jsonb` paths use `->`/`->>` instead of `#>`/`#>>`
    pub single_step_shortcut: bool,
    /// Bind comparison values as parameters instead of inlining them
    pub parameterized: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            single_step_shortcut: true,
            parameterized: true,
        }
    }
}

impl CompilerConfig {
    pub fn from_toml(text: &str) -> Result<Self, PathError> {
        toml::from_str(text).map_err(|e| PathError::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String, PathError> {
        toml::to_string(self).map_err(|e| PathError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, PathError> {
        let text = fs::read_to_string(path)
            .map_err(|e| PathError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_toml(&text)?;
        tracing::debug!(
            path = %path.display(),
            dialect = %config.dialect,
            "loaded compiler config"
        );
        Ok(config)
    }

    /// `<config dir>/qail/jsonpath.toml`, e.g. `~/.config/qail/jsonpath.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("qail").join("jsonpath.toml"))
    }

    /// Load the file at `default_path()` when it exists, defaults otherwise.
    pub fn discover() -> Result<Self, PathError> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = CompilerConfig::from_toml("dialect = \"mssql\"\n").unwrap();
        assert_eq!(config.dialect, Dialect::MsSql);
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
        assert!(config.single_step_shortcut);
        assert!(config.parameterized);
    }

    #[test]
    fn test_full_file() {
        let text = r#"
dialect = "postgres-json"
cache_capacity = 0
single_step_shortcut = false
parameterized = false
"#;
        let config = CompilerConfig::from_toml(text).unwrap();
        assert_eq!(
            config,
            CompilerConfig {
                dialect: Dialect::PostgresJson,
                cache_capacity: 0,
                single_step_shortcut: false,
                parameterized: false,
            }
        );
    }

    #[test]
    fn test_rejects_unknown_keys_and_dialects() {
        assert!(matches!(
            CompilerConfig::from_toml("dialekt = \"mysql\""),
            Err(PathError::Config(_))
        ));
        assert!(matches!(
            CompilerConfig::from_toml("dialect = \"oracle\""),
            Err(PathError::Config(_))
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CompilerConfig {
            dialect: Dialect::Sqlite,
            ..CompilerConfig::default()
        };
        let text = config.to_toml().unwrap();
        assert_eq!(CompilerConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = CompilerConfig::load(Path::new("/nonexistent/qail/jsonpath.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/qail/jsonpath.toml"));
    }

    #[test]
    fn test_default_path_location() {
        if let Some(path) = CompilerConfig::default_path() {
            assert!(path.ends_with("qail/jsonpath.toml"));
        }
    }
}
