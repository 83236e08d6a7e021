//! Error types for path compilation.
//!
//! Every error is raised before any SQL is emitted, so none of them is
//! dialect-specific.

use thiserror::Error;

/// Malformed path text. Fatal for the compilation call that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("unterminated quoted segment starting at offset {position}")]
    UnterminatedQuotedSegment { position: usize },

    #[error("invalid escape `\\{found}` at offset {position} (only `\\\"` and `\\\\` are allowed)")]
    InvalidEscape { position: usize, found: char },

    #[error("invalid array index `[{content}]` at offset {position}")]
    InvalidArrayIndex { position: usize, content: String },

    #[error("empty segment at offset {position}")]
    EmptySegment { position: usize },

    #[error("duplicate `{modifier}` modifier at offset {position}")]
    DuplicateModifier {
        position: usize,
        modifier: &'static str,
    },

    #[error("path continues after a modifier at offset {position}; `::type` and `:unquote` must come last")]
    ModifierNotTrailing { position: usize },

    #[error("unknown modifier `:{name}` at offset {position}{}", did_you_mean(.suggestion))]
    UnknownModifier {
        position: usize,
        name: String,
        suggestion: Option<String>,
    },

    #[error("unexpected character `{found}` at offset {position}")]
    UnexpectedCharacter { position: usize, found: char },

    #[error("missing `.` before the segment at offset {position}")]
    MissingSeparator { position: usize },

    #[error("path must start with a plain attribute name")]
    MissingBaseAttribute,
}

impl SyntaxError {
    /// Byte offset of the offending input, if the error points at one.
    pub fn position(&self) -> Option<usize> {
        match self {
            SyntaxError::UnterminatedQuotedSegment { position }
            | SyntaxError::InvalidEscape { position, .. }
            | SyntaxError::InvalidArrayIndex { position, .. }
            | SyntaxError::EmptySegment { position }
            | SyntaxError::DuplicateModifier { position, .. }
            | SyntaxError::ModifierNotTrailing { position }
            | SyntaxError::UnknownModifier { position, .. }
            | SyntaxError::UnexpectedCharacter { position, .. }
            | SyntaxError::MissingSeparator { position } => Some(*position),
            SyntaxError::MissingBaseAttribute => None,
        }
    }
}

/// Top-level error for the compiler surface.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("invalid nested key `{key}`: {source}")]
    NestedKey { key: String, source: SyntaxError },

    #[error("unknown operator `{key}`{}", did_you_mean(.suggestion))]
    UnknownOperator {
        key: String,
        suggestion: Option<String>,
    },

    #[error("object mixes operator keys and nested keys: {keys}")]
    MixedOperatorKeys { keys: String },

    #[error("`$sqlNull` only accepts `true`, found `{found}`")]
    InvalidSqlNull { found: String },

    #[error("invalid config: {0}")]
    Config(String),
}

/// Closest candidate for "did you mean" hints.
pub(crate) fn suggest(input: &str, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .map(|c| (strsim::levenshtein(input, c), c))
        .filter(|(distance, _)| *distance <= 3)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, c)| c.to_string())
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean `{}`?)", s),
        None => String::new(),
    }
}
