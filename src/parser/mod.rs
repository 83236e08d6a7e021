//! Attribute-path parser.
//!
//! ```text
//! path     := base step* modifier*
//! step     := "." name | "." quoted | "[" digits "]"
//! quoted   := '"' ( char | '\"' | '\\' )* '"'
//! modifier := ":unquote" | "::" type
//! ```

pub mod tokens;
pub mod path;
pub mod nested;

#[cfg(test)]
mod tests;

pub use self::nested::normalize;
pub use self::path::{parse_fragment, parse_path};
pub use self::tokens::{tokenize, RawToken, Token};

use crate::ast::AttributePath;
use crate::error::SyntaxError;

/// Parse path text into an `AttributePath`.
pub fn parse(input: &str) -> Result<AttributePath, SyntaxError> {
    let path = parse_path(input)?;
    tracing::trace!(input, segments = path.segments.len(), "parsed attribute path");
    Ok(path)
}
