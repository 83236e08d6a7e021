use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SyntaxError;

/// Characters that end an unquoted segment.
pub const RESERVED_CHARS: [char; 6] = ['.', '[', ']', ':', '"', '\\'];

/// One addressing step inside a JSON value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathSegment {
    /// Object member access (`.name` or `."quoted.name"`)
    Property(String),
    /// Array element access (`[0]`)
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Property(name) if needs_quoting(name) => {
                write!(f, ".\"{}\"", escape_quoted(name))
            }
            PathSegment::Property(name) => write!(f, ".{}", name),
            PathSegment::Index(i) => write!(f, "[{}]", i),
        }
    }
}

/// A compiled attribute path.
///
/// `base` is the column holding the JSON value, `segments` walk into it
/// outer to inner. When both modifiers are set the extracted value is
/// unquoted first and cast second.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributePath {
    pub base: String,
    #[serde(default)]
    pub segments: Vec<PathSegment>,
    #[serde(default)]
    pub cast: Option<String>,
    #[serde(default)]
    pub unquote: bool,
}

/// A path without its base attribute, as written in nested-object keys.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PathFragment {
    pub segments: Vec<PathSegment>,
    pub cast: Option<String>,
    pub unquote: bool,
}

impl PathFragment {
    pub fn has_modifiers(&self) -> bool {
        self.unquote || self.cast.is_some()
    }

    /// True when the fragment starts with `[n]`, i.e. steps into an array.
    pub fn starts_with_index(&self) -> bool {
        matches!(self.segments.first(), Some(PathSegment::Index(_)))
    }
}

impl AttributePath {
    /// Path addressing the whole column.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            segments: Vec::new(),
            cast: None,
            unquote: false,
        }
    }

    pub fn property(mut self, name: impl Into<String>) -> Self {
        self.segments.push(PathSegment::Property(name.into()));
        self
    }

    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(PathSegment::Index(index));
        self
    }

    pub fn cast(mut self, target_type: impl Into<String>) -> Self {
        self.cast = Some(target_type.into());
        self
    }

    pub fn unquote(mut self) -> Self {
        self.unquote = true;
        self
    }

    pub fn has_modifiers(&self) -> bool {
        self.unquote || self.cast.is_some()
    }

    /// Same steps with `:unquote` and `::type` dropped.
    pub fn without_modifiers(&self) -> AttributePath {
        AttributePath {
            base: self.base.clone(),
            segments: self.segments.clone(),
            cast: None,
            unquote: false,
        }
    }

    /// Whether the extracted side of a comparison is still JSON.
    pub fn compares_as_json(&self) -> bool {
        !self.unquote && self.cast.is_none()
    }

    /// Append a fragment. Fails when this path already ends in a modifier.
    pub fn join(&self, fragment: PathFragment) -> Result<AttributePath, SyntaxError> {
        if self.has_modifiers() {
            return Err(SyntaxError::ModifierNotTrailing { position: 0 });
        }
        let mut segments = self.segments.clone();
        segments.extend(fragment.segments);
        Ok(AttributePath {
            base: self.base.clone(),
            segments,
            cast: fragment.cast,
            unquote: fragment.unquote,
        })
    }
}

/// Canonical path text. Parsing it again yields the same path.
impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)?;
        for segment in &self.segments {
            write!(f, "{}", segment)?;
        }
        if self.unquote {
            write!(f, ":unquote")?;
        }
        if let Some(cast) = &self.cast {
            write!(f, "::{}", cast)?;
        }
        Ok(())
    }
}

impl FromStr for AttributePath {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_path(s)
    }
}

/// A property name must be quoted when it is empty or holds a reserved char.
pub fn needs_quoting(name: &str) -> bool {
    name.is_empty() || name.contains(RESERVED_CHARS)
}

fn escape_quoted(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}
