//! Token stream to `AttributePath`.

use crate::ast::{AttributePath, PathFragment, PathSegment};
use crate::error::SyntaxError;

use super::tokens::{tokenize, RawToken, Token};

/// Parse full path text: `base(.name|."quoted"|[n])*(:unquote)?(::type)?`.
pub fn parse_path(raw: &str) -> Result<AttributePath, SyntaxError> {
    let mut tokens = tokenize(raw)?.into_iter();

    let base = match tokens.next() {
        Some(Token { kind: RawToken::Name(name), .. }) => name,
        _ => return Err(SyntaxError::MissingBaseAttribute),
    };
    let fragment = parse_steps(tokens, false)?;

    Ok(AttributePath {
        base,
        segments: fragment.segments,
        cast: fragment.cast,
        unquote: fragment.unquote,
    })
}

/// Parse a base-less fragment, as used for nested-object keys.
///
/// The first step may be a bare name (`address`), a quoted name, or an
/// index (`[0]`).
pub fn parse_fragment(raw: &str) -> Result<PathFragment, SyntaxError> {
    let tokens = tokenize(raw)?;
    if tokens.is_empty() {
        return Err(SyntaxError::EmptySegment { position: 0 });
    }
    parse_steps(tokens.into_iter(), true)
}

fn parse_steps(
    mut tokens: impl Iterator<Item = Token>,
    mut leading: bool,
) -> Result<PathFragment, SyntaxError> {
    let mut fragment = PathFragment::default();

    while let Some(Token { kind, position }) = tokens.next() {
        let first = std::mem::replace(&mut leading, false);
        match kind {
            RawToken::Dot if first => return Err(SyntaxError::EmptySegment { position }),
            RawToken::Dot => match tokens.next() {
                Some(Token {
                    kind: RawToken::Name(name) | RawToken::Quoted(name),
                    ..
                }) => fragment.segments.push(PathSegment::Property(name)),
                _ => return Err(SyntaxError::EmptySegment { position }),
            },
            RawToken::Name(name) | RawToken::Quoted(name) if first => {
                fragment.segments.push(PathSegment::Property(name))
            }
            RawToken::Name(_) | RawToken::Quoted(_) => {
                return Err(SyntaxError::MissingSeparator { position });
            }
            RawToken::Index(index) => fragment.segments.push(PathSegment::Index(index)),
            RawToken::Cast(target_type) => fragment.cast = Some(target_type),
            RawToken::Unquote => fragment.unquote = true,
        }
    }

    Ok(fragment)
}
