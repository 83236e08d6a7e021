//! Path tokenizer.
//!
//! Single left-to-right pass over the raw path text. Lexemes are recognised
//! with nom; quoted segments are scanned by hand so escapes can be reported
//! at their exact offset.

use nom::{
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, digit1},
    combinator::all_consuming,
    sequence::{delimited, preceded},
    IResult,
};
use serde::Serialize;

use crate::ast::path::RESERVED_CHARS;
use crate::error::{suggest, SyntaxError};

/// Modifier keywords accepted after a single `:`.
pub const MODIFIERS: [&str; 1] = ["unquote"];

/// A lexical token of path text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RawToken {
    /// Unquoted name run
    Name(String),
    /// Double-quoted name, escapes resolved
    Quoted(String),
    /// `.` separator
    Dot,
    /// `[n]`
    Index(usize),
    /// `::type`
    Cast(String),
    /// `:unquote`
    Unquote,
}

/// A token and the byte offset it starts at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: RawToken,
    pub position: usize,
}

/// Split raw path text into tokens.
pub fn tokenize(raw: &str) -> Result<Vec<Token>, SyntaxError> {
    Tokenizer::new(raw).run()
}

/// Parse an unquoted name: everything up to the next reserved character.
pub fn parse_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !RESERVED_CHARS.contains(&c))(input)
}

/// Parse `[...]`, returning the raw contents.
pub fn parse_bracket(input: &str) -> IResult<&str, &str> {
    delimited(char('['), take_while(|c: char| c != ']'), char(']'))(input)
}

/// Parse `::type`, returning the type name.
pub fn parse_cast(input: &str) -> IResult<&str, &str> {
    preceded(tag("::"), take_while(is_cast_type_char))(input)
}

/// Parse `:word`, returning the word.
pub fn parse_modifier_name(input: &str) -> IResult<&str, &str> {
    preceded(char(':'), take_while(|c: char| c.is_alphanumeric() || c == '_'))(input)
}

/// Type names are opaque, but never contain path structure.
/// Allows `varchar(255)`, `numeric(10, 2)`, `double precision`, `text[]`.
fn is_cast_type_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | ' ' | '(' | ')' | ',' | '[' | ']')
}

fn is_index(content: &str) -> bool {
    all_consuming(digit1::<&str, nom::error::Error<&str>>)(content).is_ok()
}

struct Tokenizer<'a> {
    source: &'a str,
    rest: &'a str,
    tokens: Vec<Token>,
    cast_seen: bool,
    unquote_seen: bool,
}

impl<'a> Tokenizer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            rest: source,
            tokens: Vec::new(),
            cast_seen: false,
            unquote_seen: false,
        }
    }

    fn position(&self) -> usize {
        self.source.len() - self.rest.len()
    }

    fn in_modifiers(&self) -> bool {
        self.cast_seen || self.unquote_seen
    }

    fn run(mut self) -> Result<Vec<Token>, SyntaxError> {
        while let Some(c) = self.rest.chars().next() {
            let position = self.position();
            // Only further modifiers may follow a modifier
            if self.in_modifiers() && c != ':' {
                return Err(SyntaxError::ModifierNotTrailing { position });
            }
            let kind = match c {
                '.' => {
                    self.rest = &self.rest[1..];
                    RawToken::Dot
                }
                '[' => self.index(position)?,
                '"' => self.quoted(position)?,
                ':' => self.modifier(position)?,
                ']' | '\\' => return Err(SyntaxError::UnexpectedCharacter { position, found: c }),
                _ => self.name(position, c)?,
            };
            self.tokens.push(Token { kind, position });
        }
        Ok(self.tokens)
    }

    fn name(&mut self, position: usize, found: char) -> Result<RawToken, SyntaxError> {
        let (rest, name) = parse_name(self.rest)
            .map_err(|_| SyntaxError::UnexpectedCharacter { position, found })?;
        self.rest = rest;
        Ok(RawToken::Name(name.to_string()))
    }

    fn index(&mut self, position: usize) -> Result<RawToken, SyntaxError> {
        let (rest, content) = parse_bracket(self.rest).map_err(|_| SyntaxError::InvalidArrayIndex {
            position,
            content: self.rest[1..].to_string(),
        })?;
        let invalid = || SyntaxError::InvalidArrayIndex {
            position,
            content: content.to_string(),
        };
        if !is_index(content) {
            return Err(invalid());
        }
        let value = content.parse::<usize>().map_err(|_| invalid())?;
        self.rest = rest;
        Ok(RawToken::Index(value))
    }

    fn quoted(&mut self, position: usize) -> Result<RawToken, SyntaxError> {
        let mut name = String::new();
        let mut chars = self.rest.char_indices().skip(1);

        while let Some((idx, c)) = chars.next() {
            match c {
                '"' => {
                    self.rest = &self.rest[idx + 1..];
                    return Ok(RawToken::Quoted(name));
                }
                '\\' => match chars.next() {
                    Some((_, '"')) => name.push('"'),
                    Some((_, '\\')) => name.push('\\'),
                    Some((_, found)) => {
                        return Err(SyntaxError::InvalidEscape {
                            position: position + idx,
                            found,
                        });
                    }
                    None => break,
                },
                _ => name.push(c),
            }
        }

        Err(SyntaxError::UnterminatedQuotedSegment { position })
    }

    fn modifier(&mut self, position: usize) -> Result<RawToken, SyntaxError> {
        if let Ok((rest, target_type)) = parse_cast(self.rest) {
            if self.cast_seen {
                return Err(SyntaxError::DuplicateModifier {
                    position,
                    modifier: "::",
                });
            }
            let target_type = target_type.trim();
            if target_type.is_empty() {
                return Err(SyntaxError::EmptySegment { position });
            }
            self.rest = rest;
            self.cast_seen = true;
            return Ok(RawToken::Cast(target_type.to_string()));
        }

        let (rest, name) = parse_modifier_name(self.rest)
            .map_err(|_| SyntaxError::EmptySegment { position })?;
        match name {
            "unquote" => {
                if self.unquote_seen {
                    return Err(SyntaxError::DuplicateModifier {
                        position,
                        modifier: ":unquote",
                    });
                }
                self.rest = rest;
                self.unquote_seen = true;
                Ok(RawToken::Unquote)
            }
            "" => Err(SyntaxError::EmptySegment { position }),
            other => Err(SyntaxError::UnknownModifier {
                position,
                name: other.to_string(),
                suggestion: suggest(other, &MODIFIERS),
            }),
        }
    }
}
