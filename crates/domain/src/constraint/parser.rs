//! Recursive-descent parser for the constraint text syntax.
//!
//! ```text
//! constraint := leaf | group
//! leaf       := ("mandatory" | "optional") "(" path ")"
//! group      := ("or" | "and") "(" constraint ("," constraint)* ")"
//! path       := segment ("." segment)*
//! segment    := ident ("[" "COLLECTION"? "]")?
//! ```

use super::Constraint;
use super::path::{FieldPath, PathSegment};
use crate::name::{Name, NameError};

/// A constraint or path could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at offset {offset} in `{input}`")]
pub struct ConstraintParseError {
    pub input: String,
    pub offset: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unexpected character `{0}`")]
    Unexpected(char),

    #[error("unknown constraint `{0}`")]
    UnknownFunction(String),

    #[error("expected an identifier")]
    ExpectedIdentifier,

    #[error("invalid name: {0}")]
    InvalidName(NameError),
}

pub(super) struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub(super) fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn error(&self, kind: ParseErrorKind) -> ConstraintParseError {
        ConstraintParseError {
            input: self.input.to_owned(),
            offset: self.pos,
            kind,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ConstraintParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some(ch) if ch == expected => {
                self.pos += ch.len_utf8();
                Ok(())
            }
            Some(ch) => Err(self.error(ParseErrorKind::Unexpected(ch))),
            None => Err(self.error(ParseErrorKind::UnexpectedEnd)),
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn ident(&mut self) -> Result<&'a str, ConstraintParseError> {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if !(ch.is_ascii_alphanumeric() || ch == '_') {
                break;
            }
            self.pos += 1;
        }
        if self.pos == start {
            return Err(match self.peek() {
                Some(ch) => self.error(ParseErrorKind::Unexpected(ch)),
                None => self.error(ParseErrorKind::ExpectedIdentifier),
            });
        }
        Ok(&self.input[start..self.pos])
    }

    /// Fail unless only whitespace remains.
    pub(super) fn finish(&mut self) -> Result<(), ConstraintParseError> {
        self.skip_whitespace();
        match self.peek() {
            None => Ok(()),
            Some(ch) => Err(self.error(ParseErrorKind::Unexpected(ch))),
        }
    }

    pub(super) fn constraint(&mut self) -> Result<Constraint, ConstraintParseError> {
        let start = self.pos;
        let function = self.ident()?;
        self.expect('(')?;
        let constraint = match function {
            "mandatory" => Constraint::Mandatory(self.path()?),
            "optional" => Constraint::Optional(self.path()?),
            "or" => Constraint::Or(self.group()?),
            "and" => Constraint::And(self.group()?),
            other => {
                self.pos = start;
                return Err(self.error(ParseErrorKind::UnknownFunction(other.to_owned())));
            }
        };
        self.expect(')')?;
        Ok(constraint)
    }

    fn group(&mut self) -> Result<Vec<Constraint>, ConstraintParseError> {
        let mut children = vec![self.constraint()?];
        while self.eat(',') {
            children.push(self.constraint()?);
        }
        Ok(children)
    }

    pub(super) fn path(&mut self) -> Result<FieldPath, ConstraintParseError> {
        let root = self.segment()?;
        let mut rest = Vec::new();
        while self.eat('.') {
            rest.push(self.segment()?);
        }
        Ok(FieldPath::new(root, rest))
    }

    fn segment(&mut self) -> Result<PathSegment, ConstraintParseError> {
        self.skip_whitespace();
        let start = self.pos;
        let ident = self.ident()?;
        let name: Name = ident.parse().map_err(|err| ConstraintParseError {
            input: self.input.to_owned(),
            offset: start,
            kind: ParseErrorKind::InvalidName(err),
        })?;
        let collection = if self.eat('[') {
            if self.peek().is_some_and(|ch| ch.is_ascii_alphabetic()) {
                let keyword_start = self.pos;
                let keyword = self.ident()?;
                if keyword != "COLLECTION" {
                    self.pos = keyword_start;
                    return Err(self.error(ParseErrorKind::UnknownFunction(keyword.to_owned())));
                }
            }
            self.expect(']')?;
            true
        } else {
            false
        };
        Ok(PathSegment { name, collection })
    }
}
