//! Parse errors

use std::ops::Range;
use thiserror::Error;

use crate::sifu::ast::{Delimiter, Position, SourceLocation};
use crate::sifu::lexer::LexError;

/// What went wrong
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated group: `{}` is never closed", .delimiter.open())]
    UnterminatedGroup { delimiter: Delimiter },
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },
    #[error("unmatched closing delimiter `{}`", .delimiter.close())]
    UnmatchedClosingDelimiter { delimiter: Delimiter },
    #[error("invalid character {0:?}")]
    InvalidCharacter(char),
    #[error("groups nest deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

/// A fatal parse error, located in the source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at {position}")]
pub struct ParseError {
    pub kind: ErrorKind,
    /// Byte range of the offending token (for an unterminated group, its opener)
    pub span: Range<usize>,
    pub position: Position,
}

impl ParseError {
    pub fn new(kind: ErrorKind, span: Range<usize>, source: &str) -> Self {
        let position = SourceLocation::new(source).byte_to_position(span.start);
        Self {
            kind,
            span,
            position,
        }
    }

    pub fn from_lex_error(error: &LexError, source: &str) -> Self {
        let kind = match error {
            LexError::UnterminatedString { .. } => ErrorKind::UnterminatedString,
            LexError::InvalidCharacter { ch, .. } => ErrorKind::InvalidCharacter(*ch),
        };
        Self::new(kind, error.span(), source)
    }
}
