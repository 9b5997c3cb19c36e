//! Lexical errors

use std::ops::Range;
use thiserror::Error;

/// Errors produced while tokenizing sifu source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A string literal reached end of input before its closing quote
    #[error("unterminated string literal")]
    UnterminatedString { span: Range<usize> },
    /// A character that belongs to no token class
    #[error("invalid character {ch:?}")]
    InvalidCharacter { ch: char, span: Range<usize> },
}

impl LexError {
    /// Byte range of the offending input
    pub fn span(&self) -> Range<usize> {
        match self {
            LexError::UnterminatedString { span } | LexError::InvalidCharacter { span, .. } => {
                span.clone()
            }
        }
    }
}
