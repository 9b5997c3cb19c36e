//! Implementation of the sifu lexer
//!
//! [`SifuLexer`] is a lazy iterator over spanned tokens. Tokenization itself is
//! handled entirely by logos; this layer turns logos failures into [`LexError`]s
//! and keeps spans absolute when lexing restarts part way through a buffer.

use std::ops::Range;

use logos::Logos;
use tracing::trace;

use super::error::LexError;
use super::tokens::Token;

/// Type alias for token with span
pub type TokenSpan = (Token, Range<usize>);

/// Lazy, restartable token stream over a source buffer
pub struct SifuLexer<'src> {
    inner: logos::Lexer<'src, Token>,
    offset: usize,
}

impl<'src> SifuLexer<'src> {
    /// Lex `source` from the beginning
    pub fn new(source: &'src str) -> Self {
        Self::starting_at(source, 0)
    }

    /// Lex `source` from byte `offset`, reporting spans relative to the whole buffer.
    ///
    /// An offset that is out of range or not on a char boundary yields an empty stream.
    pub fn starting_at(source: &'src str, offset: usize) -> Self {
        let rest = source.get(offset..).unwrap_or("");
        trace!(offset, remaining = rest.len(), "starting lexer");
        Self {
            inner: Token::lexer(rest),
            offset,
        }
    }

    /// Byte offset just past the last token produced
    pub fn position(&self) -> usize {
        self.offset + self.inner.span().end
    }

    fn absolute(&self, span: Range<usize>) -> Range<usize> {
        span.start + self.offset..span.end + self.offset
    }
}

impl<'src> Iterator for SifuLexer<'src> {
    type Item = Result<TokenSpan, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        let span = self.absolute(self.inner.span());
        Some(match result {
            Ok(Token::UnterminatedString) => Err(LexError::UnterminatedString { span }),
            Ok(token) => Ok((token, span)),
            Err(()) => {
                let ch = self.inner.slice().chars().next().unwrap_or('\u{FFFD}');
                Err(LexError::InvalidCharacter { ch, span })
            }
        })
    }
}

/// Convenience function to tokenize a string and collect all valid tokens
pub fn tokenize(source: &str) -> Vec<Token> {
    SifuLexer::new(source)
        .filter_map(|result| result.ok())
        .map(|(token, _)| token)
        .collect()
}

/// Convenience function to tokenize a string and collect tokens with their spans,
/// stopping at the first lexical error
pub fn tokenize_with_spans(source: &str) -> Result<Vec<TokenSpan>, LexError> {
    SifuLexer::new(source).collect()
}
