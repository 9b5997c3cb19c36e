//! Precedence-climbing parser
//!
//! The parser reads juxtaposed terms first, since application binds tightest, and
//! then keeps absorbing binary operators. An operator's right operand extends
//! over every operator at its own level or tighter, which makes every rung
//! right-associative: `a , b , c` is `a , (b , c)`.
//!
//! Groups are the only place the parser recurses, and at most [`MAX_NESTING`] of
//! them may be open at once.
//!
//! Operands are optional on both sides. An operator with nothing before it gets
//! a missing left operand, and one followed by end of input, a closer, or a looser
//! operator gets a missing right operand. Only malformed structure is an error.
//!
//! Errors halt the parse. The first error is recorded, the token stream then
//! reads as exhausted, and every open group closes around what it has so far, so
//! the caller still receives the best partial tree.

use std::ops::Range;

use tracing::{debug, trace};

use super::config::ParserConfig;
use super::error::{ErrorKind, ParseError};
use super::precedence::level_of;
use crate::sifu::ast::{BinaryOp, Delimiter, Pattern};
use crate::sifu::lexer::{LexError, SifuLexer, Token, TokenSpan};

/// How many groups may be open at once
pub const MAX_NESTING: usize = 128;

/// Result of a best-effort parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutput {
    /// The tree, or the part of it built before the first error.
    /// `None` when the input holds no pattern at all.
    pub pattern: Option<Pattern>,
    pub error: Option<ParseError>,
}

impl ParseOutput {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Drop the partial tree and keep only the verdict
    pub fn into_result(self) -> Result<Option<Pattern>, ParseError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.pattern),
        }
    }
}

struct OpenGroup {
    delimiter: Delimiter,
    span: Range<usize>,
}

pub struct Parser<'src> {
    source: &'src str,
    config: ParserConfig,
    tokens: Vec<TokenSpan>,
    pos: usize,
    /// Lexical error found after the last token in `tokens`
    lex_error: Option<LexError>,
    groups: Vec<OpenGroup>,
    error: Option<ParseError>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, config: ParserConfig) -> Self {
        let mut tokens = Vec::new();
        let mut lex_error = None;
        for result in SifuLexer::new(source) {
            match result {
                Ok(token) => tokens.push(token),
                Err(err) => {
                    lex_error = Some(err);
                    break;
                }
            }
        }

        Self {
            source,
            config,
            tokens,
            pos: 0,
            lex_error,
            groups: Vec::new(),
            error: None,
        }
    }

    /// Parse the whole input into a single root pattern
    pub fn parse(mut self) -> ParseOutput {
        let pattern = self.expression();

        // Everything but a closer is consumed by `expression`, so anything left
        // at top level closes a group that was never opened.
        if let Some(token) = self.peek() {
            let span = self.current_span();
            match token {
                Token::CloseParen => self.fail(
                    ErrorKind::UnmatchedClosingDelimiter {
                        delimiter: Delimiter::Paren,
                    },
                    span,
                ),
                Token::CloseBrace => self.fail(
                    ErrorKind::UnmatchedClosingDelimiter {
                        delimiter: Delimiter::Brace,
                    },
                    span,
                ),
                other => self.fail(
                    ErrorKind::UnexpectedToken {
                        expected: "end of input".to_string(),
                        found: other.describe().to_string(),
                    },
                    span,
                ),
            }
        }

        ParseOutput {
            pattern,
            error: self.error,
        }
    }

    /// Parse a full expression: terms joined by operators of every level.
    ///
    /// Operators wait on a stack until a looser operator arrives or the
    /// expression ends, and are then folded into their right operands. Equal
    /// levels never fold early, so every rung stays right-associative.
    fn expression(&mut self) -> Option<Pattern> {
        let mut pending: Vec<(Option<Pattern>, BinaryOp)> = Vec::new();
        self.skip_newlines();
        let mut operand = self.apps();

        while let Some(token) = self.peek() {
            let Some(op) = self.operator(token, operand.is_some()) else {
                break;
            };
            let level = level_of(&op);
            while pending
                .last()
                .is_some_and(|(_, waiting)| level_of(waiting) > level)
            {
                if let Some((left, waiting)) = pending.pop() {
                    operand = Some(Pattern::binary(waiting, left, operand));
                }
            }
            self.advance();
            trace!(op = %op, level, "shifting binary operator");
            pending.push((operand, op));
            self.skip_newlines();
            operand = self.apps();
        }

        while let Some((left, op)) = pending.pop() {
            operand = Some(Pattern::binary(op, left, operand));
        }
        operand
    }

    /// Classify `token` as a binary operator, if it is one here
    fn operator(&self, token: Token, has_left: bool) -> Option<BinaryOp> {
        let op = match token {
            Token::Semicolon | Token::Newline => BinaryOp::Semicolon,
            Token::LongMatch => BinaryOp::LongMatch,
            Token::LongArrow => BinaryOp::LongArrow,
            Token::Comma => BinaryOp::Comma,
            Token::Match => BinaryOp::Match,
            Token::Arrow => BinaryOp::Arrow,
            // a symbol after a completed operand is infix, otherwise it is a term
            Token::Symbol if has_left => BinaryOp::infix(self.current_text()),
            _ => return None,
        };
        Some(op)
    }

    /// One or more juxtaposed terms. A single term is returned as itself.
    fn apps(&mut self) -> Option<Pattern> {
        let mut terms = Vec::new();

        while let Some(token) = self.peek() {
            let term = match token {
                Token::Key => Pattern::key(self.leaf_text()),
                Token::Variable => Pattern::var(self.leaf_text()),
                Token::Number => Pattern::number(self.leaf_text()),
                Token::String => {
                    let text = self.leaf_text();
                    Pattern::string(&text[1..text.len() - 1])
                }
                Token::Symbol if terms.is_empty() => Pattern::symbol(self.leaf_text()),
                Token::OpenParen => self.group(Delimiter::Paren),
                Token::OpenBrace => self.group(Delimiter::Brace),
                Token::Backtick if !self.in_quote() => self.group(Delimiter::Backtick),
                _ => break,
            };
            terms.push(term);
        }

        match terms.len() {
            0 => None,
            1 => terms.pop(),
            _ => Some(Pattern::apps(terms)),
        }
    }

    /// A delimited group. The current token is its opener.
    fn group(&mut self, delimiter: Delimiter) -> Pattern {
        let (_, open_span) = self.advance();
        if self.groups.len() >= MAX_NESTING {
            self.fail(ErrorKind::NestingTooDeep { limit: MAX_NESTING }, open_span);
            return delimiter.wrap(None);
        }
        trace!(delimiter = %delimiter.open(), start = open_span.start, "entering group");
        self.groups.push(OpenGroup {
            delimiter,
            span: open_span,
        });

        let inner = self.expression();

        match self.peek() {
            Some(token) if self.closes_innermost(token) => {
                self.advance();
            }
            Some(token) => {
                let span = self.current_span();
                self.fail(
                    ErrorKind::UnexpectedToken {
                        expected: closer_of(delimiter).describe().to_string(),
                        found: token.describe().to_string(),
                    },
                    span,
                );
            }
            None => {
                let span = self
                    .groups
                    .last()
                    .map(|group| group.span.clone())
                    .unwrap_or(0..0);
                self.fail(ErrorKind::UnterminatedGroup { delimiter }, span);
            }
        }

        self.groups.pop();
        delimiter.wrap(inner)
    }

    /// Whether the innermost open group is a quote. A group inside a quote
    /// shields it, so a backtick there opens a new quote.
    fn in_quote(&self) -> bool {
        matches!(
            self.groups.last(),
            Some(OpenGroup {
                delimiter: Delimiter::Backtick,
                ..
            })
        )
    }

    fn closes_innermost(&self, token: Token) -> bool {
        self.groups
            .last()
            .is_some_and(|group| closer_of(group.delimiter) == token)
    }

    fn is_closer(&self, token: Token) -> bool {
        token.is_closer() || (token == Token::Backtick && self.in_quote())
    }

    /// The next significant token, without consuming it.
    ///
    /// Insignificant newlines are consumed on the way. A newline run is
    /// significant only where the configuration says newlines separate, and only
    /// when something other than end of input or a closer follows it.
    fn peek(&mut self) -> Option<Token> {
        loop {
            if self.error.is_some() {
                return None;
            }
            let Some((token, _)) = self.tokens.get(self.pos) else {
                self.flush_lex_error();
                return None;
            };
            if *token != Token::Newline {
                return Some(*token);
            }

            if self.config.newline_separates(self.groups.len()) {
                let after_run = self.tokens[self.pos..]
                    .iter()
                    .position(|(t, _)| *t != Token::Newline)
                    .map(|offset| self.tokens[self.pos + offset].0);
                match after_run {
                    Some(next) if !self.is_closer(next) => return Some(Token::Newline),
                    _ => {}
                }
            }
            self.skip_newlines();
        }
    }

    fn skip_newlines(&mut self) {
        while matches!(self.tokens.get(self.pos), Some((Token::Newline, _))) {
            self.pos += 1;
        }
    }

    fn advance(&mut self) -> TokenSpan {
        let token = self.tokens[self.pos].clone();
        self.pos += 1;
        token
    }

    fn current_span(&self) -> Range<usize> {
        self.tokens
            .get(self.pos)
            .map(|(_, span)| span.clone())
            .unwrap_or(self.source.len()..self.source.len())
    }

    fn current_text(&self) -> &'src str {
        let source = self.source;
        &source[self.current_span()]
    }

    /// Consume the current leaf token and return its text
    fn leaf_text(&mut self) -> &'src str {
        let source = self.source;
        let (_, span) = self.advance();
        &source[span]
    }

    fn flush_lex_error(&mut self) {
        if let Some(err) = self.lex_error.take() {
            let error = ParseError::from_lex_error(&err, self.source);
            debug!(%error, "lexing failed");
            self.error = Some(error);
        }
    }

    /// Record an error unless one is already recorded. Parsing halts after this.
    fn fail(&mut self, kind: ErrorKind, span: Range<usize>) {
        if self.error.is_some() {
            return;
        }
        let error = ParseError::new(kind, span, self.source);
        debug!(%error, "parse failed");
        self.error = Some(error);
    }
}

fn closer_of(delimiter: Delimiter) -> Token {
    match delimiter {
        Delimiter::Paren => Token::CloseParen,
        Delimiter::Brace => Token::CloseBrace,
        Delimiter::Backtick => Token::Backtick,
    }
}
