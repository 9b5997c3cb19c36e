//! Lexer module for the sifu language
//!
//! This module contains the tokenization logic for sifu, including token
//! definitions and the lexer implementation.
//!
//! Newline Handling
//!
//! The lexer never decides whether a line break separates statements. Newlines are
//! always emitted as [`Token::Newline`] and comments stop short of them, so
//! `A # note\nB` and `A\nB` produce the same stream. Whether a newline acts as `;` is
//! up to the parser configuration.

pub mod classes;
pub mod error;
pub mod lexer_impl;
pub mod tokens;

pub use error::LexError;
pub use lexer_impl::{tokenize, tokenize_with_spans, SifuLexer, TokenSpan};
pub use tokens::Token;
