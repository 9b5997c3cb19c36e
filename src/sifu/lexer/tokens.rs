//! Token definitions for the sifu language
//!
//! This module defines all the tokens that can be produced by the sifu lexer.
//! The tokens are defined using the logos derive macro for efficient tokenization.
//! Tokens carry no payload: the text of a term is recovered from its span.
//!
//! Structural punctuation is emitted one token per delimiter or operator, and the
//! multi-character operators (`::`, `-->`, `->`) win over symbol runs because
//! logos always prefers the longest match.
use logos::Logos;
use serde::Serialize;
use std::fmt;

use super::classes::is_symbol_char;

/// All possible tokens in the sifu language
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[logos(skip r"[\t\r\f\p{Zs}]+")]
#[logos(skip r"#[^\n]*")]
pub enum Token {
    // Line breaks (a statement separator or whitespace, depending on parser configuration)
    #[token("\n")]
    Newline,

    // Grouping
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token("`")]
    Backtick,

    // Operators, lowest binding first
    #[token(";")]
    Semicolon,
    #[token("::")]
    LongMatch,
    #[token("-->")]
    LongArrow,
    #[token(",")]
    Comma,
    #[token(":")]
    Match,
    #[token("->")]
    Arrow,

    // Terms
    #[regex(r"\p{Lu}([\p{L}\p{N}_]|-[\p{L}\p{N}_])*")]
    Key,
    #[regex(r"\p{Ll}([\p{L}\p{N}_]|-[\p{L}\p{N}_])*")]
    Variable,
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,
    #[regex(r#""([^"\\]|\\(.|\n))*""#)]
    String,

    /// A string literal that reaches end of input before its closing quote.
    /// Never yielded by [`SifuLexer`](super::SifuLexer), which reports it as an error.
    #[regex(r#""([^"\\]|\\(.|\n))*\\?"#)]
    UnterminatedString,

    // A run of punctuation and symbol characters. The regex only matches the
    // first character; `symbol_run` extends it up to the next reserved digraph.
    #[regex(r##"[\p{P}\p{S}&&[^(){}`;,:"#]]"##, symbol_run)]
    Symbol,
}

/// Extend a symbol token over the rest of its run, stopping before `->` and `-->`.
fn symbol_run(lex: &mut logos::Lexer<Token>) -> bool {
    let mut len = 0;
    let rest = lex.remainder();
    for (offset, ch) in rest.char_indices() {
        let tail = &rest[offset..];
        if !is_symbol_char(ch) || tail.starts_with("->") || tail.starts_with("-->") {
            break;
        }
        len = offset + ch.len_utf8();
    }
    lex.bump(len);
    true
}

impl Token {
    /// Check if this token can begin a term
    pub fn is_term_start(&self) -> bool {
        matches!(
            self,
            Token::Key
                | Token::Variable
                | Token::Number
                | Token::String
                | Token::Symbol
                | Token::OpenParen
                | Token::OpenBrace
                | Token::Backtick
        )
    }

    /// Check if this token is a leaf term (carries text)
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Token::Key | Token::Variable | Token::Number | Token::String | Token::Symbol
        )
    }

    /// Check if this token is one of the fixed operator spellings
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            Token::Semicolon
                | Token::LongMatch
                | Token::LongArrow
                | Token::Comma
                | Token::Match
                | Token::Arrow
        )
    }

    /// Check if this token only ever closes a group
    pub fn is_closer(&self) -> bool {
        matches!(self, Token::CloseParen | Token::CloseBrace)
    }

    /// The fixed source spelling, if this token has one
    pub fn spelling(&self) -> Option<&'static str> {
        let s = match self {
            Token::Newline => "\n",
            Token::OpenParen => "(",
            Token::CloseParen => ")",
            Token::OpenBrace => "{",
            Token::CloseBrace => "}",
            Token::Backtick => "`",
            Token::Semicolon => ";",
            Token::LongMatch => "::",
            Token::LongArrow => "-->",
            Token::Comma => ",",
            Token::Match => ":",
            Token::Arrow => "->",
            _ => return None,
        };
        Some(s)
    }

    /// Human readable description, used in diagnostics
    pub fn describe(&self) -> &'static str {
        match self {
            Token::Newline => "newline",
            Token::Key => "key",
            Token::Variable => "variable",
            Token::Number => "number",
            Token::String | Token::UnterminatedString => "string",
            Token::Symbol => "symbol",
            Token::OpenParen => "`(`",
            Token::CloseParen => "`)`",
            Token::OpenBrace => "`{`",
            Token::CloseBrace => "`}`",
            Token::Backtick => "`` ` ``",
            Token::Semicolon => "`;`",
            Token::LongMatch => "`::`",
            Token::LongArrow => "`-->`",
            Token::Comma => "`,`",
            Token::Match => "`:`",
            Token::Arrow => "`->`",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Token::Newline => "newline",
            Token::OpenParen => "open-paren",
            Token::CloseParen => "close-paren",
            Token::OpenBrace => "open-brace",
            Token::CloseBrace => "close-brace",
            Token::Backtick => "backtick",
            Token::Semicolon => "semicolon",
            Token::LongMatch => "long-match",
            Token::LongArrow => "long-arrow",
            Token::Comma => "comma",
            Token::Match => "match",
            Token::Arrow => "arrow",
            Token::Key => "key",
            Token::Variable => "variable",
            Token::Number => "number",
            Token::String => "string",
            Token::UnterminatedString => "unterminated-string",
            Token::Symbol => "symbol",
        };
        write!(f, "<{}>", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        Token::lexer(source).map(|t| t.expect("valid token")).collect()
    }

    #[test]
    fn test_structural_punctuation() {
        assert_eq!(
            kinds("( ) { } ` ; , :"),
            vec![
                Token::OpenParen,
                Token::CloseParen,
                Token::OpenBrace,
                Token::CloseBrace,
                Token::Backtick,
                Token::Semicolon,
                Token::Comma,
                Token::Match,
            ]
        );
    }

    #[test]
    fn test_long_operators_are_longest_match() {
        assert_eq!(kinds("-->"), vec![Token::LongArrow]);
        assert_eq!(kinds("->"), vec![Token::Arrow]);
        assert_eq!(kinds("::"), vec![Token::LongMatch]);
        assert_eq!(kinds(":::"), vec![Token::LongMatch, Token::Match]);
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(kinds("Foo"), vec![Token::Key]);
        assert_eq!(kinds("foo"), vec![Token::Variable]);
        assert_eq!(kinds("Ärger über"), vec![Token::Key, Token::Variable]);
        assert_eq!(kinds("snake_case kebab-case"), vec![Token::Variable, Token::Variable]);
    }

    #[test]
    fn test_dash_before_arrow_is_not_part_of_identifier() {
        assert_eq!(kinds("X->y"), vec![Token::Key, Token::Arrow, Token::Variable]);
        assert_eq!(kinds("X-->y"), vec![Token::Key, Token::LongArrow, Token::Variable]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(kinds("42"), vec![Token::Number]);
        assert_eq!(kinds("3.14"), vec![Token::Number]);
        // a trailing dot is a symbol, not part of the number
        assert_eq!(kinds("1."), vec![Token::Number, Token::Symbol]);
    }

    #[test]
    fn test_strings() {
        assert_eq!(kinds(r#""hello""#), vec![Token::String]);
        assert_eq!(kinds(r#""say \"hi\"""#), vec![Token::String]);
        assert_eq!(kinds(r#""open"#), vec![Token::UnterminatedString]);
    }

    #[test]
    fn test_symbol_runs() {
        assert_eq!(kinds("+"), vec![Token::Symbol]);
        assert_eq!(kinds("<=>"), vec![Token::Symbol]);
        assert_eq!(kinds("+->"), vec![Token::Symbol, Token::Arrow]);
        assert_eq!(kinds("+-->"), vec![Token::Symbol, Token::LongArrow]);
        assert_eq!(kinds("--"), vec![Token::Symbol]);
        assert_eq!(kinds("≤"), vec![Token::Symbol]);
    }

    #[test]
    fn test_symbol_runs_stop_at_quotes_and_comments() {
        assert_eq!(kinds("+\"s\""), vec![Token::Symbol, Token::String]);
        assert_eq!(kinds("<>#note"), vec![Token::Symbol]);
    }

    #[test]
    fn test_comments_keep_newlines() {
        assert_eq!(kinds("A # comment\nB"), vec![Token::Key, Token::Newline, Token::Key]);
    }

    #[test]
    fn test_token_predicates() {
        assert!(Token::Key.is_term_start());
        assert!(Token::Backtick.is_term_start());
        assert!(!Token::Comma.is_term_start());

        assert!(Token::Arrow.is_operator());
        assert!(!Token::Symbol.is_operator());

        assert!(Token::CloseParen.is_closer());
        assert!(!Token::Backtick.is_closer());

        assert_eq!(Token::LongArrow.spelling(), Some("-->"));
        assert_eq!(Token::Key.spelling(), None);
    }
}
