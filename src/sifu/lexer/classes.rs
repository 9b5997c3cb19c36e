//! Lexical character classes shared by the lexer and tree validation.
//!
//! The logos attributes on [`Token`](super::Token) must be string literals, so the
//! same classes are compiled here once for callers that check text outside of a
//! token stream.

use once_cell::sync::Lazy;
use regex::Regex;

static SYMBOL_CHAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r##"^[\p{P}\p{S}&&[^(){}`;,:"#]]$"##).unwrap());

static KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{Lu}([\p{L}\p{N}_]|-[\p{L}\p{N}_])*$").unwrap());

static VARIABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{Ll}([\p{L}\p{N}_]|-[\p{L}\p{N}_])*$").unwrap());

static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").unwrap());

static STRING_BODY: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^([^"\\]|\\[\s\S])*$"#).unwrap());

/// Whether `ch` may appear in a symbol run
pub fn is_symbol_char(ch: char) -> bool {
    let mut buf = [0u8; 4];
    SYMBOL_CHAR.is_match(ch.encode_utf8(&mut buf))
}

pub fn is_key(text: &str) -> bool {
    KEY.is_match(text)
}

pub fn is_variable(text: &str) -> bool {
    VARIABLE.is_match(text)
}

pub fn is_number(text: &str) -> bool {
    NUMBER.is_match(text)
}

/// Whether `text` is a valid string body (the part between the quotes)
pub fn is_string_body(text: &str) -> bool {
    STRING_BODY.is_match(text)
}

/// Whether `text` lexes as exactly one symbol token
pub fn is_symbol(text: &str) -> bool {
    !text.is_empty()
        && text.chars().all(is_symbol_char)
        && !text.contains("->")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_chars() {
        for ch in ['+', '-', '>', '*', '|', '~', '$', '@', '.', '_', '≤', '→'] {
            assert!(is_symbol_char(ch), "{:?} should be a symbol char", ch);
        }
        for ch in ['(', ')', '{', '}', '`', ';', ',', ':', '"', '#', 'a', '1', ' '] {
            assert!(!is_symbol_char(ch), "{:?} should not be a symbol char", ch);
        }
    }

    #[test]
    fn test_symbols() {
        assert!(is_symbol("<=>"));
        assert!(is_symbol("--"));
        assert!(!is_symbol(""));
        assert!(!is_symbol("+->"));
        assert!(!is_symbol("a+"));
    }

    #[test]
    fn test_identifiers() {
        assert!(is_key("Foo-Bar_1"));
        assert!(!is_key("Foo-"));
        assert!(!is_key("foo"));
        assert!(is_variable("émile"));
        assert!(!is_variable("Émile"));
    }

    #[test]
    fn test_numbers_and_strings() {
        assert!(is_number("10"));
        assert!(is_number("1.5"));
        assert!(!is_number("1."));
        assert!(!is_number("-1"));

        assert!(is_string_body(r#"say \"hi\""#));
        assert!(is_string_body(""));
        assert!(!is_string_body(r#"bare " quote"#));
        assert!(!is_string_body(r"trailing \"));
    }
}
