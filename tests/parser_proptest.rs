//! Property-based tests for the sifu lexer and parser
//!
//! Generated trees are shaped the way the parser builds them, so the canonical
//! printer must read back to the very same tree under every newline policy.

use proptest::prelude::*;
use sifu::sifu::formats::to_source;
use sifu::sifu::parser::precedence::level_of;
use sifu::{parse_recovering, parse_with_config, BinaryOp, Pattern, ParserConfig, SifuLexer};

fn all_configs() -> [ParserConfig; 4] {
    [
        ParserConfig::default(),
        ParserConfig::default().with_nested_allows_repetition(false),
        ParserConfig::newlines_as_whitespace().with_nested_allows_repetition(true),
        ParserConfig::newlines_as_whitespace(),
    ]
}

fn symbol_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("+"),
        Just("*"),
        Just("-"),
        Just("--"),
        Just("<="),
        Just("=>"),
        Just("++"),
        Just("|"),
        Just("~"),
        Just("≤"),
    ]
    .prop_map(str::to_string)
}

fn leaf_strategy() -> impl Strategy<Value = Pattern> {
    prop_oneof![
        "[A-Z][a-z0-9_]{0,4}(-[a-z0-9]{1,3})?".prop_map(Pattern::key),
        "[a-z][a-zA-Z0-9_]{0,4}".prop_map(Pattern::var),
        "[0-9]{1,3}(\\.[0-9]{1,2})?".prop_map(Pattern::number),
        r#"([a-z ]|\\[n"]){0,5}"#.prop_map(Pattern::string),
        symbol_strategy().prop_map(Pattern::symbol),
    ]
}

fn op_strategy() -> impl Strategy<Value = BinaryOp> {
    prop_oneof![
        Just(BinaryOp::Semicolon),
        Just(BinaryOp::LongMatch),
        Just(BinaryOp::LongArrow),
        Just(BinaryOp::Comma),
        Just(BinaryOp::Match),
        Just(BinaryOp::Arrow),
        symbol_strategy().prop_map(BinaryOp::Infix),
    ]
}

/// Arbitrary trees, not yet parser-shaped
fn raw_pattern_strategy() -> impl Strategy<Value = Pattern> {
    leaf_strategy().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..4).prop_map(Pattern::apps),
            (
                op_strategy(),
                prop::option::of(inner.clone()),
                prop::option::of(inner.clone())
            )
                .prop_map(|(op, left, right)| Pattern::binary(op, left, right)),
            prop::option::of(inner.clone()).prop_map(Pattern::nested),
            prop::option::of(inner.clone()).prop_map(Pattern::trie),
            prop::option::of(inner).prop_map(Pattern::quote),
        ]
    })
}

fn ends_open(pattern: &Pattern) -> bool {
    match pattern {
        Pattern::Binary { right: None, .. } => true,
        Pattern::Binary {
            right: Some(right), ..
        } => ends_open(right),
        _ => false,
    }
}

fn binds_looser_than(pattern: &Pattern, level: u8, strict: bool) -> bool {
    match pattern {
        Pattern::Binary { op, .. } if strict => level_of(op) <= level,
        Pattern::Binary { op, .. } => level_of(op) < level,
        _ => false,
    }
}

/// Add the parentheses and filler the parser would need to produce this tree
fn parser_shaped(pattern: &Pattern, in_quote: bool) -> Pattern {
    match pattern {
        Pattern::Apps { terms } => {
            let mut terms: Vec<Pattern> = terms
                .iter()
                .enumerate()
                .map(|(index, term)| {
                    let term = parser_shaped(term, in_quote);
                    if index > 0 && matches!(term, Pattern::Symbol { .. }) {
                        Pattern::var("s")
                    } else if !term.is_term() {
                        Pattern::nested(Some(term))
                    } else {
                        term
                    }
                })
                .collect();
            while terms.len() < 2 {
                terms.push(Pattern::var("x"));
            }
            Pattern::apps(terms)
        }
        Pattern::Binary { op, left, right } => {
            let level = level_of(op);
            let infix = matches!(op, BinaryOp::Infix(_));
            let mut left = left.as_deref().map(|left| parser_shaped(left, in_quote));
            if infix && left.is_none() {
                left = Some(Pattern::var("a"));
            }
            let left = left.map(|left| {
                if binds_looser_than(&left, level, true) || (infix && ends_open(&left)) {
                    Pattern::nested(Some(left))
                } else {
                    left
                }
            });
            let right = right.as_deref().map(|right| {
                let right = parser_shaped(right, in_quote);
                if binds_looser_than(&right, level, false) {
                    Pattern::nested(Some(right))
                } else {
                    right
                }
            });
            Pattern::binary(op.clone(), left, right)
        }
        Pattern::NestedPattern { inner } => {
            Pattern::nested(inner.as_deref().map(|inner| parser_shaped(inner, false)))
        }
        Pattern::NestedTrie { inner } => {
            Pattern::trie(inner.as_deref().map(|inner| parser_shaped(inner, false)))
        }
        Pattern::Quote { inner } => {
            let quote = Pattern::quote(inner.as_deref().map(|inner| parser_shaped(inner, true)));
            if in_quote {
                Pattern::nested(Some(quote))
            } else {
                quote
            }
        }
        leaf => leaf.clone(),
    }
}

fn pattern_strategy() -> impl Strategy<Value = Pattern> {
    raw_pattern_strategy().prop_map(|pattern| parser_shaped(&pattern, false))
}

/// Source soup built from real token spellings
fn token_soup_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("a"),
            Just("B"),
            Just("1.5"),
            Just("\"s\""),
            Just("+"),
            Just("-"),
            Just("("),
            Just(")"),
            Just("{"),
            Just("}"),
            Just("`"),
            Just(";"),
            Just("::"),
            Just("-->"),
            Just(","),
            Just(":"),
            Just("->"),
            Just("\n"),
            Just("# note\n"),
            Just(" "),
        ],
        0..40,
    )
    .prop_map(|pieces| pieces.concat())
}

proptest! {
    #[test]
    fn test_generated_trees_validate(pattern in pattern_strategy()) {
        prop_assert_eq!(pattern.validate(), Ok(()));
    }

    #[test]
    fn test_canonical_source_round_trips(pattern in pattern_strategy()) {
        let source = to_source(&pattern);
        for config in all_configs() {
            let reparsed = parse_with_config(&source, &config);
            prop_assert_eq!(reparsed, Ok(Some(pattern.clone())), "source: {}", source);
        }
    }

    #[test]
    fn test_lexer_never_panics(input in "\\PC{0,64}") {
        for result in SifuLexer::new(&input) {
            if let Ok((_, span)) = result {
                prop_assert!(span.end <= input.len());
            }
        }
    }

    #[test]
    fn test_parser_never_panics(input in "\\PC{0,64}") {
        let _ = parse_recovering(&input, &ParserConfig::default());
    }

    #[test]
    fn test_parsed_trees_are_parser_shaped(input in token_soup_strategy()) {
        for config in all_configs() {
            if let Ok(Some(pattern)) = parse_with_config(&input, &config) {
                prop_assert_eq!(pattern.validate(), Ok(()), "input: {:?}", input);
                let reparsed = parse_with_config(&to_source(&pattern), &config);
                prop_assert_eq!(reparsed, Ok(Some(pattern)));
            }
        }
    }
}
