//! Precedence, associativity and newline policy, table driven

use rstest::rstest;
use sifu::sifu::formats::to_sexpr;
use sifu::{parse, parse_with_config, ParserConfig};

fn sexpr(source: &str) -> String {
    let pattern = parse(source)
        .unwrap_or_else(|e| panic!("failed to parse {:?}: {}", source, e))
        .unwrap_or_else(|| panic!("no pattern in {:?}", source));
    to_sexpr(&pattern)
}

#[rstest]
#[case::semicolon(";")]
#[case::long_match("::")]
#[case::long_arrow("-->")]
#[case::comma(",")]
#[case::infix("+")]
#[case::infix_run("<=>")]
#[case::short_match(":")]
#[case::arrow("->")]
fn operators_are_right_associative(#[case] op: &str) {
    let source = format!("a {0} b {0} c", op);
    let expected = format!("({0} (Var a) ({0} (Var b) (Var c)))", op);
    assert_eq!(sexpr(&source), expected);
}

#[rstest]
#[case("a ; b :: c", "(; (Var a) (:: (Var b) (Var c)))")]
#[case("a :: b ; c", "(; (:: (Var a) (Var b)) (Var c))")]
#[case("a --> b , c", "(--> (Var a) (, (Var b) (Var c)))")]
#[case("a , b --> c", "(--> (, (Var a) (Var b)) (Var c))")]
#[case("a , b : c", "(, (Var a) (: (Var b) (Var c)))")]
#[case("a : b , c", "(, (: (Var a) (Var b)) (Var c))")]
#[case("a , b + c", "(, (Var a) (+ (Var b) (Var c)))")]
#[case("a + b -> c", "(+ (Var a) (-> (Var b) (Var c)))")]
#[case("a -> b + c", "(+ (-> (Var a) (Var b)) (Var c))")]
#[case("f x : g y", "(: (Apps (Var f) (Var x)) (Apps (Var g) (Var y)))")]
#[case("(a , b) : c", "(: (Nested (, (Var a) (Var b))) (Var c))")]
fn ladder_orders_operators(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(sexpr(source), expected);
}

#[rstest]
#[case(":", "(: _ _)")]
#[case(": b", "(: _ (Var b))")]
#[case("a :", "(: (Var a) _)")]
#[case("-> ->", "(-> _ (-> _ _))")]
#[case("a : , b", "(, (: (Var a) _) (Var b))")]
#[case("; ;", "(; _ (; _ _))")]
fn operands_are_optional(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(sexpr(source), expected);
}

#[rstest]
#[case("+", "(Sym +)")]
#[case("+ x", "(Apps (Sym +) (Var x))")]
#[case("x +", "(+ (Var x) _)")]
#[case("x + y", "(+ (Var x) (Var y))")]
#[case("+ + x", "(+ (Sym +) (Var x))")]
#[case("a : - b", "(: (Var a) (Apps (Sym -) (Var b)))")]
#[case("(- x) - y", "(- (Nested (Apps (Sym -) (Var x))) (Var y))")]
fn symbols_disambiguate_by_position(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(sexpr(source), expected);
}

#[rstest]
#[case(true, true, "A\nB", "(; (Key A) (Key B))")]
#[case(true, true, "(A\nB)", "(Nested (; (Key A) (Key B)))")]
#[case(true, false, "A\nB", "(; (Key A) (Key B))")]
#[case(true, false, "(A\nB)", "(Nested (Apps (Key A) (Key B)))")]
#[case(false, true, "A\nB", "(Apps (Key A) (Key B))")]
#[case(false, true, "{A\nB}", "(Trie (; (Key A) (Key B)))")]
#[case(false, false, "A\nB", "(Apps (Key A) (Key B))")]
#[case(false, false, "`A\nB`", "(Quote (Apps (Key A) (Key B)))")]
fn newline_policy(
    #[case] newline_is_semicolon: bool,
    #[case] nested_allows_repetition: bool,
    #[case] source: &str,
    #[case] expected: &str,
) {
    let config = ParserConfig::default()
        .with_newline_is_semicolon(newline_is_semicolon)
        .with_nested_allows_repetition(nested_allows_repetition);
    let pattern = parse_with_config(source, &config)
        .expect("parse to succeed")
        .expect("a pattern");
    assert_eq!(to_sexpr(&pattern), expected);
}

#[rstest]
#[case("(a : b", "unterminated group: `(` is never closed at 1:1")]
#[case("x {a", "unterminated group: `{` is never closed at 1:3")]
#[case("a )", "unmatched closing delimiter `)` at 1:3")]
#[case("a\n}", "unmatched closing delimiter `}` at 2:1")]
#[case("(a }", "expected `)`, found `}` at 1:4")]
#[case("\"abc", "unterminated string literal at 1:1")]
#[case("a 中", "invalid character '中' at 1:3")]
#[case("`(a`", "unterminated group: ``` is never closed at 1:4")]
fn errors_are_located(#[case] source: &str, #[case] expected: &str) {
    let err = parse(source).expect_err("parse to fail");
    assert_eq!(err.to_string(), expected);
}

#[test]
fn deep_nesting_is_reported_at_the_first_opener_past_the_limit() {
    let source = format!("{}a", "(".repeat(200));
    let err = parse(&source).expect_err("parse to fail");
    assert_eq!(err.to_string(), "groups nest deeper than 128 levels at 1:129");
}
