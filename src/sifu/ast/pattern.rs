//! The pattern tree
//!
//! Every parse produces a single [`Pattern`]. Nodes own their children outright,
//! so a tree is a plain value that can be cloned, compared and serialized. Nothing
//! here knows about precedence; that belongs to the parser.

use serde::Serialize;
use std::fmt;

/// Kind of a binary operator node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOp {
    /// `;`, or a significant newline
    Semicolon,
    /// `::`
    LongMatch,
    /// `-->`
    LongArrow,
    /// `,`
    Comma,
    /// A symbol run used between two operands, e.g. `+`
    Infix(String),
    /// `:`
    Match,
    /// `->`
    Arrow,
}

impl BinaryOp {
    /// The canonical source spelling of this operator
    pub fn spelling(&self) -> &str {
        match self {
            BinaryOp::Semicolon => ";",
            BinaryOp::LongMatch => "::",
            BinaryOp::LongArrow => "-->",
            BinaryOp::Comma => ",",
            BinaryOp::Infix(symbol) => symbol,
            BinaryOp::Match => ":",
            BinaryOp::Arrow => "->",
        }
    }

    pub fn infix(symbol: impl Into<String>) -> Self {
        BinaryOp::Infix(symbol.into())
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

/// The three grouping delimiters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Delimiter {
    /// `( ... )`, a nested pattern
    Paren,
    /// `{ ... }`, a nested trie
    Brace,
    /// `` ` ... ` ``, a quote
    Backtick,
}

impl Delimiter {
    pub fn open(&self) -> char {
        match self {
            Delimiter::Paren => '(',
            Delimiter::Brace => '{',
            Delimiter::Backtick => '`',
        }
    }

    pub fn close(&self) -> char {
        match self {
            Delimiter::Paren => ')',
            Delimiter::Brace => '}',
            Delimiter::Backtick => '`',
        }
    }

    /// Wrap an optional body in the node this delimiter produces
    pub fn wrap(&self, inner: Option<Pattern>) -> Pattern {
        let inner = inner.map(Box::new);
        match self {
            Delimiter::Paren => Pattern::NestedPattern { inner },
            Delimiter::Brace => Pattern::NestedTrie { inner },
            Delimiter::Backtick => Pattern::Quote { inner },
        }
    }
}

/// A node of the sifu syntax tree
///
/// Operator chains grow as deep as the input is long, one `;` per line, so
/// dropping and comparing trees walk them with a heap stack instead of recursing.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Pattern {
    /// Identifier starting with an upper-case letter
    Key { text: String },
    /// Identifier starting with a lower-case letter
    Variable { text: String },
    /// Integer or decimal literal, kept as written
    Number { text: String },
    /// String literal body between the quotes, escapes kept as written
    String { text: String },
    /// A run of symbol characters used as a term
    Symbol { text: String },
    /// Two or more juxtaposed terms
    Apps { terms: Vec<Pattern> },
    /// An operator with optional operands on either side
    Binary {
        op: BinaryOp,
        left: Option<Box<Pattern>>,
        right: Option<Box<Pattern>>,
    },
    /// `( ... )`
    NestedPattern { inner: Option<Box<Pattern>> },
    /// `{ ... }`
    NestedTrie { inner: Option<Box<Pattern>> },
    /// `` ` ... ` ``
    Quote { inner: Option<Box<Pattern>> },
}

// Struct variants keep JSON output self-describing; build nodes with the constructors.
impl Pattern {
    pub fn key(text: impl Into<String>) -> Self {
        Pattern::Key { text: text.into() }
    }

    pub fn var(text: impl Into<String>) -> Self {
        Pattern::Variable { text: text.into() }
    }

    pub fn number(text: impl Into<String>) -> Self {
        Pattern::Number { text: text.into() }
    }

    pub fn string(text: impl Into<String>) -> Self {
        Pattern::String { text: text.into() }
    }

    pub fn symbol(text: impl Into<String>) -> Self {
        Pattern::Symbol { text: text.into() }
    }

    pub fn apps(terms: Vec<Pattern>) -> Self {
        Pattern::Apps { terms }
    }

    pub fn binary(op: BinaryOp, left: Option<Pattern>, right: Option<Pattern>) -> Self {
        Pattern::Binary {
            op,
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    pub fn nested(inner: Option<Pattern>) -> Self {
        Delimiter::Paren.wrap(inner)
    }

    pub fn trie(inner: Option<Pattern>) -> Self {
        Delimiter::Brace.wrap(inner)
    }

    pub fn quote(inner: Option<Pattern>) -> Self {
        Delimiter::Backtick.wrap(inner)
    }

    /// Whether this node may appear as an element of [`Pattern::Apps`]
    pub fn is_term(&self) -> bool {
        !matches!(self, Pattern::Apps { .. } | Pattern::Binary { .. })
    }

    /// Whether this node is a leaf carrying source text
    pub fn is_leaf(&self) -> bool {
        self.text().is_some()
    }

    /// Source text of a leaf node
    pub fn text(&self) -> Option<&str> {
        match self {
            Pattern::Key { text }
            | Pattern::Variable { text }
            | Pattern::Number { text }
            | Pattern::String { text }
            | Pattern::Symbol { text } => Some(text),
            _ => None,
        }
    }

    /// The delimiter of a group node
    pub fn delimiter(&self) -> Option<Delimiter> {
        match self {
            Pattern::NestedPattern { .. } => Some(Delimiter::Paren),
            Pattern::NestedTrie { .. } => Some(Delimiter::Brace),
            Pattern::Quote { .. } => Some(Delimiter::Backtick),
            _ => None,
        }
    }

    /// Name of the node kind, for display
    pub fn node_type(&self) -> &'static str {
        match self {
            Pattern::Key { .. } => "Key",
            Pattern::Variable { .. } => "Variable",
            Pattern::Number { .. } => "Number",
            Pattern::String { .. } => "String",
            Pattern::Symbol { .. } => "Symbol",
            Pattern::Apps { .. } => "Apps",
            Pattern::Binary { .. } => "Binary",
            Pattern::NestedPattern { .. } => "NestedPattern",
            Pattern::NestedTrie { .. } => "NestedTrie",
            Pattern::Quote { .. } => "Quote",
        }
    }

    /// Direct children, in source order. Missing operands are skipped.
    pub fn children(&self) -> Vec<&Pattern> {
        match self {
            Pattern::Apps { terms } => terms.iter().collect(),
            Pattern::Binary { left, right, .. } => {
                left.iter().chain(right.iter()).map(|b| b.as_ref()).collect()
            }
            Pattern::NestedPattern { inner }
            | Pattern::NestedTrie { inner }
            | Pattern::Quote { inner } => inner.iter().map(|b| b.as_ref()).collect(),
            _ => Vec::new(),
        }
    }

    /// Number of nodes on the longest path from this node down to a leaf
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((node, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            pending.extend(node.children().into_iter().map(|child| (child, depth + 1)));
        }
        deepest
    }

    /// Move the children out of this node, leaving it childless
    fn detach_children(&mut self, into: &mut Vec<Pattern>) {
        match self {
            Pattern::Apps { terms } => into.append(terms),
            Pattern::Binary { left, right, .. } => {
                into.extend(left.take().map(|left| *left));
                into.extend(right.take().map(|right| *right));
            }
            Pattern::NestedPattern { inner }
            | Pattern::NestedTrie { inner }
            | Pattern::Quote { inner } => into.extend(inner.take().map(|inner| *inner)),
            _ => {}
        }
    }

    /// The string literal with its escapes resolved
    pub fn unescaped(&self) -> Option<String> {
        let Pattern::String { text } = self else {
            return None;
        };
        let mut out = String::with_capacity(text.len());
        let mut chars = text.chars();
        while let Some(ch) = chars.next() {
            if ch != '\\' {
                out.push(ch);
                continue;
            }
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('0') => out.push('\0'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        }
        Some(out)
    }
}

impl Drop for Pattern {
    fn drop(&mut self) {
        let mut orphans = Vec::new();
        self.detach_children(&mut orphans);
        while let Some(mut orphan) = orphans.pop() {
            orphan.detach_children(&mut orphans);
        }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            let same = match (a, b) {
                (Pattern::Key { text: x }, Pattern::Key { text: y })
                | (Pattern::Variable { text: x }, Pattern::Variable { text: y })
                | (Pattern::Number { text: x }, Pattern::Number { text: y })
                | (Pattern::String { text: x }, Pattern::String { text: y })
                | (Pattern::Symbol { text: x }, Pattern::Symbol { text: y }) => x == y,
                (Pattern::Apps { terms: x }, Pattern::Apps { terms: y }) => {
                    pending.extend(x.iter().zip(y.iter()));
                    x.len() == y.len()
                }
                (
                    Pattern::Binary {
                        op: op_a,
                        left: left_a,
                        right: right_a,
                    },
                    Pattern::Binary {
                        op: op_b,
                        left: left_b,
                        right: right_b,
                    },
                ) => {
                    op_a == op_b
                        && pair_up(left_a, left_b, &mut pending)
                        && pair_up(right_a, right_b, &mut pending)
                }
                (Pattern::NestedPattern { inner: x }, Pattern::NestedPattern { inner: y })
                | (Pattern::NestedTrie { inner: x }, Pattern::NestedTrie { inner: y })
                | (Pattern::Quote { inner: x }, Pattern::Quote { inner: y }) => {
                    pair_up(x, y, &mut pending)
                }
                _ => false,
            };
            if !same {
                return false;
            }
        }
        true
    }
}

impl Eq for Pattern {}

/// Queue two optional children for comparison; false when only one is present
fn pair_up<'a>(
    a: &'a Option<Box<Pattern>>,
    b: &'a Option<Box<Pattern>>,
    pending: &mut Vec<(&'a Pattern, &'a Pattern)>,
) -> bool {
    match (a.as_deref(), b.as_deref()) {
        (Some(a), Some(b)) => {
            pending.push((a, b));
            true
        }
        (None, None) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let p = Pattern::binary(BinaryOp::Match, Some(Pattern::key("A")), None);
        match &p {
            Pattern::Binary { op, left, right } => {
                assert_eq!(op, &BinaryOp::Match);
                assert_eq!(left.as_deref(), Some(&Pattern::key("A")));
                assert!(right.is_none());
            }
            other => panic!("expected binary, got {:?}", other),
        }
    }

    #[test]
    fn test_delimiters_wrap_into_distinct_nodes() {
        let inner = Some(Pattern::var("x"));
        assert_eq!(
            Delimiter::Paren.wrap(inner.clone()).node_type(),
            "NestedPattern"
        );
        assert_eq!(Delimiter::Brace.wrap(inner.clone()).node_type(), "NestedTrie");
        assert_eq!(Delimiter::Backtick.wrap(inner).node_type(), "Quote");
        assert_ne!(Pattern::nested(None), Pattern::trie(None));
    }

    #[test]
    fn test_children_skip_missing_operands() {
        let p = Pattern::binary(BinaryOp::Arrow, None, Some(Pattern::var("y")));
        assert_eq!(p.children(), vec![&Pattern::var("y")]);
        assert!(Pattern::quote(None).children().is_empty());
    }

    #[test]
    fn test_terms() {
        assert!(Pattern::key("A").is_term());
        assert!(Pattern::trie(None).is_term());
        assert!(!Pattern::apps(vec![Pattern::key("A"), Pattern::key("B")]).is_term());
        assert!(!Pattern::binary(BinaryOp::Comma, None, None).is_term());
    }

    #[test]
    fn test_unescaped() {
        let s = Pattern::string(r#"a\"b\nc\\"#);
        assert_eq!(s.unescaped().as_deref(), Some("a\"b\nc\\"));
        assert_eq!(Pattern::key("A").unescaped(), None);
    }

    /// A right-leaning `;` chain as long as a file of `lines` lines
    fn sequence(lines: usize) -> Pattern {
        let mut chain = Pattern::var("a");
        for _ in 1..lines {
            chain = Pattern::binary(BinaryOp::Semicolon, Some(Pattern::var("a")), Some(chain));
        }
        chain
    }

    #[test]
    fn test_long_chains_compare_and_drop() {
        let a = sequence(200_000);
        let b = sequence(200_000);
        assert!(a == b);
        assert_eq!(a.depth(), 200_000);

        let c = sequence(199_999);
        assert!(a != c);
    }

    #[test]
    fn test_equality_tells_variants_apart() {
        assert_ne!(Pattern::key("A"), Pattern::var("A"));
        assert_ne!(Pattern::nested(None), Pattern::quote(None));
        assert_ne!(
            Pattern::binary(BinaryOp::Match, Some(Pattern::var("a")), None),
            Pattern::binary(BinaryOp::Match, None, Some(Pattern::var("a")))
        );
        assert_ne!(
            Pattern::apps(vec![Pattern::var("f"), Pattern::var("x")]),
            Pattern::apps(vec![Pattern::var("f")])
        );
    }

    #[test]
    fn test_depth() {
        assert_eq!(Pattern::key("A").depth(), 1);
        assert_eq!(Pattern::quote(None).depth(), 1);
        let nested = Pattern::nested(Some(Pattern::apps(vec![
            Pattern::var("f"),
            Pattern::trie(Some(Pattern::var("x"))),
        ])));
        assert_eq!(nested.depth(), 4);
    }

    #[test]
    fn test_operator_spelling() {
        assert_eq!(BinaryOp::LongArrow.spelling(), "-->");
        assert_eq!(BinaryOp::infix("<>").to_string(), "<>");
    }
}
