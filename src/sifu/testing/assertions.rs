//! Fluent assertion API for pattern trees

use std::fmt;

use crate::sifu::ast::{BinaryOp, Delimiter, Pattern};
use crate::sifu::formats::{to_sexpr, to_source};

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for a pattern tree
pub fn assert_pattern(pattern: &Pattern) -> PatternAssertion<'_> {
    PatternAssertion {
        pattern,
        context: "root".to_string(),
    }
}

fn summarize(pattern: &Pattern) -> String {
    let source = to_source(pattern);
    if source.chars().count() > 50 {
        format!("{}...", source.chars().take(50).collect::<String>())
    } else {
        source
    }
}

// ============================================================================
// Text Matching
// ============================================================================

/// How rendered or leaf text must relate to what a test expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMatch<'e> {
    Exact(&'e str),
    Prefix(&'e str),
    Contains(&'e str),
}

impl TextMatch<'_> {
    pub fn matches(&self, actual: &str) -> bool {
        match *self {
            TextMatch::Exact(expected) => actual == expected,
            TextMatch::Prefix(prefix) => actual.starts_with(prefix),
            TextMatch::Contains(needle) => actual.contains(needle),
        }
    }

    /// Panic, naming the node path in `context`, unless `actual` matches
    pub fn check(&self, actual: &str, context: &str) {
        if !self.matches(actual) {
            panic!("{}: Expected text {}, found `{}`", context, self, actual);
        }
    }
}

impl fmt::Display for TextMatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextMatch::Exact(expected) => write!(f, "`{}`", expected),
            TextMatch::Prefix(prefix) => write!(f, "starting with `{}`", prefix),
            TextMatch::Contains(needle) => write!(f, "containing `{}`", needle),
        }
    }
}

// ============================================================================
// Pattern Assertions
// ============================================================================

pub struct PatternAssertion<'a> {
    pattern: &'a Pattern,
    context: String,
}

impl<'a> PatternAssertion<'a> {
    fn wrong_kind(&self, expected: &str) -> ! {
        panic!(
            "{}: Expected {}, found {} `{}`",
            self.context,
            expected,
            self.pattern.node_type(),
            summarize(self.pattern)
        )
    }

    /// Assert the node kind by name, e.g. `"Apps"`
    pub fn node_type(self, expected: &str) -> Self {
        let actual = self.pattern.node_type();
        if actual != expected {
            self.wrong_kind(expected);
        }
        self
    }

    /// Assert the canonical source of this subtree
    pub fn source(self, expected: &str) -> Self {
        TextMatch::Exact(expected).check(&to_source(self.pattern), &self.context);
        self
    }

    /// Assert the s-expression of this subtree
    pub fn sexpr(self, expected: &str) -> Self {
        TextMatch::Exact(expected).check(&to_sexpr(self.pattern), &self.context);
        self
    }

    fn leaf(self, expected: &str) -> LeafAssertion<'a> {
        if self.pattern.node_type() != expected {
            self.wrong_kind(expected);
        }
        match self.pattern.text() {
            Some(text) => LeafAssertion {
                text,
                context: self.context,
            },
            None => self.wrong_kind(expected),
        }
    }

    pub fn assert_key(self) -> LeafAssertion<'a> {
        self.leaf("Key")
    }

    pub fn assert_variable(self) -> LeafAssertion<'a> {
        self.leaf("Variable")
    }

    pub fn assert_number(self) -> LeafAssertion<'a> {
        self.leaf("Number")
    }

    /// The leaf text is the string body without its quotes
    pub fn assert_string(self) -> LeafAssertion<'a> {
        self.leaf("String")
    }

    pub fn assert_symbol(self) -> LeafAssertion<'a> {
        self.leaf("Symbol")
    }

    /// Assert this node is an Apps and return apps-specific assertions
    pub fn assert_apps(self) -> AppsAssertion<'a> {
        match self.pattern {
            Pattern::Apps { terms } => AppsAssertion {
                terms,
                context: self.context,
            },
            _ => self.wrong_kind("Apps"),
        }
    }

    /// Assert this node is a binary operator with the given spelling
    pub fn assert_binary(self, spelling: &str) -> BinaryAssertion<'a> {
        match self.pattern {
            Pattern::Binary { op, left, right } => {
                assert_eq!(
                    op.spelling(),
                    spelling,
                    "{}: Expected operator `{}`, found `{}` in `{}`",
                    self.context,
                    spelling,
                    op,
                    summarize(self.pattern)
                );
                BinaryAssertion {
                    op,
                    left: left.as_deref(),
                    right: right.as_deref(),
                    context: self.context,
                }
            }
            _ => self.wrong_kind(&format!("Binary `{}`", spelling)),
        }
    }

    fn group(self, delimiter: Delimiter) -> GroupAssertion<'a> {
        match self.pattern {
            Pattern::NestedPattern { inner }
            | Pattern::NestedTrie { inner }
            | Pattern::Quote { inner }
                if self.pattern.delimiter() == Some(delimiter) =>
            {
                GroupAssertion {
                    inner: inner.as_deref(),
                    context: self.context,
                }
            }
            _ => self.wrong_kind(delimiter.wrap(None).node_type()),
        }
    }

    pub fn assert_nested(self) -> GroupAssertion<'a> {
        self.group(Delimiter::Paren)
    }

    pub fn assert_trie(self) -> GroupAssertion<'a> {
        self.group(Delimiter::Brace)
    }

    pub fn assert_quote(self) -> GroupAssertion<'a> {
        self.group(Delimiter::Backtick)
    }

    /// Check if this node is a binary operator (non-panicking)
    pub fn is_binary(&self) -> bool {
        matches!(self.pattern, Pattern::Binary { .. })
    }

    /// Check if this node is a leaf (non-panicking)
    pub fn is_leaf(&self) -> bool {
        self.pattern.is_leaf()
    }
}

// ============================================================================
// Leaf Assertions
// ============================================================================

pub struct LeafAssertion<'a> {
    text: &'a str,
    context: String,
}

impl<'a> LeafAssertion<'a> {
    /// Assert exact text match
    pub fn text(self, expected: &str) -> Self {
        TextMatch::Exact(expected).check(self.text, &self.context);
        self
    }

    /// Assert text starts with prefix
    pub fn text_starts_with(self, prefix: &str) -> Self {
        TextMatch::Prefix(prefix).check(self.text, &self.context);
        self
    }

    /// Assert text contains substring
    pub fn text_contains(self, substring: &str) -> Self {
        TextMatch::Contains(substring).check(self.text, &self.context);
        self
    }
}

// ============================================================================
// Apps Assertions
// ============================================================================

pub struct AppsAssertion<'a> {
    terms: &'a [Pattern],
    context: String,
}

impl<'a> AppsAssertion<'a> {
    /// Assert the number of juxtaposed terms
    pub fn term_count(self, expected: usize) -> Self {
        let actual = self.terms.len();
        assert_eq!(
            actual,
            expected,
            "{}: Expected {} terms, found {} terms: [{}]",
            self.context,
            expected,
            actual,
            self.terms
                .iter()
                .map(summarize)
                .collect::<Vec<_>>()
                .join(", ")
        );
        self
    }

    /// Assert on a specific term by index
    pub fn term<F, R>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(PatternAssertion<'a>) -> R,
    {
        assert!(
            index < self.terms.len(),
            "{}: Term index {} out of bounds (apps has {} terms)",
            self.context,
            index,
            self.terms.len()
        );
        assertion(PatternAssertion {
            pattern: &self.terms[index],
            context: format!("{}.terms[{}]", self.context, index),
        });
        self
    }
}

// ============================================================================
// Binary Assertions
// ============================================================================

pub struct BinaryAssertion<'a> {
    op: &'a BinaryOp,
    left: Option<&'a Pattern>,
    right: Option<&'a Pattern>,
    context: String,
}

impl<'a> BinaryAssertion<'a> {
    fn operand(&self, side: &str, operand: Option<&'a Pattern>) -> PatternAssertion<'a> {
        match operand {
            Some(pattern) => PatternAssertion {
                pattern,
                context: format!("{}.{}", self.context, side),
            },
            None => panic!(
                "{}: Expected a {} operand for `{}`, found none",
                self.context, side, self.op
            ),
        }
    }

    /// Assert on the left operand, which must be present
    pub fn left<F, R>(self, assertion: F) -> Self
    where
        F: FnOnce(PatternAssertion<'a>) -> R,
    {
        assertion(self.operand("left", self.left));
        self
    }

    /// Assert on the right operand, which must be present
    pub fn right<F, R>(self, assertion: F) -> Self
    where
        F: FnOnce(PatternAssertion<'a>) -> R,
    {
        assertion(self.operand("right", self.right));
        self
    }

    pub fn left_missing(self) -> Self {
        if let Some(left) = self.left {
            panic!(
                "{}: Expected no left operand for `{}`, found `{}`",
                self.context,
                self.op,
                summarize(left)
            );
        }
        self
    }

    pub fn right_missing(self) -> Self {
        if let Some(right) = self.right {
            panic!(
                "{}: Expected no right operand for `{}`, found `{}`",
                self.context,
                self.op,
                summarize(right)
            );
        }
        self
    }
}

// ============================================================================
// Group Assertions
// ============================================================================

pub struct GroupAssertion<'a> {
    inner: Option<&'a Pattern>,
    context: String,
}

impl<'a> GroupAssertion<'a> {
    /// Assert the group has no body
    pub fn empty(self) -> Self {
        if let Some(inner) = self.inner {
            panic!(
                "{}: Expected an empty group, found `{}`",
                self.context,
                summarize(inner)
            );
        }
        self
    }

    /// Assert on the group body, which must be present
    pub fn inner<F, R>(self, assertion: F) -> Self
    where
        F: FnOnce(PatternAssertion<'a>) -> R,
    {
        match self.inner {
            Some(pattern) => {
                assertion(PatternAssertion {
                    pattern,
                    context: format!("{}.inner", self.context),
                });
            }
            None => panic!("{}: Expected a group body, found none", self.context),
        }
        self
    }
}
