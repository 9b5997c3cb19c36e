//! Canonical source and s-expression printers
//!
//! The canonical printer puts a single space between tokens and never emits a
//! newline, so its output reads the same under every newline configuration.
//! Grouping is never added: a tree that validates already has the shape the
//! parser would give its tokens.

use std::fmt;

use crate::sifu::ast::Pattern;

/// A piece of output still to be written. Nodes expand into more pieces, so
/// printing needs no recursion however deep the tree is.
enum Piece<'a> {
    Node(&'a Pattern),
    Text(&'a str),
    Char(char),
}

fn render<'a>(pattern: &'a Pattern, expand: fn(&'a Pattern, &mut Vec<Piece<'a>>)) -> String {
    let mut out = String::new();
    let mut stack = vec![Piece::Node(pattern)];
    let mut parts = Vec::new();
    while let Some(piece) = stack.pop() {
        match piece {
            Piece::Text(text) => out.push_str(text),
            Piece::Char(ch) => out.push(ch),
            Piece::Node(node) => {
                expand(node, &mut parts);
                stack.extend(parts.drain(..).rev());
            }
        }
    }
    out
}

pub fn to_source(pattern: &Pattern) -> String {
    render(pattern, source_pieces)
}

fn source_pieces<'a>(pattern: &'a Pattern, parts: &mut Vec<Piece<'a>>) {
    match pattern {
        Pattern::Key { text }
        | Pattern::Variable { text }
        | Pattern::Number { text }
        | Pattern::Symbol { text } => parts.push(Piece::Text(text.as_str())),
        Pattern::String { text } => {
            parts.extend([Piece::Char('"'), Piece::Text(text.as_str()), Piece::Char('"')])
        }
        Pattern::Apps { terms } => {
            for (i, term) in terms.iter().enumerate() {
                if i > 0 {
                    parts.push(Piece::Char(' '));
                }
                parts.push(Piece::Node(term));
            }
        }
        Pattern::Binary { op, left, right } => {
            if let Some(left) = left {
                parts.extend([Piece::Node(left), Piece::Char(' ')]);
            }
            parts.push(Piece::Text(op.spelling()));
            if let Some(right) = right {
                parts.extend([Piece::Char(' '), Piece::Node(right)]);
            }
        }
        Pattern::NestedPattern { inner }
        | Pattern::NestedTrie { inner }
        | Pattern::Quote { inner } => {
            // delimiter() is always Some for group nodes
            if let Some(delimiter) = pattern.delimiter() {
                parts.push(Piece::Char(delimiter.open()));
                if let Some(inner) = inner {
                    parts.push(Piece::Node(inner));
                }
                parts.push(Piece::Char(delimiter.close()));
            }
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_source(self))
    }
}

/// Render a tree as an s-expression, e.g. `(: (Key X) (Var y))`.
/// A missing operand prints as `_`.
pub fn to_sexpr(pattern: &Pattern) -> String {
    render(pattern, sexpr_pieces)
}

fn sexpr_pieces<'a>(pattern: &'a Pattern, parts: &mut Vec<Piece<'a>>) {
    match pattern {
        Pattern::Key { text } => leaf(parts, "Key", text),
        Pattern::Variable { text } => leaf(parts, "Var", text),
        Pattern::Number { text } => leaf(parts, "Num", text),
        Pattern::String { text } => parts.extend([
            Piece::Text("(Str \""),
            Piece::Text(text.as_str()),
            Piece::Text("\")"),
        ]),
        Pattern::Symbol { text } => leaf(parts, "Sym", text),
        Pattern::Apps { terms } => {
            parts.push(Piece::Text("(Apps"));
            for term in terms {
                parts.extend([Piece::Char(' '), Piece::Node(term)]);
            }
            parts.push(Piece::Char(')'));
        }
        Pattern::Binary { op, left, right } => {
            parts.extend([Piece::Char('('), Piece::Text(op.spelling())]);
            for operand in [left, right] {
                parts.push(Piece::Char(' '));
                parts.push(match operand {
                    Some(operand) => Piece::Node(operand),
                    None => Piece::Char('_'),
                });
            }
            parts.push(Piece::Char(')'));
        }
        Pattern::NestedPattern { inner } => group(parts, "Nested", inner.as_deref()),
        Pattern::NestedTrie { inner } => group(parts, "Trie", inner.as_deref()),
        Pattern::Quote { inner } => group(parts, "Quote", inner.as_deref()),
    }
}

fn leaf<'a>(parts: &mut Vec<Piece<'a>>, tag: &'static str, text: &'a str) {
    parts.extend([
        Piece::Char('('),
        Piece::Text(tag),
        Piece::Char(' '),
        Piece::Text(text),
        Piece::Char(')'),
    ]);
}

fn group<'a>(parts: &mut Vec<Piece<'a>>, tag: &'static str, inner: Option<&'a Pattern>) {
    parts.extend([Piece::Char('('), Piece::Text(tag)]);
    if let Some(inner) = inner {
        parts.extend([Piece::Char(' '), Piece::Node(inner)]);
    }
    parts.push(Piece::Char(')'));
}
