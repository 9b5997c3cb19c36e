//! Well-formedness checks for trees built outside the parser.
//!
//! A tree passes [`Pattern::validate`] exactly when the parser could have produced
//! it, which is also the condition under which the canonical printer round-trips.
//! Trees returned by the parser always validate.

use thiserror::Error;

use super::pattern::{BinaryOp, Pattern};
use crate::sifu::lexer::classes;
use crate::sifu::parser::precedence::level_of;

/// Why a tree is not parser-shaped
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{kind} text {text:?} does not lex as a single {kind}")]
    InvalidLeaf { kind: &'static str, text: String },
    #[error("Apps must hold at least two terms, found {0}")]
    ShortApps(usize),
    #[error("{0} cannot appear inside Apps")]
    NonTermInApps(&'static str),
    #[error("a symbol term can only start an Apps, found one at position {0}")]
    MisplacedSymbol(usize),
    #[error("infix operator `{0}` must have a left operand")]
    InfixWithoutLeft(String),
    #[error("left operand of `{op}` binds no tighter than the operator itself")]
    LooseLeftOperand { op: String },
    #[error("right operand of `{op}` binds looser than the operator itself")]
    LooseRightOperand { op: String },
    #[error("left operand of infix `{op}` ends with a missing operand, so `{op}` would read as a term")]
    DanglingBeforeInfix { op: String },
    #[error("a quote cannot directly contain another quote")]
    NestedQuote,
}

impl Pattern {
    /// Check that this tree is one the parser can produce
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut pending = vec![(self, false)];
        while let Some((pattern, in_quote)) = pending.pop() {
            check(pattern, in_quote, &mut pending)?;
        }
        Ok(())
    }
}

/// Check one node and queue its children, each with whether it sits directly
/// inside a quote
fn check<'a>(
    pattern: &'a Pattern,
    in_quote: bool,
    pending: &mut Vec<(&'a Pattern, bool)>,
) -> Result<(), ValidationError> {
    match pattern {
        Pattern::Key { text } => leaf("Key", text, classes::is_key(text)),
        Pattern::Variable { text } => leaf("Variable", text, classes::is_variable(text)),
        Pattern::Number { text } => leaf("Number", text, classes::is_number(text)),
        Pattern::String { text } => leaf("String", text, classes::is_string_body(text)),
        Pattern::Symbol { text } => leaf("Symbol", text, classes::is_symbol(text)),
        Pattern::Apps { terms } => {
            if terms.len() < 2 {
                return Err(ValidationError::ShortApps(terms.len()));
            }
            for (index, term) in terms.iter().enumerate() {
                if !term.is_term() {
                    return Err(ValidationError::NonTermInApps(term.node_type()));
                }
                if index > 0 && matches!(term, Pattern::Symbol { .. }) {
                    return Err(ValidationError::MisplacedSymbol(index));
                }
            }
            pending.extend(terms.iter().rev().map(|term| (term, in_quote)));
            Ok(())
        }
        Pattern::Binary { op, left, right } => {
            if let BinaryOp::Infix(symbol) = op {
                leaf("Symbol", symbol, classes::is_symbol(symbol))?;
            }
            let level = level_of(op);
            match left.as_deref() {
                None if matches!(op, BinaryOp::Infix(_)) => {
                    return Err(ValidationError::InfixWithoutLeft(op.to_string()));
                }
                None => {}
                Some(left) => {
                    if let Pattern::Binary { op: inner, .. } = left {
                        if level_of(inner) <= level {
                            return Err(ValidationError::LooseLeftOperand { op: op.to_string() });
                        }
                    }
                    if matches!(op, BinaryOp::Infix(_)) && ends_open(left) {
                        return Err(ValidationError::DanglingBeforeInfix { op: op.to_string() });
                    }
                }
            }
            if let Some(Pattern::Binary { op: inner, .. }) = right.as_deref() {
                if level_of(inner) < level {
                    return Err(ValidationError::LooseRightOperand { op: op.to_string() });
                }
            }
            pending.extend(right.as_deref().map(|right| (right, in_quote)));
            pending.extend(left.as_deref().map(|left| (left, in_quote)));
            Ok(())
        }
        Pattern::NestedPattern { inner } | Pattern::NestedTrie { inner } => {
            pending.extend(inner.as_deref().map(|inner| (inner, false)));
            Ok(())
        }
        Pattern::Quote { inner } => {
            if in_quote {
                return Err(ValidationError::NestedQuote);
            }
            pending.extend(inner.as_deref().map(|inner| (inner, true)));
            Ok(())
        }
    }
}

fn leaf(kind: &'static str, text: &str, valid: bool) -> Result<(), ValidationError> {
    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidLeaf {
            kind,
            text: text.to_string(),
        })
    }
}

/// Whether the rightmost operand chain of `pattern` ends in a missing operand
fn ends_open(mut pattern: &Pattern) -> bool {
    loop {
        match pattern {
            Pattern::Binary { right: None, .. } => return true,
            Pattern::Binary {
                right: Some(right), ..
            } => pattern = right,
            _ => return false,
        }
    }
}
