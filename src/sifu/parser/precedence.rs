//! The precedence ladder.
//!
//! Every binary operator belongs to one rung. A higher level binds tighter, and
//! every rung is right-associative. The climbing parser consults this table and
//! nothing else when deciding how far an operand extends.
//!
//! | Level | Operators        |
//! |-------|------------------|
//! | 1     | `;`, newline     |
//! | 2     | `::`, `-->`      |
//! | 3     | `,`              |
//! | 4     | infix symbols    |
//! | 5     | `:`, `->`        |
//! | 8     | juxtaposition    |

use crate::sifu::ast::{BinaryOp, Pattern};

/// One rung of the ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rung {
    pub level: u8,
    pub name: &'static str,
    pub spellings: &'static [&'static str],
}

/// Operator classes, in ladder order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OperatorClass {
    Sequence,
    Long,
    Comma,
    Infix,
    Short,
}

pub const LADDER: [Rung; 5] = [
    Rung {
        level: 1,
        name: "sequence",
        spellings: &[";", "newline"],
    },
    Rung {
        level: 2,
        name: "long",
        spellings: &["::", "-->"],
    },
    Rung {
        level: 3,
        name: "comma",
        spellings: &[","],
    },
    Rung {
        level: 4,
        name: "infix",
        spellings: &["<symbol>"],
    },
    Rung {
        level: 5,
        name: "short",
        spellings: &[":", "->"],
    },
];

/// Binding level of juxtaposed terms
pub const APPS_LEVEL: u8 = 8;

/// Binding level of a single term, which never needs grouping
pub const TERM_LEVEL: u8 = u8::MAX;

impl OperatorClass {
    pub fn of(op: &BinaryOp) -> Self {
        match op {
            BinaryOp::Semicolon => OperatorClass::Sequence,
            BinaryOp::LongMatch | BinaryOp::LongArrow => OperatorClass::Long,
            BinaryOp::Comma => OperatorClass::Comma,
            BinaryOp::Infix(_) => OperatorClass::Infix,
            BinaryOp::Match | BinaryOp::Arrow => OperatorClass::Short,
        }
    }

    pub fn rung(self) -> &'static Rung {
        &LADDER[self as usize]
    }

    pub fn level(self) -> u8 {
        self.rung().level
    }
}

/// Binding level of an operator
pub fn level_of(op: &BinaryOp) -> u8 {
    OperatorClass::of(op).level()
}

impl Pattern {
    /// Binding level of the outermost construct of this node
    pub fn precedence(&self) -> u8 {
        match self {
            Pattern::Binary { op, .. } => level_of(op),
            Pattern::Apps { .. } => APPS_LEVEL,
            _ => TERM_LEVEL,
        }
    }
}
