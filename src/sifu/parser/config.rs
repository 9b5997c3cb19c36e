//! Parser configuration
//!
//! The grammar has two open choices about line breaks, exposed as flags:
//!
//! - `newline_is_semicolon`: outside any group, a newline acts as `;`.
//! - `nested_allows_repetition`: inside `()`, `{}` and quotes, a newline acts as `;`,
//!   so a group body can hold a sequence of patterns. When off, a group body is a
//!   single pattern and line breaks inside it are whitespace.
//!
//! | newline_is_semicolon | nested_allows_repetition | newlines separate        |
//! |----------------------|--------------------------|--------------------------|
//! | true                 | true                     | everywhere (default)     |
//! | true                 | false                    | only at top level        |
//! | false                | true                     | only inside groups       |
//! | false                | false                    | nowhere                  |

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub newline_is_semicolon: bool,
    pub nested_allows_repetition: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            newline_is_semicolon: true,
            nested_allows_repetition: true,
        }
    }
}

impl ParserConfig {
    /// A configuration where line breaks are never significant
    pub fn newlines_as_whitespace() -> Self {
        Self {
            newline_is_semicolon: false,
            nested_allows_repetition: false,
        }
    }

    pub fn with_newline_is_semicolon(mut self, value: bool) -> Self {
        self.newline_is_semicolon = value;
        self
    }

    pub fn with_nested_allows_repetition(mut self, value: bool) -> Self {
        self.nested_allows_repetition = value;
        self
    }

    /// Whether a newline separates patterns at the given group depth
    pub fn newline_separates(&self, depth: usize) -> bool {
        if depth == 0 {
            self.newline_is_semicolon
        } else {
            self.nested_allows_repetition
        }
    }
}
