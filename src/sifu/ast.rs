//! AST definitions and utilities for the sifu language
//!
//! This module provides the pattern tree produced by the parser, along with
//! utilities for tracking source positions and checking hand-built trees.
//!
//! ## Modules
//!
//! - `pattern` - The [`Pattern`] node type, operator kinds and delimiters
//! - `position` - Source location utilities for converting byte offsets
//! - `validate` - Shape checks for trees built outside the parser

pub mod pattern;
pub mod position;
pub mod validate;

// Re-export commonly used types at module root
pub use pattern::{BinaryOp, Delimiter, Pattern};
pub use position::{Position, SourceLocation};
pub use validate::ValidationError;
