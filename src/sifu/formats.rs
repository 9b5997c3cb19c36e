//! Output formats for pattern trees
//!
//! - [`to_source`]: canonical sifu source, which parses back to the same tree
//! - [`to_sexpr`]: compact s-expressions, one line per tree
//! - [`to_treeviz_str`]: an indented tree drawing for humans

pub mod printer;
pub mod treeviz;

pub use printer::{to_sexpr, to_source};
pub use treeviz::to_treeviz_str;
