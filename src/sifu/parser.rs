//! Parser module for the sifu language
//!
//! This module turns a token stream into a single [`Pattern`] tree using
//! precedence climbing over the ladder in [`precedence`].
//!
//! ## Entry points
//!
//! - [`parse`] - default configuration, fails on the first error
//! - [`parse_with_config`] - explicit newline policy
//! - [`parse_recovering`] - returns the partial tree alongside the first error
//!
//! Empty input, or input holding only comments and blank lines, parses to `None`.

pub mod config;
pub mod error;
#[allow(clippy::module_inception)]
pub mod parser;
pub mod precedence;

pub use config::ParserConfig;
pub use error::{ErrorKind, ParseError};
pub use parser::{ParseOutput, Parser, MAX_NESTING};

use crate::sifu::ast::Pattern;

/// Parse `source` with the default configuration
pub fn parse(source: &str) -> Result<Option<Pattern>, ParseError> {
    parse_with_config(source, &ParserConfig::default())
}

/// Parse `source` with an explicit configuration
pub fn parse_with_config(
    source: &str,
    config: &ParserConfig,
) -> Result<Option<Pattern>, ParseError> {
    parse_recovering(source, config).into_result()
}

/// Parse `source`, keeping whatever tree was built before the first error
pub fn parse_recovering(source: &str, config: &ParserConfig) -> ParseOutput {
    Parser::new(source, *config).parse()
}
