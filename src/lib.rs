//! # sifu
//!
//! Tokenizer and precedence parser for the Sifu pattern language.
//!
//! A whole source text parses into a single [`Pattern`] tree. Juxtaposed terms
//! bind tightest, then the operator ladder from `:`/`->` down to `;`, every rung
//! right-associative and every operand optional.
//!
//! ## Testing
//!
//! Parser tests use the curated programs in `samples/` through
//! [`SifuSources`](sifu::processor::sifu_sources::SifuSources) and the fluent
//! assertions in the [testing module](sifu::testing).

pub mod sifu;

pub use sifu::ast::{BinaryOp, Delimiter, Pattern, Position};
pub use sifu::lexer::{tokenize, tokenize_with_spans, LexError, SifuLexer, Token};
pub use sifu::parser::{
    parse, parse_recovering, parse_with_config, ErrorKind, ParseError, ParseOutput, ParserConfig,
};
