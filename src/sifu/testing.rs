//! Testing utilities for pattern assertions
//!
//! This module provides a fluent API for asserting on pattern trees, so parser
//! tests read as a walk down the expected shape instead of a nested literal.
//!
//! # Example
//!
//! ```rust
//! use sifu::sifu::testing::assert_pattern;
//!
//! let pattern = sifu::parse("X -> f x").unwrap().unwrap();
//!
//! assert_pattern(&pattern)
//!     .assert_binary("->")
//!     .left(|left| left.assert_key().text("X"))
//!     .right(|right| {
//!         right
//!             .assert_apps()
//!             .term_count(2)
//!             .term(0, |term| term.assert_variable().text("f"))
//!     });
//! ```

mod assertions;

pub use assertions::{
    assert_pattern, AppsAssertion, BinaryAssertion, GroupAssertion, LeafAssertion,
    PatternAssertion, TextMatch,
};
