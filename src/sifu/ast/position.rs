//! Source location utilities for converting byte offsets to line/column positions
//!
//! This module provides utilities to convert byte offsets within source code
//! to human-readable line and column positions, used for error reporting.

use std::fmt;

/// A 1-based line/column position. Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Provides fast conversion from byte offsets to line/column positions
pub struct SourceLocation<'src> {
    source: &'src str,
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl<'src> SourceLocation<'src> {
    /// Create a new SourceLocation from source code
    pub fn new(source: &'src str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self {
            source,
            line_starts,
        }
    }

    /// Convert a byte offset to a line/column position.
    ///
    /// Offsets past the end clamp to the end of the source.
    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let byte_offset = byte_offset.min(self.source.len());
        let line = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1);

        let line_start = self.line_starts[line];
        let column = self
            .source
            .get(line_start..byte_offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(byte_offset - line_start);

        Position::new(line + 1, column + 1)
    }

    /// Get the total number of lines in the source
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get the byte offset for the start of a 1-based line
    pub fn line_start(&self, line: usize) -> Option<usize> {
        line.checked_sub(1)
            .and_then(|index| self.line_starts.get(index))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_to_position_single_line() {
        let loc = SourceLocation::new("Hello");
        assert_eq!(loc.byte_to_position(0), Position::new(1, 1));
        assert_eq!(loc.byte_to_position(4), Position::new(1, 5));
    }

    #[test]
    fn test_byte_to_position_multiline() {
        let loc = SourceLocation::new("Hello\nworld\ntest");

        assert_eq!(loc.byte_to_position(5), Position::new(1, 6));
        assert_eq!(loc.byte_to_position(6), Position::new(2, 1));
        assert_eq!(loc.byte_to_position(12), Position::new(3, 1));
        assert_eq!(loc.byte_to_position(15), Position::new(3, 4));
    }

    #[test]
    fn test_columns_count_characters() {
        let loc = SourceLocation::new("A\nwörld x");
        // 'ö' takes two bytes, so 'x' sits at byte 9 but column 7
        assert_eq!(loc.byte_to_position(9), Position::new(2, 7));
    }

    #[test]
    fn test_offset_past_end_clamps() {
        let loc = SourceLocation::new("ab");
        assert_eq!(loc.byte_to_position(100), Position::new(1, 3));
    }

    #[test]
    fn test_line_count_and_starts() {
        let loc = SourceLocation::new("Hello\nWorld\nTest");
        assert_eq!(loc.line_count(), 3);
        assert_eq!(loc.line_start(1), Some(0));
        assert_eq!(loc.line_start(2), Some(6));
        assert_eq!(loc.line_start(3), Some(12));
        assert_eq!(loc.line_start(4), None);
        assert_eq!(loc.line_start(0), None);
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(3, 14).to_string(), "3:14");
    }
}
