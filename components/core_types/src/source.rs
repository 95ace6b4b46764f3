//! Source position and location types.
//!
//! Every token and every AST node carries a [`SourceLocation`] built from two
//! [`SourcePosition`]s.

use serde::Serialize;
use std::fmt;

/// Represents a position in source code.
///
/// Rows and columns are 0-based; `index` is the absolute character offset
/// into the source buffer.
///
/// # Examples
///
/// ```
/// use core_types::SourcePosition;
///
/// let pos = SourcePosition::new(2, 4, 17);
/// let copy = pos;
///
/// assert_eq!(pos, copy);
/// assert_eq!(copy.row, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct SourcePosition {
    /// Line number (0-indexed)
    pub row: u32,
    /// Column number (0-indexed)
    pub col: u32,
    /// Character offset from the start of the source
    pub index: usize,
}

impl SourcePosition {
    /// Create a position from its row, column and absolute index
    pub const fn new(row: u32, col: u32, index: usize) -> Self {
        Self { row, col, index }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row + 1, self.col + 1)
    }
}

/// A half-open span of source text between two positions.
///
/// # Examples
///
/// ```
/// use core_types::{SourceLocation, SourcePosition};
///
/// let loc = SourceLocation::new(SourcePosition::new(0, 0, 0), SourcePosition::new(0, 3, 3));
/// assert_eq!(loc.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct SourceLocation {
    /// First position covered by the span
    pub start: SourcePosition,
    /// Position just past the last character of the span
    pub end: SourcePosition,
}

impl SourceLocation {
    /// Create a location; `start.index` must not exceed `end.index`
    pub fn new(start: SourcePosition, end: SourcePosition) -> Self {
        debug_assert!(start.index <= end.index);
        Self { start, end }
    }

    /// Zero-width location at `pos`
    pub fn at(pos: SourcePosition) -> Self {
        Self { start: pos, end: pos }
    }

    /// Span from the start of `self` to the end of `other`
    pub fn to(&self, other: &SourceLocation) -> SourceLocation {
        SourceLocation::new(self.start, other.end)
    }

    /// Number of characters covered
    pub fn len(&self) -> usize {
        self.end.index - self.start.index
    }

    /// True for zero-width locations
    pub fn is_empty(&self) -> bool {
        self.start.index == self.end.index
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_position_creation() {
        let pos = SourcePosition::new(10, 5, 150);
        assert_eq!(pos.row, 10);
        assert_eq!(pos.col, 5);
        assert_eq!(pos.index, 150);
    }

    #[test]
    fn test_location_join() {
        let a = SourceLocation::new(SourcePosition::new(0, 0, 0), SourcePosition::new(0, 2, 2));
        let b = SourceLocation::new(SourcePosition::new(1, 0, 5), SourcePosition::new(1, 4, 9));
        let joined = a.to(&b);
        assert_eq!(joined.start, a.start);
        assert_eq!(joined.end, b.end);
        assert_eq!(joined.len(), 9);
    }

    #[test]
    fn test_display_is_one_based() {
        let pos = SourcePosition::new(0, 0, 0);
        assert_eq!(pos.to_string(), "1:1");
    }
}
