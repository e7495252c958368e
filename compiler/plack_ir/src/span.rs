//! Source positions and locations.
//!
//! Positions are line/column pairs rather than byte offsets: diagnostics
//! print them directly and the writer handler looks source lines up by
//! number.

use std::fmt;

/// A point in a source, between two characters.
///
/// `line` is 1-based, `offset` is the 0-based column counted in characters.
/// Ordering is by line, then offset.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourcePosition {
    pub line: u32,
    pub offset: u32,
}

impl SourcePosition {
    /// The first position of any source.
    pub const START: SourcePosition = SourcePosition { line: 1, offset: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(line: u32, offset: u32) -> Self {
        SourcePosition { line, offset }
    }

    /// The position just past the character starting at `self`.
    #[inline]
    #[must_use]
    pub const fn past_end_position(self) -> SourcePosition {
        SourcePosition {
            line: self.line,
            offset: self.offset + 1,
        }
    }

    /// The first position of the following line.
    #[inline]
    #[must_use]
    pub const fn next_line(self) -> SourcePosition {
        SourcePosition {
            line: self.line + 1,
            offset: 0,
        }
    }

    /// 1-based column, as printed in diagnostics.
    #[inline]
    pub const fn column(self) -> u32 {
        self.offset + 1
    }

    /// Check if `self` comes strictly after `other`.
    #[inline]
    pub fn is_after(self, other: SourcePosition) -> bool {
        self > other
    }
}

impl fmt::Debug for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column())
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column())
    }
}

/// A half-open range of source text: `start` inclusive, `end` exclusive.
///
/// Invariant: `start <= end`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceLocation {
    start: SourcePosition,
    end: SourcePosition,
}

impl SourceLocation {
    /// Create a location spanning `start..end`.
    ///
    /// # Panics
    /// Panics if `end` precedes `start`.
    #[inline]
    pub fn new(start: SourcePosition, end: SourcePosition) -> Self {
        assert!(start <= end, "location end {end} precedes start {start}");
        SourceLocation { start, end }
    }

    /// Location covering the single character at `start`.
    #[inline]
    pub fn single(start: SourcePosition) -> Self {
        SourceLocation {
            start,
            end: start.past_end_position(),
        }
    }

    /// Zero-width location at `at`.
    #[inline]
    pub const fn point(at: SourcePosition) -> Self {
        SourceLocation { start: at, end: at }
    }

    #[inline]
    pub const fn start_position(&self) -> SourcePosition {
        self.start
    }

    /// The position immediately after the last character of this location.
    #[inline]
    pub const fn position_after(&self) -> SourcePosition {
        self.end
    }

    /// Check if the location covers no characters.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if a position falls inside this location.
    #[inline]
    pub fn contains(&self, position: SourcePosition) -> bool {
        position >= self.start && position < self.end
    }

    /// Check if another location is fully contained within this one.
    #[inline]
    pub fn contains_location(&self, other: SourceLocation) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Smallest location covering both `self` and `other`.
    #[inline]
    #[must_use]
    pub fn merge(self, other: SourceLocation) -> SourceLocation {
        SourceLocation {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Location from the start of `self` through the end of `other`.
    ///
    /// Unlike [`merge`](Self::merge) this assumes `other` does not precede
    /// `self`; an earlier `other` yields a point at `self.start`.
    #[inline]
    #[must_use]
    pub fn to(self, other: SourceLocation) -> SourceLocation {
        SourceLocation {
            start: self.start,
            end: other.end.max(self.start),
        }
    }

    /// Check if `other` starts exactly where `self` ends.
    #[inline]
    pub fn is_followed_by(&self, other: SourceLocation) -> bool {
        self.end == other.start
    }
}

impl fmt::Debug for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{SourceLocation, SourcePosition};
    crate::static_assert_size!(SourcePosition, 8);
    crate::static_assert_size!(SourceLocation, 16);
}
