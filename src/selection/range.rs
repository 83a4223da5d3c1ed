//! Offset ranges and directed selection ranges.

use std::fmt;
use std::ops::Range;

/// Half-open char range `[start, end)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct OffsetRange {
    pub start: usize,
    pub end: usize,
}

impl OffsetRange {
    /// Create a range; the ends are swapped when given backwards.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Number of chars covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the range covers nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if `offset` lies in `[start, end)`.
    #[must_use]
    pub const fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Overlap with another range, `None` when they share no char.
    #[must_use]
    pub fn intersect(&self, other: &OffsetRange) -> Option<OffsetRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(OffsetRange { start, end })
    }

    /// Shift both ends down by `base`.
    #[must_use]
    pub const fn relative_to(&self, base: usize) -> Self {
        Self {
            start: self.start.saturating_sub(base),
            end: self.end.saturating_sub(base),
        }
    }

    /// Shift both ends up by `base`.
    #[must_use]
    pub const fn shifted(&self, base: usize) -> Self {
        Self {
            start: self.start + base,
            end: self.end + base,
        }
    }
}

impl From<Range<usize>> for OffsetRange {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<OffsetRange> for Range<usize> {
    fn from(range: OffsetRange) -> Self {
        range.start..range.end
    }
}

impl fmt::Display for OffsetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Which end of a selection holds the caret.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectionDirection {
    /// Caret at the end.
    #[default]
    LeftToRight,
    /// Caret at the start.
    RightToLeft,
}

/// A selected range with a direction.
///
/// `start <= end` always holds; the direction records where the caret is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SelectionRange {
    range: OffsetRange,
    direction: SelectionDirection,
}

impl SelectionRange {
    /// Create a selection, normalizing reversed ends.
    #[must_use]
    pub const fn new(start: usize, end: usize, direction: SelectionDirection) -> Self {
        Self {
            range: OffsetRange::new(start, end),
            direction,
        }
    }

    /// Left-to-right selection.
    #[must_use]
    pub const fn ltr(start: usize, end: usize) -> Self {
        Self::new(start, end, SelectionDirection::LeftToRight)
    }

    /// Right-to-left selection.
    #[must_use]
    pub const fn rtl(start: usize, end: usize) -> Self {
        Self::new(start, end, SelectionDirection::RightToLeft)
    }

    /// Selection from a fixed anchor to a moving caret.
    #[must_use]
    pub const fn from_anchor(anchor: usize, caret: usize) -> Self {
        if caret >= anchor {
            Self::ltr(anchor, caret)
        } else {
            Self::rtl(caret, anchor)
        }
    }

    /// Get the start offset.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.range.start
    }

    /// Get the end offset (exclusive).
    #[must_use]
    pub const fn end(&self) -> usize {
        self.range.end
    }

    /// Get the direction.
    #[must_use]
    pub const fn direction(&self) -> SelectionDirection {
        self.direction
    }

    /// Get the covered range.
    #[must_use]
    pub const fn range(&self) -> OffsetRange {
        self.range
    }

    /// Number of selected chars.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.range.len()
    }

    /// Check if nothing is selected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Offset holding the caret.
    #[must_use]
    pub const fn caret(&self) -> usize {
        match self.direction {
            SelectionDirection::LeftToRight => self.range.end,
            SelectionDirection::RightToLeft => self.range.start,
        }
    }

    /// Offset opposite the caret.
    #[must_use]
    pub const fn anchor(&self) -> usize {
        match self.direction {
            SelectionDirection::LeftToRight => self.range.start,
            SelectionDirection::RightToLeft => self.range.end,
        }
    }
}

impl fmt::Display for SelectionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = match self.direction {
            SelectionDirection::LeftToRight => "->",
            SelectionDirection::RightToLeft => "<-",
        };
        write!(f, "{} {arrow}", self.range)
    }
}
