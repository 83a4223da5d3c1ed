//! Error types for text documents.

use crate::text::SegmentId;
use std::fmt;

/// Result type alias for document operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for document operations.
///
/// Every fallible operation validates its arguments before it mutates
/// anything, so an `Err` always leaves the document unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A character offset outside `0..=len`.
    OffsetOutOfRange { offset: usize, len: usize },
    /// A line index outside `0..count`.
    LineOutOfRange { line: usize, count: usize },
    /// A segment index outside `0..count`.
    SegmentIndexOutOfRange { index: usize, count: usize },
    /// A segment id that does not (or no longer) belong to the document.
    UnknownSegment(SegmentId),
    /// A selection range reaching past the end of the text.
    InvalidSelection { start: usize, end: usize, len: usize },
}

impl Error {
    /// Whether this is an index-style error (as opposed to an invalid argument).
    #[must_use]
    pub fn is_index_error(&self) -> bool {
        matches!(
            self,
            Self::SegmentIndexOutOfRange { .. } | Self::LineOutOfRange { .. }
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OffsetOutOfRange { offset, len } => {
                write!(f, "offset {offset} out of range for text of length {len}")
            }
            Self::LineOutOfRange { line, count } => {
                write!(f, "line {line} out of range for {count} lines")
            }
            Self::SegmentIndexOutOfRange { index, count } => {
                write!(f, "segment index {index} out of range for {count} segments")
            }
            Self::UnknownSegment(id) => write!(f, "unknown segment {id}"),
            Self::InvalidSelection { start, end, len } => {
                write!(
                    f,
                    "selection {start}..{end} out of range for text of length {len}"
                )
            }
        }
    }
}

impl std::error::Error for Error {}
