//! Selection and caret on top of layouts and segmented documents.
//!
//! [`Selectable`] is the common surface of [`SelectableTextLayout`] and
//! [`SelectableSegmentedText`]: text and geometry queries, caret movement and
//! a directed selection with change listeners.
//!
//! Setting a selection validates it against the current text. A zero-width
//! selection only moves the caret; clearing the selection keeps the caret.
//! With the default [`SelectionOptions`](crate::SelectionOptions) every
//! successful set or clear notifies the listeners, even when nothing changed.
//!
//! # Example
//!
//! ```
//! use segtext::{Selectable, SelectableTextLayout, SelectionRange};
//!
//! let mut text = SelectableTextLayout::with_text("hello world");
//! text.set_selection_range(Some(SelectionRange::ltr(6, 11))).unwrap();
//! assert_eq!(text.selected_text().as_deref(), Some("world"));
//! assert_eq!(text.caret_position(), 11);
//! ```

mod layout;
mod listener;
mod range;
mod segmented;
mod state;

pub use layout::SelectableTextLayout;
pub use listener::{ListenerId, SelectionChange, SelectionListener, SelectionSource};
pub use range::{OffsetRange, SelectionDirection, SelectionRange};
pub use segmented::{SegmentEditor, SelectableSegmentedText};

use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::shaping::Movement;

/// Text with a caret and a selection.
pub trait Selectable {
    /// Full text.
    fn text(&self) -> String;

    /// Text of a range; parts past the end are dropped.
    fn text_range(&self, range: OffsetRange) -> String;

    /// Number of chars.
    fn len_chars(&self) -> usize;

    /// Number of lines.
    fn line_count(&self) -> usize;

    /// A line including its terminator.
    fn line(&self, line: usize) -> Result<String>;

    /// Line containing `offset`.
    fn line_index(&self, offset: usize) -> Result<usize>;

    /// Offset range of a line, terminator included.
    fn line_range(&self, line: usize) -> Result<OffsetRange>;

    /// Position of `offset`; `trailing` gives the right edge of its char.
    fn location(&self, offset: usize, trailing: bool) -> Result<Point>;

    /// Offset of the char under `point`.
    fn offset_at(&self, point: Point) -> usize;

    /// Offset under `point`, rounded to the nearer edge of the char.
    fn offset_at_trailing(&self, point: Point) -> usize;

    /// Bounds of the whole text.
    fn bounds(&self) -> Rect;

    /// Bounds of the chars from `start` to `end`, both inclusive.
    fn bounds_of(&self, start: usize, end: usize) -> Result<Rect>;

    /// Next caret stop after `offset`.
    fn next_offset(&self, offset: usize, movement: Movement) -> Result<usize>;

    /// Previous caret stop before `offset`.
    fn previous_offset(&self, offset: usize, movement: Movement) -> Result<usize>;

    /// Current selection, `None` when nothing is selected.
    fn selection_range(&self) -> Option<SelectionRange>;

    /// Set or clear the selection.
    ///
    /// Fails with [`Error::InvalidSelection`](crate::Error::InvalidSelection)
    /// when the range reaches past the end of the text.
    fn set_selection_range(&mut self, range: Option<SelectionRange>) -> Result<()>;

    /// Caret offset.
    fn caret_position(&self) -> usize;

    /// Move the caret and drop the selection.
    fn set_caret_position(&mut self, offset: usize) -> Result<()>;

    /// Register a selection listener.
    fn add_selection_listener(&mut self, listener: SelectionListener) -> ListenerId;

    /// Unregister a selection listener; `false` if it was not registered.
    fn remove_selection_listener(&mut self, id: ListenerId) -> bool;

    /// Check for a non-empty selection.
    fn has_selection(&self) -> bool {
        self.selection_range().is_some_and(|s| !s.is_empty())
    }

    /// Selected text, `None` without a selection.
    fn selected_text(&self) -> Option<String> {
        self.selection_range()
            .filter(|s| !s.is_empty())
            .map(|s| self.text_range(s.range()))
    }

    /// Drop the selection, keeping the caret.
    fn clear_selection(&mut self) {
        // Clearing never fails validation.
        let _ = self.set_selection_range(None);
    }

    /// Bounds of the selection, `None` without one.
    fn selection_bounds(&self) -> Option<Rect> {
        let range = self.selection_range().filter(|s| !s.is_empty())?;
        self.bounds_of(range.start(), range.end() - 1).ok()
    }
}
