//! Pointer and keyboard gestures over any [`Selectable`].
//!
//! [`SelectionGestures`] turns pixel positions and arrow keys into caret and
//! selection updates. It borrows its target mutably for the duration of the
//! gesture and holds no state of its own.

use crate::error::Result;
use crate::geometry::Point;
use crate::selection::{OffsetRange, Selectable, SelectionRange};
use crate::shaping::Movement;

/// Arrow key direction for [`SelectionGestures::move_selection_border`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BorderDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Gesture adapter borrowing a selectable text.
#[derive(Debug)]
pub struct SelectionGestures<'a, S: Selectable + ?Sized> {
    target: &'a mut S,
}

impl<'a, S: Selectable + ?Sized> SelectionGestures<'a, S> {
    /// Wrap a selectable text.
    pub fn new(target: &'a mut S) -> Self {
        Self { target }
    }

    /// Get the wrapped text.
    #[must_use]
    pub fn target(&self) -> &S {
        &*self.target
    }

    /// Put the caret at the char edge nearest to `point`.
    pub fn set_caret_location(&mut self, point: Point) -> Result<()> {
        let offset = self.target.offset_at_trailing(point);
        self.target.set_caret_position(offset)
    }

    /// Position of the caret.
    pub fn caret_location(&self) -> Result<Point> {
        self.target.location(self.target.caret_position(), false)
    }

    /// Select the chars under a drag from `from` to `to`, both included.
    ///
    /// The direction follows the drag; a drag within one char counts as
    /// backwards only when `to` lies before `from`.
    pub fn select(&mut self, from: Point, to: Point) -> Result<()> {
        let f = self.target.offset_at(from);
        let t = self.target.offset_at(to);
        let range = if t > f || (t == f && !to.precedes(&from)) {
            SelectionRange::ltr(f, self.fit_end(t + 1))
        } else {
            SelectionRange::rtl(t, self.fit_end(f + 1))
        };
        self.target.set_selection_range(Some(range))
    }

    /// Clamp a range end to the text without splitting a `"\r\n"` pair.
    fn fit_end(&self, end: usize) -> usize {
        let len = self.target.len_chars();
        let end = end.min(len);
        if end > 0
            && end < len
            && self.target.text_range(OffsetRange::new(end - 1, end + 1)) == "\r\n"
        {
            end + 1
        } else {
            end
        }
    }

    /// Select the word under `point`.
    ///
    /// The word runs from the word start at or before the char to the next
    /// word end. A space between words selects both neighbours, punctuation
    /// sticks to the word it touches.
    pub fn select_word(&mut self, point: Point) -> Result<()> {
        let offset = self.target.offset_at(point);
        let len = self.target.len_chars();
        let start = self
            .target
            .previous_offset((offset + 1).min(len), Movement::WordStart)?;
        let end = self.target.next_offset(offset, Movement::WordEnd)?;
        self.target
            .set_selection_range(Some(SelectionRange::ltr(start, end)))
    }

    /// Select the line under `point`, terminator included.
    pub fn select_line(&mut self, point: Point) -> Result<()> {
        if self.target.len_chars() == 0 {
            self.target.clear_selection();
            return Ok(());
        }
        let offset = self.target.offset_at(point);
        let line = self.target.line_index(offset)?;
        let range = self.target.line_range(line)?;
        self.target
            .set_selection_range(Some(SelectionRange::ltr(range.start, range.end)))
    }

    /// Select everything.
    pub fn select_all(&mut self) -> Result<()> {
        let len = self.target.len_chars();
        self.target
            .set_selection_range(Some(SelectionRange::ltr(0, len)))
    }

    /// Drop the selection, keeping the caret.
    pub fn deselect(&mut self) {
        self.target.clear_selection();
    }

    /// Move the caret end of the selection, keeping the anchor.
    ///
    /// Without a selection the caret is the anchor, so the first move starts
    /// one. Up and down keep the caret's `x` and go to the start or end of
    /// the text from the first or last line. Moving back onto the anchor
    /// leaves a plain caret.
    pub fn move_selection_border(&mut self, direction: BorderDirection) -> Result<()> {
        let len = self.target.len_chars();
        let caret = self.target.caret_position();
        let anchor = self
            .target
            .selection_range()
            .map_or(caret, |s| s.anchor());

        let moved = match direction {
            BorderDirection::Left => caret.saturating_sub(1),
            BorderDirection::Right => (caret + 1).min(len),
            BorderDirection::Up | BorderDirection::Down => {
                let x = self.target.location(caret, false)?.x;
                let line = self.target.line_index(caret)?;
                let adjacent = if direction == BorderDirection::Up {
                    line.checked_sub(1)
                } else {
                    (line + 1 < self.target.line_count()).then_some(line + 1)
                };
                match adjacent {
                    Some(adjacent) => {
                        let start = self.target.line_range(adjacent)?.start;
                        let y = self.target.location(start, false)?.y;
                        self.target.offset_at(Point::new(x, y))
                    }
                    None if direction == BorderDirection::Up => 0,
                    None => len,
                }
            }
        };

        if moved == anchor {
            self.target.set_caret_position(moved)
        } else {
            self.target
                .set_selection_range(Some(SelectionRange::from_anchor(anchor, moved)))
        }
    }
}
