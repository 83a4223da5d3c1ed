//! Selectable single layout.

use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::options::{LayoutOptions, SelectionOptions};
use crate::selection::listener::SelectionListeners;
use crate::selection::state::{SelectionState, validate_offset, validate_range};
use crate::selection::{
    ListenerId, OffsetRange, Selectable, SelectionChange, SelectionListener, SelectionRange,
    SelectionSource,
};
use crate::shaping::{Movement, SharedShaper};
use crate::text::TextLayout;
use std::ops::Deref;

/// A [`TextLayout`] with a caret and a selection.
///
/// Read access goes through `Deref`; edits go through the forwarding
/// methods or [`edit`](Self::edit) so the selection follows the text.
#[derive(Debug, Default)]
pub struct SelectableTextLayout {
    layout: TextLayout,
    state: SelectionState,
    options: SelectionOptions,
    listeners: SelectionListeners,
}

impl SelectableTextLayout {
    /// Create an empty selectable layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a selectable layout with initial text.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self::with_layout(TextLayout::with_text(text))
    }

    /// Wrap an existing layout.
    #[must_use]
    pub fn with_layout(layout: TextLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    /// Builder-style selection options override.
    #[must_use]
    pub fn with_options(mut self, options: SelectionOptions) -> Self {
        self.options = options;
        self
    }

    /// Builder-style layout options override.
    #[must_use]
    pub fn with_layout_options(mut self, options: LayoutOptions) -> Self {
        self.layout = self.layout.with_options(options);
        self.state.revalidate(self.layout.len_chars());
        self
    }

    /// Get the layout.
    #[must_use]
    pub fn layout(&self) -> &TextLayout {
        &self.layout
    }

    /// Get the selection options.
    #[must_use]
    pub fn options(&self) -> SelectionOptions {
        self.options
    }

    /// Unwrap into the layout.
    #[must_use]
    pub fn into_layout(self) -> TextLayout {
        self.layout
    }

    /// Run an edit on the layout, then fit the selection to the new text.
    ///
    /// The caret is clamped and a selection reaching past the end is
    /// dropped. No listener is notified.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut TextLayout) -> R) -> R {
        let result = f(&mut self.layout);
        self.state.revalidate(self.layout.len_chars());
        result
    }

    /// Replace the text.
    pub fn set_text(&mut self, text: &str) -> &mut Self {
        self.edit(|l| {
            l.set_text(text);
        });
        self
    }

    /// Remove all text.
    pub fn clear(&mut self) -> &mut Self {
        self.edit(|l| {
            l.clear();
        });
        self
    }

    /// Append to the last line.
    pub fn append(&mut self, text: &str) -> &mut Self {
        self.edit(|l| {
            l.append(text);
        });
        self
    }

    /// Append `text` and a line terminator.
    pub fn append_line(&mut self, text: &str) -> &mut Self {
        self.edit(|l| {
            l.append_line(text);
        });
        self
    }

    /// Insert relative to a line start; see [`TextLayout::insert`].
    pub fn insert(&mut self, line: isize, char_pos: isize, text: &str) -> &mut Self {
        self.edit(|l| {
            l.insert(line, char_pos, text);
        });
        self
    }

    /// Delete relative to a line start; see [`TextLayout::delete`].
    pub fn delete(&mut self, line: isize, char_pos: isize, count: isize) -> &mut Self {
        self.edit(|l| {
            l.delete(line, char_pos, count);
        });
        self
    }

    /// Insert a whole line; see [`TextLayout::insert_line`].
    pub fn insert_line(&mut self, line: isize, text: &str) -> &mut Self {
        self.edit(|l| {
            l.insert_line(line, text);
        });
        self
    }

    /// Delete a whole line; see [`TextLayout::delete_line`].
    pub fn delete_line(&mut self, line: isize) -> &mut Self {
        self.edit(|l| {
            l.delete_line(line);
        });
        self
    }

    /// Set the line limit; see [`TextLayout::set_max_lines`].
    pub fn set_max_lines(&mut self, max_lines: Option<usize>) -> &mut Self {
        self.edit(|l| {
            l.set_max_lines(max_lines);
        });
        self
    }

    /// Replace the shaper.
    pub fn set_shaper(&mut self, shaper: SharedShaper) {
        self.layout.set_shaper(shaper);
    }

    fn bounds_for(&self, range: Option<SelectionRange>) -> Option<Rect> {
        let range = range.filter(|s| !s.is_empty())?;
        self.layout.bounds_of(range.start(), range.end() - 1).ok()
    }

    fn commit(&mut self, old: Option<SelectionRange>, old_bounds: Option<Rect>) {
        let new = self.state.selection();
        if old == new && !self.options.notify_unchanged {
            return;
        }
        self.listeners.publish(&SelectionChange {
            source: SelectionSource::Document,
            range: new,
            new_bounds: self.bounds_for(new),
            old_bounds,
        });
    }
}

impl Deref for SelectableTextLayout {
    type Target = TextLayout;

    fn deref(&self) -> &TextLayout {
        &self.layout
    }
}

impl Selectable for SelectableTextLayout {
    fn text(&self) -> String {
        self.layout.text()
    }

    fn text_range(&self, range: OffsetRange) -> String {
        self.layout.text_range(range.into())
    }

    fn len_chars(&self) -> usize {
        self.layout.len_chars()
    }

    fn line_count(&self) -> usize {
        self.layout.line_count()
    }

    fn line(&self, line: usize) -> Result<String> {
        self.layout.line(line)
    }

    fn line_index(&self, offset: usize) -> Result<usize> {
        self.layout.line_index(offset)
    }

    fn line_range(&self, line: usize) -> Result<OffsetRange> {
        self.layout.line_range(line)
    }

    fn location(&self, offset: usize, trailing: bool) -> Result<Point> {
        self.layout.location(offset, trailing)
    }

    fn offset_at(&self, point: Point) -> usize {
        self.layout.offset_at(point)
    }

    fn offset_at_trailing(&self, point: Point) -> usize {
        self.layout.offset_at_trailing(point)
    }

    fn bounds(&self) -> Rect {
        self.layout.bounds()
    }

    fn bounds_of(&self, start: usize, end: usize) -> Result<Rect> {
        self.layout.bounds_of(start, end)
    }

    fn next_offset(&self, offset: usize, movement: Movement) -> Result<usize> {
        self.layout.next_offset(offset, movement)
    }

    fn previous_offset(&self, offset: usize, movement: Movement) -> Result<usize> {
        self.layout.previous_offset(offset, movement)
    }

    fn selection_range(&self) -> Option<SelectionRange> {
        self.state.selection()
    }

    fn set_selection_range(&mut self, range: Option<SelectionRange>) -> Result<()> {
        validate_range(range, self.layout.len_chars())?;
        let old_bounds = self.bounds_for(self.state.selection());
        let old = self.state.apply(range);
        self.commit(old, old_bounds);
        Ok(())
    }

    fn caret_position(&self) -> usize {
        self.state.caret()
    }

    fn set_caret_position(&mut self, offset: usize) -> Result<()> {
        validate_offset(offset, self.layout.len_chars())?;
        let old_bounds = self.bounds_for(self.state.selection());
        let old = self.state.move_caret(offset);
        self.commit(old, old_bounds);
        Ok(())
    }

    fn add_selection_listener(&mut self, listener: SelectionListener) -> ListenerId {
        self.listeners.add(listener)
    }

    fn remove_selection_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}
