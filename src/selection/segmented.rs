//! Selectable segmented document.
//!
//! The document keeps one selection in document offsets. Each segment sees
//! the part of it that falls inside its span, translated to local offsets.
//! When the document selection changes, only the segments whose span meets
//! the symmetric difference of the old and new ranges are notified, before
//! the document's own listeners.

use crate::error::{Error, Result};
use crate::geometry::{Point, Rect};
use crate::options::SelectionOptions;
use crate::selection::listener::SelectionListeners;
use crate::selection::state::{SelectionState, validate_offset, validate_range};
use crate::selection::{
    ListenerId, OffsetRange, Selectable, SelectionChange, SelectionListener, SelectionRange,
    SelectionSource,
};
use crate::shaping::{Movement, SharedShaper};
use crate::text::{Segment, SegmentId, SegmentedText};
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

/// A [`SegmentedText`] with a caret and a selection.
#[derive(Debug, Default)]
pub struct SelectableSegmentedText {
    doc: SegmentedText,
    state: SelectionState,
    options: SelectionOptions,
    listeners: SelectionListeners,
    segment_listeners: HashMap<SegmentId, SelectionListeners>,
}

/// Mutable access to one segment.
///
/// Dropping the editor fits the document selection to the edited text.
#[derive(Debug)]
pub struct SegmentEditor<'a> {
    doc: &'a mut SegmentedText,
    state: &'a mut SelectionState,
    index: usize,
}

impl SegmentEditor<'_> {
    /// Index of the edited segment.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Deref for SegmentEditor<'_> {
    type Target = Segment;

    fn deref(&self) -> &Segment {
        &self.doc.segments()[self.index]
    }
}

impl DerefMut for SegmentEditor<'_> {
    fn deref_mut(&mut self) -> &mut Segment {
        &mut self.doc.segments_mut()[self.index]
    }
}

impl Drop for SegmentEditor<'_> {
    fn drop(&mut self) {
        self.state.revalidate(self.doc.len_chars());
    }
}

/// Segments touched by a change from `old` to `new`.
///
/// A segment is touched when its span meets the part of the text that is
/// selected before or after the change, but not both.
fn affected_segments(
    spans: &[OffsetRange],
    old: Option<OffsetRange>,
    new: Option<OffsetRange>,
) -> Vec<usize> {
    let pieces: Vec<OffsetRange> = match (old, new) {
        (None, None) => Vec::new(),
        (Some(r), None) | (None, Some(r)) => vec![r],
        (Some(a), Some(b)) if a == b => Vec::new(),
        (Some(a), Some(b)) if a.end <= b.start || b.end <= a.start => vec![a, b],
        (Some(a), Some(b)) => vec![
            OffsetRange::new(a.start.min(b.start), a.start.max(b.start)),
            OffsetRange::new(a.end.min(b.end), a.end.max(b.end)),
        ],
    };
    spans
        .iter()
        .enumerate()
        .filter(|(_, span)| pieces.iter().any(|p| span.intersect(p).is_some()))
        .map(|(index, _)| index)
        .collect()
}

impl SelectableSegmentedText {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document measured by `shaper`.
    #[must_use]
    pub fn with_shaper(shaper: SharedShaper) -> Self {
        Self {
            doc: SegmentedText::with_shaper(shaper),
            ..Self::default()
        }
    }

    /// Builder-style selection options override.
    #[must_use]
    pub fn with_options(mut self, options: SelectionOptions) -> Self {
        self.options = options;
        self
    }

    /// Get the selection options.
    #[must_use]
    pub fn options(&self) -> SelectionOptions {
        self.options
    }

    /// Get the underlying document.
    #[must_use]
    pub fn document(&self) -> &SegmentedText {
        &self.doc
    }

    /// Replace the shaper of every segment.
    pub fn set_shaper(&mut self, shaper: SharedShaper) {
        self.doc.set_shaper(shaper);
    }

    fn editor(&mut self, index: usize) -> SegmentEditor<'_> {
        SegmentEditor {
            doc: &mut self.doc,
            state: &mut self.state,
            index,
        }
    }

    /// Append a new empty segment and edit it.
    pub fn add_segment(&mut self) -> SegmentEditor<'_> {
        let index = self.doc.segment_count();
        self.insert_segment(index)
    }

    /// Insert a new empty segment before `index` and edit it.
    ///
    /// The selection keeps its document offsets, so text after the new
    /// segment moves out from under it.
    pub fn insert_segment(&mut self, index: usize) -> SegmentEditor<'_> {
        let index = index.min(self.doc.segment_count());
        self.doc.insert_segment(index);
        self.editor(index)
    }

    /// Edit the segment with `id`.
    pub fn segment_editor(&mut self, id: SegmentId) -> Result<SegmentEditor<'_>> {
        let index = self.index_of(id)?;
        Ok(self.editor(index))
    }

    /// Edit the segment at `index`.
    pub fn segment_editor_at(&mut self, index: usize) -> Result<SegmentEditor<'_>> {
        self.doc.segment(index)?;
        Ok(self.editor(index))
    }

    /// Run `f` on the segment with `id`, then fit the selection to the text.
    pub fn edit_segment<R>(
        &mut self,
        id: SegmentId,
        f: impl FnOnce(&mut Segment) -> R,
    ) -> Result<R> {
        let mut editor = self.segment_editor(id)?;
        Ok(f(&mut *editor))
    }

    /// Remove the segment at `index` along with its listeners.
    pub fn delete_segment(&mut self, index: usize) -> Result<Segment> {
        let segment = self.doc.delete_segment(index)?;
        self.segment_listeners.remove(&segment.id());
        self.state.revalidate(self.doc.len_chars());
        Ok(segment)
    }

    fn index_of(&self, id: SegmentId) -> Result<usize> {
        self.doc.segment_index(id).ok_or(Error::UnknownSegment(id))
    }

    // ---------------------------------------------------------------
    // Per-segment view of the selection
    // ---------------------------------------------------------------

    /// Local selection of the segment at `index` for a document range.
    fn local_selection(
        &self,
        index: usize,
        range: Option<SelectionRange>,
    ) -> Result<Option<SelectionRange>> {
        let span = self.doc.segment_span(index)?;
        Ok(range.and_then(|r| {
            span.intersect(&r.range()).map(|part| {
                let local = part.relative_to(span.start);
                SelectionRange::new(local.start, local.end, r.direction())
            })
        }))
    }

    /// Bounds of a local selection within its segment.
    ///
    /// Separator chars selected at the end of the segment count as the
    /// segment's content end.
    fn local_bounds(&self, index: usize, range: Option<SelectionRange>) -> Option<Rect> {
        let range = range.filter(|s| !s.is_empty())?;
        let segment = self.doc.segment(index).ok()?;
        let content = segment.len_chars();
        segment
            .bounds_of(range.start().min(content), (range.end() - 1).min(content))
            .ok()
    }

    /// Selection of one segment in its local offsets.
    pub fn segment_selection(&self, id: SegmentId) -> Result<Option<SelectionRange>> {
        let index = self.index_of(id)?;
        self.local_selection(index, self.state.selection())
    }

    /// Check if part of a segment is selected.
    pub fn segment_has_selection(&self, id: SegmentId) -> Result<bool> {
        Ok(self.segment_selection(id)?.is_some())
    }

    /// Selected part of a segment, separator included.
    pub fn segment_selected_text(&self, id: SegmentId) -> Result<Option<String>> {
        let index = self.index_of(id)?;
        let span = self.doc.segment_span(index)?;
        Ok(self
            .local_selection(index, self.state.selection())?
            .map(|s| self.doc.text_range(s.range().shifted(span.start).into())))
    }

    /// Bounds of a segment's selection in its own coordinates.
    pub fn segment_selection_bounds(&self, id: SegmentId) -> Result<Option<Rect>> {
        let index = self.index_of(id)?;
        let local = self.local_selection(index, self.state.selection())?;
        Ok(self.local_bounds(index, local))
    }

    /// Caret in the segment's local offsets, `None` if it lies elsewhere.
    ///
    /// The end of the document counts as part of the last segment.
    pub fn segment_caret_position(&self, id: SegmentId) -> Result<Option<usize>> {
        let index = self.index_of(id)?;
        let caret = self.state.caret();
        Ok((self.doc.find_segment_by_offset(caret) == Some(index))
            .then(|| caret - self.doc.segment_span(index).map_or(0, |s| s.start)))
    }

    /// Register a listener for one segment's selection.
    pub fn add_segment_selection_listener(
        &mut self,
        id: SegmentId,
        listener: SelectionListener,
    ) -> Result<ListenerId> {
        self.index_of(id)?;
        Ok(self.segment_listeners.entry(id).or_default().add(listener))
    }

    /// Unregister a segment listener; `false` if it was not registered.
    pub fn remove_segment_selection_listener(&mut self, id: SegmentId, listener: ListenerId) -> bool {
        self.segment_listeners
            .get_mut(&id)
            .is_some_and(|l| l.remove(listener))
    }

    fn bounds_for(&self, range: Option<SelectionRange>) -> Option<Rect> {
        let range = range.filter(|s| !s.is_empty())?;
        self.doc.bounds_of(range.start(), range.end() - 1).ok()
    }

    /// Notify segments, then the document, of a change from `old`.
    fn commit(&self, old: Option<SelectionRange>, old_bounds: Option<Rect>) {
        let new = self.state.selection();
        let spans = self.doc.segment_spans();
        for index in affected_segments(&spans, old.map(|s| s.range()), new.map(|s| s.range())) {
            let id = self.doc.segments()[index].id();
            let Some(listeners) = self.segment_listeners.get(&id) else {
                continue;
            };
            let (Ok(local_old), Ok(local_new)) = (
                self.local_selection(index, old),
                self.local_selection(index, new),
            ) else {
                continue;
            };
            listeners.publish(&SelectionChange {
                source: SelectionSource::Segment(id),
                range: local_new,
                new_bounds: self.local_bounds(index, local_new),
                old_bounds: self.local_bounds(index, local_old),
            });
        }

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

impl Deref for SelectableSegmentedText {
    type Target = SegmentedText;

    fn deref(&self) -> &SegmentedText {
        &self.doc
    }
}

impl Selectable for SelectableSegmentedText {
    fn text(&self) -> String {
        self.doc.text()
    }

    fn text_range(&self, range: OffsetRange) -> String {
        self.doc.text_range(range.into())
    }

    fn len_chars(&self) -> usize {
        self.doc.len_chars()
    }

    fn line_count(&self) -> usize {
        self.doc.line_count()
    }

    fn line(&self, line: usize) -> Result<String> {
        self.doc.line(line)
    }

    fn line_index(&self, offset: usize) -> Result<usize> {
        self.doc.line_index(offset)
    }

    fn line_range(&self, line: usize) -> Result<OffsetRange> {
        self.doc.line_range(line)
    }

    fn location(&self, offset: usize, trailing: bool) -> Result<Point> {
        self.doc.location(offset, trailing)
    }

    fn offset_at(&self, point: Point) -> usize {
        self.doc.offset_at(point)
    }

    fn offset_at_trailing(&self, point: Point) -> usize {
        self.doc.offset_at_trailing(point)
    }

    fn bounds(&self) -> Rect {
        self.doc.bounds()
    }

    fn bounds_of(&self, start: usize, end: usize) -> Result<Rect> {
        self.doc.bounds_of(start, end)
    }

    fn next_offset(&self, offset: usize, movement: Movement) -> Result<usize> {
        self.doc.next_offset(offset, movement)
    }

    fn previous_offset(&self, offset: usize, movement: Movement) -> Result<usize> {
        self.doc.previous_offset(offset, movement)
    }

    fn selection_range(&self) -> Option<SelectionRange> {
        self.state.selection()
    }

    fn set_selection_range(&mut self, range: Option<SelectionRange>) -> Result<()> {
        validate_range(range, self.doc.len_chars())?;
        let old_bounds = self.bounds_for(self.state.selection());
        let old = self.state.apply(range);
        self.commit(old, old_bounds);
        Ok(())
    }

    fn caret_position(&self) -> usize {
        self.state.caret()
    }

    fn set_caret_position(&mut self, offset: usize) -> Result<()> {
        validate_offset(offset, self.doc.len_chars())?;
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
