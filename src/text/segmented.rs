//! Composite documents made of independently editable segments.
//!
//! A [`SegmentedText`] presents an ordered list of [`Segment`]s as one
//! logical text. Adjacent segments are joined by a `"\r\n"` separator that
//! belongs to the segment before it, so the document text is the plain
//! concatenation of every [`segment_text`](SegmentedText::segment_text).
//!
//! Segments stack vertically: each one occupies a band directly below the
//! previous segment, and all geometry is translated by the band's top.

use crate::error::{Error, Result};
use crate::event::{
    EVENT_SEGMENT_ADDED, EVENT_SEGMENT_DELETED, LogLevel, SegmentEvent, emit_log, emit_payload,
};
use crate::geometry::{Point, Rect};
use crate::selection::OffsetRange;
use crate::shaping::{Movement, SharedShaper, TextSource, default_shaper};
use crate::text::TextLayout;
use crate::unicode::CRLF;
use std::fmt;
use std::ops::{Deref, DerefMut, Range};

/// Length of the separator between two segments.
const SEPARATOR_LEN: usize = 2;

/// Stable identity of a segment within its document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentId(u64);

impl SegmentId {
    /// Create an id from its raw value.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One segment: a [`TextLayout`] with an id.
#[derive(Clone, Debug)]
pub struct Segment {
    id: SegmentId,
    layout: TextLayout,
}

impl Segment {
    fn new(id: SegmentId, shaper: SharedShaper) -> Self {
        Self {
            id,
            layout: TextLayout::with_shaper(shaper),
        }
    }

    /// Get the id.
    #[must_use]
    pub fn id(&self) -> SegmentId {
        self.id
    }

    /// Get the layout.
    #[must_use]
    pub fn layout(&self) -> &TextLayout {
        &self.layout
    }

    /// Get the layout mutably.
    pub fn layout_mut(&mut self) -> &mut TextLayout {
        &mut self.layout
    }
}

impl Deref for Segment {
    type Target = TextLayout;

    fn deref(&self) -> &TextLayout {
        &self.layout
    }
}

impl DerefMut for Segment {
    fn deref_mut(&mut self) -> &mut TextLayout {
        &mut self.layout
    }
}

/// Ordered segments presented as one text.
#[derive(Clone, Debug)]
pub struct SegmentedText {
    segments: Vec<Segment>,
    shaper: SharedShaper,
    next_id: u64,
}

impl Default for SegmentedText {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentedText {
    /// Create an empty document using the default shaper.
    #[must_use]
    pub fn new() -> Self {
        Self::with_shaper(default_shaper())
    }

    /// Create an empty document whose segments are measured by `shaper`.
    #[must_use]
    pub fn with_shaper(shaper: SharedShaper) -> Self {
        Self {
            segments: Vec::new(),
            shaper,
            next_id: 0,
        }
    }

    /// Get the shaper.
    #[must_use]
    pub fn shaper(&self) -> &SharedShaper {
        &self.shaper
    }

    /// Replace the shaper of the document and every segment.
    pub fn set_shaper(&mut self, shaper: SharedShaper) {
        for segment in &mut self.segments {
            segment.layout.set_shaper(shaper.clone());
        }
        self.shaper = shaper;
    }

    // ---------------------------------------------------------------
    // Segment list
    // ---------------------------------------------------------------

    /// Append a new empty segment.
    pub fn add_segment(&mut self) -> &mut Segment {
        let index = self.segments.len();
        self.insert_segment(index)
    }

    /// Insert a new empty segment before `index`; past the end appends.
    pub fn insert_segment(&mut self, index: usize) -> &mut Segment {
        let index = index.min(self.segments.len());
        let id = SegmentId(self.next_id);
        self.next_id += 1;
        self.segments
            .insert(index, Segment::new(id, self.shaper.clone()));
        emit_log(LogLevel::Debug, &format!("added segment {id} at {index}"));
        emit_payload(
            EVENT_SEGMENT_ADDED,
            &SegmentEvent {
                segment: id.raw(),
                index,
            },
        );
        &mut self.segments[index]
    }

    /// Remove the segment at `index`.
    pub fn delete_segment(&mut self, index: usize) -> Result<Segment> {
        self.check_segment(index)?;
        let segment = self.segments.remove(index);
        emit_log(
            LogLevel::Debug,
            &format!("deleted segment {} at {index}", segment.id),
        );
        emit_payload(
            EVENT_SEGMENT_DELETED,
            &SegmentEvent {
                segment: segment.id.raw(),
                index,
            },
        );
        Ok(segment)
    }

    /// Get all segments in order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub(crate) fn segments_mut(&mut self) -> &mut [Segment] {
        &mut self.segments
    }

    /// Number of segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Check if there is at least one segment.
    #[must_use]
    pub fn has_segments(&self) -> bool {
        !self.segments.is_empty()
    }

    /// Get the segment at `index`.
    pub fn segment(&self, index: usize) -> Result<&Segment> {
        self.check_segment(index)?;
        Ok(&self.segments[index])
    }

    /// Get the segment at `index` mutably.
    pub fn segment_mut(&mut self, index: usize) -> Result<&mut Segment> {
        self.check_segment(index)?;
        Ok(&mut self.segments[index])
    }

    /// Get the last segment, if any.
    #[must_use]
    pub fn last_segment(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Current index of a segment.
    #[must_use]
    pub fn segment_index(&self, id: SegmentId) -> Option<usize> {
        self.segments.iter().position(|s| s.id == id)
    }

    /// Look a segment up by id.
    pub fn segment_by_id(&self, id: SegmentId) -> Result<&Segment> {
        let index = self.segment_index(id).ok_or(Error::UnknownSegment(id))?;
        Ok(&self.segments[index])
    }

    /// Look a segment up by id, mutably.
    pub fn segment_by_id_mut(&mut self, id: SegmentId) -> Result<&mut Segment> {
        let index = self.segment_index(id).ok_or(Error::UnknownSegment(id))?;
        Ok(&mut self.segments[index])
    }

    fn check_segment(&self, index: usize) -> Result<()> {
        let count = self.segments.len();
        if index < count {
            Ok(())
        } else {
            Err(Error::SegmentIndexOutOfRange { index, count })
        }
    }

    // ---------------------------------------------------------------
    // Offsets and lines
    // ---------------------------------------------------------------

    fn separator_len(&self, index: usize) -> usize {
        if index + 1 < self.segments.len() {
            SEPARATOR_LEN
        } else {
            0
        }
    }

    /// Length of a segment's span: its content plus the trailing separator.
    fn span_len(&self, index: usize) -> usize {
        self.segments[index].len_chars() + self.separator_len(index)
    }

    /// Text of a segment including the separator that follows it.
    pub fn segment_text(&self, index: usize) -> Result<String> {
        self.check_segment(index)?;
        let mut text = self.segments[index].text();
        if self.separator_len(index) > 0 {
            text.push_str(CRLF);
        }
        Ok(text)
    }

    /// Document offset of a segment's first char.
    pub fn global_offset(&self, index: usize) -> Result<usize> {
        self.check_segment(index)?;
        Ok((0..index).map(|i| self.span_len(i)).sum())
    }

    /// Document range covered by a segment, separator included.
    pub fn segment_span(&self, index: usize) -> Result<OffsetRange> {
        let start = self.global_offset(index)?;
        Ok(OffsetRange::new(start, start + self.span_len(index)))
    }

    /// Spans of every segment, in order.
    #[must_use]
    pub fn segment_spans(&self) -> Vec<OffsetRange> {
        let mut start = 0;
        (0..self.segments.len())
            .map(|i| {
                let end = start + self.span_len(i);
                let span = OffsetRange::new(start, end);
                start = end;
                span
            })
            .collect()
    }

    /// Document index of a segment's first line.
    pub fn global_line_start(&self, index: usize) -> Result<usize> {
        self.check_segment(index)?;
        Ok(self.segments[..index].iter().map(|s| s.line_count()).sum())
    }

    /// Translate a segment-local line to a document line.
    ///
    /// `local_line` may equal the segment's line count, which names the first
    /// line of the following segment.
    pub fn global_line_index(&self, index: usize, local_line: usize) -> Result<usize> {
        let start = self.global_line_start(index)?;
        let count = self.segments[index].line_count();
        if local_line > count {
            return Err(Error::LineOutOfRange {
                line: local_line,
                count,
            });
        }
        Ok(start + local_line)
    }

    /// Segment whose span contains `offset`.
    ///
    /// An offset on the border between two segments belongs to the later one;
    /// the end of the document belongs to the last segment.
    #[must_use]
    pub fn find_segment_by_offset(&self, offset: usize) -> Option<usize> {
        self.locate(offset).map(|(index, _)| index)
    }

    /// Segment containing a document line.
    #[must_use]
    pub fn find_segment_by_line_index(&self, line: usize) -> Option<usize> {
        self.locate_line(line).map(|(index, _)| index)
    }

    /// Segment index and local offset of a document offset.
    fn locate(&self, offset: usize) -> Option<(usize, usize)> {
        let mut start = 0;
        for index in 0..self.segments.len() {
            let end = start + self.span_len(index);
            if offset < end {
                return Some((index, offset - start));
            }
            start = end;
        }
        let last = self.segments.len().checked_sub(1)?;
        (offset == start).then(|| (last, self.span_len(last)))
    }

    /// Like [`locate`](Self::locate), with separator offsets moved to the
    /// content end of their segment.
    fn locate_content(&self, offset: usize) -> Result<(usize, usize)> {
        let (index, local) = self.locate(offset).ok_or(Error::OffsetOutOfRange {
            offset,
            len: self.len_chars(),
        })?;
        Ok((index, local.min(self.segments[index].len_chars())))
    }

    /// Segment index and local line of a document line.
    fn locate_line(&self, line: usize) -> Option<(usize, usize)> {
        let mut start = 0;
        for (index, segment) in self.segments.iter().enumerate() {
            let count = segment.line_count();
            if line < start + count {
                return Some((index, line - start));
            }
            start += count;
        }
        None
    }

    fn locate_line_checked(&self, line: usize) -> Result<(usize, usize)> {
        self.locate_line(line).ok_or(Error::LineOutOfRange {
            line,
            count: self.line_count(),
        })
    }

    /// Concatenated text of all segments.
    #[must_use]
    pub fn text(&self) -> String {
        let mut text = String::new();
        for (index, segment) in self.segments.iter().enumerate() {
            text.push_str(&segment.text());
            if self.separator_len(index) > 0 {
                text.push_str(CRLF);
            }
        }
        text
    }

    /// Text of a document range; out-of-range parts are dropped.
    #[must_use]
    pub fn text_range(&self, range: Range<usize>) -> String {
        let end = range.end.min(self.len_chars());
        if range.start >= end {
            return String::new();
        }
        self.text()
            .chars()
            .skip(range.start)
            .take(end - range.start)
            .collect()
    }

    /// Number of chars, separators included.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        (0..self.segments.len()).map(|i| self.span_len(i)).sum()
    }

    /// Check if the document has no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// Number of lines; zero without segments.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.segments.iter().map(|s| s.line_count()).sum()
    }

    /// Get a document line including its terminator or separator.
    pub fn line(&self, line: usize) -> Result<String> {
        let (index, local) = self.locate_line_checked(line)?;
        let segment = &self.segments[index];
        let mut text = segment.line(local)?;
        if local + 1 == segment.line_count() && self.separator_len(index) > 0 {
            text.push_str(CRLF);
        }
        Ok(text)
    }

    /// Document range of a line, terminator or separator included.
    pub fn line_range(&self, line: usize) -> Result<OffsetRange> {
        let (index, local) = self.locate_line_checked(line)?;
        let segment = &self.segments[index];
        let base = self.global_offset(index)?;
        let mut range = segment.line_range(local)?.shifted(base);
        if local + 1 == segment.line_count() {
            range.end += self.separator_len(index);
        }
        Ok(range)
    }

    /// Document line containing `offset`.
    ///
    /// Offset `0` of a document without segments is on line `0`.
    pub fn line_index(&self, offset: usize) -> Result<usize> {
        if self.segments.is_empty() && offset == 0 {
            return Ok(0);
        }
        let (index, local) = self.locate_content(offset)?;
        let line = self.segments[index].line_index(local)?;
        self.global_line_index(index, line)
    }

    // ---------------------------------------------------------------
    // Geometry
    // ---------------------------------------------------------------

    fn segment_top(&self, index: usize) -> i32 {
        self.segments[..index].iter().map(|s| s.height()).sum()
    }

    /// Band occupied by a segment in document coordinates.
    pub fn segment_area(&self, index: usize) -> Result<Rect> {
        self.check_segment(index)?;
        let bounds = self.segments[index].bounds();
        Ok(bounds.offset_y(self.segment_top(index)))
    }

    /// Translate a document point into a segment's coordinates.
    pub fn to_segment_point(&self, index: usize, point: Point) -> Result<Point> {
        self.check_segment(index)?;
        Ok(point.offset_y(-self.segment_top(index)))
    }

    /// Translate a segment point into document coordinates.
    pub fn to_document_point(&self, index: usize, point: Point) -> Result<Point> {
        self.check_segment(index)?;
        Ok(point.offset_y(self.segment_top(index)))
    }

    /// Translate a document rectangle into a segment's coordinates.
    pub fn to_segment_rect(&self, index: usize, rect: Rect) -> Result<Rect> {
        self.check_segment(index)?;
        Ok(rect.offset_y(-self.segment_top(index)))
    }

    /// Translate a segment rectangle into document coordinates.
    pub fn to_document_rect(&self, index: usize, rect: Rect) -> Result<Rect> {
        self.check_segment(index)?;
        Ok(rect.offset_y(self.segment_top(index)))
    }

    /// Height of every line.
    #[must_use]
    pub fn line_height(&self) -> i32 {
        self.shaper.line_height()
    }

    /// Bounds of the whole document.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        let width = self
            .segments
            .iter()
            .map(|s| s.bounds().width)
            .max()
            .unwrap_or(0);
        let height = self.segments.iter().map(|s| s.height()).sum();
        Rect::new(0, 0, width, height)
    }

    /// Position of `offset`; separator offsets sit at their segment's end.
    pub fn location(&self, offset: usize, trailing: bool) -> Result<Point> {
        if self.segments.is_empty() && offset == 0 {
            return Ok(Point::new(0, 0));
        }
        let (index, local) = self.locate_content(offset)?;
        let point = self.segments[index].location(local, trailing)?;
        Ok(point.offset_y(self.segment_top(index)))
    }

    /// Segment under a vertical position, clamped to the document.
    fn segment_at_y(&self, y: i32) -> Option<(usize, i32)> {
        let mut top = 0;
        for (index, segment) in self.segments.iter().enumerate() {
            let bottom = top + segment.height();
            if y < bottom {
                return Some((index, top));
            }
            if index + 1 == self.segments.len() {
                return Some((index, top));
            }
            top = bottom;
        }
        None
    }

    /// Offset of the char under `point`, resolved in the segment hit by `y`.
    #[must_use]
    pub fn offset_at(&self, point: Point) -> usize {
        self.hit_test(point, false)
    }

    /// Like [`offset_at`](Self::offset_at), snapping to the following edge
    /// past the middle of a char.
    #[must_use]
    pub fn offset_at_trailing(&self, point: Point) -> usize {
        self.hit_test(point, true)
    }

    fn hit_test(&self, point: Point, trailing: bool) -> usize {
        let Some((index, top)) = self.segment_at_y(point.y) else {
            return 0;
        };
        let segment = &self.segments[index];
        let local = point.offset_y(-top);
        let offset = if trailing {
            segment.offset_at_trailing(local)
        } else {
            segment.offset_at(local)
        };
        let base: usize = (0..index).map(|i| self.span_len(i)).sum();
        base + offset
    }

    fn line_top(&self, line: usize) -> Result<i32> {
        let (index, local) = self.locate_line_checked(line)?;
        Ok(self.segment_top(index) + self.line_height() * local as i32)
    }

    fn line_width(&self, line: usize) -> Result<i32> {
        let (index, local) = self.locate_line_checked(line)?;
        self.segments[index].line_width(local)
    }

    /// Bounds covering the chars from `start` to `end`, both inclusive.
    pub fn bounds_of(&self, start: usize, end: usize) -> Result<Rect> {
        let (start, end) = (start.min(end), start.max(end));
        let first = self.line_index(start)?;
        let last = self.line_index(end)?;
        if first == last {
            let left = self.location(start, false)?;
            let right = self.location(end, true)?;
            return Ok(Rect::new(
                left.x,
                left.y,
                right.x - left.x,
                self.line_height(),
            ));
        }
        let mut width = 0;
        for line in first..=last {
            width = width.max(self.line_width(line)?);
        }
        let top = self.line_top(first)?;
        let bottom = self.line_top(last)? + self.line_height();
        Ok(Rect::new(0, top, width, bottom - top))
    }

    // ---------------------------------------------------------------
    // Movement
    // ---------------------------------------------------------------

    fn check_offset(&self, offset: usize) -> Result<()> {
        let len = self.len_chars();
        if offset <= len {
            Ok(())
        } else {
            Err(Error::OffsetOutOfRange { offset, len })
        }
    }

    /// Next caret stop after `offset`.
    pub fn next_offset(&self, offset: usize, movement: Movement) -> Result<usize> {
        self.check_offset(offset)?;
        Ok(self.shaper.next_offset(self, offset, movement))
    }

    /// Previous caret stop before `offset`.
    pub fn previous_offset(&self, offset: usize, movement: Movement) -> Result<usize> {
        self.check_offset(offset)?;
        Ok(self.shaper.previous_offset(self, offset, movement))
    }
}

impl TextSource for SegmentedText {
    fn len_chars(&self) -> usize {
        Self::len_chars(self)
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        if offset >= Self::len_chars(self) {
            return None;
        }
        let (index, local) = self.locate(offset)?;
        let content = self.segments[index].len_chars();
        match local.checked_sub(content) {
            None => self.segments[index].char_at(local),
            Some(0) => Some('\r'),
            Some(_) => Some('\n'),
        }
    }

    fn line_break_at(&self, offset: usize) -> Option<Range<usize>> {
        if offset >= Self::len_chars(self) {
            return None;
        }
        let (index, local) = self.locate(offset)?;
        let base = offset - local;
        let content = self.segments[index].len_chars();
        if local >= content {
            return Some(base + content..base + content + SEPARATOR_LEN);
        }
        self.segments[index]
            .line_break_at(local)
            .map(|run| base + run.start..base + run.end)
    }

    fn separator_at(&self, offset: usize) -> Option<Range<usize>> {
        let (index, local) = self.locate(offset)?;
        let content = self.segments[index].len_chars();
        (local >= content && self.separator_len(index) > 0).then(|| {
            let base = offset - local;
            base + content..base + content + SEPARATOR_LEN
        })
    }

    fn is_cluster_boundary(&self, offset: usize) -> bool {
        let Some((index, local)) = self.locate(offset) else {
            return true;
        };
        let content = self.segments[index].len_chars();
        if local > content {
            return false;
        }
        self.segments[index].is_cluster_boundary(local)
    }
}
