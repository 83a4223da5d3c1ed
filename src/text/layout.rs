//! Mutable line-oriented text layout.
//!
//! [`TextLayout`] holds one contiguous run of text, decomposed into lines
//! by its terminators, and answers geometry queries through the injected
//! [`TextShaper`](crate::shaping::TextShaper).
//!
//! Character-level edits address text by `(line, char_pos)`. The pair is
//! resolved to `line_start(line) + char_pos` and clamped to the text, so a
//! negative or oversized `char_pos` reaches into neighbouring lines.

use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log};
use crate::geometry::{Point, Rect};
use crate::options::LayoutOptions;
use crate::selection::OffsetRange;
use crate::shaping::{Movement, SharedShaper, TextSource, default_shaper};
use crate::text::rope::RopeWrapper;
use crate::unicode::{CRLF, clusters, is_cluster_boundary};
use std::ops::Range;

/// Vertical metrics and content width of one line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineMetrics {
    /// Top edge of the line.
    pub top: i32,
    /// Height of the line.
    pub height: i32,
    /// Width of the line content, terminator excluded.
    pub width: i32,
}

/// Placement of one grapheme cluster within a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ClusterCell {
    /// Char offset relative to the line start.
    start: usize,
    /// Length in chars.
    len: usize,
    x: i32,
    width: i32,
}

/// Editable text with a line table and geometry.
#[derive(Clone, Debug)]
pub struct TextLayout {
    rope: RopeWrapper,
    shaper: SharedShaper,
    options: LayoutOptions,
    revision: u64,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayout {
    /// Create an empty layout using the default shaper.
    #[must_use]
    pub fn new() -> Self {
        Self::with_shaper(default_shaper())
    }

    /// Create an empty layout measured by `shaper`.
    #[must_use]
    pub fn with_shaper(shaper: SharedShaper) -> Self {
        Self {
            rope: RopeWrapper::new(),
            shaper,
            options: LayoutOptions::default(),
            revision: 0,
        }
    }

    /// Create a layout with initial text.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        let mut layout = Self::new();
        layout.set_text(text);
        layout
    }

    /// Builder-style options override.
    #[must_use]
    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = LayoutOptions {
            max_lines: options.max_lines.map(|n| n.max(1)),
        };
        self.enforce_max_lines();
        self
    }

    /// Get the shaper.
    #[must_use]
    pub fn shaper(&self) -> &SharedShaper {
        &self.shaper
    }

    /// Replace the shaper. Geometry changes, offsets do not.
    pub fn set_shaper(&mut self, shaper: SharedShaper) {
        self.shaper = shaper;
        self.revision += 1;
    }

    /// Get the options.
    #[must_use]
    pub fn options(&self) -> LayoutOptions {
        self.options
    }

    /// Get the revision counter, bumped by every change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ---------------------------------------------------------------
    // Content
    // ---------------------------------------------------------------

    /// Get the full text.
    #[must_use]
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Get the text of a char range; out-of-range parts are dropped.
    #[must_use]
    pub fn text_range(&self, range: Range<usize>) -> String {
        let len = self.len_chars();
        self.rope
            .slice_to_string(range.start.min(len)..range.end.min(len))
    }

    /// Number of chars.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.is_empty()
    }

    /// Number of lines; empty text has one line.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get a line including its terminator.
    pub fn line(&self, line: usize) -> Result<String> {
        self.check_line(line)?;
        Ok(self.rope.line(line).map(|s| s.to_string()).unwrap_or_default())
    }

    /// Get a line without its terminator.
    pub fn line_content(&self, line: usize) -> Result<String> {
        let range = self.line_content_range(line)?;
        Ok(self.rope.slice_to_string(range.into()))
    }

    /// Offset of the first char of a line.
    pub fn line_start(&self, line: usize) -> Result<usize> {
        self.check_line(line)?;
        Ok(self.rope.line_to_char(line))
    }

    /// Offset just past the line terminator (the next line's start).
    pub fn end_of_line_offset(&self, line: usize) -> Result<usize> {
        self.check_line(line)?;
        Ok(self.rope.line_to_char(line + 1))
    }

    /// Offset range of a line, terminator included.
    pub fn line_range(&self, line: usize) -> Result<OffsetRange> {
        self.check_line(line)?;
        Ok(OffsetRange::new(
            self.rope.line_to_char(line),
            self.rope.line_to_char(line + 1),
        ))
    }

    /// Offset range of a line's content, terminator excluded.
    pub fn line_content_range(&self, line: usize) -> Result<OffsetRange> {
        self.check_line(line)?;
        let range = self.rope.content_range(line);
        Ok(OffsetRange::new(range.start, range.end))
    }

    /// Line containing `offset`. Terminator chars belong to their line.
    pub fn line_index(&self, offset: usize) -> Result<usize> {
        self.check_offset(offset)?;
        Ok(self.rope.char_to_line(offset))
    }

    fn check_line(&self, line: usize) -> Result<()> {
        let count = self.line_count();
        if line < count {
            Ok(())
        } else {
            Err(Error::LineOutOfRange { line, count })
        }
    }

    fn check_offset(&self, offset: usize) -> Result<()> {
        let len = self.len_chars();
        if offset <= len {
            Ok(())
        } else {
            Err(Error::OffsetOutOfRange { offset, len })
        }
    }

    // ---------------------------------------------------------------
    // Editing
    // ---------------------------------------------------------------

    /// Replace the entire text.
    pub fn set_text(&mut self, text: &str) -> &mut Self {
        self.rope.replace(text);
        self.changed()
    }

    /// Remove all text.
    pub fn clear(&mut self) -> &mut Self {
        self.rope.clear();
        self.changed()
    }

    /// Append to the end of the last line.
    pub fn append(&mut self, text: &str) -> &mut Self {
        self.rope.append(text);
        self.changed()
    }

    /// Append `text` followed by a line terminator.
    pub fn append_line(&mut self, text: &str) -> &mut Self {
        self.rope.append(text);
        self.rope.append(CRLF);
        self.changed()
    }

    /// Insert at `line_start(line) + char_pos`, clamped to the text.
    ///
    /// Lines past the end resolve to the last line; negative lines to the
    /// first.
    pub fn insert(&mut self, line: isize, char_pos: isize, text: &str) -> &mut Self {
        let offset = self.resolve(line, char_pos);
        self.insert_at(offset, text)
    }

    /// Insert at an absolute offset, clamped to the text.
    pub fn insert_at(&mut self, offset: usize, text: &str) -> &mut Self {
        let offset = offset.min(self.len_chars());
        self.rope.insert(offset, text);
        self.changed()
    }

    /// Delete `count` chars starting at `line_start(line) + char_pos`.
    ///
    /// Both ends of the range are clamped to the text, so a range starting
    /// before the text only deletes the part inside it. Non-positive counts
    /// are a no-op.
    pub fn delete(&mut self, line: isize, char_pos: isize, count: isize) -> &mut Self {
        if count <= 0 {
            return self;
        }
        let line = self.clamp_line(line);
        let base = self.rope.line_to_char(line) as isize;
        let len = self.len_chars() as isize;
        let start = base.saturating_add(char_pos).clamp(0, len) as usize;
        let end = base
            .saturating_add(char_pos)
            .saturating_add(count)
            .clamp(0, len) as usize;
        self.delete_range(start..end)
    }

    /// Delete an absolute char range, clamped to the text.
    pub fn delete_range(&mut self, range: Range<usize>) -> &mut Self {
        let end = range.end.min(self.len_chars());
        if range.start >= end {
            return self;
        }
        self.rope.remove(range.start..end);
        self.changed()
    }

    /// Insert `text` plus a terminator as a new line before `line`.
    ///
    /// `line` is clamped: negative inserts before the first line, past the
    /// end appends a line after the last one.
    pub fn insert_line(&mut self, line: isize, text: &str) -> &mut Self {
        let count = self.line_count();
        let index = line.clamp(0, count as isize) as usize;
        if index < count {
            let offset = self.rope.line_to_char(index);
            self.rope.insert(offset, &format!("{text}{CRLF}"));
        } else {
            self.rope.append(CRLF);
            self.rope.append(text);
        }
        self.changed()
    }

    /// Delete a line with its terminator. Out-of-range lines are ignored.
    ///
    /// Deleting the last line also removes the terminator before it, so no
    /// empty line is left behind.
    pub fn delete_line(&mut self, line: isize) -> &mut Self {
        let count = self.line_count();
        if line < 0 || line as usize >= count {
            return self;
        }
        let line = line as usize;
        let range = if line + 1 == count && line > 0 {
            self.rope.content_range(line - 1).end..self.len_chars()
        } else {
            self.rope.line_to_char(line)..self.rope.line_to_char(line + 1)
        };
        if range.start >= range.end {
            return self;
        }
        self.rope.remove(range);
        self.changed()
    }

    /// Set the line limit; `None` is unlimited and `Some(0)` keeps one line.
    ///
    /// Excess lines are dropped from the front right away and after every
    /// later edit.
    pub fn set_max_lines(&mut self, max_lines: Option<usize>) -> &mut Self {
        self.options.max_lines = max_lines.map(|n| n.max(1));
        if self.enforce_max_lines() {
            self.revision += 1;
        }
        self
    }

    /// Get the line limit.
    #[must_use]
    pub fn max_lines(&self) -> Option<usize> {
        self.options.max_lines
    }

    fn clamp_line(&self, line: isize) -> usize {
        line.clamp(0, self.line_count() as isize - 1) as usize
    }

    fn resolve(&self, line: isize, char_pos: isize) -> usize {
        let line = self.clamp_line(line);
        let base = self.rope.line_to_char(line) as isize;
        base.saturating_add(char_pos)
            .clamp(0, self.len_chars() as isize) as usize
    }

    fn changed(&mut self) -> &mut Self {
        self.enforce_max_lines();
        self.revision += 1;
        self
    }

    fn enforce_max_lines(&mut self) -> bool {
        let Some(max) = self.options.max_lines.map(|n| n.max(1)) else {
            return false;
        };
        let count = self.line_count();
        if count <= max {
            return false;
        }
        let cut = self.rope.line_to_char(count - max);
        self.rope.remove(0..cut);
        emit_log(
            LogLevel::Debug,
            &format!("dropped {} leading lines to keep {max}", count - max),
        );
        true
    }

    // ---------------------------------------------------------------
    // Geometry
    // ---------------------------------------------------------------

    /// Height of every line.
    #[must_use]
    pub fn line_height(&self) -> i32 {
        self.shaper.line_height()
    }

    /// Total height of all lines.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.line_height() * self.line_count() as i32
    }

    fn cells(&self, line: usize) -> Vec<ClusterCell> {
        let content = self.rope.slice_to_string(self.rope.content_range(line));
        let mut x = 0;
        clusters(&content)
            .map(|(start, cluster)| {
                let width = self.shaper.advance(cluster, x);
                let cell = ClusterCell {
                    start,
                    len: cluster.chars().count(),
                    x,
                    width,
                };
                x += width;
                cell
            })
            .collect()
    }

    fn content_width(cells: &[ClusterCell]) -> i32 {
        cells.last().map_or(0, |c| c.x + c.width)
    }

    /// Width of a line's content.
    pub fn line_width(&self, line: usize) -> Result<i32> {
        self.check_line(line)?;
        Ok(Self::content_width(&self.cells(line)))
    }

    /// Metrics of one line.
    pub fn line_metrics(&self, line: usize) -> Result<LineMetrics> {
        Ok(LineMetrics {
            top: self.line_height() * line as i32,
            height: self.line_height(),
            width: self.line_width(line)?,
        })
    }

    /// Bounds of the whole text.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        let width = (0..self.line_count())
            .map(|line| Self::content_width(&self.cells(line)))
            .max()
            .unwrap_or(0);
        Rect::new(0, 0, width, self.height())
    }

    /// Position of `offset`; `trailing` gives the right edge of its char.
    ///
    /// Offsets inside a terminator sit at the end of the line content.
    pub fn location(&self, offset: usize, trailing: bool) -> Result<Point> {
        let line = self.line_index(offset)?;
        let content = self.rope.content_range(line);
        let cells = self.cells(line);
        let x = if offset >= content.end {
            Self::content_width(&cells)
        } else {
            let col = offset - content.start;
            cells
                .iter()
                .find(|c| col < c.start + c.len)
                .map_or(0, |c| if trailing { c.x + c.width } else { c.x })
        };
        Ok(Point::new(x, self.line_height() * line as i32))
    }

    /// Line at a vertical position, clamped to the text.
    #[must_use]
    pub fn line_at_y(&self, y: i32) -> usize {
        let height = self.line_height();
        if y <= 0 || height <= 0 {
            return 0;
        }
        ((y / height) as usize).min(self.line_count() - 1)
    }

    /// Offset of the char under `point`.
    ///
    /// Points left of a line hit its start, points right of the content hit
    /// the content end; points above or below hit the first or last line.
    #[must_use]
    pub fn offset_at(&self, point: Point) -> usize {
        self.hit_test(point, false)
    }

    /// Like [`offset_at`](Self::offset_at), but snaps to the following edge
    /// when the point lies past the middle of a char.
    #[must_use]
    pub fn offset_at_trailing(&self, point: Point) -> usize {
        self.hit_test(point, true)
    }

    fn hit_test(&self, point: Point, trailing: bool) -> usize {
        let line = self.line_at_y(point.y);
        let content = self.rope.content_range(line);
        if point.x < 0 {
            return content.start;
        }
        for cell in self.cells(line) {
            if point.x < cell.x + cell.width {
                let snap = trailing && point.x - cell.x > cell.width / 2;
                let col = if snap { cell.start + cell.len } else { cell.start };
                return content.start + col;
            }
        }
        content.end
    }

    /// Bounds covering the chars from `start` to `end`, both inclusive.
    ///
    /// Within one line the rectangle runs from the left edge of `start` to
    /// the right edge of `end`. Across lines it spans the full width of the
    /// widest line involved.
    pub fn bounds_of(&self, start: usize, end: usize) -> Result<Rect> {
        let (start, end) = (start.min(end), start.max(end));
        let first = self.line_index(start)?;
        let last = self.line_index(end)?;
        let height = self.line_height();
        if first == last {
            let left = self.location(start, false)?.x;
            let right = self.location(end, true)?.x;
            return Ok(Rect::new(
                left,
                height * first as i32,
                right - left,
                height,
            ));
        }
        let width = (first..=last)
            .map(|line| Self::content_width(&self.cells(line)))
            .max()
            .unwrap_or(0);
        Ok(Rect::new(
            0,
            height * first as i32,
            width,
            height * (last - first + 1) as i32,
        ))
    }

    // ---------------------------------------------------------------
    // Movement
    // ---------------------------------------------------------------

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

impl TextSource for TextLayout {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        self.rope.char_at(offset)
    }

    fn line_break_at(&self, offset: usize) -> Option<Range<usize>> {
        if offset >= self.len_chars() {
            return None;
        }
        let line = self.rope.char_to_line(offset);
        let content = self.rope.content_range(line);
        let end = self.rope.line_to_char(line + 1);
        (offset >= content.end && content.end < end).then_some(content.end..end)
    }

    fn is_cluster_boundary(&self, offset: usize) -> bool {
        let line = self.rope.char_to_line(offset);
        let content = self.rope.content_range(line);
        if offset >= content.end {
            return true;
        }
        let text = self.rope.slice_to_string(content.clone());
        is_cluster_boundary(&text, offset - content.start)
    }
}
