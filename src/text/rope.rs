//! Rope storage using the ropey crate.

use crate::unicode::is_line_break;
use ropey::{Rope, RopeSlice};
use std::ops::Range;

/// Wrapper around `ropey::Rope` speaking char offsets and line terminators.
#[derive(Clone, Debug, Default)]
pub struct RopeWrapper {
    rope: Rope,
}

impl RopeWrapper {
    /// Create an empty rope.
    #[must_use]
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Create a rope from a string.
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
    }

    /// Get the number of characters.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Get the number of lines (at least 1).
    #[must_use]
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Get the char at an offset.
    #[must_use]
    pub fn char_at(&self, char_idx: usize) -> Option<char> {
        self.rope.get_char(char_idx)
    }

    /// Get a line, including its terminator.
    #[must_use]
    pub fn line(&self, idx: usize) -> Option<RopeSlice<'_>> {
        self.rope.get_line(idx)
    }

    /// Get the text of a range of chars, empty when out of bounds.
    #[must_use]
    pub fn slice_to_string(&self, range: Range<usize>) -> String {
        self.rope
            .get_slice(range)
            .map(|s| s.to_string())
            .unwrap_or_default()
    }

    /// Length in chars of the terminator ending line `idx`.
    #[must_use]
    pub fn terminator_len(&self, idx: usize) -> usize {
        let Some(line) = self.line(idx) else {
            return 0;
        };
        let len = line.len_chars();
        if len == 0 {
            return 0;
        }
        match line.char(len - 1) {
            '\n' if len >= 2 && line.char(len - 2) == '\r' => 2,
            c if is_line_break(c) => 1,
            _ => 0,
        }
    }

    /// Char range of line `idx` without its terminator.
    #[must_use]
    pub fn content_range(&self, idx: usize) -> Range<usize> {
        let start = self.line_to_char(idx);
        let len = self
            .line(idx)
            .map_or(0, |line| line.len_chars() - self.terminator_len(idx));
        start..start + len
    }

    /// Insert text at a character position.
    pub fn insert(&mut self, char_idx: usize, text: &str) {
        if char_idx <= self.len_chars() {
            self.rope.insert(char_idx, text);
        }
    }

    /// Remove a range of characters, clamped to the text.
    pub fn remove(&mut self, range: Range<usize>) {
        let len = self.len_chars();
        let start = range.start.min(len);
        let end = range.end.min(len);
        if start < end {
            self.rope.remove(start..end);
        }
    }

    /// Replace the entire contents.
    pub fn replace(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    /// Append text to the end.
    pub fn append(&mut self, text: &str) {
        let len = self.len_chars();
        self.rope.insert(len, text);
    }

    /// Clear all content.
    pub fn clear(&mut self) {
        self.rope = Rope::new();
    }

    /// Convert to string.
    #[must_use]
    pub fn to_string(&self) -> String {
        self.rope.to_string()
    }

    /// Convert char index to line index.
    #[must_use]
    pub fn char_to_line(&self, char_idx: usize) -> usize {
        self.rope.char_to_line(char_idx.min(self.len_chars()))
    }

    /// Get the char index at the start of a line.
    #[must_use]
    pub fn line_to_char(&self, line_idx: usize) -> usize {
        if line_idx >= self.len_lines() {
            self.len_chars()
        } else {
            self.rope.line_to_char(line_idx)
        }
    }
}

impl From<&str> for RopeWrapper {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}
