//! Text shaping: advances, line metrics and boundary search.
//!
//! The text model never measures glyphs itself. Everything that depends on
//! fonts goes through a [`TextShaper`], injected into each layout as a
//! [`SharedShaper`]. [`MonospaceShaper`] is the built-in implementation used
//! when nothing else is configured.
//!
//! Boundary search ([`TextShaper::next_offset`] and
//! [`TextShaper::previous_offset`]) runs over a [`TextSource`], a read-only
//! char view that both single layouts and segmented documents provide.

mod monospace;
mod movement;

pub use monospace::MonospaceShaper;
pub use movement::{Movement, is_word_char, next_boundary, previous_boundary};

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// Read-only char view used by boundary search.
pub trait TextSource {
    /// Number of chars in the text.
    fn len_chars(&self) -> usize;

    /// Char at `offset`, `None` at or past the end.
    fn char_at(&self, offset: usize) -> Option<char>;

    /// The line break run (`"\r\n"` counts as one run) containing `offset`.
    fn line_break_at(&self, offset: usize) -> Option<Range<usize>>;

    /// The segment separator containing `offset`.
    ///
    /// Separators are also reported by [`line_break_at`](Self::line_break_at).
    fn separator_at(&self, _offset: usize) -> Option<Range<usize>> {
        None
    }

    /// Whether `offset` falls on a grapheme cluster boundary.
    fn is_cluster_boundary(&self, offset: usize) -> bool;
}

/// The measuring and segmentation capability a layout delegates to.
pub trait TextShaper: fmt::Debug {
    /// Advance width of one grapheme cluster whose left edge sits at `pen_x`.
    fn advance(&self, cluster: &str, pen_x: i32) -> i32;

    /// Height of one line.
    fn line_height(&self) -> i32;

    /// Next boundary after `offset` for the given movement.
    ///
    /// `offset` must lie within `0..=source.len_chars()`.
    fn next_offset(&self, source: &dyn TextSource, offset: usize, movement: Movement) -> usize {
        next_boundary(source, offset, movement)
    }

    /// Previous boundary before `offset` for the given movement.
    ///
    /// `offset` must lie within `0..=source.len_chars()`.
    fn previous_offset(
        &self,
        source: &dyn TextSource,
        offset: usize,
        movement: Movement,
    ) -> usize {
        previous_boundary(source, offset, movement)
    }
}

/// A shaper shared between layouts.
pub type SharedShaper = Arc<dyn TextShaper + Send + Sync>;

/// The shaper used when none is configured.
#[must_use]
pub fn default_shaper() -> SharedShaper {
    Arc::new(MonospaceShaper::default())
}
