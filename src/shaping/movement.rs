//! Caret movement boundaries.

use super::TextSource;

/// Granularity of a caret movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Movement {
    /// One char.
    Char,
    /// One grapheme cluster.
    Cluster,
    /// To the next word boundary (start of a word or a punctuation run).
    Word,
    /// To the start of a word.
    WordStart,
    /// To the end of a word.
    WordEnd,
}

impl Movement {
    const fn is_word(self) -> bool {
        matches!(self, Self::Word | Self::WordStart | Self::WordEnd)
    }
}

/// Word chars: alphanumerics and underscore.
#[must_use]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_stop(source: &dyn TextSource, offset: usize, movement: Movement) -> bool {
    match movement {
        Movement::Char => true,
        Movement::Cluster => source.is_cluster_boundary(offset),
        Movement::Word | Movement::WordStart => {
            let (Some(c), Some(prev)) = (source.char_at(offset), prev_char(source, offset)) else {
                return false;
            };
            (is_word_char(c) != is_word_char(prev) || !is_word_char(c)) && !c.is_whitespace()
        }
        Movement::WordEnd => {
            let (Some(c), Some(prev)) = (source.char_at(offset), prev_char(source, offset)) else {
                return false;
            };
            !is_word_char(c) && is_word_char(prev)
        }
    }
}

fn prev_char(source: &dyn TextSource, offset: usize) -> Option<char> {
    offset.checked_sub(1).and_then(|o| source.char_at(o))
}

/// Next boundary after `offset`.
///
/// Landing inside a line break run stops at the start of the run, so a
/// caret never ends up between `'\r'` and `'\n'`. Offsets past the end are
/// treated as the end.
#[must_use]
pub fn next_boundary(source: &dyn TextSource, offset: usize, movement: Movement) -> usize {
    let len = source.len_chars();
    if offset >= len {
        return len;
    }
    if movement == Movement::Char {
        return offset + 1;
    }

    let mut current = offset;
    loop {
        current += 1;
        if current >= len {
            return len;
        }
        if let Some(run) = source.line_break_at(current) {
            return run.start;
        }
        if is_stop(source, current, movement) {
            return current;
        }
    }
}

/// Previous boundary before `offset`.
///
/// Mirrors [`next_boundary`]. Word movements starting inside a segment
/// separator continue from the separator start without stopping there.
#[must_use]
pub fn previous_boundary(source: &dyn TextSource, offset: usize, movement: Movement) -> usize {
    let offset = offset.min(source.len_chars());
    if offset == 0 {
        return 0;
    }
    if movement == Movement::Char {
        return offset - 1;
    }

    let mut current = offset;
    if movement.is_word() {
        if let Some(separator) = source.separator_at(current) {
            if separator.start < current {
                current = separator.start;
            }
        }
    }

    loop {
        if current <= 1 {
            return 0;
        }
        current -= 1;
        if let Some(run) = source.line_break_at(current) {
            return run.start;
        }
        if is_stop(source, current, movement) {
            return current;
        }
    }
}
