//! Grapheme cluster iteration in char offsets.

use unicode_segmentation::UnicodeSegmentation;

/// Iterate over grapheme clusters with their starting char offset.
pub fn clusters(s: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut char_offset = 0;
    s.graphemes(true).map(move |g| {
        let start = char_offset;
        char_offset += g.chars().count();
        (start, g)
    })
}

/// Check whether a char offset falls on a cluster boundary.
///
/// Offsets at or past the end of the string count as boundaries.
#[must_use]
pub fn is_cluster_boundary(s: &str, char_offset: usize) -> bool {
    if char_offset == 0 {
        return true;
    }
    let mut end = 0;
    for g in s.graphemes(true) {
        end += g.chars().count();
        if end >= char_offset {
            return end == char_offset;
        }
    }
    true
}
