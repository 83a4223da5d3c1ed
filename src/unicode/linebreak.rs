//! Line break recognition.
//!
//! Matches the set of breaks the rope splits lines on, so line tables and
//! terminator handling always agree.

/// The terminator written by line-oriented edits and between segments.
pub const CRLF: &str = "\r\n";

/// Check if a char ends a line.
#[must_use]
pub const fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\u{000B}' | '\u{000C}' | '\r' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}
