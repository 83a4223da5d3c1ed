//! Display width of clusters, in cells.

use unicode_width::UnicodeWidthStr;

/// Width calculation method for ambiguous-width characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WidthMethod {
    /// POSIX-like wcwidth: ambiguous width = 1.
    #[default]
    WcWidth,
    /// Unicode East Asian Width: ambiguous width = 2.
    Unicode,
}

/// Get the display width of a grapheme cluster in cells.
///
/// Line breaks and other control characters are zero width.
#[must_use]
pub fn cluster_width(cluster: &str, method: WidthMethod) -> usize {
    if cluster.chars().all(char::is_control) {
        return 0;
    }
    match method {
        WidthMethod::WcWidth => UnicodeWidthStr::width(cluster),
        WidthMethod::Unicode => UnicodeWidthStr::width_cjk(cluster),
    }
}
