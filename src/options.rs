//! Configuration for layouts and selection.

/// Configuration for a [`TextLayout`](crate::TextLayout).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Maximum number of lines kept; `None` keeps everything.
    ///
    /// When an edit grows the text past the limit, the oldest lines are
    /// dropped from the front.
    pub max_lines: Option<usize>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self { max_lines: None }
    }
}

impl LayoutOptions {
    /// Options with a line limit.
    #[must_use]
    pub fn with_max_lines(max_lines: usize) -> Self {
        Self {
            max_lines: Some(max_lines.max(1)),
        }
    }
}

/// Configuration for selection change notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionOptions {
    /// Notify listeners on every successful set or clear, even when the
    /// selection did not change. With `false` only real changes notify.
    pub notify_unchanged: bool,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            notify_unchanged: true,
        }
    }
}

impl SelectionOptions {
    /// Options that only notify on actual changes.
    #[must_use]
    pub fn changes_only() -> Self {
        Self {
            notify_unchanged: false,
        }
    }
}
