//! Selection and caret bookkeeping shared by the selectable documents.

use crate::error::{Error, Result};
use crate::selection::SelectionRange;

/// Current selection plus the caret tracked without one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct SelectionState {
    selection: Option<SelectionRange>,
    caret: usize,
}

impl SelectionState {
    pub(crate) fn selection(&self) -> Option<SelectionRange> {
        self.selection
    }

    pub(crate) fn caret(&self) -> usize {
        self.caret
    }

    /// Install `range` and return the previous selection.
    ///
    /// An empty range only moves the caret; `None` clears the selection and
    /// leaves the caret where it was.
    pub(crate) fn apply(&mut self, range: Option<SelectionRange>) -> Option<SelectionRange> {
        let old = self.selection;
        match range {
            Some(range) => {
                self.caret = range.caret();
                self.selection = (!range.is_empty()).then_some(range);
            }
            None => self.selection = None,
        }
        old
    }

    /// Move the caret, dropping the selection. Returns the dropped selection.
    pub(crate) fn move_caret(&mut self, offset: usize) -> Option<SelectionRange> {
        self.caret = offset;
        self.selection.take()
    }

    /// Fit the state to a text of `len` chars after an edit.
    pub(crate) fn revalidate(&mut self, len: usize) {
        self.caret = self.caret.min(len);
        if self.selection.is_some_and(|s| s.end() > len) {
            self.selection = None;
        }
    }
}

pub(crate) fn validate_range(range: Option<SelectionRange>, len: usize) -> Result<()> {
    match range {
        Some(range) if range.end() > len => Err(Error::InvalidSelection {
            start: range.start(),
            end: range.end(),
            len,
        }),
        _ => Ok(()),
    }
}

pub(crate) fn validate_offset(offset: usize, len: usize) -> Result<()> {
    if offset <= len {
        Ok(())
    } else {
        Err(Error::OffsetOutOfRange { offset, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_and_clear_keep_caret() {
        let mut state = SelectionState::default();
        assert_eq!(state.apply(Some(SelectionRange::rtl(2, 6))), None);
        assert_eq!(state.caret(), 2);
        assert_eq!(state.apply(None), Some(SelectionRange::rtl(2, 6)));
        assert_eq!(state.selection(), None);
        assert_eq!(state.caret(), 2);
    }

    #[test]
    fn test_empty_range_moves_caret() {
        let mut state = SelectionState::default();
        state.apply(Some(SelectionRange::ltr(1, 4)));
        state.apply(Some(SelectionRange::ltr(7, 7)));
        assert_eq!(state.selection(), None);
        assert_eq!(state.caret(), 7);
    }

    #[test]
    fn test_revalidate() {
        let mut state = SelectionState::default();
        state.apply(Some(SelectionRange::ltr(1, 4)));
        state.revalidate(4);
        assert_eq!(state.selection(), Some(SelectionRange::ltr(1, 4)));
        state.revalidate(3);
        assert_eq!(state.selection(), None);
        assert_eq!(state.caret(), 3);
    }

    #[test]
    fn test_validation() {
        assert!(validate_range(Some(SelectionRange::ltr(0, 5)), 5).is_ok());
        assert!(validate_range(None, 0).is_ok());
        assert!(matches!(
            validate_range(Some(SelectionRange::ltr(0, 6)), 5),
            Err(Error::InvalidSelection { end: 6, .. })
        ));
        assert!(validate_offset(6, 5).is_err());
    }
}
