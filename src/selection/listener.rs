//! Selection change listeners.
//!
//! Listeners are plain closures called synchronously, in registration
//! order, after the selection has been updated. They receive shared data
//! only, so they cannot call back into the document that notifies them.

use crate::event::{
    EVENT_SELECTION_CHANGED, LogLevel, SelectionEvent, SelectionScope, emit_log, emit_payload,
};
use crate::geometry::Rect;
use crate::selection::SelectionRange;
use crate::text::SegmentId;
use std::fmt;

/// What a selection change belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SelectionSource {
    /// The whole document.
    Document,
    /// One segment of a segmented document.
    Segment(SegmentId),
}

/// A selection change as delivered to listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionChange {
    pub source: SelectionSource,
    /// The selection after the change, in the source's own offsets.
    pub range: Option<SelectionRange>,
    /// Bounds of the new selection, `None` without one.
    pub new_bounds: Option<Rect>,
    /// Bounds of the previous selection, `None` without one.
    pub old_bounds: Option<Rect>,
}

impl From<&SelectionChange> for SelectionEvent {
    fn from(change: &SelectionChange) -> Self {
        let (source, segment) = match change.source {
            SelectionSource::Document => (SelectionScope::Document, None),
            SelectionSource::Segment(id) => (SelectionScope::Segment, Some(id.raw())),
        };
        Self {
            source,
            segment,
            start: change.range.map(|r| r.start()),
            end: change.range.map(|r| r.end()),
        }
    }
}

/// Handle returned when registering a listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A selection change callback.
pub type SelectionListener = Box<dyn Fn(&SelectionChange) + Send + Sync>;

/// Ordered listener list.
#[derive(Default)]
pub(crate) struct SelectionListeners {
    entries: Vec<(ListenerId, SelectionListener)>,
    next_id: u64,
}

impl SelectionListeners {
    pub(crate) fn add(&mut self, listener: SelectionListener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Report `change` to the log and event hooks, then to every listener.
    pub(crate) fn publish(&self, change: &SelectionChange) {
        emit_log(
            LogLevel::Debug,
            &format!(
                "selection of {:?} changed to {}",
                change.source,
                change
                    .range
                    .map_or_else(|| "none".to_string(), |r| r.to_string())
            ),
        );
        emit_payload(EVENT_SELECTION_CHANGED, &SelectionEvent::from(change));
        for (_, listener) in &self.entries {
            listener(change);
        }
    }
}

impl fmt::Debug for SelectionListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionListeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
