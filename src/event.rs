//! Event and log callback system.
//!
//! Documents report notable state changes (front truncation, segment
//! add/delete, selection changes) through two process-global hooks: a log
//! callback receiving human-readable messages and an event callback
//! receiving a name plus a JSON payload.
//!
//! Payloads are [`SegmentEvent`] and [`SelectionEvent`], so hosts can decode
//! them with `serde_json` into the same types.

use serde::{Deserialize, Serialize};
use std::sync::{Mutex, OnceLock};

/// Log level for debug callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Event emitted after the selection of a document or segment changed.
pub const EVENT_SELECTION_CHANGED: &str = "selection_changed";
/// Event emitted after a segment was added to a document.
pub const EVENT_SEGMENT_ADDED: &str = "segment_added";
/// Event emitted after a segment was removed from a document.
pub const EVENT_SEGMENT_DELETED: &str = "segment_deleted";

/// Payload of [`EVENT_SEGMENT_ADDED`] and [`EVENT_SEGMENT_DELETED`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentEvent {
    /// Raw id of the segment.
    pub segment: u64,
    /// Index the segment was added at or removed from.
    pub index: usize,
}

/// Whether a selection event describes a whole document or one segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionScope {
    Document,
    Segment,
}

/// Payload of [`EVENT_SELECTION_CHANGED`].
///
/// Offsets are in the scope's own coordinates; both are `None` once the
/// selection is gone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEvent {
    pub source: SelectionScope,
    /// Raw segment id for segment scope.
    pub segment: Option<u64>,
    pub start: Option<usize>,
    pub end: Option<usize>,
}

type EventCallback = Box<dyn Fn(&str, &str) + Send + Sync + 'static>;
type LogCallback = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

fn event_callback() -> &'static Mutex<Option<EventCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<EventCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global event callback.
pub fn set_event_callback<F>(callback: F)
where
    F: Fn(&str, &str) + Send + Sync + 'static,
{
    if let Ok(mut guard) = event_callback().lock() {
        *guard = Some(Box::new(callback));
    }
}

/// Remove the global event callback.
pub fn clear_event_callback() {
    if let Ok(mut guard) = event_callback().lock() {
        *guard = None;
    }
}

/// Emit an event to the registered callback.
pub fn emit_event(name: &str, data: &str) {
    if let Ok(guard) = event_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(name, data);
        }
    }
}

/// Encode `payload` as JSON and emit it as event `name`.
pub fn emit_payload<T: Serialize>(name: &str, payload: &T) {
    match serde_json::to_string(payload) {
        Ok(json) => emit_event(name, &json),
        Err(err) => emit_log(
            LogLevel::Error,
            &format!("cannot encode {name} payload: {err}"),
        ),
    }
}

/// Set the global log callback.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    if let Ok(mut guard) = log_callback().lock() {
        *guard = Some(Box::new(callback));
    }
}

/// Remove the global log callback.
pub fn clear_log_callback() {
    if let Ok(mut guard) = log_callback().lock() {
        *guard = None;
    }
}

/// Emit a log event.
pub fn emit_log(level: LogLevel, message: &str) {
    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, message);
        }
    }
}
