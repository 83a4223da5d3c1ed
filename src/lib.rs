//! `segtext` - segmented text layout with selection.
//!
//! Editable line-oriented text ([`TextLayout`]), composite documents built
//! from independently editable segments ([`SegmentedText`]), and a caret and
//! selection model on top of both ([`Selectable`]). Pixel geometry and caret
//! movement go through an injected [`TextShaper`]; [`MonospaceShaper`] is the
//! built-in one.
//!
//! # Example
//!
//! ```
//! use segtext::{Point, Selectable, SelectableSegmentedText, SelectionGestures};
//!
//! let mut doc = SelectableSegmentedText::new();
//! doc.add_segment().append_line("first segment").append("second line");
//! doc.add_segment().append("next segment");
//!
//! let mut gestures = SelectionGestures::new(&mut doc);
//! gestures.select_line(Point::new(0, 0)).unwrap();
//! assert_eq!(doc.selected_text().as_deref(), Some("first segment\r\n"));
//! ```

// Crate-level lint configuration
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::cast_sign_loss)] // Intentional coordinate conversions
#![allow(clippy::cast_possible_wrap)] // Intentional coordinate conversions
#![allow(clippy::module_name_repetitions)] // Allow SelectionRange in selection etc
#![allow(clippy::missing_errors_doc)] // Error variants are documented on Error
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::inherent_to_string)] // to_string methods are convenient
#![allow(clippy::should_implement_trait)] // from_str naming is intentional
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::return_self_not_must_use)] // Edit chains return &mut Self

pub mod error;
pub mod event;
pub mod geometry;
pub mod interaction;
pub mod options;
pub mod selection;
pub mod shaping;
pub mod text;
pub mod unicode;

// Re-export core types at crate root
pub use error::{Error, Result};
pub use event::{
    EVENT_SEGMENT_ADDED, EVENT_SEGMENT_DELETED, EVENT_SELECTION_CHANGED, LogLevel, SegmentEvent,
    SelectionEvent, SelectionScope, emit_event, emit_log, emit_payload, set_event_callback,
    set_log_callback,
};
pub use geometry::{Point, Rect};
pub use options::{LayoutOptions, SelectionOptions};

// Re-export text and shaping types
pub use shaping::{MonospaceShaper, Movement, SharedShaper, TextShaper, TextSource};
pub use text::{LineMetrics, Segment, SegmentId, SegmentedText, TextLayout};
pub use unicode::WidthMethod;

// Re-export selection types
pub use interaction::{BorderDirection, SelectionGestures};
pub use selection::{
    ListenerId, OffsetRange, Selectable, SelectableSegmentedText, SelectableTextLayout,
    SegmentEditor, SelectionChange, SelectionDirection, SelectionListener, SelectionRange,
    SelectionSource,
};
