//! Text storage, line layout and segmented documents.
//!
//! Key types:
//!
//! - [`TextLayout`]: one editable run of text with a line table and geometry
//! - [`SegmentedText`]: ordered [`Segment`]s exposed as one document
//! - [`RopeWrapper`]: the rope underneath every layout
//!
//! # Examples
//!
//! ```
//! use segtext::TextLayout;
//!
//! let mut layout = TextLayout::new();
//! layout.append_line("first").append("second");
//! assert_eq!(layout.line_count(), 2);
//! assert_eq!(layout.line(0).unwrap(), "first\r\n");
//! ```
//!
//! ```
//! use segtext::SegmentedText;
//!
//! let mut doc = SegmentedText::new();
//! doc.add_segment().append("one");
//! doc.add_segment().append("two");
//! assert_eq!(doc.text(), "one\r\ntwo");
//! assert_eq!(doc.find_segment_by_offset(5), Some(1));
//! ```

mod layout;
mod rope;
mod segmented;

pub use layout::{LineMetrics, TextLayout};
pub use rope::RopeWrapper;
pub use segmented::{Segment, SegmentId, SegmentedText};
