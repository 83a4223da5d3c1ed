//! Unicode utilities: grapheme clusters, display width and line breaks.
//!
//! All positions handed out by this module are char offsets, the unit the
//! text model uses for every offset.

mod grapheme;
mod linebreak;
mod width;

pub use grapheme::{clusters, is_cluster_boundary};
pub use linebreak::{CRLF, is_line_break};
pub use width::{WidthMethod, cluster_width};
