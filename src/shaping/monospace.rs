//! Fixed-cell shaper.

use super::TextShaper;
use crate::unicode::{WidthMethod, cluster_width};

/// Shaper placing every cluster on a fixed grid of cells.
///
/// A cluster advances by its display width (0, 1 or 2 cells) times
/// `cell_width`; a tab advances to the next multiple of `tab_width` cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonospaceShaper {
    /// Width of one cell.
    pub cell_width: i32,
    /// Height of one line.
    pub line_height: i32,
    /// Tab stop distance in cells.
    pub tab_width: u32,
    /// How ambiguous-width characters are measured.
    pub width_method: WidthMethod,
}

impl Default for MonospaceShaper {
    fn default() -> Self {
        Self {
            cell_width: 6,
            line_height: 13,
            tab_width: 4,
            width_method: WidthMethod::WcWidth,
        }
    }
}

impl MonospaceShaper {
    /// Shaper with the given cell size and default tab and width settings.
    #[must_use]
    pub fn new(cell_width: i32, line_height: i32) -> Self {
        Self {
            cell_width,
            line_height,
            ..Self::default()
        }
    }

    /// Builder-style tab width override.
    #[must_use]
    pub fn with_tab_width(mut self, tab_width: u32) -> Self {
        self.tab_width = tab_width.max(1);
        self
    }

    /// Builder-style width method override.
    #[must_use]
    pub fn with_width_method(mut self, method: WidthMethod) -> Self {
        self.width_method = method;
        self
    }
}

impl TextShaper for MonospaceShaper {
    fn advance(&self, cluster: &str, pen_x: i32) -> i32 {
        if cluster == "\t" {
            let stop = self.cell_width.saturating_mul(self.tab_width.max(1) as i32);
            if stop <= 0 {
                return 0;
            }
            return stop - pen_x.rem_euclid(stop);
        }
        cluster_width(cluster, self.width_method) as i32 * self.cell_width
    }

    fn line_height(&self) -> i32 {
        self.line_height
    }
}
