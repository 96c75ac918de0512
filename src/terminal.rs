//! Terminal width probing and the avatar canvas derived from it.
//!
//! The panel is split in two halves. The avatar is drawn on a 50x25 canvas,
//! scaled down (never up) so it fits into the left half.

use crate::error::{Error, Result};
use tracing::debug;

pub const DEFAULT_WIDTH: u32 = 50;
pub const DEFAULT_HEIGHT: u32 = 25;

/// Character dimensions of the rasterized avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn for_pane(pane_width: usize) -> Self {
        let scale = scale_factor(pane_width);
        Self {
            width: (DEFAULT_WIDTH as f64 * scale).round() as u32,
            height: (DEFAULT_HEIGHT as f64 * scale).round() as u32,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub columns: u16,
    pub pane_width: usize,
    pub canvas: Canvas,
}

impl Layout {
    pub fn from_columns(columns: u16) -> Self {
        let pane_width = usize::from(columns) / 2;
        Self {
            columns,
            pane_width,
            canvas: Canvas::for_pane(pane_width),
        }
    }

    /// Reads the current terminal width. Without a terminal there is nothing
    /// to lay out, so this fails instead of guessing.
    pub fn probe() -> Result<Self> {
        let (columns, _) = crossterm::terminal::size().map_err(Error::Terminal)?;
        let layout = Self::from_columns(columns);
        debug!(
            columns = layout.columns,
            pane_width = layout.pane_width,
            canvas_width = layout.canvas.width,
            canvas_height = layout.canvas.height,
            "probed terminal"
        );
        Ok(layout)
    }
}

/// `min(1, pane_width / 50)`
pub fn scale_factor(pane_width: usize) -> f64 {
    (pane_width as f64 / DEFAULT_WIDTH as f64).min(1.0)
}
