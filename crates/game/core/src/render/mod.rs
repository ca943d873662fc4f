//! Render pass primitives.
//!
//! The engine composes the frame as a sequence of [`CellRegion`]s blitted
//! onto a [`Blit`] target. Drawing to an actual console is the caller's
//! business; [`Canvas`] is an in-memory target for headless use.
mod canvas;
mod error;
pub mod hud;
mod message_log;

pub use canvas::Canvas;
pub use error::RenderError;
pub use message_log::{Message, MessageLog, wrap};

use crate::color::{self, Rgb};
use crate::map::{Glyph, Grid};

/// One console cell: codepoint, foreground and background.
pub type Cell = Glyph;

/// Console drawing primitive.
///
/// Implementations copy `region` with its top-left corner at `(x, y)`. Cells
/// falling outside the target are clipped.
pub trait Blit {
    fn blit(&mut self, x: i32, y: i32, region: &CellRegion) -> Result<(), RenderError>;
}

/// Rectangular block of cells, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellRegion {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl CellRegion {
    pub fn filled(width: usize, height: usize, cell: Cell) -> Self {
        Self {
            width,
            height,
            cells: vec![cell; width * height],
        }
    }

    /// A single row of text.
    pub fn text(text: &str, fg: Rgb, bg: Rgb) -> Self {
        let cells: Vec<Cell> = text.chars().map(|ch| Glyph::new(ch, fg, bg)).collect();
        Self {
            width: cells.len(),
            height: 1,
            cells,
        }
    }

    pub fn single(cell: Cell) -> Self {
        Self::filled(1, 1, cell)
    }

    pub fn from_grid(grid: &Grid<Glyph>) -> Self {
        Self {
            width: grid.width() as usize,
            height: grid.height() as usize,
            cells: grid.iter().map(|(_, glyph)| *glyph).collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        (x < self.width && y < self.height).then(|| &self.cells[y * self.width + x])
    }

    /// Writes `text` into row `y` starting at column `x`, truncating at the
    /// right edge.
    pub fn print(&mut self, x: usize, y: usize, text: &str, fg: Rgb) {
        if y >= self.height {
            return;
        }
        for (offset, ch) in text.chars().enumerate() {
            let column = x + offset;
            if column >= self.width {
                break;
            }
            let cell = &mut self.cells[y * self.width + column];
            cell.ch = ch;
            cell.fg = fg;
        }
    }

    pub fn set_bg(&mut self, x: usize, y: usize, bg: Rgb) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x].bg = bg;
        }
    }

    /// Rows as `(y, cells)` pairs.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &[Cell])> + '_ {
        self.cells.chunks(self.width.max(1)).enumerate()
    }
}

impl Default for CellRegion {
    fn default() -> Self {
        Self::filled(0, 0, Glyph::new(' ', color::WHITE, color::BLACK))
    }
}
