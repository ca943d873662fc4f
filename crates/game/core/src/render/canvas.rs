use crate::map::SHROUD;

use super::{Blit, Cell, CellRegion, RenderError};

/// In-memory console.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![SHROUD; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.idx(x, y).map(|i| &self.cells[i])
    }

    pub fn clear(&mut self) {
        self.cells.fill(SHROUD);
    }

    /// Codepoints of row `y` as a string, for assertions and dumps.
    pub fn row_text(&self, y: i32) -> String {
        (0..self.width as i32)
            .filter_map(|x| self.get(x, y).map(|cell| cell.ch))
            .collect()
    }
}

impl Blit for Canvas {
    fn blit(&mut self, x: i32, y: i32, region: &CellRegion) -> Result<(), RenderError> {
        for (row, cells) in region.rows() {
            for (column, cell) in cells.iter().enumerate() {
                if let Some(i) = self.idx(x + column as i32, y + row as i32) {
                    self.cells[i] = *cell;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;

    #[test]
    fn blit_clips_at_the_edges() {
        let mut canvas = Canvas::new(4, 2);
        let text = CellRegion::text("hello", color::WHITE, color::BLACK);

        canvas.blit(-1, 1, &text).unwrap();

        assert_eq!(canvas.row_text(0), "    ");
        assert_eq!(canvas.row_text(1), "ello");
    }

    #[test]
    fn clear_restores_the_shroud() {
        let mut canvas = Canvas::new(2, 1);
        canvas
            .blit(0, 0, &CellRegion::text("ab", color::WHITE, color::BLACK))
            .unwrap();
        canvas.clear();
        assert_eq!(canvas.get(0, 0), Some(&SHROUD));
        assert_eq!(canvas.get(2, 0), None);
    }
}
