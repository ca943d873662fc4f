use crate::ecs::Position;

use super::error::MapError;
use super::tile::Tile;

/// Dense `width × height` array addressed by [`Position`].
///
/// Decoding rejects a cell vector whose length disagrees with the dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "RawGrid<T>",
        bound(deserialize = "T: serde::Deserialize<'de>")
    )
)]
pub struct Grid<T> {
    width: u32,
    height: u32,
    cells: Vec<T>,
}

/// Wire shape of [`Grid`] before the cell count is checked.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGrid<T> {
    width: u32,
    height: u32,
    cells: Vec<T>,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<RawGrid<T>> for Grid<T> {
    type Error = MapError;

    fn try_from(raw: RawGrid<T>) -> Result<Self, MapError> {
        let grid = Grid {
            width: raw.width,
            height: raw.height,
            cells: raw.cells,
        };
        grid.check_len()?;
        Ok(grid)
    }
}

impl<T: Clone> Grid<T> {
    pub fn filled(width: u32, height: u32, value: T) -> Self {
        Self {
            width,
            height,
            cells: vec![value; width as usize * height as usize],
        }
    }
}

impl<T> Grid<T> {
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(Position) -> T) -> Self {
        let cells = (0..height as i32)
            .flat_map(|y| (0..width as i32).map(move |x| Position::new(x, y)))
            .map(&mut f)
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    /// Builds a grid without checking the cell count.
    #[cfg(test)]
    pub(crate) fn from_raw_parts(width: u32, height: u32, cells: Vec<T>) -> Self {
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Verifies that there is exactly one cell per position.
    pub fn check_len(&self) -> Result<(), MapError> {
        let expected = self.width as usize * self.height as usize;
        if self.cells.len() != expected {
            return Err(MapError::CellCount {
                width: self.width,
                height: self.height,
                cells: self.cells.len(),
            });
        }
        Ok(())
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    pub fn same_shape<U>(&self, other: &Grid<U>) -> bool {
        self.width == other.width && self.height == other.height
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }

    pub fn get(&self, position: Position) -> Option<&T> {
        self.index(position).map(|index| &self.cells[index])
    }

    pub fn get_mut(&mut self, position: Position) -> Option<&mut T> {
        self.index(position).map(move |index| &mut self.cells[index])
    }

    /// Writes `value` at `position`, rejecting coordinates outside the grid.
    pub fn set(&mut self, position: Position, value: T) -> Result<(), MapError> {
        let (width, height) = (self.width, self.height);
        let cell = self.get_mut(position).ok_or(MapError::OutOfBounds {
            position,
            width,
            height,
        })?;
        *cell = value;
        Ok(())
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<T> {
        let width = self.width as i32;
        (0..self.height as i32).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> + '_ {
        self.positions().zip(self.cells.iter())
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    /// Combines two same-shaped grids cell by cell.
    ///
    /// Callers check the shapes first; on mismatch the result is truncated.
    pub(crate) fn zip_with<U, V>(&self, other: &Grid<U>, mut f: impl FnMut(&T, &U) -> V) -> Grid<V> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self
                .cells
                .iter()
                .zip(other.cells.iter())
                .map(|(a, b)| f(a, b))
                .collect(),
        }
    }
}

impl Grid<bool> {
    /// Positions whose cell is `true`.
    pub fn marked(&self) -> impl Iterator<Item = Position> + '_ {
        self.iter()
            .filter_map(|(position, value)| value.then_some(position))
    }

    /// Reads a cell, treating anything off the grid as `false`.
    pub fn is_set(&self, position: Position) -> bool {
        self.get(position).copied().unwrap_or(false)
    }

    /// True when every cell set here is also set in `other`.
    pub fn is_subset_of(&self, other: &Grid<bool>) -> bool {
        self.same_shape(other)
            && self
                .cells
                .iter()
                .zip(other.cells.iter())
                .all(|(a, b)| !*a || *b)
    }
}

/// The current floor: tiles plus the visible and explored masks.
///
/// `visible` is replaced wholesale by every visibility recompute. `explored`
/// only ever gains cells.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileGrid {
    tiles: Grid<Tile>,
    visible: Grid<bool>,
    explored: Grid<bool>,
    downstairs: Position,
}

impl TileGrid {
    /// Creates a solid-wall grid, the blank canvas dungeon factories carve into.
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_tiles(Grid::filled(width, height, Tile::wall()))
    }

    pub fn from_tiles(tiles: Grid<Tile>) -> Self {
        let (width, height) = (tiles.width(), tiles.height());
        Self {
            tiles,
            visible: Grid::filled(width, height, false),
            explored: Grid::filled(width, height, false),
            downstairs: Position::ORIGIN,
        }
    }

    pub fn width(&self) -> u32 {
        self.tiles.width()
    }

    pub fn height(&self) -> u32 {
        self.tiles.height()
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        self.tiles.contains(position)
    }

    pub fn tiles(&self) -> &Grid<Tile> {
        &self.tiles
    }

    pub fn tile(&self, position: Position) -> Option<&Tile> {
        self.tiles.get(position)
    }

    pub fn set_tile(&mut self, position: Position, tile: Tile) -> Result<(), MapError> {
        self.tiles.set(position, tile)
    }

    pub(crate) fn tiles_mut(&mut self) -> &mut Grid<Tile> {
        &mut self.tiles
    }

    pub fn is_walkable(&self, position: Position) -> bool {
        self.tile(position).is_some_and(|tile| tile.walkable)
    }

    pub fn visible(&self) -> &Grid<bool> {
        &self.visible
    }

    pub fn explored(&self) -> &Grid<bool> {
        &self.explored
    }

    pub fn is_visible(&self, position: Position) -> bool {
        self.visible.is_set(position)
    }

    pub fn is_explored(&self, position: Position) -> bool {
        self.explored.is_set(position)
    }

    /// Projection of the `transparent` field, the input to field-of-view.
    pub fn transparency(&self) -> Grid<bool> {
        self.tiles.map(|tile| tile.transparent)
    }

    pub fn downstairs(&self) -> Position {
        self.downstairs
    }

    pub fn set_downstairs(&mut self, position: Position) -> Result<(), MapError> {
        self.set_tile(position, Tile::down_stairs())?;
        self.downstairs = position;
        Ok(())
    }

    /// Replaces the visible mask and folds it into the explored mask.
    pub(crate) fn reveal(&mut self, visible: Grid<bool>) -> Result<(), MapError> {
        if !self.visible.same_shape(&visible) {
            return Err(MapError::DimensionMismatch {
                expected: (self.width(), self.height()),
                actual: (visible.width(), visible.height()),
            });
        }
        self.explored = self.explored.zip_with(&visible, |explored, visible| *explored || *visible);
        self.visible = visible;
        Ok(())
    }

    /// Verifies that every layer holds one cell per position and that both
    /// masks match the tile dimensions.
    pub fn check_masks(&self) -> Result<(), MapError> {
        self.tiles.check_len()?;
        self.visible.check_len()?;
        self.explored.check_len()?;
        for mask in [&self.visible, &self.explored] {
            if !self.tiles.same_shape(mask) {
                return Err(MapError::DimensionMismatch {
                    expected: (self.width(), self.height()),
                    actual: (mask.width(), mask.height()),
                });
            }
        }
        Ok(())
    }

    /// Restores both masks verbatim.
    pub(crate) fn restore_masks(
        &mut self,
        visible: Grid<bool>,
        explored: Grid<bool>,
    ) -> Result<(), MapError> {
        for mask in [&visible, &explored] {
            if !self.tiles.same_shape(mask) {
                return Err(MapError::DimensionMismatch {
                    expected: (self.width(), self.height()),
                    actual: (mask.width(), mask.height()),
                });
            }
        }
        self.visible = visible;
        self.explored = explored;
        Ok(())
    }
}
