//! Wall autotiling.
//!
//! A revealed wall is drawn with the box-drawing glyph that connects it to its
//! revealed wall neighbors. Connectivity is a 4-bit [`WallMask`] looked up in
//! [`GLYPH_TABLE`]. Only revealed walls are rewritten; every other cell keeps
//! whatever glyph it already had.

use bitflags::bitflags;

use crate::ecs::Position;

use super::grid::{Grid, TileGrid};

bitflags! {
    /// Which orthogonal neighbors of a cell are revealed walls.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct WallMask: u8 {
        /// Neighbor at `y - 1`.
        const NORTH = 1;
        /// Neighbor at `y + 1`.
        const SOUTH = 2;
        /// Neighbor at `x - 1`.
        const WEST = 4;
        /// Neighbor at `x + 1`.
        const EAST = 8;
    }
}

/// Wall glyph for each of the 16 neighbor masks.
pub const GLYPH_TABLE: [char; 16] = [
    'O', // isolated
    '║', // N
    '║', // S
    '║', // N S
    '═', // W
    '╝', // N W
    '╗', // S W
    '╣', // N S W
    '═', // E
    '╚', // N E
    '╔', // S E
    '╠', // N S E
    '═', // W E
    '╩', // N W E
    '╦', // S W E
    '╬', // N S W E
];

/// How neighbors beyond the map edge are treated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgePolicy {
    /// The grid wraps: the opposite edge is the neighbor.
    #[default]
    Wrap,
    /// Off-map neighbors are never walls.
    Open,
}

pub fn glyph_for(mask: WallMask) -> char {
    GLYPH_TABLE[usize::from(mask.bits())]
}

/// Cells that are walls and have been seen (now or before).
pub fn revealed_walls(grid: &TileGrid) -> Grid<bool> {
    Grid::from_fn(grid.width(), grid.height(), |position| {
        grid.tile(position).is_some_and(|tile| tile.wall_glyph)
            && (grid.is_visible(position) || grid.is_explored(position))
    })
}

/// Connectivity of `position` to the revealed walls around it.
pub fn wall_mask(revealed: &Grid<bool>, position: Position, policy: EdgePolicy) -> WallMask {
    let neighbor = |dx: i32, dy: i32| -> bool {
        let target = position + (dx, dy);
        match policy {
            EdgePolicy::Open => revealed.is_set(target),
            EdgePolicy::Wrap => {
                let wrapped = Position::new(
                    target.x.rem_euclid(revealed.width().max(1) as i32),
                    target.y.rem_euclid(revealed.height().max(1) as i32),
                );
                revealed.is_set(wrapped)
            }
        }
    };

    let mut mask = WallMask::empty();
    mask.set(WallMask::NORTH, neighbor(0, -1));
    mask.set(WallMask::SOUTH, neighbor(0, 1));
    mask.set(WallMask::WEST, neighbor(-1, 0));
    mask.set(WallMask::EAST, neighbor(1, 0));
    mask
}

/// Rewrites the dark and light codepoints of every revealed wall.
///
/// Pure function of the tiles and both masks: running it twice in a row
/// changes nothing the second time.
pub fn derive_glyphs(grid: &mut TileGrid, policy: EdgePolicy) {
    let revealed = revealed_walls(grid);
    let tiles = grid.tiles_mut();
    for position in revealed.marked() {
        let ch = glyph_for(wall_mask(&revealed, position, policy));
        if let Some(tile) = tiles.get_mut(position) {
            tile.dark.ch = ch;
            tile.light.ch = ch;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Tile;

    /// 5×5 floor with a wall in the middle plus the walls named by `mask`,
    /// everything explored.
    fn plus_grid(mask: WallMask) -> TileGrid {
        let mut grid = TileGrid::from_tiles(Grid::filled(5, 5, Tile::floor()));
        let center = Position::new(2, 2);
        grid.set_tile(center, Tile::wall()).unwrap();
        for (flag, offset) in [
            (WallMask::NORTH, (0, -1)),
            (WallMask::SOUTH, (0, 1)),
            (WallMask::WEST, (-1, 0)),
            (WallMask::EAST, (1, 0)),
        ] {
            if mask.contains(flag) {
                grid.set_tile(center + offset, Tile::wall()).unwrap();
            }
        }
        grid.restore_masks(Grid::filled(5, 5, false), Grid::filled(5, 5, true))
            .unwrap();
        grid
    }

    fn center_glyph(bits: u8) -> char {
        let mut grid = plus_grid(WallMask::from_bits_truncate(bits));
        derive_glyphs(&mut grid, EdgePolicy::Open);
        let tile = grid.tile(Position::new(2, 2)).unwrap();
        assert_eq!(tile.dark.ch, tile.light.ch);
        tile.light.ch
    }

    #[test]
    fn every_mask_maps_to_its_table_glyph() {
        assert_eq!(center_glyph(0), 'O');
        assert_eq!(center_glyph(1), '║');
        assert_eq!(center_glyph(2), '║');
        assert_eq!(center_glyph(3), '║');
        assert_eq!(center_glyph(4), '═');
        assert_eq!(center_glyph(5), '╝');
        assert_eq!(center_glyph(6), '╗');
        assert_eq!(center_glyph(7), '╣');
        assert_eq!(center_glyph(8), '═');
        assert_eq!(center_glyph(9), '╚');
        assert_eq!(center_glyph(10), '╔');
        assert_eq!(center_glyph(11), '╠');
        assert_eq!(center_glyph(12), '═');
        assert_eq!(center_glyph(13), '╩');
        assert_eq!(center_glyph(14), '╦');
        assert_eq!(center_glyph(15), '╬');
    }

    #[test]
    fn unrevealed_walls_and_floors_keep_their_glyphs() {
        let mut grid = TileGrid::from_tiles(Grid::filled(3, 1, Tile::floor()));
        grid.set_tile(Position::new(0, 0), Tile::wall()).unwrap();
        grid.set_tile(Position::new(2, 0), Tile::wall()).unwrap();
        let mut explored = Grid::filled(3, 1, false);
        explored.set(Position::new(0, 0), true).unwrap();
        explored.set(Position::new(1, 0), true).unwrap();
        grid.restore_masks(Grid::filled(3, 1, false), explored).unwrap();

        derive_glyphs(&mut grid, EdgePolicy::Open);

        assert_eq!(grid.tile(Position::new(0, 0)).unwrap().light.ch, 'O');
        assert_eq!(grid.tile(Position::new(1, 0)).unwrap().light.ch, '.');
        assert_eq!(grid.tile(Position::new(2, 0)).unwrap().light.ch, '#');
    }

    #[test]
    fn derive_is_idempotent() {
        let mut grid = plus_grid(WallMask::NORTH | WallMask::EAST);
        derive_glyphs(&mut grid, EdgePolicy::Wrap);
        let once = grid.clone();
        derive_glyphs(&mut grid, EdgePolicy::Wrap);
        assert_eq!(grid, once);
    }

    #[test]
    fn edge_policy_decides_wraparound_neighbors() {
        let mut tiles = Grid::filled(4, 3, Tile::floor());
        tiles.set(Position::new(0, 1), Tile::wall()).unwrap();
        tiles.set(Position::new(3, 1), Tile::wall()).unwrap();
        let mut grid = TileGrid::from_tiles(tiles);
        grid.restore_masks(Grid::filled(4, 3, true), Grid::filled(4, 3, true))
            .unwrap();

        let mut wrapped = grid.clone();
        derive_glyphs(&mut wrapped, EdgePolicy::Wrap);
        assert_eq!(wrapped.tile(Position::new(0, 1)).unwrap().light.ch, '═');
        assert_eq!(wrapped.tile(Position::new(3, 1)).unwrap().light.ch, '═');

        derive_glyphs(&mut grid, EdgePolicy::Open);
        assert_eq!(grid.tile(Position::new(0, 1)).unwrap().light.ch, 'O');
    }
}
