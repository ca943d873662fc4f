//! Tile grid, visibility masks and wall autotiling.
pub mod autotile;
mod error;
mod grid;
mod tile;

pub use autotile::{EdgePolicy, GLYPH_TABLE, WallMask, derive_glyphs};
pub use error::MapError;
pub use grid::{Grid, TileGrid};
pub use tile::{Glyph, SHROUD, Tile};
