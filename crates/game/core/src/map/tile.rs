use crate::color::{self, Rgb};

/// A character cell: codepoint plus foreground and background color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Glyph {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Glyph {
    pub const fn new(ch: char, fg: Rgb, bg: Rgb) -> Self {
        Self { ch, fg, bg }
    }
}

/// Drawn for cells that have never been seen.
pub const SHROUD: Glyph = Glyph::new(' ', color::WHITE, color::BLACK);

/// Static description of one map cell.
///
/// `dark` is drawn for explored cells outside the field of view, `light` for
/// cells currently in view. For cells with `wall_glyph` set, the codepoint of
/// both is rewritten by the autotiler once the wall has been revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub walkable: bool,
    pub transparent: bool,
    pub wall_glyph: bool,
    pub dark: Glyph,
    pub light: Glyph,
}

impl Tile {
    pub const fn new(
        walkable: bool,
        transparent: bool,
        wall_glyph: bool,
        dark: Glyph,
        light: Glyph,
    ) -> Self {
        Self {
            walkable,
            transparent,
            wall_glyph,
            dark,
            light,
        }
    }

    pub const fn floor() -> Self {
        Self::new(
            true,
            true,
            false,
            Glyph::new('.', color::FLOOR_DARK, color::BLACK),
            Glyph::new('.', color::FLOOR_LIGHT, color::BLACK),
        )
    }

    pub const fn wall() -> Self {
        Self::new(
            false,
            false,
            true,
            Glyph::new('#', color::WALL_DARK, color::BLACK),
            Glyph::new('#', color::WALL_LIGHT, color::BLACK),
        )
    }

    pub const fn down_stairs() -> Self {
        Self::new(
            true,
            true,
            false,
            Glyph::new('>', color::STAIRS_DARK, color::BLACK),
            Glyph::new('>', color::STAIRS_LIGHT, color::BLACK),
        )
    }
}
