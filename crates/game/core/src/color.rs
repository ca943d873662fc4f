//! Color values and the palette shared by tiles, entities and the HUD.

/// 24-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b)
    }
}

pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);
pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);

pub const PLAYER_ATK: Rgb = Rgb(0xE0, 0xE0, 0xE0);
pub const ENEMY_ATK: Rgb = Rgb(0xFF, 0xC0, 0xC0);
pub const WELCOME_TEXT: Rgb = Rgb(0x20, 0xA0, 0xFF);
pub const IMPOSSIBLE: Rgb = Rgb(0x80, 0x80, 0x80);
pub const ERROR: Rgb = Rgb(0xFF, 0x40, 0x40);

pub const BAR_TEXT: Rgb = WHITE;
pub const BAR_FILLED: Rgb = Rgb(0x00, 0x60, 0x00);
pub const BAR_EMPTY: Rgb = Rgb(0x40, 0x10, 0x10);

pub const FLOOR_DARK: Rgb = Rgb(50, 50, 150);
pub const FLOOR_LIGHT: Rgb = Rgb(200, 180, 50);
pub const WALL_DARK: Rgb = Rgb(0, 0, 100);
pub const WALL_LIGHT: Rgb = Rgb(130, 110, 50);
pub const STAIRS_DARK: Rgb = Rgb(0, 0, 100);
pub const STAIRS_LIGHT: Rgb = WHITE;
