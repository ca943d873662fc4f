//! HUD widgets: health bar, dungeon level and the names under the mouse.
use crate::color;
use crate::ecs::{ComponentStore, Name, Position, Tag};
use crate::map::{Glyph, TileGrid};

use super::CellRegion;

/// `HP: cur/max` over a bar filled in proportion to `current / maximum`.
pub fn render_bar(current: i32, maximum: i32, total_width: usize) -> CellRegion {
    let mut bar = CellRegion::filled(
        total_width,
        1,
        Glyph::new(' ', color::BAR_TEXT, color::BAR_EMPTY),
    );
    let filled = if maximum > 0 {
        let ratio = current.clamp(0, maximum) as f64 / maximum as f64;
        (ratio * total_width as f64) as usize
    } else {
        0
    };
    for x in 0..filled {
        bar.set_bg(x, 0, color::BAR_FILLED);
    }
    bar.print(1, 0, &format!("HP: {current}/{maximum}"), color::BAR_TEXT);
    bar
}

pub fn render_dungeon_level(level: u32) -> CellRegion {
    CellRegion::text(&format!("Dungeon level: {level}"), color::WHITE, color::BLACK)
}

/// Comma-separated names of the entities standing on `location`, capitalized.
///
/// Empty when the cell is out of bounds or not currently visible.
pub fn names_at(store: &ComponentStore, grid: &TileGrid, location: Position) -> String {
    if !grid.in_bounds(location) || !grid.is_visible(location) {
        return String::new();
    }
    let names: Vec<&str> = store
        .entities_with_tag(&Tag::Position(location))
        .filter_map(|entity| store.get::<Name>(entity))
        .map(Name::as_str)
        .collect();
    capitalize(&names.join(", "))
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
