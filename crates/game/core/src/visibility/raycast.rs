use crate::ecs::Position;
use crate::map::Grid;

use super::FovProvider;

/// Simple ray-casting field of view.
///
/// Casts a Bresenham line from the origin to every cell on the perimeter of
/// the `radius` square and walks it until it leaves the circle or hits an
/// opaque cell. Opaque cells are themselves visible; the origin always is.
#[derive(Clone, Copy, Debug, Default)]
pub struct RayCastFov;

impl FovProvider for RayCastFov {
    fn compute(&self, transparency: &Grid<bool>, origin: Position, radius: u32) -> Grid<bool> {
        let mut visible = Grid::filled(transparency.width(), transparency.height(), false);
        if !transparency.contains(origin) {
            return visible;
        }
        if let Some(cell) = visible.get_mut(origin) {
            *cell = true;
        }

        let r = radius as i32;
        let limit = i64::from(r) * i64::from(r);
        for target in perimeter(origin, r) {
            for step in Line::new(origin, target).skip(1) {
                let (dx, dy) = (i64::from(step.x - origin.x), i64::from(step.y - origin.y));
                if dx * dx + dy * dy > limit {
                    break;
                }
                let Some(cell) = visible.get_mut(step) else {
                    break;
                };
                *cell = true;
                if !transparency.is_set(step) {
                    break;
                }
            }
        }
        visible
    }
}

fn perimeter(center: Position, r: i32) -> impl Iterator<Item = Position> {
    let horizontal = (-r..=r).flat_map(move |dx| [center + (dx, -r), center + (dx, r)]);
    let vertical = (-r + 1..r).flat_map(move |dy| [center + (-r, dy), center + (r, dy)]);
    horizontal.chain(vertical)
}

/// Integer Bresenham walk from `from` to `to`, both ends inclusive.
struct Line {
    current: Position,
    end: Position,
    dx: i32,
    dy: i32,
    sx: i32,
    sy: i32,
    err: i32,
    done: bool,
}

impl Line {
    fn new(from: Position, to: Position) -> Self {
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        Self {
            current: from,
            end: to,
            dx,
            dy,
            sx: if from.x < to.x { 1 } else { -1 },
            sy: if from.y < to.y { 1 } else { -1 },
            err: dx + dy,
            done: false,
        }
    }
}

impl Iterator for Line {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.done {
            return None;
        }
        let point = self.current;
        if point == self.end {
            self.done = true;
            return Some(point);
        }
        let e2 = 2 * self.err;
        if e2 >= self.dy {
            self.err += self.dy;
            self.current.x += self.sx;
        }
        if e2 <= self.dx {
            self.err += self.dx;
            self.current.y += self.sy;
        }
        Some(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_includes_both_ends() {
        let points: Vec<_> = Line::new(Position::new(0, 0), Position::new(3, 1)).collect();
        assert_eq!(points.first(), Some(&Position::new(0, 0)));
        assert_eq!(points.last(), Some(&Position::new(3, 1)));
        assert_eq!(points.len(), 4);
    }

    #[test]
    fn walls_block_but_are_seen() {
        // . . # . .
        let mut transparency = Grid::filled(5, 1, true);
        transparency.set(Position::new(2, 0), false).unwrap();

        let visible = RayCastFov.compute(&transparency, Position::new(0, 0), 8);

        assert!(visible.is_set(Position::new(0, 0)));
        assert!(visible.is_set(Position::new(1, 0)));
        assert!(visible.is_set(Position::new(2, 0)));
        assert!(!visible.is_set(Position::new(3, 0)));
    }

    #[test]
    fn radius_is_circular() {
        let transparency = Grid::filled(11, 11, true);
        let visible = RayCastFov.compute(&transparency, Position::new(5, 5), 3);

        assert!(visible.is_set(Position::new(8, 5)));
        assert!(visible.is_set(Position::new(7, 7)));
        assert!(!visible.is_set(Position::new(8, 8)));
        assert!(!visible.is_set(Position::new(9, 5)));
    }

    #[test]
    fn origin_off_grid_sees_nothing() {
        let transparency = Grid::filled(3, 3, true);
        let visible = RayCastFov.compute(&transparency, Position::new(-1, 0), 4);
        assert_eq!(visible.marked().count(), 0);
    }
}
