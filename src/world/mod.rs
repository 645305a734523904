//! World: the wall collection, the player tank, and the per-frame update.
//!
//! The update is the only logic in the demo with conditional complexity:
//! displace the player along one axis according to its held keys, test the
//! resulting box against every wall, and commit only when nothing
//! overlaps. Everything else here is construction and paint dispatch.

pub mod tank;
pub mod wall;

use crate::map::TileMap;
use crate::renderer::Canvas;
use crate::types::{Color, Direction, Rect, Vec2};

pub use tank::Tank;
pub use wall::Wall;

/// Paint an entity into the offscreen canvas.
///
/// Walls and tanks share nothing else; each concrete kind decides its own
/// appearance.
pub trait Paint {
    fn paint(&self, canvas: &mut Canvas);
}

/// Startup knobs for building a world from a map.
#[derive(Debug, Clone, Copy)]
pub struct WorldOptions {
    /// Width and height of the square play area, in playfield pixels.
    pub playground_width: usize,
    /// Nominal fixed rate of the main loop, in frames per second.
    pub frame_rate: f64,
    /// Grid cell the player spawns in, as `(column, row)`.
    pub spawn_cell: (usize, usize),
    /// Player speed, in playfield pixels per second.
    pub player_speed: f64,
    pub wall_color: Color,
    pub player_color: Color,
}

pub struct World {
    walls: Vec<Wall>,
    player: Tank,
    frame_rate: f64,
    cell_size: f64,
}

impl World {
    pub fn new(map: &TileMap, opts: WorldOptions) -> World {
        // Integer division: remainder pixels stay as unused border.
        let cell = (opts.playground_width / map.columns()) as f64;

        let mut walls = Vec::new();
        for column in 0..map.columns() {
            for row in 0..map.rows() {
                if map.is_wall(column, row) {
                    walls.push(Wall::new(
                        Vec2::new(column as f64 * cell, row as f64 * cell),
                        cell,
                        opts.wall_color,
                    ));
                }
            }
        }

        // The tank body is one pixel smaller than a cell so it can slide
        // through single-cell gaps without touching the walls on either
        // side.
        let size = (cell - 1.0).max(1.0);
        let inset = (cell - size) / 2.0;
        let (column, row) = opts.spawn_cell;
        let spawn = Vec2::new(column as f64 * cell + inset, row as f64 * cell + inset);

        World {
            walls,
            player: Tank::new(spawn, size, opts.player_speed, opts.player_color),
            frame_rate: opts.frame_rate,
            cell_size: cell,
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn player(&self) -> &Tank {
        &self.player
    }

    /// Record a direction key going down (`true`) or up (`false`).
    pub fn set_held(&mut self, direction: Direction, held: bool) {
        self.player.set_held(direction, held);
    }

    /// One frame of movement: tentative displacement, collision test
    /// against every wall, then commit or reject.
    ///
    /// A single overlapping wall rejects the whole move, including along
    /// an axis that was clear.
    pub fn step(&mut self) {
        let step = self.player.speed() / self.frame_rate;
        let tentative = self.player.tentative(step);
        let moved = Rect::from_corner(tentative, self.player.size());
        if !self.blocked(&moved) {
            self.player.set_position(tentative);
        }
    }

    fn blocked(&self, bounds: &Rect) -> bool {
        self.walls
            .iter()
            .any(|wall| bounds.overlaps(&wall.bounding_box()))
    }

    /// Paint walls first, then the player on top.
    pub fn paint(&self, canvas: &mut Canvas) {
        for wall in &self.walls {
            wall.paint(canvas);
        }
        self.player.paint(canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NamedColor;

    fn options(spawn_cell: (usize, usize), player_speed: f64) -> WorldOptions {
        WorldOptions {
            playground_width: 4,
            frame_rate: 30.0,
            spawn_cell,
            player_speed,
            wall_color: Color::Named(NamedColor::Red),
            player_color: Color::Named(NamedColor::White),
        }
    }

    fn open_world(player_speed: f64) -> World {
        let map = TileMap::parse("0 0\n0 0\n").unwrap();
        World::new(&map, options((0, 0), player_speed))
    }

    #[test]
    fn builds_one_wall_per_wall_cell() {
        let map = TileMap::parse("1 1\n1 0\n").unwrap();
        let world = World::new(&map, options((1, 1), 30.0));
        assert_eq!(world.walls().len(), 3);
        assert_eq!(world.cell_size(), 2.0);
    }

    #[test]
    fn holding_right_moves_one_step_per_frame() {
        // 7.5 px/s at 30 fps: a quarter pixel per frame, exactly.
        let mut world = open_world(7.5);
        let start = world.player().position();

        world.set_held(Direction::Right, true);
        for _ in 0..4 {
            world.step();
        }

        let pos = world.player().position();
        assert_eq!(pos.x, start.x + 1.0);
        assert_eq!(pos.y, start.y);
    }

    #[test]
    fn opposite_directions_follow_precedence_instead_of_canceling() {
        let mut world = open_world(7.5);
        let start = world.player().position();

        world.set_held(Direction::Up, true);
        world.set_held(Direction::Down, true);
        world.step();

        let pos = world.player().position();
        assert_eq!(pos.y, start.y - 0.25);
        assert_eq!(pos.x, start.x);
    }

    #[test]
    fn releasing_all_keys_stops_the_tank() {
        let mut world = open_world(7.5);

        world.set_held(Direction::Right, true);
        world.step();
        world.set_held(Direction::Right, false);
        let parked = world.player().position();

        for _ in 0..10 {
            world.step();
        }
        assert_eq!(world.player().position(), parked);
    }

    #[test]
    fn move_into_a_wall_is_rejected_outright() {
        // Walls everywhere except the bottom-right cell; the player spawns
        // there, and one frame moves exactly one pixel.
        let map = TileMap::parse("1 1\n1 0\n").unwrap();
        let mut world = World::new(&map, options((1, 1), 30.0));
        let spawn = world.player().position();

        world.set_held(Direction::Up, true);
        world.step();
        assert_eq!(world.player().position(), spawn);

        world.set_held(Direction::Up, false);
        for _ in 0..5 {
            world.step();
        }
        assert_eq!(world.player().position(), spawn);
    }
}
