use crate::renderer::Canvas;
use crate::types::{Color, Direction, Rect, Vec2};

use super::Paint;

/// The player's tank: a square body with per-direction held-key state.
#[derive(Debug, Clone)]
pub struct Tank {
    position: Vec2,
    size: f64,
    speed: f64,
    color: Color,
    /// Indexed by `Direction::index`.
    held: [bool; 4],
}

impl Tank {
    pub fn new(position: Vec2, size: f64, speed: f64, color: Color) -> Self {
        Tank {
            position,
            size,
            speed,
            color,
            held: [false; 4],
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_held(&mut self, direction: Direction, held: bool) {
        self.held[direction.index()] = held;
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        self.held[direction.index()]
    }

    /// Position after one frame's displacement, before any collision
    /// check. The first held direction in precedence order wins; one axis
    /// only.
    pub fn tentative(&self, step: f64) -> Vec2 {
        let mut next = self.position;
        for direction in Direction::PRECEDENCE {
            if !self.is_held(direction) {
                continue;
            }
            match direction {
                Direction::Up => next.y -= step,
                Direction::Down => next.y += step,
                Direction::Left => next.x -= step,
                Direction::Right => next.x += step,
            }
            break;
        }
        next
    }

    pub(crate) fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::from_corner(self.position, self.size)
    }
}

impl Paint for Tank {
    fn paint(&self, canvas: &mut Canvas) {
        canvas.fill_rect(&self.bounding_box(), self.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NamedColor;

    fn tank() -> Tank {
        Tank::new(
            Vec2::new(4.0, 4.0),
            1.0,
            6.0,
            Color::Named(NamedColor::White),
        )
    }

    #[test]
    fn idle_tank_does_not_drift() {
        let t = tank();
        assert_eq!(t.tentative(0.5), t.position());
    }

    #[test]
    fn tentative_moves_along_exactly_one_axis() {
        let mut t = tank();
        t.set_held(Direction::Left, true);
        t.set_held(Direction::Down, true);

        // Down precedes left; x must stay put.
        let next = t.tentative(0.5);
        assert_eq!(next, Vec2::new(4.0, 4.5));
    }
}
