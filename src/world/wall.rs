use crate::renderer::Canvas;
use crate::types::{Color, Rect, Vec2};

use super::Paint;

/// A brick wall tile. Immutable once placed; walls live exactly as long as
/// the world that owns them.
#[derive(Debug, Clone)]
pub struct Wall {
    position: Vec2,
    size: f64,
    color: Color,
}

impl Wall {
    pub fn new(position: Vec2, size: f64, color: Color) -> Self {
        Wall {
            position,
            size,
            color,
        }
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::from_corner(self.position, self.size)
    }
}

impl Paint for Wall {
    fn paint(&self, canvas: &mut Canvas) {
        canvas.fill_rect(&self.bounding_box(), self.color);
    }
}
