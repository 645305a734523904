//! Shared geometry and style primitives.
//!
//! Plain value types only: positions and bounding boxes for the
//! movement/collision update, directions with their movement precedence,
//! and the serde-able color model used by the config file. Conversion to
//! crossterm colors happens at the terminal boundary in `game`.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }
}

/// Axis-aligned bounding box stored as its top-left and bottom-right
/// corners. Derived from an entity's position and size on demand, never
/// stored on the entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Rect {
    /// Box of a square entity from its top-left corner and side length.
    pub fn from_corner(pos: Vec2, size: f64) -> Self {
        Rect {
            x1: pos.x,
            y1: pos.y,
            x2: pos.x + size,
            y2: pos.y + size,
        }
    }

    /// Inclusive overlap test: on each axis, one box's near edge must fall
    /// within the other box's span. Touching edges count as overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        span_overlap(self.x1, self.x2, other.x1, other.x2)
            && span_overlap(self.y1, self.y2, other.y1, other.y2)
    }
}

fn span_overlap(a1: f64, a2: f64, b1: f64, b2: f64) -> bool {
    (a1 <= b1 && b1 <= a2) || (b1 <= a1 && a1 <= b2)
}

// ---------------------------------------------------------------------------
// Directions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Movement precedence when several keys are held at once. Exactly one
    /// entry applies per frame, so diagonal movement is impossible.
    pub const PRECEDENCE: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Stable index into per-direction flag arrays.
    pub fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Colors (config file surface)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Named(NamedColor),
    Rgb { r: u8, g: u8, b: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x1: f64, y1: f64, x2: f64, y2: f64) -> Rect {
        Rect { x1, y1, x2, y2 }
    }

    #[test]
    fn overlap_on_both_axes_is_detected() {
        assert!(rect(0.0, 0.0, 2.0, 2.0).overlaps(&rect(1.0, 1.0, 3.0, 3.0)));
    }

    #[test]
    fn separation_on_one_axis_is_clear() {
        // Apart along x, aligned along y.
        assert!(!rect(0.0, 0.0, 2.0, 2.0).overlaps(&rect(2.5, 0.0, 4.5, 2.0)));
        // Apart along y, aligned along x.
        assert!(!rect(0.0, 0.0, 2.0, 2.0).overlaps(&rect(0.0, 2.5, 2.0, 4.5)));
    }

    #[test]
    fn touching_edges_count_as_overlap() {
        assert!(rect(0.0, 0.0, 2.0, 2.0).overlaps(&rect(2.0, 0.0, 4.0, 2.0)));
    }

    #[test]
    fn containment_counts_as_overlap() {
        let outer = rect(0.0, 0.0, 10.0, 10.0);
        let inner = rect(2.0, 2.0, 3.0, 3.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn bounding_box_from_corner() {
        let b = Rect::from_corner(Vec2::new(1.5, 2.0), 3.0);
        assert_eq!(b, rect(1.5, 2.0, 4.5, 5.0));
    }
}
