//! Geometric types for plan coordinates

use serde::{Deserialize, Serialize};

/// A position on the drawing surface in surface-local logical coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates can be drawn and persisted
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A straight segment between two points
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// A segment whose endpoints coincide has nothing to draw
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}
