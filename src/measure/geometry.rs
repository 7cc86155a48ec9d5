//! Points and distances.
//!
//! A [`Point2D`] carries no tag for the space it lives in. Callers keep display
//! space and image-native space apart and convert through [`super::zoom`].

/// A location in either display space or image-native space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point in the same space.
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        distance(*self, *other)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Euclidean distance between two points. Both must be in the same space.
pub fn distance(p1: Point2D, p2: Point2D) -> f64 {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    (dx * dx + dy * dy).sqrt()
}
