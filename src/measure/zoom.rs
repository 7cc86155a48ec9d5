//! Zoom state and the display/image coordinate transform.
//!
//! Display space is image-native space multiplied by the zoom factor, with the
//! image's top-left corner at the origin in both. Recorded points are always
//! kept in image-native space so zooming never changes them.

use super::geometry::Point2D;
use crate::constants::{ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};

/// Map a display-space point to image-native space.
pub fn to_image_space(display_point: Point2D, zoom: f64) -> Point2D {
    Point2D::new(display_point.x / zoom, display_point.y / zoom)
}

/// Map an image-native point to display space.
pub fn to_display_space(image_point: Point2D, zoom: f64) -> Point2D {
    Point2D::new(image_point.x * zoom, image_point.y * zoom)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Multiplicative display scale, always within `[ZOOM_MIN, ZOOM_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom {
    factor: f64,
}

impl Default for Zoom {
    fn default() -> Self {
        Self { factor: 1.0 }
    }
}

impl Zoom {
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Apply one zoom step and clamp. Returns the new factor.
    pub fn step(&mut self, direction: ZoomDirection) -> f64 {
        let next = match direction {
            ZoomDirection::In => self.factor * ZOOM_STEP,
            ZoomDirection::Out => self.factor / ZOOM_STEP,
        };
        self.factor = next.clamp(ZOOM_MIN, ZOOM_MAX);
        self.factor
    }

    pub fn reset(&mut self) {
        self.factor = 1.0;
    }

    pub fn percent(&self) -> f64 {
        self.factor * 100.0
    }

    pub fn to_image_space(&self, display_point: Point2D) -> Point2D {
        to_image_space(display_point, self.factor)
    }

    pub fn to_display_space(&self, image_point: Point2D) -> Point2D {
        to_display_space(image_point, self.factor)
    }
}
