//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1000.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 700.0;

/// Smallest allowed zoom factor
pub const ZOOM_MIN: f64 = 0.1;

/// Largest allowed zoom factor
pub const ZOOM_MAX: f64 = 5.0;

/// Ratio applied per zoom-in step (zoom-out divides by it)
pub const ZOOM_STEP: f64 = 1.1;

/// Pixel-unit wheel travel (touchpads) that counts as one zoom step
pub const WHEEL_PIXELS_PER_STEP: f32 = 50.0;

/// Calibration points closer than this many image pixels are rejected.
pub const MIN_POINT_SEPARATION: f64 = 1.0;

/// Unit label used until the user picks another one
pub const DEFAULT_UNIT: &str = "cm";

/// Unit labels offered in the unit selector
pub const UNIT_PRESETS: [&str; 6] = ["mm", "cm", "m", "in", "ft", "yd"];

/// File extensions offered by the open-image dialog
pub const IMAGE_EXTENSIONS: [&str; 8] = ["png", "jpg", "jpeg", "bmp", "gif", "webp", "tif", "tiff"];

/// Maximum number of recent images to remember in config
pub const MAX_RECENT_IMAGES: usize = 8;

/// Radius of a pending point marker, in screen pixels
pub const POINT_MARKER_RADIUS: f32 = 5.0;
