//! SystemParam bundles and coordinate helpers for canvas systems.
//!
//! The image sprite is laid out with its top-left corner at the world origin
//! and scaled by the zoom factor, so display space is world space with the Y
//! axis flipped (world Y grows upward, image rows grow downward).

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::measure::Point2D;

use super::CanvasCamera;

/// Bundled camera and window queries for cursor-to-world calculations
#[derive(SystemParam)]
pub struct CameraParams<'w, 's> {
    pub window: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
    pub camera: Query<'w, 's, (&'static Camera, &'static GlobalTransform), With<CanvasCamera>>,
}

impl CameraParams<'_, '_> {
    /// Get the world position of the cursor, if available
    pub fn cursor_world_pos(&self) -> Option<Vec2> {
        let window = self.window.single().ok()?;
        let (camera, transform) = self.camera.single().ok()?;
        let cursor_pos = window.cursor_position()?;
        camera.viewport_to_world_2d(transform, cursor_pos).ok()
    }

    /// Cursor position in display space
    pub fn cursor_display_pos(&self) -> Option<Point2D> {
        self.cursor_world_pos().map(display_from_world)
    }
}

/// World position to display-space point.
pub fn display_from_world(world: Vec2) -> Point2D {
    Point2D::new(world.x as f64, -world.y as f64)
}

/// Display-space point to world position.
pub fn world_from_display(display: Point2D) -> Vec2 {
    Vec2::new(display.x as f32, -display.y as f32)
}

/// Check if the cursor is over egui UI
pub fn is_cursor_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.is_pointer_over_area())
        .unwrap_or(false)
}
