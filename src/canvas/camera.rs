use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;


use super::{ActiveSession, CanvasCamera};

/// Zoom factor the sprite and camera were last laid out for
#[derive(Resource)]
pub struct AppliedZoom(pub f64);

impl Default for AppliedZoom {
    fn default() -> Self {
        Self(1.0)
    }
}

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        CanvasCamera,
        Transform::from_translation(Vec3::new(0.0, 0.0, 1000.0)),
    ));
}

/// Middle-drag pans the view. Panning moves the camera only; display
/// coordinates stay relative to the image origin.
pub fn camera_pan(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut camera_query: Query<&mut Transform, With<CanvasCamera>>,
) {
    if !mouse_button.pressed(MouseButton::Middle) {
        mouse_motion.clear();
        return;
    }

    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };

    for event in mouse_motion.read() {
        transform.translation.x -= event.delta.x;
        transform.translation.y += event.delta.y;
    }
}

/// Center the camera on an image of the given size at zoom 1.0
pub fn center_camera_on(transform: &mut Transform, width: u32, height: u32) {
    transform.translation.x = width as f32 / 2.0;
    transform.translation.y = -(height as f32) / 2.0;
}

/// Keep the same image point under the view center when the zoom changes.
pub fn follow_zoom(
    session: Res<ActiveSession>,
    mut applied: ResMut<AppliedZoom>,
    mut camera_query: Query<&mut Transform, With<CanvasCamera>>,
) {
    let zoom = session.zoom().factor();
    if zoom == applied.0 {
        return;
    }

    if let Ok(mut transform) = camera_query.single_mut() {
        let ratio = (zoom / applied.0) as f32;
        transform.translation.x *= ratio;
        transform.translation.y *= ratio;
    }
    applied.0 = zoom;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_camera_on_image() {
        let mut transform = Transform::from_translation(Vec3::new(5.0, 5.0, 1000.0));
        center_camera_on(&mut transform, 800, 600);
        assert_eq!(transform.translation, Vec3::new(400.0, -300.0, 1000.0));
    }

    #[test]
    fn test_applied_zoom_default() {
        assert_eq!(AppliedZoom::default().0, 1.0);
    }
}
