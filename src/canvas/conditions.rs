//! Run conditions for canvas systems.

use bevy::prelude::*;

use crate::ui::DialogState;

use super::camera::AppliedZoom;
use super::ActiveSession;

/// Run condition: returns true when no modal dialog is open.
///
/// Usage: `.run_if(no_dialog_open)`
pub fn no_dialog_open(dialog_state: Res<DialogState>) -> bool {
    !dialog_state.any_modal_open
}

/// Run condition: returns true once an image is on screen.
pub fn image_loaded(session: Res<ActiveSession>) -> bool {
    session.image().is_some()
}

/// Run condition: returns true on a left or right click. Clicks without an
/// image still reach the session so the user is told to load one first.
pub fn mouse_clicked(mouse_button: Res<ButtonInput<MouseButton>>) -> bool {
    mouse_button.any_just_pressed([MouseButton::Left, MouseButton::Right])
}

/// Run condition: returns true when the session zoom differs from the
/// layout last applied to the sprite and camera.
pub fn zoom_changed(session: Res<ActiveSession>, applied: Res<AppliedZoom>) -> bool {
    session.zoom().factor() != applied.0
}
