//! Mouse and keyboard input on the canvas.

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::config::AppConfig;
use crate::constants::WHEEL_PIXELS_PER_STEP;
use crate::measure::{InteractionMode, KnownDistance, ZoomDirection};
use crate::ui::dialogs::ReferencePromptState;

use super::image::{pick_image_file, LoadImageRequest};
use super::params::{is_cursor_over_ui, CameraParams};
use super::ActiveSession;

/// Left click selects a point, right click drops the current selection.
///
/// A click that would complete a calibration pair is held back and the
/// reference prompt opens; the prompt delivers it once the user answers.
pub fn handle_click(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut session: ResMut<ActiveSession>,
    mut prompt: ResMut<ReferencePromptState>,
    camera: CameraParams,
    mut contexts: EguiContexts,
) {
    if is_cursor_over_ui(&mut contexts) {
        return;
    }

    // Right click cancels
    if mouse_button.just_pressed(MouseButton::Right) {
        session.cancel_pending();
        return;
    }

    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }

    let Some(display_point) = camera.cursor_display_pos() else {
        return;
    };

    match session.prospective_span(display_point) {
        Some(span) => prompt.open(display_point, span, session.unit()),
        None => session.click(display_point, &mut KnownDistance::Cancelled),
    }
}

/// Turn one wheel event into a signed number of zoom steps. Mouse wheels
/// report lines and step once per notch; touchpads report pixels, which
/// add up in `pending` until they cover a whole step.
fn wheel_steps(pending: &mut f32, unit: MouseScrollUnit, y: f32) -> i32 {
    match unit {
        MouseScrollUnit::Line => {
            *pending = 0.0;
            if y > 0.0 {
                1
            } else if y < 0.0 {
                -1
            } else {
                0
            }
        }
        MouseScrollUnit::Pixel => {
            *pending += y;
            let steps = (*pending / WHEEL_PIXELS_PER_STEP).trunc();
            *pending -= steps * WHEEL_PIXELS_PER_STEP;
            steps as i32
        }
    }
}

/// One zoom step per wheel notch, or per `WHEEL_PIXELS_PER_STEP` of
/// touchpad travel
pub fn handle_wheel_zoom(
    mut scroll_events: MessageReader<MouseWheel>,
    mut session: ResMut<ActiveSession>,
    mut contexts: EguiContexts,
    mut pending_pixels: Local<f32>,
) {
    if is_cursor_over_ui(&mut contexts) {
        scroll_events.clear();
        *pending_pixels = 0.0;
        return;
    }

    for event in scroll_events.read() {
        let steps = wheel_steps(&mut pending_pixels, event.unit, event.y);
        let direction = if steps > 0 {
            ZoomDirection::In
        } else {
            ZoomDirection::Out
        };
        for _ in 0..steps.unsigned_abs() {
            session.zoom_step(direction);
        }
    }
}

pub fn handle_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<ActiveSession>,
    config: Res<AppConfig>,
    mut load_events: MessageWriter<LoadImageRequest>,
    mut contexts: EguiContexts,
) {
    // Don't react to keys while typing in a text field
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }

    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);

    if ctrl {
        if keyboard.just_pressed(KeyCode::KeyO)
            && let Some(path) = pick_image_file(config.data.last_image_dir.as_deref())
        {
            load_events.write(LoadImageRequest { path });
        }
        return;
    }

    if keyboard.just_pressed(KeyCode::KeyC) {
        session.switch_to(InteractionMode::Calibration);
    } else if keyboard.just_pressed(KeyCode::KeyM) {
        session.switch_to(InteractionMode::Measurement);
    } else if keyboard.just_pressed(KeyCode::Escape) {
        session.cancel_pending();
    }

    if session.image().is_none() {
        return;
    }

    if keyboard.any_just_pressed([KeyCode::Equal, KeyCode::NumpadAdd]) {
        session.zoom_step(ZoomDirection::In);
    } else if keyboard.any_just_pressed([KeyCode::Minus, KeyCode::NumpadSubtract]) {
        session.zoom_step(ZoomDirection::Out);
    } else if keyboard.any_just_pressed([KeyCode::Digit0, KeyCode::Numpad0]) {
        session.reset_zoom();
    }
}
