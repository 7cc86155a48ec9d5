//! Modal dialogs: the reference distance prompt, result and problem notices,
//! image load feedback and the config reset notice.

use std::collections::VecDeque;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::canvas::{ActiveSession, ImageLoadError, ImageLoadState};
use crate::config::ConfigResetNotification;
use crate::measure::{KnownDistance, Notification, NotificationKind, Point2D};
use crate::theme;

/// A calibration click held back while the user types the reference distance
#[derive(Resource, Default)]
pub struct ReferencePromptState {
    held: Option<Point2D>,
    pub pixel_distance: f64,
    pub unit: String,
    pub input: String,
    focus_requested: bool,
}

impl ReferencePromptState {
    pub fn open(&mut self, display_point: Point2D, pixel_distance: f64, unit: &str) {
        self.held = Some(display_point);
        self.pixel_distance = pixel_distance;
        self.unit = unit.to_string();
        self.input.clear();
        self.focus_requested = false;
    }

    pub fn is_open(&self) -> bool {
        self.held.is_some()
    }

    /// Display-space position of the held click
    pub fn held_point(&self) -> Option<Point2D> {
        self.held
    }

    fn take(&mut self) -> Option<Point2D> {
        self.input.clear();
        self.held.take()
    }
}

/// Interpret the text typed into the reference prompt.
pub fn parse_reference_input(input: &str) -> KnownDistance {
    match input.trim().parse::<f64>() {
        Ok(value) => KnownDistance::Entered(value),
        Err(_) => KnownDistance::Missing,
    }
}

pub fn reference_prompt_ui(
    mut contexts: EguiContexts,
    mut prompt: ResMut<ReferencePromptState>,
    mut session: ResMut<ActiveSession>,
) -> Result {
    if !prompt.is_open() {
        return Ok(());
    }

    let ctx = contexts.ctx_mut()?;
    let mut answer = None;

    egui::Window::new("Calibration")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!("Pixel distance: {:.2} pixels", prompt.pixel_distance));
            ui.label(format!(
                "Enter the actual distance between the two points (in {}):",
                prompt.unit
            ));

            let response = ui.text_edit_singleline(&mut prompt.input);
            if !prompt.focus_requested {
                response.request_focus();
                prompt.focus_requested = true;
            }
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                answer = Some(parse_reference_input(&prompt.input));
            }

            ui.add_space(5.0);
            ui.horizontal(|ui| {
                if ui.button("OK").clicked() {
                    answer = Some(parse_reference_input(&prompt.input));
                }
                if ui.button("Cancel").clicked() {
                    answer = Some(KnownDistance::Cancelled);
                }
            });
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        answer = Some(KnownDistance::Cancelled);
    }

    if let Some(mut answer) = answer
        && let Some(point) = prompt.take()
    {
        session.click(point, &mut answer);
    }

    Ok(())
}

/// Results and problems waiting to be acknowledged, oldest first
#[derive(Resource, Default)]
pub struct NotificationQueue {
    pub pending: VecDeque<Notification>,
}

impl NotificationQueue {
    pub fn is_showing(&self) -> bool {
        !self.pending.is_empty()
    }
}

/// Move notifications out of the session into the dialog queue
pub fn collect_notifications(
    mut session: ResMut<ActiveSession>,
    mut queue: ResMut<NotificationQueue>,
) {
    if !session.has_notifications() {
        return;
    }
    queue.pending.extend(session.take_notifications());
}

fn kind_color(kind: NotificationKind) -> Option<egui::Color32> {
    match kind {
        NotificationKind::Info => None,
        NotificationKind::Warning => Some(theme::NOTICE_WARNING),
        NotificationKind::Error => Some(theme::NOTICE_ERROR),
    }
}

pub fn notification_dialog_ui(
    mut contexts: EguiContexts,
    mut queue: ResMut<NotificationQueue>,
    prompt: Res<ReferencePromptState>,
) -> Result {
    if prompt.is_open() {
        return Ok(());
    }
    let Some(notification) = queue.pending.front() else {
        return Ok(());
    };

    let ctx = contexts.ctx_mut()?;
    let mut dismissed = false;

    egui::Window::new(notification.title())
        .id(egui::Id::new("notification_dialog"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            let message = notification.message();
            match kind_color(notification.kind()) {
                Some(color) => ui.colored_label(color, message),
                None => ui.label(message),
            };
            ui.add_space(5.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Escape)) {
        dismissed = true;
    }

    if dismissed {
        queue.pending.pop_front();
    }

    Ok(())
}

/// Modal shown while an image decodes
pub fn image_loading_modal_ui(mut contexts: EguiContexts, load_state: Res<ImageLoadState>) -> Result {
    if !load_state.is_loading {
        return Ok(());
    }

    egui::Window::new("Loading")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(
                    load_state
                        .description
                        .as_deref()
                        .unwrap_or("Loading image..."),
                );
            });
        });

    Ok(())
}

pub fn image_load_error_ui(
    mut contexts: EguiContexts,
    mut load_error: ResMut<ImageLoadError>,
) -> Result {
    let Some(message) = load_error.message.clone() else {
        return Ok(());
    };

    egui::Window::new("Error")
        .id(egui::Id::new("image_load_error"))
        .collapsible(false)
        .resizable(true)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                ui.colored_label(theme::NOTICE_ERROR, message);
            });
            if ui.button("OK").clicked() {
                load_error.message = None;
            }
        });

    Ok(())
}

/// Error from exporting the log, shown until dismissed
#[derive(Resource, Default)]
pub struct LogExportError {
    pub message: Option<String>,
}

pub fn log_export_error_ui(
    mut contexts: EguiContexts,
    mut export_error: ResMut<LogExportError>,
) -> Result {
    let Some(message) = export_error.message.clone() else {
        return Ok(());
    };

    egui::Window::new("Save Log")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.colored_label(theme::NOTICE_ERROR, message);
            if ui.button("OK").clicked() {
                export_error.message = None;
            }
        });

    Ok(())
}

/// Shown once at start-up when the config file could not be used
pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    egui::Window::new("Configuration Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Your settings could not be loaded and were reset to defaults.");
            if let Some(ref reason) = notification.reason {
                ui.add_space(5.0);
                ui.label(egui::RichText::new(reason).weak());
            }
            ui.add_space(10.0);
            if ui.button("OK").clicked() {
                notification.show = false;
                notification.reason = None;
            }
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference_number() {
        assert_eq!(parse_reference_input("10"), KnownDistance::Entered(10.0));
        assert_eq!(parse_reference_input(" 2.54 "), KnownDistance::Entered(2.54));
    }

    #[test]
    fn test_parse_reference_empty_is_missing() {
        assert_eq!(parse_reference_input(""), KnownDistance::Missing);
        assert_eq!(parse_reference_input("   "), KnownDistance::Missing);
    }

    #[test]
    fn test_parse_reference_garbage_is_missing() {
        assert_eq!(parse_reference_input("ten"), KnownDistance::Missing);
        assert_eq!(parse_reference_input("10 cm"), KnownDistance::Missing);
    }

    #[test]
    fn test_parse_reference_keeps_non_positive() {
        // Rejected later by the calibration, not by the parser
        assert_eq!(parse_reference_input("-3"), KnownDistance::Entered(-3.0));
        assert_eq!(parse_reference_input("0"), KnownDistance::Entered(0.0));
    }

    #[test]
    fn test_prompt_state_holds_click() {
        let mut prompt = ReferencePromptState::default();
        assert!(!prompt.is_open());

        prompt.open(Point2D::new(40.0, 30.0), 50.0, "mm");
        prompt.input.push_str("12");
        assert!(prompt.is_open());
        assert_eq!(prompt.held_point(), Some(Point2D::new(40.0, 30.0)));
        assert_eq!(prompt.unit, "mm");

        assert_eq!(prompt.take(), Some(Point2D::new(40.0, 30.0)));
        assert!(!prompt.is_open());
        assert!(prompt.input.is_empty());
    }

    #[test]
    fn test_held_click_completes_calibration() {
        use crate::measure::{LoadedImage, MeasureSession};

        let mut session = MeasureSession::new("cm");
        session.load_image(LoadedImage {
            path: "ruler.png".into(),
            width: 400,
            height: 300,
        });
        session.click(Point2D::new(100.0, 50.0), &mut KnownDistance::Cancelled);

        let mut prompt = ReferencePromptState::default();
        let second = Point2D::new(200.0, 50.0);
        let span = session.prospective_span(second).unwrap();
        prompt.open(second, span, session.unit());
        prompt.input.push_str("10");

        let mut answer = parse_reference_input(&prompt.input);
        let point = prompt.take().unwrap();
        session.click(point, &mut answer);

        assert_eq!(session.calibration().factor(), Some(0.1));
    }

    #[test]
    fn test_kind_colors() {
        assert_eq!(kind_color(NotificationKind::Info), None);
        assert_eq!(kind_color(NotificationKind::Error), Some(theme::NOTICE_ERROR));
    }
}
