//! About and Instructions windows.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

#[derive(Resource, Default)]
pub struct HelpWindowState {
    pub about_open: bool,
    pub instructions_open: bool,
}

impl HelpWindowState {
    pub fn is_open(&self) -> bool {
        self.about_open || self.instructions_open
    }
}

pub fn about_ui(mut contexts: EguiContexts, mut help_state: ResMut<HelpWindowState>) -> Result {
    if !help_state.about_open {
        return Ok(());
    }

    let ctx = contexts.ctx_mut()?;

    egui::Window::new("About Image Dimensioner")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.heading("Image Dimensioner");
            ui.horizontal(|ui| {
                ui.label("Version:");
                ui.strong(env!("CARGO_PKG_VERSION"));
            });
            ui.add_space(5.0);
            ui.label("A standalone application for measuring dimensions on diagrams.");
            ui.add_space(5.0);
            ui.label("Features:");
            ui.label("- Load various image formats");
            ui.label("- Calibrate using known distances");
            ui.label("- Measure real-world dimensions");
            ui.add_space(5.0);
            ui.label(egui::RichText::new("Built with Rust, Bevy and egui").weak());
            ui.add_space(10.0);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                if ui.button("Close").clicked() {
                    help_state.about_open = false;
                }
            });
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        help_state.about_open = false;
    }

    Ok(())
}

pub fn instructions_ui(
    mut contexts: EguiContexts,
    mut help_state: ResMut<HelpWindowState>,
) -> Result {
    if !help_state.instructions_open {
        return Ok(());
    }

    let ctx = contexts.ctx_mut()?;

    egui::Window::new("Instructions")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_width(420.0)
        .max_height(600.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("How to Use Image Dimensioner");
                ui.add_space(5.0);

                render_steps_section(ui);

                ui.add_space(10.0);
                ui.separator();

                render_shortcuts_section(ui);

                ui.add_space(10.0);
                ui.separator();

                ui.heading("Tips");
                ui.label("- Calibrate with a longer reference distance for better accuracy");
                ui.label("- You can recalibrate at any time");
                ui.label("- Changing the unit clears the calibration");
                ui.label("- Zoom in on small features; measurements do not depend on zoom");

                ui.add_space(10.0);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                    if ui.button("Close").clicked() {
                        help_state.instructions_open = false;
                    }
                });
            });
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        help_state.instructions_open = false;
    }

    Ok(())
}

fn render_steps_section(ui: &mut egui::Ui) {
    ui.strong("1. Load image");
    ui.label("Use File > Open Image to select an image.");
    ui.label("Supported formats: PNG, JPG, JPEG, BMP, GIF, WEBP, TIFF");
    ui.add_space(5.0);

    ui.strong("2. Calibration");
    ui.label("Select Mode > Calibration.");
    ui.label("Click two points on a known distance in the image.");
    ui.label("Enter the actual physical distance when prompted.");
    ui.label("The calibration factor will be calculated.");
    ui.add_space(5.0);

    ui.strong("3. Measurement");
    ui.label("Select Mode > Measurement.");
    ui.label("Click two points to measure.");
    ui.label("The real-world distance will be displayed.");
}

fn render_shortcuts_section(ui: &mut egui::Ui) {
    ui.heading("Controls");
    egui::Grid::new("controls_grid")
        .num_columns(2)
        .spacing([20.0, 4.0])
        .show(ui, |ui| {
            ui.strong("Left Click");
            ui.label("Select a point");
            ui.end_row();

            ui.strong("Right Click / Esc");
            ui.label("Clear the current selection");
            ui.end_row();

            ui.strong("C");
            ui.label("Calibration mode");
            ui.end_row();

            ui.strong("M");
            ui.label("Measurement mode");
            ui.end_row();

            ui.strong("Mouse Wheel / + / -");
            ui.label("Zoom in and out");
            ui.end_row();

            ui.strong("0");
            ui.label("Reset zoom");
            ui.end_row();

            ui.strong("Middle Mouse Drag");
            ui.label("Pan the view");
            ui.end_row();

            ui.strong("Ctrl+O");
            ui.label("Open image");
            ui.end_row();
        });
}
