use bevy::app::AppExit;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::canvas::image::pick_image_file;
use crate::canvas::{ActiveSession, LoadImageRequest};
use crate::config::{AppConfig, SaveConfigRequest, SetDefaultUnitRequest};
use crate::constants::UNIT_PRESETS;
use crate::measure::{InteractionMode, MeasureSession, ZoomDirection};

use super::help::HelpWindowState;
use super::DialogState;

/// Label for a recent image entry
fn recent_label(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[allow(clippy::too_many_arguments)]
pub fn menu_bar_ui(
    mut contexts: EguiContexts,
    mut session: ResMut<ActiveSession>,
    mut config: ResMut<AppConfig>,
    mut help_state: ResMut<HelpWindowState>,
    dialog_state: Res<DialogState>,
    mut load_events: MessageWriter<LoadImageRequest>,
    mut unit_events: MessageWriter<SetDefaultUnitRequest>,
    mut save_events: MessageWriter<SaveConfigRequest>,
    mut exit_events: MessageWriter<AppExit>,
) -> Result {
    egui::TopBottomPanel::top("menu_bar").show(contexts.ctx_mut()?, |ui| {
        ui.add_enabled_ui(!dialog_state.any_modal_open, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        if let Some(path) = pick_image_file(config.data.last_image_dir.as_deref())
                        {
                            load_events.write(LoadImageRequest { path });
                        }
                        ui.close();
                    }

                    ui.add_enabled_ui(!config.data.recent_images.is_empty(), |ui| {
                        ui.menu_button("Open Recent", |ui| {
                            let mut chosen = None;
                            for path in &config.data.recent_images {
                                if ui
                                    .button(recent_label(path))
                                    .on_hover_text(path.display().to_string())
                                    .clicked()
                                {
                                    chosen = Some(path.clone());
                                }
                            }

                            ui.separator();

                            if ui.button("Clear Recent").clicked() {
                                config.data.recent_images.clear();
                                config.dirty = true;
                                save_events.write(SaveConfigRequest);
                                ui.close();
                            }

                            if let Some(path) = chosen {
                                load_events.write(LoadImageRequest { path });
                                ui.close();
                            }
                        });
                    });

                    ui.separator();

                    if ui.button("Exit").clicked() {
                        exit_events.write(AppExit::Success);
                        ui.close();
                    }
                });

                ui.menu_button("Mode", |ui| {
                    for mode in InteractionMode::all() {
                        let label = format!("{} ({})", mode.display_name(), mode_shortcut(*mode));
                        if ui
                            .selectable_label(session.mode() == *mode, label)
                            .clicked()
                        {
                            session.switch_to(*mode);
                            ui.close();
                        }
                    }
                });

                ui.menu_button("Unit", |ui| {
                    for unit in UNIT_PRESETS {
                        if ui.selectable_label(session.unit() == unit, unit).clicked() {
                            unit_events.write(select_unit(&mut session, unit));
                            ui.close();
                        }
                    }
                });

                ui.menu_button("View", |ui| {
                    let has_image = session.image().is_some();
                    if ui
                        .add_enabled(has_image, egui::Button::new("Zoom In (+)"))
                        .clicked()
                    {
                        session.zoom_step(ZoomDirection::In);
                        ui.close();
                    }
                    if ui
                        .add_enabled(has_image, egui::Button::new("Zoom Out (-)"))
                        .clicked()
                    {
                        session.zoom_step(ZoomDirection::Out);
                        ui.close();
                    }
                    if ui
                        .add_enabled(has_image, egui::Button::new("Reset Zoom (0)"))
                        .clicked()
                    {
                        session.reset_zoom();
                        ui.close();
                    }
                });

                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        help_state.about_open = true;
                        ui.close();
                    }
                    if ui.button("Instructions").clicked() {
                        help_state.instructions_open = true;
                        ui.close();
                    }
                });
            });
        });
    });

    Ok(())
}

/// Apply a unit picked from the menu. Picking the current unit again still
/// resets the calibration, since the user asked to measure in it afresh.
fn select_unit(session: &mut MeasureSession, unit: &str) -> SetDefaultUnitRequest {
    session.change_unit(unit);
    SetDefaultUnitRequest {
        unit: unit.to_string(),
    }
}

fn mode_shortcut(mode: InteractionMode) -> &'static str {
    match mode {
        InteractionMode::Calibration => "C",
        InteractionMode::Measurement => "M",
    }
}
