use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use std::path::Path;

use crate::canvas::ActiveSession;
use crate::measure::LogSink;
use crate::theme;

use super::dialogs::LogExportError;
use super::DialogState;

/// Write the log as `[timestamp] message` lines
pub fn export_log(log: &LogSink, path: &Path) -> Result<(), String> {
    std::fs::write(path, log.to_text()).map_err(|e| format!("Failed to save log: {}", e))
}

pub fn log_panel_ui(
    mut contexts: EguiContexts,
    mut session: ResMut<ActiveSession>,
    mut export_error: ResMut<LogExportError>,
    dialog_state: Res<DialogState>,
) -> Result {
    egui::SidePanel::right("log_panel")
        .default_width(300.0)
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.heading(format!("Log ({})", session.log().len()));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_enabled_ui(!dialog_state.any_modal_open, |ui| {
                        if ui.button("Save Log...").clicked()
                            && let Some(path) = rfd::FileDialog::new()
                                .add_filter("Text Files", &["txt"])
                                .set_directory(crate::paths::default_log_export_dir())
                                .set_file_name("dimensioner-log.txt")
                                .set_title("Save Log")
                                .save_file()
                        {
                            match export_log(session.log(), &path) {
                                Ok(()) => info!("Log saved to {:?}", path),
                                Err(e) => {
                                    error!("{}", e);
                                    export_error.message = Some(e);
                                }
                            }
                        }
                        if ui.button("Clear").clicked() {
                            session.clear_log();
                        }
                    });
                });
            });

            ui.separator();

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    if session.log().is_empty() {
                        ui.label(egui::RichText::new("No entries yet").weak());
                    }
                    for entry in session.log().entries() {
                        ui.horizontal_wrapped(|ui| {
                            ui.label(
                                egui::RichText::new(format!("[{}]", entry.timestamp))
                                    .small()
                                    .color(theme::LOG_TIMESTAMP),
                            );
                            ui.label(entry.message.as_str());
                        });
                    }
                });
        });

    Ok(())
}
