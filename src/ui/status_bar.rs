use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::canvas::ActiveSession;
use crate::measure::InteractionMode;
use crate::theme;

fn mode_color(mode: InteractionMode) -> egui::Color32 {
    match mode {
        InteractionMode::Calibration => theme::MODE_CALIBRATION,
        InteractionMode::Measurement => theme::MODE_MEASUREMENT,
    }
}

/// Bottom bar: the session status on the left, mode, unit, scale and zoom
/// on the right.
pub fn status_bar_ui(mut contexts: EguiContexts, session: Res<ActiveSession>) -> Result {
    egui::TopBottomPanel::bottom("status_bar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(8, 4)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.label(session.status());

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("Zoom: {:.0}%", session.zoom().percent()));
                    ui.separator();
                    ui.label(format!("Scale: {}", session.calibration().describe()));
                    ui.separator();
                    ui.label(format!("Unit: {}", session.unit()));
                    ui.separator();
                    ui.colored_label(
                        mode_color(session.mode()),
                        egui::RichText::new(session.mode().display_name()).strong(),
                    );
                });
            });
        });

    Ok(())
}
