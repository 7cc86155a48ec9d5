mod help;
mod log_panel;
mod menu_bar;
mod status_bar;

pub mod dialogs;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::canvas::{ImageLoadError, ImageLoadState};
use crate::config::ConfigResetNotification;

use dialogs::{LogExportError, NotificationQueue, ReferencePromptState};
use help::HelpWindowState;

/// Resource that tracks whether any modal dialog is currently open.
/// Canvas input handlers check this so clicks and shortcuts don't reach the
/// session while the user is answering a dialog.
#[derive(Resource, Default)]
pub struct DialogState {
    /// True when any modal dialog is open that should block canvas input
    pub any_modal_open: bool,
}

/// System to aggregate all dialog open states into a single resource.
/// Runs in First schedule before input handlers.
fn update_dialog_state(
    prompt: Res<ReferencePromptState>,
    notifications: Res<NotificationQueue>,
    help: Res<HelpWindowState>,
    config_reset: Res<ConfigResetNotification>,
    load_state: Res<ImageLoadState>,
    load_error: Res<ImageLoadError>,
    export_error: Res<LogExportError>,
    mut dialog_state: ResMut<DialogState>,
) {
    dialog_state.any_modal_open = prompt.is_open()
        || notifications.is_showing()
        || help.is_open()
        || config_reset.show
        || load_state.is_loading
        || load_error.message.is_some()
        || export_error.message.is_some();
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogState>()
            .init_resource::<ReferencePromptState>()
            .init_resource::<NotificationQueue>()
            .init_resource::<HelpWindowState>()
            .init_resource::<LogExportError>()
            .add_systems(Update, dialogs::collect_notifications)
            // Top and bottom bars span the window, the log panel fits between
            // them. Use chain() to enforce ordering
            .add_systems(
                EguiPrimaryContextPass,
                (
                    menu_bar::menu_bar_ui,
                    status_bar::status_bar_ui,
                    log_panel::log_panel_ui,
                )
                    .chain(),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    // Last: dialogs/overlays
                    dialogs::reference_prompt_ui,
                    dialogs::notification_dialog_ui,
                    dialogs::image_loading_modal_ui,
                    dialogs::image_load_error_ui,
                    dialogs::log_export_error_ui,
                    dialogs::config_reset_notification_ui,
                    help::about_ui,
                    help::instructions_ui,
                )
                    .after(log_panel::log_panel_ui),
            )
            // Update dialog state at the start of each frame
            .add_systems(First, update_dialog_state);
    }
}
