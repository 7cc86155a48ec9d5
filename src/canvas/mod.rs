//! The image canvas: camera, image sprite, point input and markers.

mod camera;
mod conditions;
pub mod image;
mod input;
mod markers;
pub mod params;

pub use image::{ImageLoadError, ImageLoadState, LoadImageRequest};

use bevy::prelude::*;

use crate::config::{AppConfig, ConfigLoaded};
use crate::measure::MeasureSession;
use crate::theme;

/// The measurement session driven by canvas input and the UI
#[derive(Resource, Default, Deref, DerefMut)]
pub struct ActiveSession(pub MeasureSession);

/// Marker for the camera looking at the image
#[derive(Component)]
pub struct CanvasCamera;

/// Start the session with the unit remembered from the last run
fn init_session_from_config(config: Res<AppConfig>, mut session: ResMut<ActiveSession>) {
    session.0 = MeasureSession::new(config.data.default_unit.clone());
    info!("Session started with unit {}", session.unit());
}

pub struct CanvasPlugin;

impl Plugin for CanvasPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(theme::CANVAS_BACKGROUND))
            .init_resource::<ActiveSession>()
            .init_resource::<ImageLoadState>()
            .init_resource::<ImageLoadError>()
            .init_resource::<camera::AppliedZoom>()
            .add_message::<LoadImageRequest>()
            .add_systems(
                Startup,
                (
                    camera::spawn_camera,
                    init_session_from_config.after(ConfigLoaded),
                ),
            )
            .add_systems(
                Update,
                (
                    image::load_image_system.run_if(on_message::<LoadImageRequest>),
                    image::poll_image_tasks,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    input::handle_shortcuts,
                    input::handle_wheel_zoom.run_if(conditions::image_loaded),
                    input::handle_click.run_if(conditions::mouse_clicked),
                    camera::camera_pan,
                )
                    .run_if(conditions::no_dialog_open)
                    .after(image::poll_image_tasks),
            )
            .add_systems(
                Update,
                (image::sync_image_sprite, camera::follow_zoom)
                    .chain()
                    .run_if(conditions::zoom_changed)
                    .after(input::handle_wheel_zoom)
                    .after(input::handle_shortcuts),
            )
            .add_systems(
                Update,
                markers::draw_markers
                    .run_if(conditions::image_loaded)
                    .after(camera::follow_zoom),
            );
    }
}
