//! Image loading and display.
//!
//! Decoding runs on the IO task pool; the result is turned into a sprite and
//! handed to the measurement session on the main thread.

use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy::tasks::{IoTaskPool, Task};
use futures_lite::future;
use std::path::{Path, PathBuf};

use crate::config::AddRecentImageRequest;
use crate::constants::IMAGE_EXTENSIONS;
use crate::measure::LoadedImage;

use super::camera::{center_camera_on, AppliedZoom};
use super::{ActiveSession, CanvasCamera};

#[derive(Message)]
pub struct LoadImageRequest {
    pub path: PathBuf,
}

/// Marker for the sprite showing the loaded image
#[derive(Component)]
pub struct ImageSprite {
    pub width: u32,
    pub height: u32,
}

#[derive(Component)]
pub struct LoadImageTask(pub Task<LoadImageResult>);

/// Raw RGBA8 pixels decoded off the main thread
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub struct LoadImageResult {
    pub path: PathBuf,
    pub image: Result<DecodedImage, String>,
}

/// Resource tracking an in-flight image load
#[derive(Resource, Default)]
pub struct ImageLoadState {
    pub is_loading: bool,
    pub description: Option<String>,
}

/// Resource holding the last image load failure, shown until dismissed
#[derive(Resource, Default)]
pub struct ImageLoadError {
    pub message: Option<String>,
}

/// Show the open-image dialog, starting in the last used directory
pub fn pick_image_file(last_dir: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .add_filter("Image Files", &IMAGE_EXTENSIONS)
        .add_filter("All Files", &["*"])
        .set_title("Open Image");
    if let Some(dir) = last_dir.filter(|dir| dir.is_dir()) {
        dialog = dialog.set_directory(dir);
    }
    dialog.pick_file()
}

/// Decode an image file into RGBA8 pixels
pub fn decode_image(path: &Path) -> Result<DecodedImage, String> {
    let image = image::open(path).map_err(|e| format!("Failed to load image: {}", e))?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err("Failed to load image: image has no pixels".to_string());
    }

    Ok(DecodedImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

/// Wrap decoded pixels in a bevy texture
pub fn to_bevy_image(decoded: DecodedImage) -> Image {
    Image::new(
        Extent3d {
            width: decoded.width,
            height: decoded.height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        decoded.rgba,
        TextureFormat::Rgba8UnormSrgb,
        default(),
    )
}

/// Sprite size and center for an image at the given zoom, with the image's
/// top-left corner pinned to the world origin.
pub fn sprite_layout(width: u32, height: u32, zoom: f64) -> (Vec2, Vec2) {
    let size = Vec2::new(width as f32, height as f32) * zoom as f32;
    let center = Vec2::new(size.x / 2.0, -size.y / 2.0);
    (size, center)
}

/// Starts an async decode for each request
pub fn load_image_system(
    mut commands: Commands,
    mut events: MessageReader<LoadImageRequest>,
    mut load_state: ResMut<ImageLoadState>,
) {
    for event in events.read() {
        if load_state.is_loading {
            warn!("Image load already in progress");
            continue;
        }

        let path = event.path.clone();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();

        load_state.is_loading = true;
        load_state.description = Some(format!("Loading {}...", name));
        info!("Loading image {:?}", path);

        let task = IoTaskPool::get().spawn(async move {
            let image = decode_image(&path);
            LoadImageResult { path, image }
        });

        commands.spawn(LoadImageTask(task));
    }
}

/// Polls decode tasks and swaps in the new image when one finishes
#[allow(clippy::too_many_arguments)]
pub fn poll_image_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut LoadImageTask)>,
    mut load_state: ResMut<ImageLoadState>,
    mut load_error: ResMut<ImageLoadError>,
    mut images: ResMut<Assets<Image>>,
    mut session: ResMut<ActiveSession>,
    mut applied_zoom: ResMut<AppliedZoom>,
    existing: Query<Entity, With<ImageSprite>>,
    mut camera_query: Query<&mut Transform, With<CanvasCamera>>,
    mut recent_events: MessageWriter<AddRecentImageRequest>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(result) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };
        commands.entity(entity).despawn();

        load_state.is_loading = false;
        load_state.description = None;

        let decoded = match result.image {
            Ok(decoded) => decoded,
            Err(message) => {
                error!("{}", message);
                load_error.message = Some(message);
                continue;
            }
        };
        load_error.message = None;

        for old in existing.iter() {
            commands.entity(old).despawn();
        }

        let (width, height) = (decoded.width, decoded.height);
        let handle = images.add(to_bevy_image(decoded));
        let (size, center) = sprite_layout(width, height, 1.0);
        commands.spawn((
            Sprite {
                image: handle,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(center.extend(0.0)),
            ImageSprite { width, height },
        ));

        session.load_image(LoadedImage {
            path: result.path.clone(),
            width,
            height,
        });
        applied_zoom.0 = session.zoom().factor();

        if let Ok(mut transform) = camera_query.single_mut() {
            center_camera_on(&mut transform, width, height);
        }

        recent_events.write(AddRecentImageRequest { path: result.path });
    }
}

/// Resize and reposition the sprite to the session's zoom
pub fn sync_image_sprite(
    session: Res<ActiveSession>,
    mut sprites: Query<(&ImageSprite, &mut Sprite, &mut Transform)>,
) {
    let zoom = session.zoom().factor();
    for (image, mut sprite, mut transform) in sprites.iter_mut() {
        let (size, center) = sprite_layout(image.width, image.height, zoom);
        if sprite.custom_size != Some(size) {
            sprite.custom_size = Some(size);
            transform.translation.x = center.x;
            transform.translation.y = center.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_image_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dimensioner-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_decode_missing_file() {
        let result = decode_image(Path::new("no/such/image.png"));
        let message = result.err().unwrap();
        assert!(message.starts_with("Failed to load image"));
    }

    #[test]
    fn test_decode_png() {
        let path = temp_image_path("decode.png");
        image::RgbaImage::from_pixel(4, 3, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let decoded = decode_image(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(decoded.width, 4);
        assert_eq!(decoded.height, 3);
        assert_eq!(decoded.rgba.len(), 4 * 3 * 4);
        assert_eq!(&decoded.rgba[0..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_decode_rejects_non_image() {
        let path = temp_image_path("notes.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let result = decode_image(&path);
        let _ = std::fs::remove_file(&path);

        assert!(result.is_err());
    }

    #[test]
    fn test_to_bevy_image_keeps_size() {
        let image = to_bevy_image(DecodedImage {
            width: 2,
            height: 5,
            rgba: vec![0; 2 * 5 * 4],
        });
        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 5);
    }

    #[test]
    fn test_sprite_layout_pins_top_left() {
        let (size, center) = sprite_layout(200, 100, 1.0);
        assert_eq!(size, Vec2::new(200.0, 100.0));
        assert_eq!(center, Vec2::new(100.0, -50.0));

        let (size, center) = sprite_layout(200, 100, 2.0);
        assert_eq!(size, Vec2::new(400.0, 200.0));
        // Top-left corner stays at the origin
        assert_eq!(center - Vec2::new(size.x, -size.y) / 2.0, Vec2::ZERO);
    }
}
