use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_UNIT, MAX_RECENT_IMAGES};

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Application configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfigData {
    /// Unit label the session starts with (last one the user picked)
    #[serde(default = "default_unit")]
    pub default_unit: String,

    /// Recently opened images, most recent first
    #[serde(default)]
    pub recent_images: Vec<PathBuf>,

    /// Directory the open-image dialog starts in
    #[serde(default)]
    pub last_image_dir: Option<PathBuf>,
}

fn default_unit() -> String {
    DEFAULT_UNIT.to_string()
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            default_unit: default_unit(),
            recent_images: Vec::new(),
            last_image_dir: None,
        }
    }
}

impl AppConfigData {
    /// Move `path` to the front of the recent list and remember its directory.
    pub fn push_recent_image(&mut self, path: &Path) {
        self.recent_images.retain(|p| p != path);
        self.recent_images.insert(0, path.to_path_buf());
        self.recent_images.truncate(MAX_RECENT_IMAGES);

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            self.last_image_dir = Some(parent.to_path_buf());
        }
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: crate::paths::config_file(),
            dirty: false,
        }
    }
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification dialog
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to add an image to the recent list
#[derive(Message)]
pub struct AddRecentImageRequest {
    pub path: PathBuf,
}

/// Message to remember the unit the user picked
#[derive(Message)]
pub struct SetDefaultUnitRequest {
    pub unit: String,
}

/// Parse config JSON. `Err` carries the user-facing reason.
fn parse_config(json: &str) -> Result<AppConfigData, String> {
    serde_json::from_str(json).map_err(|e| format!("Configuration file was corrupted: {}", e))
}

/// Load configuration from disk. The second value is set when the file
/// existed but could not be used.
fn load_config(config_path: &Path) -> (AppConfigData, Option<String>) {
    if !config_path.exists() {
        info!("No config file found, using defaults");
        return (AppConfigData::default(), None);
    }

    match std::fs::read_to_string(config_path) {
        Ok(json) => match parse_config(&json) {
            Ok(data) => {
                info!("Loaded config from {:?}", config_path);
                (data, None)
            }
            Err(reason) => {
                warn!("Failed to parse config file: {}", reason);
                (AppConfigData::default(), Some(reason))
            }
        },
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            (
                AppConfigData::default(),
                Some(format!("Could not read configuration file: {}", e)),
            )
        }
    }
}

/// Save configuration to disk
fn save_config(config: &AppConfig) -> Result<(), String> {
    let json = serde_json::to_string_pretty(&config.data)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;
    std::fs::write(&config.config_path, json)
        .map_err(|e| format!("Failed to save config: {}", e))?;
    Ok(())
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<AppConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    let (data, reset_reason) = load_config(&config.config_path);
    config.data = data;
    config.dirty = false;

    // Set notification if config was reset due to an error
    if let Some(reason) = reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            match save_config(&config) {
                Ok(()) => info!("Config saved to {:?}", config.config_path),
                Err(e) => error!("{}", e),
            }
            config.dirty = false;
        }
    }
}

/// System to add an image to the recent list
fn add_recent_image_system(
    mut events: MessageReader<AddRecentImageRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        config.data.push_recent_image(&event.path);
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

/// System to persist the selected unit
fn set_default_unit_system(
    mut events: MessageReader<SetDefaultUnitRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        if config.data.default_unit != event.unit {
            config.data.default_unit = event.unit.clone();
            config.dirty = true;
            save_events.write(SaveConfigRequest);
            info!("Default unit set to {}", event.unit);
        }
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<AddRecentImageRequest>()
            .add_message::<SetDefaultUnitRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                (
                    add_recent_image_system.run_if(on_message::<AddRecentImageRequest>),
                    set_default_unit_system.run_if(on_message::<SetDefaultUnitRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_data_default() {
        let data = AppConfigData::default();
        assert_eq!(data.default_unit, "cm");
        assert!(data.recent_images.is_empty());
        assert!(data.last_image_dir.is_none());
    }

    #[test]
    fn test_app_config_data_serialization() {
        let data = AppConfigData {
            default_unit: "in".to_string(),
            recent_images: vec![PathBuf::from("/scans/one.png"), PathBuf::from("/scans/two.jpg")],
            last_image_dir: Some(PathBuf::from("/scans")),
        };

        let json = serde_json::to_string(&data).unwrap();
        let parsed: AppConfigData = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.default_unit, data.default_unit);
        assert_eq!(parsed.recent_images, data.recent_images);
        assert_eq!(parsed.last_image_dir, data.last_image_dir);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let parsed = parse_config("{}").unwrap();
        assert_eq!(parsed.default_unit, "cm");
        assert!(parsed.recent_images.is_empty());
    }

    #[test]
    fn test_corrupt_config_reports_reason() {
        let reason = parse_config("{ not json").unwrap_err();
        assert!(reason.starts_with("Configuration file was corrupted"));
    }

    #[test]
    fn test_load_missing_file_is_silent_default() {
        let (data, reason) = load_config(Path::new("definitely/not/here/config.json"));
        assert_eq!(data.default_unit, "cm");
        assert!(reason.is_none());
    }

    #[test]
    fn test_push_recent_image_moves_to_front() {
        let mut data = AppConfigData::default();
        data.push_recent_image(Path::new("/a/one.png"));
        data.push_recent_image(Path::new("/b/two.png"));
        data.push_recent_image(Path::new("/a/one.png"));

        assert_eq!(
            data.recent_images,
            vec![PathBuf::from("/a/one.png"), PathBuf::from("/b/two.png")]
        );
        assert_eq!(data.last_image_dir, Some(PathBuf::from("/a")));
    }

    #[test]
    fn test_push_recent_image_truncates() {
        let mut data = AppConfigData::default();
        for i in 0..(MAX_RECENT_IMAGES + 4) {
            data.push_recent_image(&PathBuf::from(format!("/img/{}.png", i)));
        }
        assert_eq!(data.recent_images.len(), MAX_RECENT_IMAGES);
        assert_eq!(
            data.recent_images[0],
            PathBuf::from(format!("/img/{}.png", MAX_RECENT_IMAGES + 3))
        );
    }

    #[test]
    fn test_bare_file_name_keeps_last_dir() {
        let mut data = AppConfigData {
            last_image_dir: Some(PathBuf::from("/scans")),
            ..Default::default()
        };
        data.push_recent_image(Path::new("local.png"));
        assert_eq!(data.last_image_dir, Some(PathBuf::from("/scans")));
    }
}
