//! Path resolution for platform-appropriate user directories.
//!
//! In development mode (cargo run), paths resolve to the working directory.
//! In installed mode, paths resolve to platform-specific locations:
//! - Windows: `%APPDATA%\Dimensioner\`
//! - macOS: `~/Library/Application Support/Dimensioner/`
//! - Linux: `~/.config/dimensioner/` (config), `~/.local/share/dimensioner/` (data)

use std::path::PathBuf;

/// Returns true when running in development mode (cargo run).
///
/// Detection methods:
/// - `CARGO` env var is set (cargo run sets this)
/// - Debug assertions enabled (debug builds)
pub fn is_dev_mode() -> bool {
    std::env::var("CARGO").is_ok() || cfg!(debug_assertions)
}

/// Platform-appropriate config directory.
///
/// - Dev mode: current directory
/// - Linux: `~/.config/dimensioner/`
/// - Windows/macOS: same as data_dir
pub fn config_dir() -> Option<PathBuf> {
    if is_dev_mode() {
        return Some(PathBuf::from("."));
    }

    #[cfg(target_os = "linux")]
    {
        dirs::config_dir().map(|p| p.join("dimensioner"))
    }

    #[cfg(not(target_os = "linux"))]
    {
        data_dir()
    }
}

/// Platform-appropriate data directory.
pub fn data_dir() -> Option<PathBuf> {
    if is_dev_mode() {
        return Some(PathBuf::from("."));
    }

    dirs::data_dir().map(|p| p.join("dimensioner"))
}

/// Path to the config file.
///
/// - Dev mode: `./config.json`
/// - Installed: `{config_dir}/config.json`
pub fn config_file() -> PathBuf {
    config_dir()
        .map(|p| p.join("config.json"))
        .unwrap_or_else(|| PathBuf::from("config.json"))
}

/// Path to the logs directory.
///
/// - Dev mode: `./logs/`
/// - Installed: `{data_dir}/logs/`
pub fn logs_dir() -> PathBuf {
    data_dir()
        .map(|p| p.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Where the "Save Log" dialog starts.
pub fn default_log_export_dir() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Ensure the config and log directories exist.
///
/// Called early in startup, before logging is set up.
pub fn ensure_directories() -> std::io::Result<()> {
    if let Some(config) = config_dir() {
        std::fs::create_dir_all(config)?;
    }
    std::fs::create_dir_all(logs_dir())?;
    Ok(())
}
