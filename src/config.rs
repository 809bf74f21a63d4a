// Config module - user configuration loaded from config.json

use parking_lot::RwLock;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

mod app_config;

pub use app_config::{
    normalize_slot_height, Config, DragConfig, NotificationConfig, DEFAULT_NOTIFICATION_TIMEOUT_MS,
    DEFAULT_SCROLL_CONTAINER,
};

/// Global configuration, loaded on first access
pub static CONFIG: LazyLock<RwLock<Config>> =
    LazyLock::new(|| RwLock::new(Config::load_from(&Config::path())));

impl Config {
    /// Get the configuration file path
    pub fn path() -> PathBuf {
        const FILENAME: &str = "config.json";
        if let Some(mut path) = dirs::config_dir() {
            path.push("lorebook");
            path.push(FILENAME);
            return path;
        }

        // Fallback to home directory
        if let Some(mut path) = dirs::home_dir() {
            path.push(".lorebook");
            path.push(FILENAME);
            return path;
        }

        PathBuf::from(FILENAME)
    }

    /// Load configuration from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), ?e, "Invalid config file, using defaults");
                Self::default()
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), ?e, "Failed to read config file");
                Self::default()
            }
        }
    }
}

/// Replace the global configuration with the contents of `path`
pub fn reload_from(path: &Path) {
    let config = Config::load_from(path);
    tracing::debug!(path = %path.display(), ?config, "Loaded configuration");
    *CONFIG.write() = config;
}
