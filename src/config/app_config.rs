use serde::{Deserialize, Serialize};

mod drag_config;
mod notification_config;

pub use drag_config::{normalize_slot_height, DragConfig, DEFAULT_SCROLL_CONTAINER};
pub use notification_config::{NotificationConfig, DEFAULT_NOTIFICATION_TIMEOUT_MS};

/// Global application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub drag: DragConfig,
    pub notifications: NotificationConfig,
}
