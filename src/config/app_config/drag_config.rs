use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::drag::{DEFAULT_HOLD_DURATION, DEFAULT_SLOT_HEIGHT};

/// Default CSS selector of the ambient scroll container
pub const DEFAULT_SCROLL_CONTAINER: &str = "main.entry-scroll";

/// Maximum accepted hold duration; longer holds feel broken
pub const MAX_HOLD_DURATION_MS: u64 = 5_000;

fn default_slot_height() -> f64 {
    DEFAULT_SLOT_HEIGHT
}

fn default_hold_duration_ms() -> u64 {
    DEFAULT_HOLD_DURATION.as_millis() as u64
}

fn default_scroll_container() -> String {
    DEFAULT_SCROLL_CONTAINER.to_string()
}

/// Normalize slot height: non-finite or non-positive values fall back to default
pub fn normalize_slot_height(height: f64) -> f64 {
    if height.is_finite() && height > 0.0 {
        height
    } else {
        DEFAULT_SLOT_HEIGHT
    }
}

/// Configuration for list drag-to-reorder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragConfig {
    /// Height of one list row in pixels
    #[serde(default = "default_slot_height")]
    pub slot_height: f64,
    /// Hold time before a touch or pen press starts a drag
    #[serde(default = "default_hold_duration_ms")]
    pub hold_duration_ms: u64,
    /// CSS selector of the container locked while dragging
    #[serde(default = "default_scroll_container")]
    pub scroll_container: String,
}

impl DragConfig {
    pub fn slot_height(&self) -> f64 {
        normalize_slot_height(self.slot_height)
    }

    pub fn hold_duration(&self) -> Duration {
        Duration::from_millis(self.hold_duration_ms.min(MAX_HOLD_DURATION_MS))
    }
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            slot_height: default_slot_height(),
            hold_duration_ms: default_hold_duration_ms(),
            scroll_container: default_scroll_container(),
        }
    }
}
