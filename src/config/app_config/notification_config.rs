use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default time a notification stays visible
pub const DEFAULT_NOTIFICATION_TIMEOUT_MS: u64 = 5_000;

fn default_timeout_ms() -> u64 {
    DEFAULT_NOTIFICATION_TIMEOUT_MS
}

/// Configuration for toast notifications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationConfig {
    /// Auto-dismiss delay in milliseconds; 0 keeps notifications until dismissed
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl NotificationConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
        }
    }
}
