//! Dismissible notifications (toasts) for user-visible, non-fatal failures.
//!
//! This module provides:
//! - `Notifications`: A bounded queue of active notifications
//! - `NOTIFICATIONS`: Global static for app-wide access
//! - `NOTIFICATIONS_CHANGED`: Broadcast channel so the toast stack re-renders

use parking_lot::RwLock;
use std::sync::LazyLock;
use tokio::sync::broadcast;

/// Maximum number of notifications kept at once; the oldest are dropped
pub const MAX_NOTIFICATIONS: usize = 5;

pub type NotificationId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationLevel {
    /// CSS modifier class
    pub fn class(self) -> &'static str {
        match self {
            Self::Info => "toast--info",
            Self::Success => "toast--success",
            Self::Warning => "toast--warning",
            Self::Error => "toast--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub level: NotificationLevel,
    pub title: String,
    pub detail: Option<String>,
}

/// Active notifications, oldest first
#[derive(Debug, Default)]
pub struct Notifications {
    items: Vec<Notification>,
    next_id: NotificationId,
}

impl Notifications {
    pub fn push(
        &mut self,
        level: NotificationLevel,
        title: impl Into<String>,
        detail: Option<String>,
    ) -> NotificationId {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Notification {
            id,
            level,
            title: title.into(),
            detail,
        });
        if self.items.len() > MAX_NOTIFICATIONS {
            let overflow = self.items.len() - MAX_NOTIFICATIONS;
            self.items.drain(..overflow);
        }
        id
    }

    /// Remove a notification. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let len = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != len
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Global notification queue
pub static NOTIFICATIONS: LazyLock<RwLock<Notifications>> =
    LazyLock::new(|| RwLock::new(Notifications::default()));

/// Broadcast channel for notification changes
pub static NOTIFICATIONS_CHANGED: LazyLock<broadcast::Sender<()>> =
    LazyLock::new(|| broadcast::channel(10).0);

/// Push a notification and broadcast the change
pub fn notify(
    level: NotificationLevel,
    title: impl Into<String>,
    detail: Option<String>,
) -> NotificationId {
    let id = NOTIFICATIONS.write().push(level, title, detail);
    NOTIFICATIONS_CHANGED.send(()).ok();
    id
}

/// Push an error notification
pub fn notify_error(title: impl Into<String>, detail: impl Into<String>) -> NotificationId {
    notify(NotificationLevel::Error, title, Some(detail.into()))
}

/// Dismiss a notification and broadcast the change
pub fn dismiss(id: NotificationId) {
    if NOTIFICATIONS.write().dismiss(id) {
        NOTIFICATIONS_CHANGED.send(()).ok();
    }
}

/// Copy of the active notifications for rendering
pub fn snapshot() -> Vec<Notification> {
    NOTIFICATIONS.read().items().to_vec()
}
