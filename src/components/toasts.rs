use dioxus::prelude::*;
use tokio::sync::broadcast::error::RecvError;

use crate::config::CONFIG;
use crate::notifications::{self, Notification, NOTIFICATIONS_CHANGED};

/// Stack of dismissible notifications in the corner of the window
#[component]
pub fn Toasts() -> Element {
    let mut items = use_signal(notifications::snapshot);

    use_future(move || async move {
        let mut rx = NOTIFICATIONS_CHANGED.subscribe();
        loop {
            match rx.recv().await {
                Ok(()) | Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            }
            let current = notifications::snapshot();

            // Schedule expiry for notifications we haven't seen yet
            let timeout = CONFIG.read().notifications.timeout();
            if let Some(timeout) = timeout {
                let known: Vec<_> = items.peek().iter().map(|n| n.id).collect();
                for id in current.iter().map(|n| n.id).filter(|id| !known.contains(id)) {
                    spawn(async move {
                        tokio::time::sleep(timeout).await;
                        notifications::dismiss(id);
                    });
                }
            }
            items.set(current);
        }
    });

    let current = items.read().clone();
    if current.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "toasts",
            for notification in current {
                Toast {
                    key: "{notification.id}",
                    notification,
                }
            }
        }
    }
}

#[component]
fn Toast(notification: Notification) -> Element {
    let id = notification.id;
    let level_class = notification.level.class();

    rsx! {
        div {
            class: "toast {level_class}",
            role: "alert",

            div {
                class: "toast-body",
                div {
                    class: "toast-title",
                    "{notification.title}"
                }
                if let Some(detail) = notification.detail.as_ref() {
                    div {
                        class: "toast-detail",
                        "{detail}"
                    }
                }
            }

            button {
                class: "toast-dismiss",
                title: "Dismiss",
                onclick: move |_| notifications::dismiss(id),
                "×"
            }
        }
    }
}
