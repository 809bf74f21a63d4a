use dioxus::document;
use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;

use crate::drag::{PointerKind, PointerSample};
use crate::entries::Entry;

/// A press on a row's drag handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Press {
    /// Row index in the rendered list
    pub index: usize,
    pub kind: PointerKind,
    pub sample: PointerSample,
}

pub(super) fn pointer_sample(evt: &Event<PointerData>) -> PointerSample {
    let pointer = evt.data();
    let point = pointer.client_coordinates();
    PointerSample::new(pointer.pointer_id(), point.x, point.y)
}

/// Route the rest of the gesture to the handle even when the pointer leaves it
fn capture_pointer(entry_id: &str, pointer_id: i32) {
    let selector = serde_json::to_string(&format!("[data-entry-id=\"{entry_id}\"] .entry-handle"))
        .unwrap_or_default();
    let js = format!(
        "try {{ document.querySelector({selector})?.setPointerCapture({pointer_id}); }} catch (_) {{}}"
    );
    let _ = document::eval(&js);
}

#[component]
pub fn EntryRow(
    entry: Entry,
    index: usize,
    lifted: bool,
    on_press: EventHandler<Press>,
    on_handle_leave: EventHandler<i32>,
) -> Element {
    let name = entry.display_name().to_string();
    let keywords = entry.keywords.join(", ");
    let entry_id = entry.id.clone();

    let handle_pointerdown = move |evt: Event<PointerData>| {
        // Touch and pen report the contact as the primary button
        if evt.data().trigger_button() != Some(MouseButton::Primary) {
            return;
        }
        evt.prevent_default();

        let sample = pointer_sample(&evt);
        let kind = PointerKind::from_pointer_type(&evt.data().pointer_type());
        capture_pointer(&entry_id, sample.pointer_id);
        on_press.call(Press {
            index,
            kind,
            sample,
        });
    };

    rsx! {
        div {
            class: "entry-row",
            class: if lifted { "lifted" },
            class: if !entry.enabled { "disabled" },
            "data-entry-id": "{entry.id}",

            button {
                class: "entry-handle",
                title: "Drag to reorder",
                onpointerdown: handle_pointerdown,
                onpointerleave: move |evt: Event<PointerData>| {
                    on_handle_leave.call(evt.data().pointer_id());
                },
                "⠿"
            }

            div {
                class: "entry-body",
                div {
                    class: "entry-title",
                    "{name}"
                }
                if !keywords.is_empty() {
                    div {
                        class: "entry-keywords",
                        "{keywords}"
                    }
                }
            }
        }
    }
}

/// Detached copy of the dragged row that follows the pointer
#[component]
pub fn FloatingRow(entry: Entry, top: f64) -> Element {
    let name = entry.display_name().to_string();

    rsx! {
        div {
            class: "entry-row entry-row--floating",
            style: "transform: translateY({top}px);",
            span {
                class: "entry-handle",
                "⠿"
            }
            div {
                class: "entry-body",
                div {
                    class: "entry-title",
                    "{name}"
                }
            }
        }
    }
}
