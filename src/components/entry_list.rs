use dioxus::core::use_drop;
use dioxus::prelude::*;
use std::time::Instant;

mod dom_surface;
mod entry_row;

pub use dom_surface::DomSurface;
pub use entry_row::Press;

use entry_row::{pointer_sample, EntryRow, FloatingRow};

use crate::config::CONFIG;
use crate::drag::{DragMachine, PressOutcome, RowTarget, ScrollLock};
use crate::entries::{Entry, EntryStore};
use crate::reorder;
use crate::state::AppState;

/// Drag machine driving the DOM list
pub type ListDrag = DragMachine<DomSurface>;

#[component]
pub fn EntryList() -> Element {
    let mut state = use_context::<AppState>();
    let store = use_context::<EntryStore>();

    let drag_config = CONFIG.read().drag.clone();
    let slot_height = drag_config.slot_height();

    let mut machine = use_signal(|| {
        let container = DomSurface::new(drag_config.scroll_container.clone());
        let lock = ScrollLock::new(container, DomSurface::body());
        ListDrag::new(lock, slot_height, drag_config.hold_duration())
    });
    // Written by the scroll listener without re-rendering the list
    let scroll_offset = use_hook(|| machine.peek().lock().container().scroll_offset_handle());
    let mut scroll_element: Signal<Option<std::rc::Rc<MountedData>>> = use_signal(|| None);

    // Unmounting mid-drag must not leave the page locked
    use_drop(move || {
        if let Ok(mut machine) = machine.try_write() {
            if machine.cancel() {
                tracing::debug!("Drag cancelled on unmount");
            }
        }
    });

    let all_entries = state.entries.read().clone();
    let rendered = state.visible_entries();
    let item_count = rendered.len();

    // Rows paired with their rendered index, rearranged for the live preview
    let indexed: Vec<(usize, Entry)> = rendered.iter().cloned().enumerate().collect();
    let (preview, session) = {
        let machine = machine.read();
        (machine.preview(&indexed), machine.session().copied())
    };
    let floating = session.and_then(|session| {
        rendered.get(session.source_index).map(|entry| {
            let top = session.source_index as f64 * slot_height + session.offset_y();
            (entry.clone(), top)
        })
    });
    let lifted_id = floating.as_ref().map(|(entry, _)| entry.id.clone());
    let is_dragging = session.is_some();

    let handle_press = move |press: Press| {
        let target = RowTarget {
            index: press.index,
            item_count,
        };
        let outcome = machine
            .write()
            .pointer_down(target, press.kind, press.sample, Instant::now());

        if let PressOutcome::Pending(ticket) = outcome {
            spawn(async move {
                tokio::time::sleep(ticket.delay()).await;
                if let Ok(mut machine) = machine.try_write() {
                    machine.hold_elapsed(ticket, Instant::now());
                }
            });
        }
    };

    let handle_handle_leave = move |pointer_id: i32| {
        if machine.peek().is_pending() {
            machine.write().cancel_pending(pointer_id);
        }
    };

    let handle_pointermove = move |evt: Event<PointerData>| {
        let is_tracking = {
            let machine = machine.peek();
            machine.is_dragging() || machine.is_pending()
        };
        if !is_tracking {
            return;
        }
        machine.write().pointer_move(pointer_sample(&evt));
    };

    let handle_pointerup = move |evt: Event<PointerData>| {
        let Some(released) = machine.write().pointer_up(pointer_sample(&evt)) else {
            return;
        };

        let rendered_ids = state.visible_ids();
        let committed = reorder::apply_release(state.entries.peek().as_slice(), &rendered_ids, released);
        match committed {
            Ok(Some(committed)) => {
                state.entries.set(committed.items);
                let store = store.clone();
                spawn(async move {
                    // Failure is reported through a notification
                    let _ = reorder::persist(&store, committed.updates).await;
                });
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(?e, ?released, "Discarding drag that no longer matches the list");
            }
        }
    };

    let handle_pointercancel = move |evt: Event<PointerData>| {
        machine.write().pointer_cancel(evt.data().pointer_id());
    };

    let handle_lostpointercapture = move |evt: Event<PointerData>| {
        let pointer_id = evt.data().pointer_id();
        let is_ours = machine.peek().session().map(|s| s.pointer_id) == Some(pointer_id);
        if is_ours {
            machine.write().pointer_cancel(pointer_id);
        }
    };

    rsx! {
        div {
            class: "entry-list-root",
            class: if is_dragging { "dragging" },
            style: "--slot-height: {slot_height}px;",
            onpointermove: handle_pointermove,
            onpointerup: handle_pointerup,
            onpointercancel: handle_pointercancel,
            onlostpointercapture: handle_lostpointercapture,

            main {
                class: "entry-scroll",
                onmounted: move |evt| {
                    scroll_element.set(Some(evt.data()));
                },
                onscroll: move |_| {
                    let scroll_offset = scroll_offset.clone();
                    spawn(async move {
                        // Clone the element reference before await to avoid holding GenerationalRef
                        let element = scroll_element.peek().clone();
                        if let Some(el) = element {
                            if let Ok(offset) = el.get_scroll_offset().await {
                                scroll_offset.set(offset.y);
                            }
                        }
                    });
                },

                if all_entries.is_empty() {
                    div {
                        class: "entry-list-empty",
                        p { "No entries yet" }
                    }
                } else if rendered.is_empty() {
                    div {
                        class: "entry-list-empty",
                        p { "No matching entries found" }
                    }
                } else {
                    div {
                        class: "entry-list",
                        for (index, entry) in preview {
                            EntryRow {
                                key: "{entry.id}",
                                lifted: lifted_id.as_deref() == Some(entry.id.as_str()),
                                entry: entry.clone(),
                                index,
                                on_press: handle_press,
                                on_handle_leave: handle_handle_leave,
                            }
                        }
                        if let Some((entry, top)) = floating {
                            FloatingRow { entry, top }
                        }
                    }
                }
            }

            // Keeps pointer events flowing to the list while a row is lifted
            if is_dragging {
                div {
                    class: "drag-overlay",
                }
            }
        }
    }
}
