use dioxus::prelude::*;

use super::entry_list::EntryList;
use super::search_bar::SearchBar;
use super::toasts::Toasts;
use crate::entries::{Entry, EntryStore, ENTRIES_CHANGED};
use crate::notifications;
use crate::state::AppState;

const STYLE: &str = include_str!("../../assets/lorebook.css");

fn load_entries(store: &EntryStore) -> Vec<Entry> {
    match store.load() {
        Ok(entries) => entries.items,
        Err(e) => {
            tracing::error!(path = %store.path().display(), ?e, "Failed to load entries");
            notifications::notify_error("Couldn't load entries", e.to_string());
            Vec::new()
        }
    }
}

#[component]
pub fn App() -> Element {
    let store = use_context::<EntryStore>();
    let state = use_context_provider(|| AppState::new(load_entries(&store)));

    // Reconcile with the persisted order after every write
    use_future(move || {
        let store = store.clone();
        async move {
            let mut entries = state.entries;
            let mut rx = ENTRIES_CHANGED.subscribe();
            while rx.recv().await.is_ok() {
                match store.load() {
                    Ok(loaded) => {
                        if *entries.peek() != loaded.items {
                            tracing::debug!("Entries changed on disk, reloading");
                            entries.set(loaded.items);
                        }
                    }
                    Err(e) => {
                        tracing::warn!(?e, "Failed to reload entries");
                    }
                }
            }
        }
    });

    let count = state.entries.read().len();

    rsx! {
        style { {STYLE} }

        div {
            class: "app",

            header {
                class: "app-header",
                h1 { "Lorebook" }
                span {
                    class: "entry-count",
                    "{count} entries"
                }
            }

            SearchBar {}
            EntryList {}
            Toasts {}
        }
    }
}
