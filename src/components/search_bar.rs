use dioxus::prelude::*;

use crate::state::AppState;

#[component]
pub fn SearchBar() -> Element {
    let mut state = use_context::<AppState>();
    let query = state.query.read().clone();
    let has_entries = !state.entries.read().is_empty();

    if !has_entries {
        return rsx! {};
    }

    rsx! {
        div {
            class: "search-bar",

            input {
                class: "search-input",
                r#type: "search",
                placeholder: "Search entries...",
                value: "{query}",
                oninput: move |evt| state.query.set(evt.value()),
            }

            if !query.is_empty() {
                button {
                    class: "search-clear",
                    title: "Clear search",
                    onclick: move |_| state.query.set(String::new()),
                    "×"
                }
            }
        }
    }
}
