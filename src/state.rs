// State module - reactive state shared by the window's components

use dioxus::prelude::*;

use crate::entries::{filter_entries, Entry};

/// Window state.
///
/// All fields are `Signal<T>`, so the struct is `Copy` and can be moved into
/// event handlers and async blocks freely. Per-field signals keep the search
/// bar from re-rendering the list and vice versa.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppState {
    /// Full collection in display order
    pub entries: Signal<Vec<Entry>>,
    /// Current search query
    pub query: Signal<String>,
}

impl AppState {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            entries: Signal::new(entries),
            query: Signal::new(String::new()),
        }
    }

    /// Entries the list currently renders
    pub fn visible_entries(&self) -> Vec<Entry> {
        filter_entries(&self.entries.read(), &self.query.read())
    }

    /// Ids of the rendered entries, in rendered order
    pub fn visible_ids(&self) -> Vec<String> {
        filter_entries(&self.entries.peek(), &self.query.peek())
            .into_iter()
            .map(|entry| entry.id)
            .collect()
    }
}
