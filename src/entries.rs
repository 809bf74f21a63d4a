//! Lorebook entries shown in the reorderable list.
//!
//! This module provides:
//! - `Entry`: A single lorebook entry with a display order
//! - `Entries`: The persisted collection, kept in display order
//! - `filter_entries`: The search projection used while rendering
//! - `ENTRIES_CHANGED`: Broadcast channel fired after the store is written

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tokio::sync::broadcast;

use crate::drag::Ordered;

mod store;

pub use store::EntryStore;

/// A single lorebook entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Stable identity, never reused
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Position in the authoritative ordering
    #[serde(default)]
    pub display_order: usize,
}

fn default_enabled() -> bool {
    true
}

impl Entry {
    /// Create an entry with a fresh id, appended at `display_order`
    pub fn new(title: impl Into<String>, display_order: usize) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            content: String::new(),
            keywords: Vec::new(),
            enabled: true,
            display_order,
        }
    }

    /// Title, falling back to the first keyword
    pub fn display_name(&self) -> &str {
        if !self.title.is_empty() {
            return &self.title;
        }
        self.keywords
            .first()
            .map(String::as_str)
            .unwrap_or("Untitled entry")
    }

    /// Case-insensitive search over title, content and keywords.
    ///
    /// A blank query matches every entry.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.content.to_lowercase().contains(&query)
            || self.keywords.join(" ").to_lowercase().contains(&query)
    }
}

impl Ordered for Entry {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }

    fn position(&self) -> usize {
        self.display_order
    }

    fn set_position(&mut self, position: usize) {
        self.display_order = position;
    }
}

/// Entries matching `query`, in their original order
pub fn filter_entries(entries: &[Entry], query: &str) -> Vec<Entry> {
    entries
        .iter()
        .filter(|entry| entry.matches(query))
        .cloned()
        .collect()
}

/// Entries storage (saved to entries.json)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Entries {
    /// Entries in display order
    pub items: Vec<Entry>,
}

impl Entries {
    /// Sort by display order and renumber densely.
    ///
    /// Repairs gaps and duplicate positions left by older files or manual
    /// edits. Ties keep their file order.
    pub fn normalize(&mut self) {
        self.items.sort_by_key(|entry| entry.display_order);
        for (position, entry) in self.items.iter_mut().enumerate() {
            entry.display_order = position;
        }
    }

    /// Whether display orders form a dense `[0, n)` sequence in item order
    pub fn is_dense(&self) -> bool {
        self.items
            .iter()
            .enumerate()
            .all(|(position, entry)| entry.display_order == position)
    }

    /// Sample entries for `--demo`
    pub fn demo() -> Self {
        let samples: [(&str, &str, &[&str]); 5] = [
            (
                "The Ashen Coast",
                "A shoreline of black sand where the old fleet burned.",
                &["coast", "fleet"],
            ),
            (
                "Order of the Lantern",
                "Wardens who keep the mountain passes lit through winter.",
                &["lantern", "wardens"],
            ),
            (
                "Mirelight",
                "Marsh spirits that lead travellers astray after dusk.",
                &["marsh", "spirits"],
            ),
            (
                "Kestrel Keep",
                "A ruined watchtower used as a smugglers' waypoint.",
                &["keep", "smugglers"],
            ),
            (
                "Salt Tithe",
                "The tax every caravan pays at the river crossing.",
                &["tax", "caravan"],
            ),
        ];
        let items = samples
            .iter()
            .enumerate()
            .map(|(position, (title, content, keywords))| Entry {
                content: content.to_string(),
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
                ..Entry::new(*title, position)
            })
            .collect();
        Self { items }
    }
}

/// Broadcast channel for entry changes
///
/// Views subscribe to this to reconcile with the persisted order.
/// The payload is empty since subscribers reload from the store.
pub static ENTRIES_CHANGED: LazyLock<broadcast::Sender<()>> =
    LazyLock::new(|| broadcast::channel(10).0);
