use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::{Entries, ENTRIES_CHANGED};
use crate::drag::{PositionUpdate, ReorderStore};
use crate::error::StoreError;

/// Write sequencing shared by all clones of one store.
///
/// Every reorder takes a ticket when it is submitted. Writes run one at a time
/// under `applied`, and a ticket older than the last applied one is skipped,
/// so the most recently submitted mapping is the one left on disk.
#[derive(Debug, Default)]
struct WriteOrder {
    issued: AtomicU64,
    applied: Mutex<u64>,
}

/// JSON file holding the entry collection
#[derive(Debug, Clone)]
pub struct EntryStore {
    path: PathBuf,
    writes: Arc<WriteOrder>,
}

impl PartialEq for EntryStore {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for EntryStore {}

impl EntryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writes: Arc::default(),
        }
    }

    /// Get the default entries file path
    pub fn default_path() -> PathBuf {
        const FILENAME: &str = "entries.json";
        if let Some(mut path) = dirs::data_local_dir() {
            path.push("lorebook");
            path.push(FILENAME);
            return path;
        }

        // Fallback to home directory
        if let Some(mut path) = dirs::home_dir() {
            path.push(".lorebook");
            path.push(FILENAME);
            return path;
        }

        PathBuf::from(FILENAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load entries in display order, or an empty collection if no file exists
    pub fn load(&self) -> Result<Entries, StoreError> {
        if !self.path.exists() {
            return Ok(Entries::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let mut entries: Entries = serde_json::from_str(&content)?;
        if !entries.is_dense() {
            tracing::warn!(path = %self.path.display(), "Repairing non-dense entry order");
            entries.normalize();
        }
        Ok(entries)
    }

    /// Save entries to file
    pub fn save(&self, entries: &Entries) -> Result<(), StoreError> {
        tracing::debug!(
            path = %self.path.display(),
            count = entries.items.len(),
            "Saving entries"
        );

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Load, apply the mapping and save if anything changed
    pub fn reorder_blocking(&self, updates: &[PositionUpdate<String>]) -> Result<(), StoreError> {
        self.write_in_order(self.next_ticket(), updates)
    }

    fn next_ticket(&self) -> u64 {
        self.writes.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn write_in_order(
        &self,
        ticket: u64,
        updates: &[PositionUpdate<String>],
    ) -> Result<(), StoreError> {
        let mut applied = self.writes.applied.lock();
        if *applied > ticket {
            tracing::debug!(ticket, applied = *applied, "Skipping superseded reorder");
            return Ok(());
        }

        let mut entries = self.load()?;
        if !apply_positions(&mut entries, updates)? {
            *applied = ticket;
            tracing::debug!("Stored order already up to date");
            return Ok(());
        }
        self.save(&entries)?;
        *applied = ticket;
        drop(applied);

        ENTRIES_CHANGED.send(()).ok();
        Ok(())
    }
}

impl Default for EntryStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl ReorderStore for EntryStore {
    type Id = String;

    fn reorder(
        &self,
        updates: Vec<PositionUpdate<String>>,
    ) -> impl Future<Output = Result<(), StoreError>> + Send {
        // Taken now so the submission order survives the blocking pool
        let ticket = self.next_ticket();
        let store = self.clone();
        async move {
            tokio::task::spawn_blocking(move || store.write_in_order(ticket, &updates))
                .await
                .map_err(|e| StoreError::Task(e.to_string()))?
        }
    }
}

/// Apply an `(id, position)` mapping to the collection.
///
/// Every id must exist; otherwise nothing is modified. Entries missing from
/// the mapping keep their relative place. Returns `true` if the order or any
/// position changed.
pub fn apply_positions(
    entries: &mut Entries,
    updates: &[PositionUpdate<String>],
) -> Result<bool, StoreError> {
    let positions: HashMap<&str, usize> = updates
        .iter()
        .map(|update| (update.id.as_str(), update.position))
        .collect();

    if let Some(unknown) = positions
        .keys()
        .find(|id| !entries.items.iter().any(|entry| entry.id == **id))
    {
        return Err(StoreError::UnknownEntry(unknown.to_string()));
    }

    let before: Vec<(String, usize)> = entries
        .items
        .iter()
        .map(|entry| (entry.id.clone(), entry.display_order))
        .collect();

    for entry in entries.items.iter_mut() {
        if let Some(&position) = positions.get(entry.id.as_str()) {
            entry.display_order = position;
        }
    }
    entries.normalize();

    let changed = entries
        .items
        .iter()
        .map(|entry| (entry.id.as_str(), entry.display_order))
        .ne(before.iter().map(|(id, position)| (id.as_str(), *position)));
    Ok(changed)
}
