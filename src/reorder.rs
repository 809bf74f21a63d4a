//! Glue between a finished drag and the persistence collaborator.
//!
//! The UI shows the committed order immediately. Persisting runs in the
//! background; a failure is surfaced as a notification and the in-memory order
//! is left as the user arranged it.

use crate::drag::{commit, Ordered, PositionUpdate, Reorder, ReorderStore};
use crate::error::ReorderError;
use crate::notifications;

/// Result of committing a drag onto an in-memory copy of the collection
#[derive(Debug, Clone)]
pub struct Committed<T: Ordered> {
    /// New authoritative order with dense positions
    pub items: Vec<T>,
    /// Mapping to hand to the store
    pub updates: Vec<PositionUpdate<T::Id>>,
}

/// Commit `reorder` (indices into `rendered`) onto a copy of `full`.
///
/// Returns `None` when the drag resolves to no movement.
pub fn apply_release<T: Ordered + Clone>(
    full: &[T],
    rendered: &[T::Id],
    reorder: Reorder,
) -> Result<Option<Committed<T>>, ReorderError> {
    let mut items = full.to_vec();
    let committed = commit(&mut items, rendered, reorder.from, reorder.to)?
        .map(|updates| Committed { items, updates });
    Ok(committed)
}

/// Persist a committed mapping, surfacing failure to the user
pub async fn persist<S: ReorderStore>(
    store: &S,
    updates: Vec<PositionUpdate<S::Id>>,
) -> Result<(), ReorderError> {
    let count = updates.len();
    match store.reorder(updates).await {
        Ok(()) => {
            tracing::info!(count, "Persisted new order");
            Ok(())
        }
        Err(e) => {
            tracing::error!(?e, count, "Failed to persist new order");
            notifications::notify_error("Couldn't save the new order", e.to_string());
            Err(ReorderError::Store(e))
        }
    }
}
