use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;

use super::preview::move_item;
use crate::error::{ReorderError, StoreError};

/// An item with a stable identity and a position in an ordered collection
pub trait Ordered {
    type Id: Clone + Eq + fmt::Display;

    fn id(&self) -> &Self::Id;

    fn position(&self) -> usize;

    fn set_position(&mut self, position: usize);
}

/// New position of a single item after a reorder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionUpdate<Id> {
    pub id: Id,
    pub position: usize,
}

/// Durable storage for a committed order.
///
/// Receives the full renumbered `(id, position)` mapping. Applying the same
/// mapping twice must leave the stored order unchanged.
pub trait ReorderStore {
    type Id;

    fn reorder(
        &self,
        updates: Vec<PositionUpdate<Self::Id>>,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Commit a drag onto the full collection.
///
/// `from` and `to` are indices into `rendered`, the ids of the list the user
/// saw (possibly a filtered subsequence of `full`). Both are resolved to
/// positions in `full` by identity; the source item is moved to the target's
/// position and every item is renumbered to its new index.
///
/// `full` must be in authoritative order. Returns the full `(id, position)`
/// mapping to persist, or `None` when nothing moved.
pub fn commit<T: Ordered>(
    full: &mut [T],
    rendered: &[T::Id],
    from: usize,
    to: usize,
) -> Result<Option<Vec<PositionUpdate<T::Id>>>, ReorderError> {
    if from == to {
        return Ok(None);
    }

    let source = resolve(full, rendered, from)?;
    let target = resolve(full, rendered, to)?;
    if source == target {
        return Ok(None);
    }

    move_item(full, source, target);

    let updates = full
        .iter_mut()
        .enumerate()
        .map(|(position, item)| {
            item.set_position(position);
            PositionUpdate {
                id: item.id().clone(),
                position,
            }
        })
        .collect();

    tracing::debug!(from, to, source, target, "Committed reorder");
    Ok(Some(updates))
}

/// Translate a rendered index into a position in `full`
fn resolve<T: Ordered>(full: &[T], rendered: &[T::Id], index: usize) -> Result<usize, ReorderError> {
    let id = rendered.get(index).ok_or(ReorderError::IndexOutOfRange {
        index,
        len: rendered.len(),
    })?;
    full.iter()
        .position(|item| item.id() == id)
        .ok_or_else(|| ReorderError::UnknownItem(id.to_string()))
}
