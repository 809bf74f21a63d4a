/// Move the element at `from` to `to`, shifting the elements in between.
///
/// Equivalent to `remove(from)` followed by `insert(to, ..)`. Indices past
/// the end are clamped to the last element.
pub fn move_item<T>(items: &mut [T], from: usize, to: usize) {
    let Some(last) = items.len().checked_sub(1) else {
        return;
    };
    let (from, to) = (from.min(last), to.min(last));
    if from < to {
        items[from..=to].rotate_left(1);
    } else if to < from {
        items[to..=from].rotate_right(1);
    }
}

/// Build the preview sequence shown while dragging.
///
/// The rendered list with the item at `from` virtually moved to `to`. The
/// input is never mutated.
pub fn preview_sequence<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut preview = items.to_vec();
    move_item(&mut preview, from, to);
    preview
}
