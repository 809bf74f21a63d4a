/// Resolve a vertical drag offset into the target slot index.
///
/// The offset is measured from where the drag started. It is divided by the
/// fixed slot height and rounded (halves toward positive infinity), then added
/// to `source_index` and clamped to `[0, item_count - 1]`. Offsets past either
/// end clamp rather than wrap.
///
/// Degenerate inputs never fail: an empty list resolves to `0`, and a
/// non-finite offset or a non-positive slot height leaves the item in place.
pub fn resolve_target_index(
    offset_y: f64,
    source_index: usize,
    item_count: usize,
    slot_height: f64,
) -> usize {
    if item_count == 0 {
        return 0;
    }
    let last = item_count - 1;
    let source = source_index.min(last);

    if !offset_y.is_finite() || !slot_height.is_finite() || slot_height <= 0.0 {
        return source;
    }

    let slots_moved = (offset_y / slot_height + 0.5).floor();
    // Clamp in float space so huge offsets cannot overflow the cast
    let target = (source as f64 + slots_moved).clamp(0.0, last as f64);
    target as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLOT: f64 = 70.0;

    #[test]
    fn test_zero_offset_stays_in_place() {
        assert_eq!(resolve_target_index(0.0, 2, 5, SLOT), 2);
    }

    #[test]
    fn test_rounds_to_nearest_slot() {
        assert_eq!(resolve_target_index(34.0, 0, 5, SLOT), 0);
        assert_eq!(resolve_target_index(36.0, 0, 5, SLOT), 1);
        assert_eq!(resolve_target_index(140.0, 0, 5, SLOT), 2);
        assert_eq!(resolve_target_index(-106.0, 3, 5, SLOT), 1);
    }

    #[test]
    fn test_half_slot_rounds_up() {
        // +0.5 slot moves down one, -0.5 slot stays
        assert_eq!(resolve_target_index(35.0, 1, 5, SLOT), 2);
        assert_eq!(resolve_target_index(-35.0, 1, 5, SLOT), 1);
    }

    #[test]
    fn test_clamps_past_either_end() {
        assert_eq!(resolve_target_index(10_000.0, 1, 4, SLOT), 3);
        assert_eq!(resolve_target_index(-10_000.0, 2, 4, SLOT), 0);
        assert_eq!(resolve_target_index(f64::MAX, 0, 4, SLOT), 3);
        assert_eq!(resolve_target_index(f64::MIN, 3, 4, SLOT), 0);
    }

    #[test]
    fn test_last_item_dragged_down_stays_last() {
        assert_eq!(resolve_target_index(500.0, 3, 4, SLOT), 3);
    }

    #[test]
    fn test_single_item_always_zero() {
        assert_eq!(resolve_target_index(-300.0, 0, 1, SLOT), 0);
        assert_eq!(resolve_target_index(300.0, 0, 1, SLOT), 0);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(resolve_target_index(100.0, 0, 0, SLOT), 0);
        assert_eq!(resolve_target_index(f64::NAN, 2, 5, SLOT), 2);
        assert_eq!(resolve_target_index(f64::INFINITY, 2, 5, SLOT), 2);
        assert_eq!(resolve_target_index(100.0, 2, 5, 0.0), 2);
        assert_eq!(resolve_target_index(100.0, 2, 5, -70.0), 2);
        // Out-of-range source is clamped before moving
        assert_eq!(resolve_target_index(0.0, 9, 5, SLOT), 4);
    }
}
