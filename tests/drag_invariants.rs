use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use lorebook::drag::{
    commit, move_item, preview_sequence, resolve_target_index, DragMachine, Ordered,
    Overflow, PointerKind, PointerSample, PressOutcome, RowTarget, ScrollLock, ScrollSurface,
    SurfaceStyle, TouchAction,
};
use lorebook::entries::{filter_entries, Entry};

#[derive(Debug, Clone)]
struct Surface(Rc<RefCell<SurfaceStyle>>);

impl Surface {
    fn new(style: SurfaceStyle) -> Self {
        Self(Rc::new(RefCell::new(style)))
    }

    fn get(&self) -> SurfaceStyle {
        *self.0.borrow()
    }
}

impl ScrollSurface for Surface {
    fn capture(&self) -> SurfaceStyle {
        *self.0.borrow()
    }

    fn apply(&mut self, style: &SurfaceStyle) {
        *self.0.borrow_mut() = *style;
    }
}

fn entries(count: usize) -> Vec<Entry> {
    (0..count)
        .map(|i| Entry {
            id: format!("e{i}"),
            keywords: vec![if i % 2 == 0 { "even" } else { "odd" }.to_string()],
            ..Entry::new(format!("Entry {i}"), i)
        })
        .collect()
}

fn ids(items: &[Entry]) -> Vec<String> {
    items.iter().map(|e| e.id.clone()).collect()
}

proptest! {
    #[test]
    fn target_index_is_always_in_bounds(
        offset in -10_000.0f64..10_000.0,
        count in 1usize..50,
        source in 0usize..50,
        slot in 1.0f64..200.0,
    ) {
        let source = source % count;
        let target = resolve_target_index(offset, source, count, slot);
        prop_assert!(target < count);
    }

    #[test]
    fn small_offsets_keep_the_source_slot(
        count in 1usize..50,
        source in 0usize..50,
        fraction in -0.49f64..0.49,
    ) {
        let source = source % count;
        prop_assert_eq!(resolve_target_index(fraction * 70.0, source, count, 70.0), source);
    }

    #[test]
    fn move_item_is_a_permutation(count in 1usize..30, from in 0usize..30, to in 0usize..30) {
        let from = from % count;
        let to = to % count;
        let mut items: Vec<usize> = (0..count).collect();
        move_item(&mut items, from, to);

        prop_assert_eq!(items[to], from);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        prop_assert_eq!(sorted, (0..count).collect::<Vec<_>>());
        // Preview agrees with the committed move
        let preview = preview_sequence(&(0..count).collect::<Vec<_>>(), from, to);
        prop_assert_eq!(preview, items);
    }

    #[test]
    fn commit_keeps_positions_dense(count in 1usize..30, from in 0usize..30, to in 0usize..30) {
        let from = from % count;
        let to = to % count;
        let mut full = entries(count);
        let rendered = ids(&full);

        let updates = commit(&mut full, &rendered, from, to).unwrap();
        if from == to {
            prop_assert!(updates.is_none());
            prop_assert_eq!(ids(&full), rendered);
        } else {
            let updates = updates.unwrap();
            prop_assert_eq!(updates.len(), count);
            for (position, entry) in full.iter().enumerate() {
                prop_assert_eq!(entry.position(), position);
                prop_assert_eq!(&updates[position].id, &entry.id);
                prop_assert_eq!(updates[position].position, position);
            }
            prop_assert_eq!(&full[to].id, &rendered[from]);
        }
    }

    #[test]
    fn filtered_commit_moves_only_the_dragged_entry(
        count in 2usize..30,
        from in 0usize..30,
        to in 0usize..30,
    ) {
        let mut full = entries(count);
        let rendered = ids(&filter_entries(&full, "odd"));
        prop_assume!(rendered.len() >= 2);
        let from = from % rendered.len();
        let to = to % rendered.len();
        prop_assume!(from != to);

        let dragged = rendered[from].clone();
        let before: Vec<String> = ids(&full).into_iter().filter(|id| *id != dragged).collect();
        commit(&mut full, &rendered, from, to).unwrap();
        let after: Vec<String> = ids(&full).into_iter().filter(|id| *id != dragged).collect();

        // Everything else keeps its relative order
        prop_assert_eq!(before, after);
        let landed = full.iter().position(|e| e.id == dragged).unwrap();
        let anchor = full.iter().position(|e| e.id == rendered[to]).unwrap();
        prop_assert_eq!(landed.abs_diff(anchor), 1);
    }

    #[test]
    fn scroll_lock_is_symmetric_for_any_call_sequence(
        offset in 0.0f64..5_000.0,
        scrolls in any::<bool>(),
        calls in proptest::collection::vec(any::<bool>(), 0..24),
    ) {
        let container_style = SurfaceStyle {
            overflow: if scrolls { Overflow::Scroll } else { Overflow::Unset },
            touch_action: TouchAction::PanY,
            scroll_offset: offset,
        };
        let body_style = SurfaceStyle {
            overflow: Overflow::Auto,
            ..SurfaceStyle::default()
        };
        let container = Surface::new(container_style);
        let body = Surface::new(body_style);
        let mut lock = ScrollLock::new(container.clone(), body.clone());

        // true acquires, false releases
        for acquire in calls {
            if acquire {
                lock.acquire();
            } else {
                lock.release();
            }
            if lock.is_held() {
                prop_assert_eq!(container.get(), container_style.locked());
                prop_assert_eq!(body.get(), body_style.locked());
            } else {
                prop_assert_eq!(container.get(), container_style);
                prop_assert_eq!(body.get(), body_style);
            }
        }
        lock.release();

        prop_assert!(!lock.is_held());
        prop_assert_eq!(container.get(), container_style);
        prop_assert_eq!(body.get(), body_style);
    }

    #[test]
    fn scroll_lock_dropped_while_held_restores(offset in 0.0f64..5_000.0) {
        let original = SurfaceStyle {
            overflow: Overflow::Scroll,
            touch_action: TouchAction::PanY,
            scroll_offset: offset,
        };
        let container = Surface::new(original);
        let body = Surface::new(SurfaceStyle::default());
        {
            let mut lock = ScrollLock::new(container.clone(), body.clone());
            prop_assert!(lock.acquire());
            prop_assert_eq!(container.get().overflow, Overflow::Hidden);
        }
        prop_assert_eq!(container.get(), original);
        prop_assert_eq!(body.get(), SurfaceStyle::default());
    }
}

fn machine(container: &Surface, body: &Surface) -> DragMachine<Surface> {
    DragMachine::new(
        ScrollLock::new(container.clone(), body.clone()),
        70.0,
        Duration::from_millis(450),
    )
}

#[test]
fn drag_session_holds_lock_only_while_dragging() {
    let container = Surface::new(SurfaceStyle::default());
    let body = Surface::new(SurfaceStyle::default());
    let mut machine = machine(&container, &body);
    let row = RowTarget {
        index: 1,
        item_count: 4,
    };

    let outcome = machine.pointer_down(
        row,
        PointerKind::Mouse,
        PointerSample::new(1, 10.0, 100.0),
        Instant::now(),
    );
    assert!(matches!(outcome, PressOutcome::Activated(_)));
    assert_eq!(container.get().overflow, Overflow::Hidden);

    assert_eq!(
        machine.pointer_move(PointerSample::new(1, 10.0, 240.0)),
        Some(3)
    );
    let reorder = machine
        .pointer_up(PointerSample::new(1, 10.0, 240.0))
        .unwrap();
    assert_eq!((reorder.from, reorder.to), (1, 3));
    assert!(!machine.is_dragging());
    assert_eq!(container.get(), SurfaceStyle::default());
}

#[test]
fn touch_hold_cancelled_by_movement_never_activates() {
    let container = Surface::new(SurfaceStyle::default());
    let body = Surface::new(SurfaceStyle::default());
    let mut machine = machine(&container, &body);
    let start = Instant::now();

    let PressOutcome::Pending(ticket) = machine.pointer_down(
        RowTarget {
            index: 0,
            item_count: 3,
        },
        PointerKind::Touch,
        PointerSample::new(7, 0.0, 0.0),
        start,
    ) else {
        panic!("touch press should wait for the hold");
    };

    // The browser takes the gesture as a scroll
    assert!(machine.pointer_cancel(7));
    assert!(!machine.hold_elapsed(ticket, start + Duration::from_millis(500)));
    assert!(!machine.is_dragging());
    assert_eq!(body.get(), SurfaceStyle::default());
}

#[test]
fn release_in_place_reports_no_reorder() {
    let container = Surface::new(SurfaceStyle::default());
    let body = Surface::new(SurfaceStyle::default());
    let mut machine = machine(&container, &body);

    machine.pointer_down(
        RowTarget {
            index: 2,
            item_count: 5,
        },
        PointerKind::Mouse,
        PointerSample::new(1, 0.0, 300.0),
        Instant::now(),
    );
    machine.pointer_move(PointerSample::new(1, 0.0, 320.0));
    assert_eq!(machine.pointer_up(PointerSample::new(1, 0.0, 330.0)), None);
    assert!(!machine.lock().is_held());
}
