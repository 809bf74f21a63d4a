// Drag module - pointer-driven reordering of a vertical list
//
// Architecture: explicit state machine over pointer events
// =========================================================
// A pointer-down on a row handle goes through the ActivationGate. Precise
// pointers (mouse) activate at once; coarse pointers (touch, pen) only after
// a sustained hold so that taps and scroll gestures pass through untouched.
//
// Once activated, the DragMachine holds a DragSession and the ScrollLock.
// Every move recomputes the live target slot via `resolve_target_index`; the
// rendering layer derives the preview sequence from (source, target). On
// release the machine hands (source, target) to the committer when they
// differ; on cancel it discards everything. The lock is released on every
// exit path, including drop.

use std::time::Duration;

mod activation;
mod commit;
mod geometry;
mod preview;
mod scroll_lock;
mod session;

pub use activation::{
    Activation, ActivationGate, HoldTicket, PointerKind, PointerSample, PressOutcome, RowTarget,
};
pub use commit::{commit, Ordered, PositionUpdate, ReorderStore};
pub use geometry::resolve_target_index;
pub use preview::{move_item, preview_sequence};
pub use scroll_lock::{Overflow, ScrollLock, ScrollSurface, SurfaceStyle, TouchAction};
pub use session::{DragMachine, DragSession, Reorder};

// ============================================================================
// Constants
// ============================================================================

/// Fixed row slot height in pixels (must match CSS .entry-row { height })
pub const DEFAULT_SLOT_HEIGHT: f64 = 70.0;

/// Hold duration before a coarse pointer press turns into a drag
pub const DEFAULT_HOLD_DURATION: Duration = Duration::from_millis(450);
