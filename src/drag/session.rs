use std::time::{Duration, Instant};

use super::activation::{
    Activation, ActivationGate, HoldTicket, PointerKind, PointerSample, PressOutcome, RowTarget,
};
use super::geometry::resolve_target_index;
use super::preview::preview_sequence;
use super::scroll_lock::{ScrollLock, ScrollSurface};

/// State of the single active drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Index of the dragged row in the rendered list
    pub source_index: usize,
    /// Slot the row would land in if released now
    pub live_target_index: usize,
    /// Captured pointer; other pointers are ignored
    pub pointer_id: i32,
    /// Rendered row count at activation
    pub item_count: usize,
    origin: PointerSample,
    offset_y: f64,
}

impl DragSession {
    /// Vertical distance travelled since activation
    pub fn offset_y(&self) -> f64 {
        self.offset_y
    }

    pub fn origin(&self) -> PointerSample {
        self.origin
    }
}

/// A finished drag whose source and target differ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reorder {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Drag lifecycle for one list.
///
/// Holds the scroll lock if and only if a session is active. Every path out
/// of `Dragging` (release, cancel, capture loss, drop) releases it.
#[derive(Debug)]
pub struct DragMachine<S: ScrollSurface> {
    state: DragState,
    gate: ActivationGate,
    lock: ScrollLock<S>,
    slot_height: f64,
}

impl<S: ScrollSurface> DragMachine<S> {
    pub fn new(lock: ScrollLock<S>, slot_height: f64, hold_duration: Duration) -> Self {
        Self {
            state: DragState::Idle,
            gate: ActivationGate::new(hold_duration),
            lock,
            slot_height,
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging(session) => Some(session),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// A coarse press is waiting for its hold to elapse
    pub fn is_pending(&self) -> bool {
        self.gate.is_pending()
    }

    /// Whether the row at `index` is the one being dragged
    pub fn is_lifted(&self, index: usize) -> bool {
        self.session()
            .is_some_and(|session| session.source_index == index)
    }

    pub fn lock(&self) -> &ScrollLock<S> {
        &self.lock
    }

    /// Rendered list as it should be painted right now
    pub fn preview<T: Clone>(&self, rendered: &[T]) -> Vec<T> {
        match self.session() {
            Some(session) => {
                preview_sequence(rendered, session.source_index, session.live_target_index)
            }
            None => rendered.to_vec(),
        }
    }

    /// Pointer-down on a row handle
    pub fn pointer_down(
        &mut self,
        target: RowTarget,
        kind: PointerKind,
        sample: PointerSample,
        now: Instant,
    ) -> PressOutcome {
        if self.is_dragging() {
            tracing::debug!(
                pointer_id = sample.pointer_id,
                "Ignoring press during active drag"
            );
            return PressOutcome::Ignored;
        }

        let outcome = self.gate.pointer_down(target, kind, sample, now);
        if let PressOutcome::Activated(activation) = outcome {
            self.begin(activation);
        }
        outcome
    }

    /// Hold timer callback. Returns `true` if a drag started.
    pub fn hold_elapsed(&mut self, ticket: HoldTicket, now: Instant) -> bool {
        match self.gate.hold_elapsed(ticket, now) {
            Some(activation) => self.begin(activation),
            None => false,
        }
    }

    /// Frame-clock alternative to [`hold_elapsed`](Self::hold_elapsed)
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.gate.poll(now) {
            Some(activation) => self.begin(activation),
            None => false,
        }
    }

    fn begin(&mut self, activation: Activation) -> bool {
        let RowTarget { index, item_count } = activation.target;
        if item_count == 0 {
            self.gate.reset();
            return false;
        }

        let source_index = index.min(item_count - 1);
        self.lock.acquire();
        self.state = DragState::Dragging(DragSession {
            source_index,
            live_target_index: source_index,
            pointer_id: activation.origin.pointer_id,
            item_count,
            origin: activation.origin,
            offset_y: 0.0,
        });

        tracing::debug!(
            source_index,
            item_count,
            pointer_id = activation.origin.pointer_id,
            "Drag started"
        );
        true
    }

    /// Pointer-move anywhere over the list.
    ///
    /// Returns the new live target when it changed.
    pub fn pointer_move(&mut self, sample: PointerSample) -> Option<usize> {
        let slot_height = self.slot_height;
        match &mut self.state {
            DragState::Idle => {
                self.gate.pointer_move(sample);
                None
            }
            DragState::Dragging(session) => {
                if session.pointer_id != sample.pointer_id {
                    return None;
                }
                session.offset_y = sample.y - session.origin.y;
                let target = resolve_target_index(
                    session.offset_y,
                    session.source_index,
                    session.item_count,
                    slot_height,
                );
                if target == session.live_target_index {
                    return None;
                }
                session.live_target_index = target;
                Some(target)
            }
        }
    }

    /// Pointer-up. Returns the reorder to commit, if the row moved.
    pub fn pointer_up(&mut self, sample: PointerSample) -> Option<Reorder> {
        let session = match self.state {
            DragState::Idle => {
                self.gate.cancel_pending(Some(sample.pointer_id));
                return None;
            }
            DragState::Dragging(session) => session,
        };
        if session.pointer_id != sample.pointer_id {
            return None;
        }

        let to = resolve_target_index(
            sample.y - session.origin.y,
            session.source_index,
            session.item_count,
            self.slot_height,
        );
        self.finish();

        let from = session.source_index;
        tracing::debug!(from, to, "Drag released");
        (from != to).then_some(Reorder { from, to })
    }

    /// Pointer-cancel or loss of pointer capture for `pointer_id`.
    ///
    /// Returns `true` if a pending press or active drag was discarded.
    pub fn pointer_cancel(&mut self, pointer_id: i32) -> bool {
        match self.state {
            DragState::Idle => self.gate.cancel_pending(Some(pointer_id)),
            DragState::Dragging(session) if session.pointer_id == pointer_id => {
                tracing::debug!(pointer_id, "Drag cancelled");
                self.finish();
                true
            }
            DragState::Dragging(_) => false,
        }
    }

    /// Drop a pending press of `pointer_id` without touching an active drag.
    ///
    /// Used when the pointer leaves the handle before the hold elapses.
    pub fn cancel_pending(&mut self, pointer_id: i32) -> bool {
        self.gate.cancel_pending(Some(pointer_id))
    }

    /// Discard any pending press or active drag (e.g. the list unmounts)
    pub fn cancel(&mut self) -> bool {
        match self.state {
            DragState::Idle => self.gate.cancel_pending(None),
            DragState::Dragging(_) => {
                tracing::debug!("Drag torn down");
                self.finish();
                true
            }
        }
    }

    fn finish(&mut self) {
        self.state = DragState::Idle;
        self.gate.reset();
        self.lock.release();
    }
}
