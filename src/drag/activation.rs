use std::time::{Duration, Instant};

/// Input device class reported with a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

impl PointerKind {
    /// Map a DOM `pointerType` string. Unknown kinds are treated as touch.
    pub fn from_pointer_type(pointer_type: &str) -> Self {
        match pointer_type {
            "mouse" => Self::Mouse,
            "pen" => Self::Pen,
            _ => Self::Touch,
        }
    }

    /// Precise devices start dragging immediately, without a hold
    pub fn is_precise(self) -> bool {
        matches!(self, Self::Mouse)
    }
}

/// A single pointer position (client coordinates)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    pub pointer_id: i32,
    pub x: f64,
    pub y: f64,
}

impl PointerSample {
    pub fn new(pointer_id: i32, x: f64, y: f64) -> Self {
        Self { pointer_id, x, y }
    }
}

/// The row a press landed on, in rendered-list coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowTarget {
    /// Index of the row in the currently rendered (possibly filtered) list
    pub index: usize,
    /// Number of rows currently rendered
    pub item_count: usize,
}

/// A press promoted into a drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Activation {
    pub target: RowTarget,
    /// Latest known pointer position; the drag offset is measured from here
    pub origin: PointerSample,
}

/// Handle for a scheduled hold timer.
///
/// The host sleeps for `delay()` and hands the ticket back to
/// [`ActivationGate::hold_elapsed`]. A ticket belongs to exactly one press;
/// once that press is cancelled the ticket is stale and never activates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldTicket {
    token: u64,
    delay: Duration,
}

impl HoldTicket {
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Result of feeding a pointer-down to the gate
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PressOutcome {
    /// Precise pointer: the drag starts now
    Activated(Activation),
    /// Coarse pointer: the host must schedule the hold timer
    Pending(HoldTicket),
    /// Another press is already pending or active
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq)]
enum GateState {
    #[default]
    Idle,
    PendingActivation {
        token: u64,
        target: RowTarget,
        pressed_at: Instant,
        latest: PointerSample,
    },
    Activated {
        pointer_id: i32,
    },
}

/// Decides when a pointer-down becomes a drag.
///
/// `Idle -> PendingActivation -> Activated`, or back to `Idle` when the
/// pending press is released or cancelled before the hold elapses.
#[derive(Debug, Clone)]
pub struct ActivationGate {
    hold_duration: Duration,
    state: GateState,
    next_token: u64,
}

impl ActivationGate {
    pub fn new(hold_duration: Duration) -> Self {
        Self {
            hold_duration,
            state: GateState::Idle,
            next_token: 0,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, GateState::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, GateState::PendingActivation { .. })
    }

    pub fn is_activated(&self) -> bool {
        matches!(self.state, GateState::Activated { .. })
    }

    /// Pointer id owning the gate, if any
    pub fn pointer_id(&self) -> Option<i32> {
        match self.state {
            GateState::Idle => None,
            GateState::PendingActivation { latest, .. } => Some(latest.pointer_id),
            GateState::Activated { pointer_id } => Some(pointer_id),
        }
    }

    /// Handle a pointer-down on a row handle
    pub fn pointer_down(
        &mut self,
        target: RowTarget,
        kind: PointerKind,
        sample: PointerSample,
        now: Instant,
    ) -> PressOutcome {
        if !self.is_idle() {
            tracing::debug!(
                pointer_id = sample.pointer_id,
                owner = ?self.pointer_id(),
                "Ignoring press while another press is in progress"
            );
            return PressOutcome::Ignored;
        }

        if kind.is_precise() {
            self.state = GateState::Activated {
                pointer_id: sample.pointer_id,
            };
            return PressOutcome::Activated(Activation {
                target,
                origin: sample,
            });
        }

        let token = self.next_token;
        self.next_token = self.next_token.wrapping_add(1);
        self.state = GateState::PendingActivation {
            token,
            target,
            pressed_at: now,
            latest: sample,
        };
        tracing::debug!(
            index = target.index,
            pointer_id = sample.pointer_id,
            hold_ms = self.hold_duration.as_millis() as u64,
            "Press pending hold activation"
        );
        PressOutcome::Pending(HoldTicket {
            token,
            delay: self.hold_duration,
        })
    }

    /// Remember the latest position of the pending pointer
    pub fn pointer_move(&mut self, sample: PointerSample) {
        if let GateState::PendingActivation { ref mut latest, .. } = self.state {
            if latest.pointer_id == sample.pointer_id {
                *latest = sample;
            }
        }
    }

    /// Timer callback. Activates only if `ticket` belongs to the pending press.
    pub fn hold_elapsed(&mut self, ticket: HoldTicket, now: Instant) -> Option<Activation> {
        match self.state {
            GateState::PendingActivation { token, .. } if token == ticket.token => self.poll(now),
            _ => None,
        }
    }

    /// Activate the pending press if the hold duration has passed.
    ///
    /// For hosts that drive the gate from a frame clock instead of timers.
    pub fn poll(&mut self, now: Instant) -> Option<Activation> {
        let GateState::PendingActivation {
            target,
            pressed_at,
            latest,
            ..
        } = self.state
        else {
            return None;
        };

        if now.saturating_duration_since(pressed_at) < self.hold_duration {
            return None;
        }

        self.state = GateState::Activated {
            pointer_id: latest.pointer_id,
        };
        Some(Activation {
            target,
            origin: latest,
        })
    }

    /// Cancel a pending press (pointer-up, pointer-cancel, pointer-leave).
    ///
    /// With `Some(pointer_id)`, only that pointer's press is cancelled.
    /// Returns `true` if a pending press was dropped.
    pub fn cancel_pending(&mut self, pointer_id: Option<i32>) -> bool {
        let GateState::PendingActivation { latest, .. } = self.state else {
            return false;
        };
        if pointer_id.is_some_and(|id| id != latest.pointer_id) {
            return false;
        }
        tracing::debug!(pointer_id = latest.pointer_id, "Pending press cancelled");
        self.state = GateState::Idle;
        true
    }

    /// Return to idle from any state (drag finished or torn down)
    pub fn reset(&mut self) {
        self.state = GateState::Idle;
    }
}

impl Default for ActivationGate {
    fn default() -> Self {
        Self::new(crate::drag::DEFAULT_HOLD_DURATION)
    }
}
