//! Request gate: the controller's reentrancy guard
//!
//! The [`ControllerState`] value itself is the mutual-exclusion token.
//! Claims and transitions go through a watch channel, so the
//! compare-and-set is atomic, observers get change notifications, and no
//! lock is ever held across an await. A runtime that never resolves parks
//! the controller in `Starting`/`ShuttingDown` with every new request
//! rejected, instead of deadlocking anything.

use tokio::sync::watch;

use super::types::ControllerState;

pub struct RequestGate {
    state: watch::Sender<ControllerState>,
}

impl RequestGate {
    pub fn new() -> Self {
        let (state, _) = watch::channel(ControllerState::Idle);
        Self { state }
    }

    /// Non-blocking snapshot of the current state
    pub fn snapshot(&self) -> ControllerState {
        *self.state.borrow()
    }

    /// Watch state transitions
    pub fn subscribe(&self) -> watch::Receiver<ControllerState> {
        self.state.subscribe()
    }

    /// Claim the controller for a request.
    ///
    /// Succeeds only from `Idle` or `Active`, atomically moving the token to
    /// `ShuttingDown`, and returns the state the claim displaced. Any other
    /// state means a request already holds the token; the caller gets that
    /// state back and must give up rather than queue.
    pub fn try_claim(&self) -> Result<ControllerState, ControllerState> {
        let mut previous = ControllerState::Idle;
        let claimed = self.state.send_if_modified(|state| {
            previous = *state;
            if state.accepts_requests() {
                *state = ControllerState::ShuttingDown;
                true
            } else {
                false
            }
        });
        if claimed { Ok(previous) } else { Err(previous) }
    }

    /// Move the token; only meaningful while holding a claim
    pub fn advance(&self, next: ControllerState) {
        self.state.send_replace(next);
    }
}

impl Default for RequestGate {
    fn default() -> Self {
        Self::new()
    }
}
