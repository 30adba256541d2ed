//! The session controller
//!
//! One instance, created at application startup and shared by handle, owns
//! the process's active session. Every accepted request tears down whatever
//! session exists and starts a fresh one; overlapping requests are rejected,
//! not queued. The state token in [`RequestGate`] is what makes the whole of
//! `request_start` behave as a single critical section without holding any
//! lock across the runtime's async calls.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

use super::config::ControllerConfig;
use super::gate::RequestGate;
use super::handle::SessionHandle;
use super::types::{ControllerState, SessionRequest, StartResult};
use crate::error::SessionError;
use crate::runtime::RuntimeFactory;

pub struct SessionController {
    config: ControllerConfig,
    runtimes: Arc<dyn RuntimeFactory>,
    gate: RequestGate,
    /// The one live handle. Only the task holding the gate's token touches
    /// this, and the lock is never held across an await.
    handle: Mutex<Option<SessionHandle>>,
}

impl SessionController {
    pub fn new(config: ControllerConfig, runtimes: Arc<dyn RuntimeFactory>) -> Self {
        Self {
            config,
            runtimes,
            gate: RequestGate::new(),
            handle: Mutex::new(None),
        }
    }

    /// Replace the active session with the requested one.
    ///
    /// An invalid name fails immediately with [`SessionError::InvalidName`]
    /// and no state change. A request arriving while another is in flight
    /// fails with [`SessionError::Busy`] and is dropped, not queued - the
    /// gate, not any collaborator-side button disabling, is the safety
    /// mechanism against double-submits.
    ///
    /// Drive the returned future to completion: abandoning it between its
    /// suspension points leaves the controller claimed and every later
    /// request rejected.
    pub async fn request_start(
        &self,
        request: SessionRequest,
    ) -> Result<StartResult, SessionError> {
        // Authoritative name check, before any state changes
        let name = request.effective_name()?;

        let displaced = self
            .gate
            .try_claim()
            .map_err(|state| SessionError::Busy { state })?;
        debug!(mode = ?request.mode, name = %name, from = ?displaced, "session request accepted");

        // Always replace: even a mode-preserving request gets a fresh
        // runtime, since a terminated one cannot be restarted.
        self.teardown_current().await;

        self.gate.advance(ControllerState::Starting);
        let mut handle = SessionHandle::new(self.runtimes.create(), request.mode, name.clone());
        match handle.start(&self.config.scene).await {
            Ok(()) => {
                *self.handle.lock().await = Some(handle);
                self.gate.advance(ControllerState::Active);
                info!(mode = ?request.mode, name = %name, "session active");
                Ok(StartResult {
                    mode: request.mode,
                    name,
                })
            }
            Err(err) => {
                // Never keep a half-started handle around
                if let Err(release_err) = handle.release().await {
                    warn!(error = %release_err, "failed runtime also refused to release");
                }
                self.gate.advance(ControllerState::Idle);
                warn!(mode = ?request.mode, name = %name, error = %err, "session start failed");
                Err(SessionError::Runtime(err))
            }
        }
    }

    /// Non-blocking snapshot of the controller state, for status display only
    pub fn current_state(&self) -> ControllerState {
        self.gate.snapshot()
    }

    /// Watch controller state transitions
    pub fn subscribe(&self) -> watch::Receiver<ControllerState> {
        self.gate.subscribe()
    }

    /// Mode and name of the live session, if any
    pub async fn active_session(&self) -> Option<StartResult> {
        self.handle.lock().await.as_ref().map(|handle| StartResult {
            mode: handle.mode(),
            name: handle.name().to_string(),
        })
    }

    /// Tear the active session down, e.g. on application exit.
    ///
    /// Valid from any state: if a request is in flight, the call waits for
    /// it to settle before tearing down. Idempotent when already idle.
    pub async fn shutdown(&self) {
        let mut changes = self.gate.subscribe();
        loop {
            match self.gate.try_claim() {
                Ok(_) => break,
                Err(state) => {
                    debug!(state = ?state, "shutdown waiting for in-flight request");
                    // The sender lives in self, so the channel cannot close
                    // out from under us
                    if changes.changed().await.is_err() {
                        return;
                    }
                }
            }
        }
        self.teardown_current().await;
        self.gate.advance(ControllerState::Idle);
        debug!("controller idle");
    }

    /// Release and drop the current handle, if any.
    ///
    /// A runtime that fails to shut down is still discarded: keeping a
    /// stale handle referenced is worse than a best-effort release.
    async fn teardown_current(&self) {
        let previous = self.handle.lock().await.take();
        if let Some(mut handle) = previous {
            info!(name = %handle.name(), mode = ?handle.mode(), "shutting down previous session");
            if let Err(err) = handle.release().await {
                warn!(name = %handle.name(), error = %err, "previous session shutdown failed; discarding handle");
            }
        }
    }
}
