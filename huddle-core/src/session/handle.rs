//! Session handle: scoped ownership of one runtime object

use tracing::debug;
use uuid::Uuid;

use super::types::SessionMode;
use crate::error::RuntimeError;
use crate::runtime::{SceneRef, SessionRuntime, StartArgs};

/// Owns exactly one session runtime object.
///
/// A handle is created per accepted start request and destroyed before the
/// next one begins; it is never reused, because a runtime that has already
/// terminated on the provider side cannot be safely restarted. Destruction
/// always goes through [`release`](SessionHandle::release).
pub struct SessionHandle {
    id: Uuid,
    mode: SessionMode,
    name: String,
    runtime: Box<dyn SessionRuntime>,
    running: bool,
}

impl SessionHandle {
    pub fn new(
        runtime: Box<dyn SessionRuntime>,
        mode: SessionMode,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            mode,
            name: name.into(),
            runtime,
            running: false,
        }
    }

    /// Identifier for log correlation
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ask the runtime to begin the session
    pub async fn start(&mut self, scene: &SceneRef) -> Result<(), RuntimeError> {
        let args = StartArgs {
            mode: self.mode,
            name: &self.name,
            scene,
        };
        self.runtime.start(args).await?;
        self.running = true;
        debug!(handle = %self.id, name = %self.name, "session handle running");
        Ok(())
    }

    /// Release the underlying runtime resource.
    ///
    /// Idempotent, and a no-op on a handle that never started. The running
    /// flag is cleared before the runtime shutdown is awaited, so a handle
    /// whose shutdown failed can still be discarded.
    pub async fn release(&mut self) -> Result<(), RuntimeError> {
        if !self.running {
            return Ok(());
        }
        self.running = false;
        debug!(handle = %self.id, name = %self.name, "releasing session handle");
        self.runtime.shutdown().await
    }
}
