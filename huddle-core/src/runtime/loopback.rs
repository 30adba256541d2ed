//! Loopback runtime for local play and demos
//!
//! LoopbackRuntime establishes no transport: every mode resolves to an
//! in-process session that is "up" immediately. The CLI demo drives the
//! controller with it, and smoke tests can use it where scripting a mock
//! would be overkill.

use async_trait::async_trait;
use tracing::{debug, info};

use super::traits::{RuntimeFactory, SessionRuntime, StartArgs};
use crate::error::RuntimeError;

/// In-process session runtime
#[derive(Debug, Default)]
pub struct LoopbackRuntime {
    running: bool,
    spent: bool,
}

impl LoopbackRuntime {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRuntime for LoopbackRuntime {
    async fn start(&mut self, args: StartArgs<'_>) -> Result<(), RuntimeError> {
        // Single-use contract: a spent runtime must not be restarted
        if self.spent || self.running {
            return Err(RuntimeError::StartFailed {
                reason: "loopback runtime already used".to_string(),
            });
        }
        if args.mode.is_networked() {
            debug!(name = %args.name, "loopback runtime: no listener to open, session is local");
        }
        self.running = true;
        self.spent = true;
        info!(mode = ?args.mode, name = %args.name, scene = %args.scene, "loopback session up");
        Ok(())
    }

    async fn shutdown(&mut self) -> Result<(), RuntimeError> {
        if self.running {
            self.running = false;
            info!("loopback session down");
        }
        Ok(())
    }
}

/// Factory for [`LoopbackRuntime`] instances
#[derive(Clone, Default)]
pub struct LoopbackRuntimeFactory;

impl LoopbackRuntimeFactory {
    pub fn new() -> Self {
        Self
    }
}

impl RuntimeFactory for LoopbackRuntimeFactory {
    fn create(&self) -> Box<dyn SessionRuntime> {
        Box::new(LoopbackRuntime::new())
    }
}
