//! SessionRuntime trait and related types
//!
//! The runtime abstraction keeps the networking provider swappable:
//! loopback for local play and demos, mocks for tests, a real transport in
//! production. The controller treats it as an opaque capability and knows
//! nothing about the protocol behind it.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RuntimeError;
use crate::session::SessionMode;

/// Opaque reference to the gameplay scene a runtime loads once its session
/// is up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneRef(String);

impl SceneRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SceneRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Arguments for starting a session runtime
#[derive(Debug, Clone, Copy)]
pub struct StartArgs<'a> {
    /// Topology role the local process takes
    pub mode: SessionMode,
    /// Session name, already trimmed and validated by the controller
    pub name: &'a str,
    /// Scene to transition to once the session is up
    pub scene: &'a SceneRef,
}

/// Trait for network session runtimes
///
/// Implementations establish transport and authority for one session. A
/// runtime object is single-use: once shut down (or failed to start) it
/// must not be started again.
#[async_trait]
pub trait SessionRuntime: Send {
    /// Begin the session
    async fn start(&mut self, args: StartArgs<'_>) -> Result<(), RuntimeError>;

    /// Tear the session down and release its transport
    async fn shutdown(&mut self) -> Result<(), RuntimeError>;
}

/// Factory for creating session runtimes
///
/// Enables dependency injection of runtime implementations. The controller
/// mints a fresh runtime for every accepted start request and never reuses
/// one across requests.
pub trait RuntimeFactory: Send + Sync {
    /// Create a new runtime instance
    fn create(&self) -> Box<dyn SessionRuntime>;
}
