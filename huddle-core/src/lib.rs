//! huddle-core: session lifecycle control for a multiplayer client
//!
//! This crate provides the pieces a client application needs to own its one
//! active multiplayer session:
//!
//! - **Session control** - [`SessionController`] serializes start/stop
//!   requests, replaces the session handle on every accepted request, and
//!   guarantees at most one live session per process
//! - **Runtime abstraction** - [`SessionRuntime`] and [`RuntimeFactory`]
//!   keep the networking provider swappable: loopback for local play,
//!   mocks for tests, a real transport in production
//! - **Validation** - [`is_valid_session_name`] for collaborator-side
//!   session name checks (the controller re-validates authoritatively)
//! - **State observation** - [`ControllerState`] snapshots and watch-based
//!   change notification for status display
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use huddle_core::{
//!     ControllerConfig, LoopbackRuntimeFactory, SessionController, SessionRequest,
//! };
//!
//! # async fn example() -> Result<(), huddle_core::SessionError> {
//! let controller = SessionController::new(
//!     ControllerConfig::default(),
//!     Arc::new(LoopbackRuntimeFactory::new()),
//! );
//!
//! let started = controller.request_start(SessionRequest::host("Room1")).await?;
//! println!("hosting {}", started.name);
//!
//! controller.shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod runtime;
pub mod session;

// Re-export key types for convenience
pub use error::{RuntimeError, SessionError};
pub use runtime::{
    LoopbackRuntime, LoopbackRuntimeFactory, MockRuntime, MockRuntimeFactory, RuntimeFactory,
    RuntimeProbe, SceneRef, SessionRuntime, StartArgs,
};
pub use session::{
    ControllerConfig, ControllerState, RequestGate, SessionController, SessionHandle, SessionMode,
    SessionRequest, StartResult, is_valid_session_name,
};
