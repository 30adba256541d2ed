//! Session lifecycle management
//!
//! One [`SessionController`] instance owns the process's active session and
//! arbitrates overlapping requests to replace it.

pub mod config;
pub mod controller;
pub mod gate;
pub mod handle;
pub mod types;
pub mod validate;

// Re-export key types for convenience
pub use config::ControllerConfig;
pub use controller::SessionController;
pub use gate::RequestGate;
pub use handle::SessionHandle;
pub use types::{ControllerState, SOLO_SESSION_NAME, SessionMode, SessionRequest, StartResult};
pub use validate::{MAX_NAME_LEN, MIN_NAME_LEN, is_valid_session_name};
