//! Error types for huddle-core

use thiserror::Error;

use crate::session::ControllerState;
use crate::session::validate::{MAX_NAME_LEN, MIN_NAME_LEN};

/// Errors returned by the session controller
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(
        "invalid session name {name:?}: must be {}-{} characters after trimming",
        MIN_NAME_LEN,
        MAX_NAME_LEN
    )]
    InvalidName { name: String },

    #[error("another session request is in flight (controller is {state:?})")]
    Busy { state: ControllerState },

    #[error("runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

/// Errors reported by a session runtime
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("session start failed: {reason}")]
    StartFailed { reason: String },

    #[error("session shutdown failed: {reason}")]
    ShutdownFailed { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_name_displays_bounds_and_input() {
        let error = SessionError::InvalidName {
            name: "ab".to_string(),
        };
        let text = error.to_string();
        assert!(text.contains("invalid session name"));
        assert!(text.contains("\"ab\""));
        assert!(text.contains("3-32"));
    }

    #[test]
    fn busy_displays_current_state() {
        let error = SessionError::Busy {
            state: ControllerState::Starting,
        };
        assert!(error.to_string().contains("Starting"));
    }

    #[test]
    fn runtime_error_start_failed_displays_reason() {
        let error = RuntimeError::StartFailed {
            reason: "NetworkUnreachable".to_string(),
        };
        assert!(error.to_string().contains("session start failed"));
        assert!(error.to_string().contains("NetworkUnreachable"));
    }

    #[test]
    fn runtime_error_shutdown_failed_displays_reason() {
        let error = RuntimeError::ShutdownFailed {
            reason: "TransportStuck".to_string(),
        };
        assert!(error.to_string().contains("session shutdown failed"));
        assert!(error.to_string().contains("TransportStuck"));
    }

    #[test]
    fn session_error_converts_from_runtime_error() {
        let runtime_error = RuntimeError::StartFailed {
            reason: "refused".to_string(),
        };
        let session_error: SessionError = runtime_error.into();
        assert!(matches!(session_error, SessionError::Runtime(_)));
    }
}
