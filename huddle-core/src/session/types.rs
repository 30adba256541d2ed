//! Session request and state types

use serde::{Deserialize, Serialize};

use super::validate;
use crate::error::SessionError;

/// Fixed session label used for solo play, where no name is entered
pub const SOLO_SESSION_NAME: &str = "solo";

/// Topology role the local process takes in a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionMode {
    /// Local-only play; never opens a network listener
    Solo,
    /// Host a session others can join
    Host,
    /// Join a session hosted elsewhere
    Client,
    /// Join the named session if it exists, otherwise host it
    AutoHostOrClient,
}

impl SessionMode {
    /// Whether this mode establishes network transport
    pub fn is_networked(self) -> bool {
        !matches!(self, SessionMode::Solo)
    }
}

/// A request to replace the active session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRequest {
    pub mode: SessionMode,
    pub name: String,
}

impl SessionRequest {
    pub fn new(mode: SessionMode, name: impl Into<String>) -> Self {
        Self {
            mode,
            name: name.into(),
        }
    }

    /// Solo play; the name field is not consulted
    pub fn solo() -> Self {
        Self::new(SessionMode::Solo, SOLO_SESSION_NAME)
    }

    /// Host the named session
    pub fn host(name: impl Into<String>) -> Self {
        Self::new(SessionMode::Host, name)
    }

    /// Join the named session
    pub fn join(name: impl Into<String>) -> Self {
        Self::new(SessionMode::Client, name)
    }

    /// Join the named session, hosting it if nobody has
    pub fn host_or_join(name: impl Into<String>) -> Self {
        Self::new(SessionMode::AutoHostOrClient, name)
    }

    /// Resolve the name the session will actually carry.
    ///
    /// Solo sessions always use [`SOLO_SESSION_NAME`]; networked modes
    /// require a valid name, which gets trimmed. This check is the
    /// authoritative one: collaborator-side validation is only a hint.
    pub fn effective_name(&self) -> Result<String, SessionError> {
        if !self.mode.is_networked() {
            return Ok(SOLO_SESSION_NAME.to_string());
        }
        if !validate::is_valid_session_name(&self.name) {
            return Err(SessionError::InvalidName {
                name: self.name.clone(),
            });
        }
        Ok(self.name.trim().to_string())
    }
}

/// Lifecycle state of the controller; doubles as the request-exclusion token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerState {
    /// No session; ready for a request
    Idle,
    /// A start request is waiting on the runtime
    Starting,
    /// A session is up
    Active,
    /// A previous session is being torn down
    ShuttingDown,
}

impl ControllerState {
    /// Whether a new request may claim the controller in this state
    pub fn accepts_requests(self) -> bool {
        matches!(self, ControllerState::Idle | ControllerState::Active)
    }
}

/// Details of a successfully started session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartResult {
    pub mode: SessionMode,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== SessionMode Tests ====================

    #[test]
    fn solo_is_not_networked() {
        assert!(!SessionMode::Solo.is_networked());
    }

    #[test]
    fn all_other_modes_are_networked() {
        assert!(SessionMode::Host.is_networked());
        assert!(SessionMode::Client.is_networked());
        assert!(SessionMode::AutoHostOrClient.is_networked());
    }

    #[test]
    fn session_mode_serialization_roundtrip() {
        let modes = vec![
            SessionMode::Solo,
            SessionMode::Host,
            SessionMode::Client,
            SessionMode::AutoHostOrClient,
        ];

        for mode in modes {
            let json = serde_json::to_string(&mode).unwrap();
            let parsed: SessionMode = serde_json::from_str(&json).unwrap();
            assert_eq!(mode, parsed);
        }
    }

    // ==================== SessionRequest Tests ====================

    #[test]
    fn constructors_set_the_matching_mode() {
        assert_eq!(SessionRequest::solo().mode, SessionMode::Solo);
        assert_eq!(SessionRequest::host("Room1").mode, SessionMode::Host);
        assert_eq!(SessionRequest::join("Room1").mode, SessionMode::Client);
        assert_eq!(
            SessionRequest::host_or_join("Room1").mode,
            SessionMode::AutoHostOrClient
        );
    }

    #[test]
    fn solo_effective_name_is_the_fixed_label() {
        let request = SessionRequest::new(SessionMode::Solo, "whatever was typed");
        assert_eq!(request.effective_name().unwrap(), SOLO_SESSION_NAME);
    }

    #[test]
    fn networked_effective_name_is_trimmed() {
        let request = SessionRequest::host("  Room1  ");
        assert_eq!(request.effective_name().unwrap(), "Room1");
    }

    #[test]
    fn networked_invalid_name_is_rejected() {
        let request = SessionRequest::join(" ab ");
        let err = request.effective_name().unwrap_err();
        assert!(matches!(err, SessionError::InvalidName { ref name } if name == " ab "));
    }

    // ==================== ControllerState Tests ====================

    #[test]
    fn idle_and_active_accept_requests() {
        assert!(ControllerState::Idle.accepts_requests());
        assert!(ControllerState::Active.accepts_requests());
    }

    #[test]
    fn transitional_states_reject_requests() {
        assert!(!ControllerState::Starting.accepts_requests());
        assert!(!ControllerState::ShuttingDown.accepts_requests());
    }

    #[test]
    fn controller_state_serialization_roundtrip() {
        let states = vec![
            ControllerState::Idle,
            ControllerState::Starting,
            ControllerState::Active,
            ControllerState::ShuttingDown,
        ];

        for state in states {
            let json = serde_json::to_string(&state).unwrap();
            let parsed: ControllerState = serde_json::from_str(&json).unwrap();
            assert_eq!(state, parsed);
        }
    }
}
