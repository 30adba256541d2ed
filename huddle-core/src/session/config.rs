//! Controller configuration

use crate::runtime::SceneRef;

/// Configuration for the session controller
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Scene the runtime transitions to once a session is up
    /// (defaults to "game", can be overridden via HUDDLE_SCENE env var)
    pub scene: SceneRef,
}

impl ControllerConfig {
    pub fn new(scene: SceneRef) -> Self {
        Self { scene }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        let scene = std::env::var("HUDDLE_SCENE").unwrap_or_else(|_| "game".to_string());
        Self {
            scene: SceneRef::new(scene),
        }
    }
}
