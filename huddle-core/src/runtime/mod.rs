//! Network session runtime abstraction

pub mod loopback;
pub mod mock;
pub mod traits;

// Re-export key types for convenience
pub use loopback::{LoopbackRuntime, LoopbackRuntimeFactory};
pub use mock::{MockRuntime, MockRuntimeFactory, ProbeEvent, RuntimeProbe};
pub use traits::{RuntimeFactory, SceneRef, SessionRuntime, StartArgs};
