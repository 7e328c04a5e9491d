//! Input subsystem.
//!
//! Public types are platform-agnostic; `platform` translates winit window
//! events into [`Event`]s, which the runtime queues until the application
//! polls them.

mod mouse;
pub(crate) mod platform;
mod queue;
mod types;

pub use mouse::MouseState;
pub use queue::EventQueue;
pub use types::{Event, Key, MouseButton};
