//! Screen-space geometry shared by the overlay and renderers.
//!
//! All values are physical pixels, origin top-left, +Y down. This matches
//! the debug text grid, which is laid out in backbuffer pixels.

mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::Vec2;
