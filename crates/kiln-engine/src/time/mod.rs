//! Frame timing.
//!
//! One `FrameClock` per runtime; `tick()` once per driven frame.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
