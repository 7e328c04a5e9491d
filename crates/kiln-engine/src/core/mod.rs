//! Core engine-facing contracts.
//!
//! The interface between the runtime (platform loop) and an application:
//! lifecycle trait, per-frame context and the window state the harness
//! tracks on the application's behalf.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, InitCtx, WindowState};
