//! Kiln engine crate.
//!
//! A small immediate-mode rendering layer: numbered views with clear state,
//! resizable dynamic vertex/index buffers, a debug text grid and a debug
//! overlay, all advanced once per `frame()`. Also owns the single-window
//! platform harness that drives an [`core::App`].

pub mod core;
pub mod coords;
pub mod device;
pub mod gfx;
pub mod input;
pub mod logging;
pub mod overlay;
pub mod time;
pub mod window;

mod render;
mod text;
