use anyhow::Result;

use crate::gfx::Gfx;

use super::ctx::{FrameCtx, InitCtx};

/// Control directive returned by [`App::update`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application lifecycle driven by [`crate::window::Runtime`].
///
/// `init` runs once after the engine is initialized, `update` once per
/// redraw until it returns [`AppControl::Exit`] or an error, and `shutdown`
/// exactly once before the engine itself shuts down.
pub trait App {
    fn init(&mut self, ctx: &mut InitCtx<'_>) -> Result<()>;

    fn update(&mut self, ctx: &mut FrameCtx<'_>) -> Result<AppControl>;

    /// Releases engine resources the application owns. Returns the process
    /// exit code.
    fn shutdown(&mut self, gfx: &mut dyn Gfx) -> i32;
}
