//! Debug overlay: an immediate-mode UI recorded into a [`DrawList`] each
//! frame and handed to [`crate::gfx::Gfx::submit_overlay`].
//!
//! Text in the overlay uses the debug text cell metrics, so layout needs no
//! font access on the CPU side.

mod list;
mod ui;

pub use list::{DrawCmd, DrawItem, DrawList};
pub use ui::{DialogUi, Overlay, WindowResponse, MUTED_RGBA};
