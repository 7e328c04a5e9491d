//! Immediate-mode rendering interface.
//!
//! The [`Gfx`] trait is the whole surface applications talk to: views with
//! clear/viewport state, resizable dynamic vertex/index buffers, a debug
//! text grid, an overlay draw list and `frame()`. [`Graphics`] implements it
//! on wgpu.

mod api;
mod buffer;
mod color;
mod debug_text;
mod error;
mod flags;
mod graphics;
mod handle;
mod layout;
mod stats;
mod view;

pub use api::Gfx;
pub use color::Color;
pub use debug_text::{DebugText, TextCell, CELL_HEIGHT, CELL_WIDTH, PALETTE};
pub use error::GfxError;
pub use flags::{BufferFlags, ClearFlags, DebugFlags, ResetFlags};
pub use graphics::Graphics;
pub use handle::{DynamicIndexBufferHandle, DynamicVertexBufferHandle, ViewId, MAX_VIEWS};
pub use layout::{Attrib, AttribType, VertexAttribute, VertexLayout};
pub use stats::Stats;
pub use view::{ViewClear, ViewRect};

pub(crate) use buffer::{DynamicBufferInfo, UpdatePlan};
pub(crate) use handle::HandleTable;
pub(crate) use view::ViewTable;
