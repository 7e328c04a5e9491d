//! GPU rendering for everything the engine draws itself.
//!
//! Debug text and overlay commands are flattened into one [`QuadBatch`] of
//! solid and glyph quads and drawn by a single instanced pipeline on top of
//! the processed views.
//!
//! Convention:
//! - CPU geometry is in physical pixels (top-left origin, +Y down).
//! - The vertex shader converts to NDC using a viewport uniform.

mod atlas;
mod batch;
mod common;
mod ctx;
mod quads;

pub(crate) use atlas::{AtlasGlyph, GlyphAtlas};
pub(crate) use batch::{GlyphLookup, QuadBatch};
pub(crate) use ctx::{RenderCtx, RenderTarget};
pub(crate) use quads::QuadRenderer;
