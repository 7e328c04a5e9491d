use crate::overlay::DrawList;

use super::{
    BufferFlags, ClearFlags, DebugFlags, DynamicIndexBufferHandle, DynamicVertexBufferHandle,
    GfxError, ResetFlags, Stats, VertexLayout, ViewId,
};

/// The immediate rendering interface.
///
/// State set through this trait is recorded on the host and consumed by
/// [`Gfx::frame`], which processes touched views in ascending id order, draws
/// the debug text and overlay on top, and presents. After `frame` returns the
/// caller may freely mutate and re-upload its own buffers.
pub trait Gfx {
    /// Human-readable backend name, e.g. "Vulkan (AMD Radeon ...)".
    fn renderer_name(&self) -> &str;

    fn set_debug(&mut self, flags: DebugFlags);

    /// Resizes the backbuffer and applies reset flags (vsync).
    fn reset(&mut self, width: u32, height: u32, flags: ResetFlags);

    /// Sets clear flags and values for `view`. `rgba` is `0xRRGGBBAA`.
    ///
    /// Ids past `MAX_VIEWS` are ignored with a warning.
    fn set_view_clear(&mut self, view: ViewId, flags: ClearFlags, rgba: u32, depth: f32, stencil: u8);

    /// Sets the viewport of `view` in backbuffer pixels.
    ///
    /// Ids past `MAX_VIEWS` are ignored with a warning.
    fn set_view_rect(&mut self, view: ViewId, x: u16, y: u16, width: u16, height: u16);

    /// Marks `view` for processing this frame so its clear runs even when
    /// nothing is drawn into it.
    fn touch(&mut self, view: ViewId) -> Result<(), GfxError>;

    fn create_dynamic_vertex_buffer(
        &mut self,
        num_vertices: u32,
        layout: &VertexLayout,
        flags: BufferFlags,
    ) -> Result<DynamicVertexBufferHandle, GfxError>;

    fn create_dynamic_index_buffer(
        &mut self,
        num_indices: u32,
        flags: BufferFlags,
    ) -> Result<DynamicIndexBufferHandle, GfxError>;

    /// Replaces buffer contents starting at vertex `start_vertex`.
    fn update_dynamic_vertex_buffer(
        &mut self,
        handle: DynamicVertexBufferHandle,
        start_vertex: u32,
        data: &[u8],
    ) -> Result<(), GfxError>;

    /// Replaces buffer contents starting at index `start_index`.
    fn update_dynamic_index_buffer(
        &mut self,
        handle: DynamicIndexBufferHandle,
        start_index: u32,
        data: &[u8],
    ) -> Result<(), GfxError>;

    fn destroy_dynamic_vertex_buffer(&mut self, handle: DynamicVertexBufferHandle) -> Result<(), GfxError>;

    fn destroy_dynamic_index_buffer(&mut self, handle: DynamicIndexBufferHandle) -> Result<(), GfxError>;

    /// Blanks the debug text grid with `attr`.
    fn dbg_text_clear(&mut self, attr: u8);

    /// Prints into the debug text grid at cell `(x, y)`.
    fn dbg_text_print(&mut self, x: u16, y: u16, attr: u8, text: &str);

    /// Hands over this frame's overlay draw list; drawn above everything else.
    fn submit_overlay(&mut self, list: DrawList);

    /// Counters of the last completed frame.
    fn stats(&self) -> Stats;

    /// Finishes the frame and presents it. Returns the number of the frame
    /// just completed.
    fn frame(&mut self) -> Result<u32, GfxError>;
}
