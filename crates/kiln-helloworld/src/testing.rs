//! Recording `Gfx` used by the application tests.

use kiln_engine::gfx::{
    BufferFlags, ClearFlags, DebugFlags, DynamicIndexBufferHandle, DynamicVertexBufferHandle, Gfx,
    GfxError, ResetFlags, Stats, VertexLayout, ViewId,
};
use kiln_engine::overlay::DrawList;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetDebug(DebugFlags),
    Reset { width: u32, height: u32, flags: ResetFlags },
    SetViewClear { view: ViewId, flags: ClearFlags, rgba: u32 },
    SetViewRect { view: ViewId, width: u16, height: u16 },
    Touch(ViewId),
    CreateVertex { num: u32, stride: u16, flags: BufferFlags },
    CreateIndex { num: u32, flags: BufferFlags },
    UpdateVertex { start: u32, bytes: usize },
    UpdateIndex { start: u32, bytes: usize },
    DestroyVertex(u16),
    DestroyIndex(u16),
    Print { x: u16, y: u16, attr: u8, text: String },
    Overlay { items: usize },
    Frame,
}

#[derive(Debug, Default)]
pub struct RecordingGfx {
    pub calls: Vec<Call>,
    /// Buffer updates fail with an invalid handle.
    pub fail_updates: bool,
    next_handle: u16,
    frames: u32,
}

impl RecordingGfx {
    pub fn failing_updates() -> Self {
        Self {
            fail_updates: true,
            ..Self::default()
        }
    }
}

impl Gfx for RecordingGfx {
    fn renderer_name(&self) -> &str {
        "Recording"
    }

    fn set_debug(&mut self, flags: DebugFlags) {
        self.calls.push(Call::SetDebug(flags));
    }

    fn reset(&mut self, width: u32, height: u32, flags: ResetFlags) {
        self.calls.push(Call::Reset { width, height, flags });
    }

    fn set_view_clear(&mut self, view: ViewId, flags: ClearFlags, rgba: u32, _depth: f32, _stencil: u8) {
        self.calls.push(Call::SetViewClear { view, flags, rgba });
    }

    fn set_view_rect(&mut self, view: ViewId, _x: u16, _y: u16, width: u16, height: u16) {
        self.calls.push(Call::SetViewRect { view, width, height });
    }

    fn touch(&mut self, view: ViewId) -> Result<(), GfxError> {
        self.calls.push(Call::Touch(view));
        Ok(())
    }

    fn create_dynamic_vertex_buffer(
        &mut self,
        num: u32,
        layout: &VertexLayout,
        flags: BufferFlags,
    ) -> Result<DynamicVertexBufferHandle, GfxError> {
        self.calls.push(Call::CreateVertex {
            num,
            stride: layout.stride(),
            flags,
        });
        self.next_handle += 1;
        Ok(DynamicVertexBufferHandle::from_raw(self.next_handle - 1))
    }

    fn create_dynamic_index_buffer(
        &mut self,
        num: u32,
        flags: BufferFlags,
    ) -> Result<DynamicIndexBufferHandle, GfxError> {
        self.calls.push(Call::CreateIndex { num, flags });
        self.next_handle += 1;
        Ok(DynamicIndexBufferHandle::from_raw(self.next_handle - 1))
    }

    fn update_dynamic_vertex_buffer(
        &mut self,
        handle: DynamicVertexBufferHandle,
        start: u32,
        data: &[u8],
    ) -> Result<(), GfxError> {
        if self.fail_updates {
            return Err(GfxError::InvalidHandle {
                kind: "dynamic vertex buffer",
                index: handle.raw(),
            });
        }
        self.calls.push(Call::UpdateVertex { start, bytes: data.len() });
        Ok(())
    }

    fn update_dynamic_index_buffer(
        &mut self,
        handle: DynamicIndexBufferHandle,
        start: u32,
        data: &[u8],
    ) -> Result<(), GfxError> {
        if self.fail_updates {
            return Err(GfxError::InvalidHandle {
                kind: "dynamic index buffer",
                index: handle.raw(),
            });
        }
        self.calls.push(Call::UpdateIndex { start, bytes: data.len() });
        Ok(())
    }

    fn destroy_dynamic_vertex_buffer(&mut self, handle: DynamicVertexBufferHandle) -> Result<(), GfxError> {
        self.calls.push(Call::DestroyVertex(handle.raw()));
        Ok(())
    }

    fn destroy_dynamic_index_buffer(&mut self, handle: DynamicIndexBufferHandle) -> Result<(), GfxError> {
        self.calls.push(Call::DestroyIndex(handle.raw()));
        Ok(())
    }

    fn dbg_text_clear(&mut self, _attr: u8) {}

    fn dbg_text_print(&mut self, x: u16, y: u16, attr: u8, text: &str) {
        self.calls.push(Call::Print {
            x,
            y,
            attr,
            text: text.to_string(),
        });
    }

    fn submit_overlay(&mut self, list: DrawList) {
        self.calls.push(Call::Overlay {
            items: list.items().len(),
        });
    }

    fn stats(&self) -> Stats {
        Stats {
            frame: self.frames,
            ..Stats::default()
        }
    }

    fn frame(&mut self) -> Result<u32, GfxError> {
        self.calls.push(Call::Frame);
        self.frames += 1;
        Ok(self.frames - 1)
    }
}
