use anyhow::Result;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::device::{Gpu, Init, SurfaceErrorAction};
use crate::overlay::DrawList;
use crate::render::{AtlasGlyph, GlyphAtlas, GlyphLookup, QuadBatch, QuadRenderer, RenderCtx, RenderTarget};
use crate::text::DebugFont;
use crate::time::FrameClock;

use super::{
    BufferFlags, ClearFlags, Color, DebugFlags, DebugText, DynamicBufferInfo,
    DynamicIndexBufferHandle, DynamicVertexBufferHandle, Gfx, GfxError, HandleTable, ResetFlags,
    Stats, UpdatePlan, VertexLayout, ViewId, ViewTable,
};

const MAX_DYNAMIC_BUFFERS: usize = 4096;
const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24PlusStencil8;
/// Attribute of the stats page title line.
const STATS_TITLE_ATTR: u8 = 0x1f;
const STATS_ATTR: u8 = 0x0f;

struct DynamicBuffer {
    info: DynamicBufferInfo,
    buffer: wgpu::Buffer,
}

struct DepthTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl DepthTarget {
    fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("kiln depth-stencil"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }

    fn matches(&self, width: u32, height: u32) -> bool {
        self.texture.width() == width.max(1) && self.texture.height() == height.max(1)
    }
}

/// Per-frame counters, rotated into `last` by `frame()`.
#[derive(Debug, Copy, Clone, Default)]
struct FrameCounters {
    vertex_bytes: u64,
    index_bytes: u64,
    views: u32,
}

/// Glyphs from the debug font, uploaded into the atlas on first use.
struct FontGlyphs<'a> {
    queue: &'a wgpu::Queue,
    font: Option<&'a DebugFont>,
    atlas: &'a mut GlyphAtlas,
}

impl GlyphLookup for FontGlyphs<'_> {
    fn glyph(&mut self, ch: char) -> Option<AtlasGlyph> {
        let font = self.font?;
        self.atlas.glyph(self.queue, font, ch)
    }
}

/// [`Gfx`] on wgpu, bound to one window.
pub struct Graphics<'w> {
    window: &'w Window,
    gpu: Gpu<'w>,
    renderer_name: String,

    debug: DebugFlags,
    reset: ResetFlags,

    views: ViewTable,
    text: DebugText,
    overlay: DrawList,

    vertex_buffers: HandleTable<DynamicBuffer>,
    index_buffers: HandleTable<DynamicBuffer>,

    depth: DepthTarget,
    font: Option<DebugFont>,
    atlas: GlyphAtlas,
    quads: QuadRenderer,
    batch: QuadBatch,

    clock: FrameClock,
    frame_number: u32,
    frame_time_us: u64,
    counters: FrameCounters,
    last: FrameCounters,
}

impl<'w> Graphics<'w> {
    /// Creates the device and surface for `window` and sets up engine state.
    pub fn init(window: &'w Window, init: &Init) -> Result<Self> {
        let gpu = pollster::block_on(Gpu::new(window, init))?;

        let font = match DebugFont::load(init.debug_font.as_deref()) {
            Ok(font) => {
                log::info!("debug font: {}", font.path().display());
                Some(font)
            }
            Err(e) => {
                log::warn!("{e}; debug text will draw backgrounds only");
                None
            }
        };

        let info = gpu.adapter_info();
        let renderer_name = format!("{:?} ({})", info.backend, info.name);

        let size = gpu.size();
        let atlas = GlyphAtlas::new(gpu.device());
        let quads = QuadRenderer::new(gpu.device(), gpu.surface_format(), &atlas);
        let depth = DepthTarget::new(gpu.device(), size.width, size.height);

        Ok(Self {
            renderer_name,
            debug: DebugFlags::empty(),
            reset: init.resolution.reset,
            views: ViewTable::default(),
            text: DebugText::new(size.width, size.height),
            overlay: DrawList::new(),
            vertex_buffers: HandleTable::new("dynamic vertex buffer", MAX_DYNAMIC_BUFFERS),
            index_buffers: HandleTable::new("dynamic index buffer", MAX_DYNAMIC_BUFFERS),
            depth,
            font,
            atlas,
            quads,
            batch: QuadBatch::default(),
            clock: FrameClock::new(),
            frame_number: 0,
            frame_time_us: 0,
            counters: FrameCounters::default(),
            last: FrameCounters::default(),
            window,
            gpu,
        })
    }

    /// Releases every buffer still alive. The device and surface go with the
    /// value itself.
    pub fn shutdown(&mut self) {
        let leaked = self.vertex_buffers.len() + self.index_buffers.len();
        if leaked > 0 {
            log::warn!("{leaked} dynamic buffers were not destroyed before shutdown");
        }
        for b in self.vertex_buffers.values().chain(self.index_buffers.values()) {
            b.buffer.destroy();
        }
        self.vertex_buffers.clear();
        self.index_buffers.clear();
        log::info!("graphics shut down after {} frames", self.frame_number);
    }

    fn vsync(&self) -> bool {
        self.reset.contains(ResetFlags::VSYNC)
    }

    fn create_buffer(&self, info: DynamicBufferInfo, usage: wgpu::BufferUsages, label: &str) -> wgpu::Buffer {
        create_dynamic_buffer(self.gpu.device(), info.size, usage, label)
    }

    /// Records and presents the view passes, debug text and overlay.
    fn render(&mut self) -> Result<(), GfxError> {
        let size = self.gpu.size();
        if !drawable(size.width, size.height) {
            log::trace!("frame {} skipped: zero-sized backbuffer", self.frame_number);
            return Ok(());
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                return match self.gpu.handle_surface_error(&err) {
                    SurfaceErrorAction::Fatal => Err(GfxError::Surface(err)),
                    action => {
                        log::debug!("frame {} skipped: {err} ({action:?})", self.frame_number);
                        Ok(())
                    }
                };
            }
        };

        // The depth target must match the acquired texture, which may lag a resize.
        let wgpu::Extent3d { width, height, .. } = frame.surface_texture.texture.size();
        if !self.depth.matches(width, height) {
            self.depth = DepthTarget::new(self.gpu.device(), width, height);
        }
        let linear = self.gpu.surface_format().is_srgb();

        for (_, view) in self.views.touched() {
            let clear = view.clear;
            let color_load = if clear.flags.contains(ClearFlags::COLOR) {
                wgpu::LoadOp::Clear(Color::from_rgba(clear.rgba, linear).to_wgpu())
            } else {
                wgpu::LoadOp::Load
            };
            let depth_load = if clear.flags.contains(ClearFlags::DEPTH) {
                wgpu::LoadOp::Clear(clear.depth)
            } else {
                wgpu::LoadOp::Load
            };
            let stencil_load = if clear.flags.contains(ClearFlags::STENCIL) {
                wgpu::LoadOp::Clear(u32::from(clear.stencil))
            } else {
                wgpu::LoadOp::Load
            };

            let mut pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("kiln view pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: color_load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: depth_load,
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: Some(wgpu::Operations {
                        load: stencil_load,
                        store: wgpu::StoreOp::Store,
                    }),
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if let Some((x, y, w, h)) = view.rect.clamped(width, height) {
                pass.set_viewport(x, y, w, h, 0.0, 1.0);
            }
            self.counters.views += 1;
        }

        if self.debug.contains(DebugFlags::STATS) {
            let page = self.stats().page(&self.renderer_name, self.vsync());
            self.text.clear(0);
            for (row, line) in page.iter().enumerate() {
                let attr = if row == 0 { STATS_TITLE_ATTR } else { STATS_ATTR };
                self.text.print(0, row as u16, attr, line);
            }
        }

        self.batch.begin(width, height, linear);
        let mut glyphs = FontGlyphs {
            queue: self.gpu.queue(),
            font: self.font.as_ref(),
            atlas: &mut self.atlas,
        };
        if self.debug.intersects(DebugFlags::TEXT | DebugFlags::STATS) {
            self.batch.push_debug_text(&self.text, &mut glyphs);
        }
        self.batch.push_draw_list(&self.overlay, &mut glyphs);

        let ctx = RenderCtx {
            device: self.gpu.device(),
            queue: self.gpu.queue(),
            surface_format: self.gpu.surface_format(),
            width,
            height,
        };
        let mut target = RenderTarget {
            encoder: &mut frame.encoder,
            color_view: &frame.view,
        };
        self.quads.render(&ctx, &mut target, &self.batch);

        self.window.pre_present_notify();
        self.gpu.submit(frame);
        Ok(())
    }

    /// Resets per-frame state. Runs whether or not the frame was presented.
    fn end_frame(&mut self) {
        self.views.end_frame();
        self.text.clear(0);
        self.overlay.clear();
        self.last = std::mem::take(&mut self.counters);
        self.frame_number = self.frame_number.wrapping_add(1);
    }
}

/// A zero-sized (minimized) backbuffer is not rendered.
#[inline]
fn drawable(width: u32, height: u32) -> bool {
    width > 0 && height > 0
}

fn create_dynamic_buffer(
    device: &wgpu::Device,
    size: u64,
    usage: wgpu::BufferUsages,
    label: &str,
) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size,
        usage: usage | wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::COPY_SRC,
        mapped_at_creation: false,
    })
}

/// Applies a planned update, reallocating first when the plan grows the
/// buffer. Bytes before the write offset survive the reallocation.
fn write_dynamic(
    gpu: &Gpu<'_>,
    target: &mut DynamicBuffer,
    plan: UpdatePlan,
    data: &[u8],
    usage: wgpu::BufferUsages,
    label: &str,
) {
    if let Some(new_size) = plan.grow_to {
        let grown = create_dynamic_buffer(gpu.device(), new_size, usage, label);
        let keep = plan.preserved_bytes(target.info.size);
        if keep > 0 {
            let mut encoder = gpu
                .device()
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("kiln buffer grow"),
                });
            encoder.copy_buffer_to_buffer(&target.buffer, 0, &grown, 0, keep);
            // Must reach the queue before the write below is staged.
            gpu.queue().submit(std::iter::once(encoder.finish()));
        }
        log::debug!("{label} grown {} -> {new_size} bytes", target.info.size);
        target.buffer.destroy();
        target.buffer = grown;
        target.info.size = new_size;
    }

    if data.is_empty() {
        return;
    }
    if plan.len as usize == data.len() {
        gpu.queue().write_buffer(&target.buffer, plan.offset, data);
    } else {
        let mut padded = data.to_vec();
        padded.resize(plan.len as usize, 0);
        gpu.queue().write_buffer(&target.buffer, plan.offset, &padded);
    }
}

impl Gfx for Graphics<'_> {
    fn renderer_name(&self) -> &str {
        &self.renderer_name
    }

    fn set_debug(&mut self, flags: DebugFlags) {
        if flags != self.debug {
            log::debug!("debug flags {:?} -> {:?}", self.debug, flags);
        }
        self.debug = flags;
    }

    fn reset(&mut self, width: u32, height: u32, flags: ResetFlags) {
        let size = self.gpu.size();
        if (size.width, size.height) != (width, height) {
            self.gpu.resize(PhysicalSize::new(width, height));
            self.text.resize(width, height);
        }
        if flags != self.reset {
            self.gpu.set_vsync(flags.contains(ResetFlags::VSYNC));
            self.reset = flags;
        }
        log::debug!("reset {width}x{height} {flags:?}");
    }

    fn set_view_clear(&mut self, view: ViewId, flags: ClearFlags, rgba: u32, depth: f32, stencil: u8) {
        match self.views.get_mut(view) {
            Ok(v) => {
                v.clear.flags = flags;
                v.clear.rgba = rgba;
                v.clear.depth = depth;
                v.clear.stencil = stencil;
            }
            Err(e) => log::warn!("set_view_clear ignored: {e}"),
        }
    }

    fn set_view_rect(&mut self, view: ViewId, x: u16, y: u16, width: u16, height: u16) {
        match self.views.get_mut(view) {
            Ok(v) => {
                v.rect.x = x;
                v.rect.y = y;
                v.rect.width = width;
                v.rect.height = height;
            }
            Err(e) => log::warn!("set_view_rect ignored: {e}"),
        }
    }

    fn touch(&mut self, view: ViewId) -> Result<(), GfxError> {
        self.views.touch(view)
    }

    fn create_dynamic_vertex_buffer(
        &mut self,
        num_vertices: u32,
        layout: &VertexLayout,
        flags: BufferFlags,
    ) -> Result<DynamicVertexBufferHandle, GfxError> {
        layout.to_wgpu()?;
        let info = DynamicBufferInfo::new(num_vertices, u64::from(layout.stride()), flags);
        let buffer = self.create_buffer(info, wgpu::BufferUsages::VERTEX, "kiln dynamic vertex buffer");
        let index = self.vertex_buffers.insert(DynamicBuffer { info, buffer })?;
        log::debug!(
            "dynamic vertex buffer {index}: {} vertices x {} B, {flags:?}",
            num_vertices,
            layout.stride()
        );
        Ok(DynamicVertexBufferHandle::from_raw(index))
    }

    fn create_dynamic_index_buffer(
        &mut self,
        num_indices: u32,
        flags: BufferFlags,
    ) -> Result<DynamicIndexBufferHandle, GfxError> {
        let stride = if flags.contains(BufferFlags::INDEX32) { 4 } else { 2 };
        let info = DynamicBufferInfo::new(num_indices, stride, flags);
        let buffer = self.create_buffer(info, wgpu::BufferUsages::INDEX, "kiln dynamic index buffer");
        let index = self.index_buffers.insert(DynamicBuffer { info, buffer })?;
        log::debug!("dynamic index buffer {index}: {num_indices} x {stride} B, {flags:?}");
        Ok(DynamicIndexBufferHandle::from_raw(index))
    }

    fn update_dynamic_vertex_buffer(
        &mut self,
        handle: DynamicVertexBufferHandle,
        start_vertex: u32,
        data: &[u8],
    ) -> Result<(), GfxError> {
        let target = self.vertex_buffers.get_mut(handle.raw())?;
        let plan = target.info.plan_update(start_vertex, data.len())?;
        write_dynamic(
            &self.gpu,
            target,
            plan,
            data,
            wgpu::BufferUsages::VERTEX,
            "kiln dynamic vertex buffer",
        );
        self.counters.vertex_bytes += data.len() as u64;
        Ok(())
    }

    fn update_dynamic_index_buffer(
        &mut self,
        handle: DynamicIndexBufferHandle,
        start_index: u32,
        data: &[u8],
    ) -> Result<(), GfxError> {
        let target = self.index_buffers.get_mut(handle.raw())?;
        let plan = target.info.plan_update(start_index, data.len())?;
        write_dynamic(
            &self.gpu,
            target,
            plan,
            data,
            wgpu::BufferUsages::INDEX,
            "kiln dynamic index buffer",
        );
        self.counters.index_bytes += data.len() as u64;
        Ok(())
    }

    fn destroy_dynamic_vertex_buffer(&mut self, handle: DynamicVertexBufferHandle) -> Result<(), GfxError> {
        self.vertex_buffers.remove(handle.raw())?.buffer.destroy();
        Ok(())
    }

    fn destroy_dynamic_index_buffer(&mut self, handle: DynamicIndexBufferHandle) -> Result<(), GfxError> {
        self.index_buffers.remove(handle.raw())?.buffer.destroy();
        Ok(())
    }

    fn dbg_text_clear(&mut self, attr: u8) {
        self.text.clear(attr);
    }

    fn dbg_text_print(&mut self, x: u16, y: u16, attr: u8, text: &str) {
        self.text.print(x, y, attr, text);
    }

    fn submit_overlay(&mut self, list: DrawList) {
        self.overlay = list;
    }

    fn stats(&self) -> Stats {
        let size = self.gpu.size();
        Stats {
            frame: self.frame_number,
            width: size.width,
            height: size.height,
            frame_time_us: self.frame_time_us,
            dynamic_vertex_buffers: self.vertex_buffers.len() as u32,
            dynamic_index_buffers: self.index_buffers.len() as u32,
            vertex_bytes_uploaded: self.last.vertex_bytes,
            index_bytes_uploaded: self.last.index_bytes,
            views_processed: self.last.views,
        }
    }

    fn frame(&mut self) -> Result<u32, GfxError> {
        let time = self.clock.tick();
        self.frame_time_us = (f64::from(time.dt) * 1_000_000.0) as u64;

        let completed = self.frame_number;
        let result = self.render();
        self.end_frame();
        result.map(|()| completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimized_backbuffer_is_not_drawable() {
        assert!(!drawable(0, 0));
        assert!(!drawable(0, 720));
        assert!(!drawable(1280, 0));
    }

    #[test]
    fn sized_backbuffer_is_drawable() {
        assert!(drawable(1, 1));
        assert!(drawable(1280, 720));
    }
}
