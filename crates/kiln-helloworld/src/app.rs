use anyhow::{Context, Result};
use kiln_engine::coords::Vec2;
use kiln_engine::core::{App, AppControl, FrameCtx, InitCtx};
use kiln_engine::gfx::{
    BufferFlags, ClearFlags, DebugFlags, DynamicIndexBufferHandle, DynamicVertexBufferHandle, Gfx,
    VertexLayout,
};
use kiln_engine::overlay::{Overlay, MUTED_RGBA};

use crate::counter::SaturatingCounter;
use crate::geometry::GeometryBuffers;
use crate::vertex::Vertex;

pub const TITLE: &str = "00-helloworld";
const DESCRIPTION: &str = "Initialization and debug text.";
const URL: &str = "https://bkaradzic.github.io/bgfx/examples.html#helloworld";

const CLEAR_RGBA: u32 = 0x3030_30ff;
const OBJECT_COUNT_MIN: u32 = 53_000;
const OBJECT_COUNT_MAX: u32 = 55_000;
const VERTICES_PER_OBJECT: usize = 3;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    Idle,
    Rendering,
    Terminated,
}

/// Engine resources created in `init`.
#[derive(Debug)]
struct Resources {
    layout: VertexLayout,
    vbh: DynamicVertexBufferHandle,
    ibh: DynamicIndexBufferHandle,
}

/// Grows a pair of dynamic buffers by a few vertices every frame and
/// re-uploads them in full.
pub struct HelloWorld {
    phase: Phase,
    object_count: SaturatingCounter<u32>,
    geometry: GeometryBuffers,
    resources: Option<Resources>,
    overlay: Overlay,
}

impl HelloWorld {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            object_count: SaturatingCounter::new(OBJECT_COUNT_MIN, OBJECT_COUNT_MAX),
            geometry: GeometryBuffers::new(),
            resources: None,
            overlay: Overlay::new(),
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn object_count(&self) -> u32 {
        self.object_count.get()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.geometry.len()
    }

    fn show_dialog(&mut self, ctx: &mut FrameCtx<'_>) {
        let renderer = ctx.gfx.renderer_name().to_string();
        let ms = ctx.time.ms();

        self.overlay.begin_frame(ctx.mouse(), ctx.width(), ctx.height());
        self.overlay.window(TITLE, Vec2::new(10.0, 50.0), |ui| {
            ui.text(DESCRIPTION);
            ui.text_colored(URL, MUTED_RGBA);
            ui.separator();
            ui.text(format!("Renderer: {renderer}"));
            ui.text(format!("Frame: {ms:7.3} [ms]"));
        });
        self.overlay.end_frame(&mut *ctx.gfx);
    }
}

impl Default for HelloWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl App for HelloWorld {
    fn init(&mut self, ctx: &mut InitCtx<'_>) -> Result<()> {
        ctx.set_debug(DebugFlags::TEXT);
        ctx.gfx
            .set_view_clear(0, ClearFlags::COLOR | ClearFlags::DEPTH, CLEAR_RGBA, 1.0, 0);

        let layout = Vertex::layout();
        let vbh = ctx
            .gfx
            .create_dynamic_vertex_buffer(0, &layout, BufferFlags::ALLOW_RESIZE)
            .context("failed to create dynamic vertex buffer")?;
        let ibh = ctx
            .gfx
            .create_dynamic_index_buffer(0, BufferFlags::ALLOW_RESIZE | BufferFlags::INDEX32)
            .context("failed to create dynamic index buffer")?;
        self.resources = Some(Resources { layout, vbh, ibh });

        log::info!(
            "{TITLE}: object count {}..={}",
            self.object_count.min(),
            self.object_count.max()
        );
        Ok(())
    }

    fn update(&mut self, ctx: &mut FrameCtx<'_>) -> Result<AppControl> {
        if self.phase == Phase::Terminated {
            return Ok(AppControl::Exit);
        }
        if ctx.process_events() {
            self.phase = Phase::Terminated;
            return Ok(AppControl::Exit);
        }
        let Some(resources) = self.resources.as_ref() else {
            anyhow::bail!("update called before init");
        };
        let (vbh, ibh) = (resources.vbh, resources.ibh);
        debug_assert_eq!(usize::from(resources.layout.stride()), std::mem::size_of::<Vertex>());
        self.phase = Phase::Rendering;

        self.show_dialog(ctx);

        let width = u16::try_from(ctx.width()).unwrap_or(u16::MAX);
        let height = u16::try_from(ctx.height()).unwrap_or(u16::MAX);
        ctx.gfx.set_view_rect(0, 0, 0, width, height);

        let count = self.object_count.increment();
        self.geometry.resize(VERTICES_PER_OBJECT * count as usize);
        self.geometry.upload(&mut *ctx.gfx, vbh, ibh)?;

        ctx.gfx.touch(0)?;
        ctx.gfx
            .dbg_text_print(0, 0, 0x0f, &format!("Vertices count {count}"));

        ctx.gfx.frame()?;
        self.phase = Phase::Idle;
        Ok(AppControl::Continue)
    }

    fn shutdown(&mut self, gfx: &mut dyn Gfx) -> i32 {
        self.phase = Phase::Terminated;
        if let Some(Resources { vbh, ibh, .. }) = self.resources.take() {
            if let Err(err) = gfx.destroy_dynamic_index_buffer(ibh) {
                log::warn!("failed to destroy index buffer: {err}");
            }
            if let Err(err) = gfx.destroy_dynamic_vertex_buffer(vbh) {
                log::warn!("failed to destroy vertex buffer: {err}");
            }
        }
        0
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use kiln_engine::core::WindowState;
    use kiln_engine::input::{Event, EventQueue, Key};
    use kiln_engine::time::FrameTime;

    use super::*;
    use crate::testing::{Call, RecordingGfx};

    fn frame_time() -> FrameTime {
        FrameTime {
            dt: 0.016,
            avg_ms: 16.0,
            now: Instant::now(),
            frame_index: 0,
        }
    }

    fn window() -> WindowState {
        WindowState {
            width: 1280,
            height: 720,
            ..WindowState::default()
        }
    }

    fn started() -> (HelloWorld, RecordingGfx, WindowState) {
        let mut app = HelloWorld::new();
        let mut gfx = RecordingGfx::default();
        let mut state = window();
        app.init(&mut InitCtx::new(&mut gfx, &mut state)).unwrap();
        gfx.calls.clear();
        (app, gfx, state)
    }

    fn step(
        app: &mut HelloWorld,
        gfx: &mut RecordingGfx,
        state: &mut WindowState,
        events: &mut EventQueue,
    ) -> AppControl {
        let mut ctx = FrameCtx::new(gfx, frame_time(), state, events);
        app.update(&mut ctx).unwrap()
    }

    // ── init ─────────────────────────────────────────────────────────────

    #[test]
    fn init_configures_view_and_buffers() {
        let mut app = HelloWorld::new();
        assert!(app.resources.is_none());
        let mut gfx = RecordingGfx::default();
        let mut state = window();
        app.init(&mut InitCtx::new(&mut gfx, &mut state)).unwrap();

        let layout = &app.resources.as_ref().unwrap().layout;
        assert_eq!(layout.stride(), 20);
        assert_eq!(state.debug, DebugFlags::TEXT);
        assert_eq!(
            gfx.calls,
            vec![
                Call::SetDebug(DebugFlags::TEXT),
                Call::SetViewClear {
                    view: 0,
                    flags: ClearFlags::COLOR | ClearFlags::DEPTH,
                    rgba: 0x3030_30ff,
                },
                Call::CreateVertex {
                    num: 0,
                    stride: 20,
                    flags: BufferFlags::ALLOW_RESIZE,
                },
                Call::CreateIndex {
                    num: 0,
                    flags: BufferFlags::ALLOW_RESIZE | BufferFlags::INDEX32,
                },
            ]
        );
        assert_eq!(app.phase(), Phase::Idle);
        assert_eq!(app.object_count(), 53_000);
    }

    // ── update ───────────────────────────────────────────────────────────

    #[test]
    fn first_frame_issues_calls_in_order() {
        let (mut app, mut gfx, mut state) = started();
        let mut events = EventQueue::new();

        let control = step(&mut app, &mut gfx, &mut state, &mut events);
        assert_eq!(control, AppControl::Continue);
        assert_eq!(app.object_count(), 53_001);
        assert_eq!(app.vertex_count(), 159_003);
        assert_eq!(app.phase(), Phase::Idle);

        let calls = &gfx.calls;
        assert!(matches!(calls[0], Call::Overlay { items } if items > 0));
        assert_eq!(
            &calls[1..],
            &[
                Call::SetViewRect {
                    view: 0,
                    width: 1280,
                    height: 720,
                },
                Call::UpdateVertex {
                    start: 0,
                    bytes: 159_003 * 20,
                },
                Call::UpdateIndex {
                    start: 0,
                    bytes: 159_003 * 4,
                },
                Call::Touch(0),
                Call::Print {
                    x: 0,
                    y: 0,
                    attr: 0x0f,
                    text: "Vertices count 53001".to_string(),
                },
                Call::Frame,
            ]
        );
    }

    #[test]
    fn count_saturates_at_max() {
        let (mut app, mut gfx, mut state) = started();
        let mut events = EventQueue::new();

        for _ in 0..2_100 {
            step(&mut app, &mut gfx, &mut state, &mut events);
        }
        assert_eq!(app.object_count(), 55_000);
        assert_eq!(app.vertex_count(), 165_000);

        let last_print = gfx
            .calls
            .iter()
            .rev()
            .find_map(|c| match c {
                Call::Print { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .unwrap();
        assert_eq!(last_print, "Vertices count 55000");
    }

    #[test]
    fn view_rect_tracks_resize() {
        let (mut app, mut gfx, mut state) = started();
        let mut events = EventQueue::new();
        events.push(Event::Resize {
            width: 800,
            height: 600,
        });

        step(&mut app, &mut gfx, &mut state, &mut events);
        assert!(gfx.calls.contains(&Call::SetViewRect {
            view: 0,
            width: 800,
            height: 600,
        }));
    }

    #[test]
    fn escape_terminates_without_rendering() {
        let (mut app, mut gfx, mut state) = started();
        let mut events = EventQueue::new();
        events.push(Event::Key {
            key: Key::Escape,
            pressed: true,
        });

        let control = step(&mut app, &mut gfx, &mut state, &mut events);
        assert_eq!(control, AppControl::Exit);
        assert_eq!(app.phase(), Phase::Terminated);
        assert!(!gfx.calls.contains(&Call::Frame));
        assert_eq!(app.object_count(), 53_000);

        let control = step(&mut app, &mut gfx, &mut state, &mut events);
        assert_eq!(control, AppControl::Exit);
    }

    #[test]
    fn update_before_init_fails_without_rendering() {
        let mut app = HelloWorld::new();
        let mut gfx = RecordingGfx::default();
        let mut state = window();
        let mut events = EventQueue::new();

        let mut ctx = FrameCtx::new(&mut gfx, frame_time(), &mut state, &mut events);
        assert!(app.update(&mut ctx).is_err());
        assert!(gfx.calls.is_empty());
    }

    #[test]
    fn upload_failure_is_reported() {
        let (mut app, mut gfx, mut state) = started();
        gfx.fail_updates = true;
        let mut events = EventQueue::new();

        let mut ctx = FrameCtx::new(&mut gfx, frame_time(), &mut state, &mut events);
        assert!(app.update(&mut ctx).is_err());
    }

    // ── shutdown ─────────────────────────────────────────────────────────

    #[test]
    fn shutdown_destroys_buffers_once() {
        let (mut app, mut gfx, _) = started();

        assert_eq!(app.shutdown(&mut gfx), 0);
        assert_eq!(gfx.calls, vec![Call::DestroyIndex(1), Call::DestroyVertex(0)]);
        assert_eq!(app.phase(), Phase::Terminated);

        gfx.calls.clear();
        assert_eq!(app.shutdown(&mut gfx), 0);
        assert!(gfx.calls.is_empty());
    }
}
