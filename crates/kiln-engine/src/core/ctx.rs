use crate::device::Init;
use crate::gfx::{DebugFlags, Gfx, ResetFlags};
use crate::input::{Event, EventQueue, Key, MouseState};
use crate::time::FrameTime;

/// Window state the harness keeps in sync with the engine.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct WindowState {
    pub width: u32,
    pub height: u32,
    pub debug: DebugFlags,
    pub reset: ResetFlags,
    pub mouse: MouseState,
}

impl WindowState {
    pub fn new(init: &Init) -> Self {
        Self {
            width: init.resolution.width,
            height: init.resolution.height,
            reset: init.resolution.reset,
            ..Self::default()
        }
    }
}

/// Context passed to [`super::App::init`].
pub struct InitCtx<'a> {
    pub gfx: &'a mut dyn Gfx,
    state: &'a mut WindowState,
}

impl<'a> InitCtx<'a> {
    pub fn new(gfx: &'a mut dyn Gfx, state: &'a mut WindowState) -> Self {
        Self { gfx, state }
    }

    /// Sets debug flags; key bindings toggle from this baseline.
    pub fn set_debug(&mut self, flags: DebugFlags) {
        self.state.debug = flags;
        self.gfx.set_debug(flags);
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.state.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.state.height
    }
}

/// Per-frame context passed to [`super::App::update`].
pub struct FrameCtx<'a> {
    pub gfx: &'a mut dyn Gfx,
    pub time: FrameTime,
    state: &'a mut WindowState,
    events: &'a mut EventQueue,
}

impl<'a> FrameCtx<'a> {
    pub fn new(
        gfx: &'a mut dyn Gfx,
        time: FrameTime,
        state: &'a mut WindowState,
        events: &'a mut EventQueue,
    ) -> Self {
        Self {
            gfx,
            time,
            state,
            events,
        }
    }

    /// Drains pending events and applies the harness bindings.
    ///
    /// Resizes reset the backbuffer, F1 toggles the stats page and F7 toggles
    /// vsync. Returns `true` when the window was closed or Esc was pressed;
    /// events queued after that stay queued.
    pub fn process_events(&mut self) -> bool {
        while let Some(event) = self.events.pop() {
            if self.state.mouse.apply(&event) {
                continue;
            }

            match event {
                Event::Exit
                | Event::Key {
                    key: Key::Escape,
                    pressed: true,
                } => return true,

                Event::Resize { width, height } => {
                    self.state.width = width;
                    self.state.height = height;
                    self.gfx.reset(width, height, self.state.reset);
                }

                Event::Key {
                    key: Key::F1,
                    pressed: true,
                } => {
                    self.state.debug.toggle(DebugFlags::STATS);
                    self.gfx.set_debug(self.state.debug);
                }

                Event::Key {
                    key: Key::F7,
                    pressed: true,
                } => {
                    self.state.reset.toggle(ResetFlags::VSYNC);
                    self.gfx.reset(self.state.width, self.state.height, self.state.reset);
                }

                _ => {}
            }
        }
        false
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.state.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.state.height
    }

    #[inline]
    pub fn mouse(&self) -> &MouseState {
        &self.state.mouse
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::gfx::{
        BufferFlags, ClearFlags, DynamicIndexBufferHandle, DynamicVertexBufferHandle, GfxError,
        Stats, VertexLayout, ViewId,
    };
    use crate::input::MouseButton;
    use crate::overlay::DrawList;

    /// Records the calls `process_events` is expected to make.
    #[derive(Default)]
    struct Recorder {
        debug: Vec<DebugFlags>,
        resets: Vec<(u32, u32, ResetFlags)>,
    }

    impl Gfx for Recorder {
        fn renderer_name(&self) -> &str {
            "recorder"
        }
        fn set_debug(&mut self, flags: DebugFlags) {
            self.debug.push(flags);
        }
        fn reset(&mut self, width: u32, height: u32, flags: ResetFlags) {
            self.resets.push((width, height, flags));
        }
        fn set_view_clear(&mut self, _: ViewId, _: ClearFlags, _: u32, _: f32, _: u8) {}
        fn set_view_rect(&mut self, _: ViewId, _: u16, _: u16, _: u16, _: u16) {}
        fn touch(&mut self, _: ViewId) -> Result<(), GfxError> {
            Ok(())
        }
        fn create_dynamic_vertex_buffer(
            &mut self,
            _: u32,
            _: &VertexLayout,
            _: BufferFlags,
        ) -> Result<DynamicVertexBufferHandle, GfxError> {
            Ok(DynamicVertexBufferHandle::from_raw(0))
        }
        fn create_dynamic_index_buffer(
            &mut self,
            _: u32,
            _: BufferFlags,
        ) -> Result<DynamicIndexBufferHandle, GfxError> {
            Ok(DynamicIndexBufferHandle::from_raw(0))
        }
        fn update_dynamic_vertex_buffer(
            &mut self,
            _: DynamicVertexBufferHandle,
            _: u32,
            _: &[u8],
        ) -> Result<(), GfxError> {
            Ok(())
        }
        fn update_dynamic_index_buffer(
            &mut self,
            _: DynamicIndexBufferHandle,
            _: u32,
            _: &[u8],
        ) -> Result<(), GfxError> {
            Ok(())
        }
        fn destroy_dynamic_vertex_buffer(&mut self, _: DynamicVertexBufferHandle) -> Result<(), GfxError> {
            Ok(())
        }
        fn destroy_dynamic_index_buffer(&mut self, _: DynamicIndexBufferHandle) -> Result<(), GfxError> {
            Ok(())
        }
        fn dbg_text_clear(&mut self, _: u8) {}
        fn dbg_text_print(&mut self, _: u16, _: u16, _: u8, _: &str) {}
        fn submit_overlay(&mut self, _: DrawList) {}
        fn stats(&self) -> Stats {
            Stats::default()
        }
        fn frame(&mut self) -> Result<u32, GfxError> {
            Ok(0)
        }
    }

    fn frame_time() -> FrameTime {
        FrameTime {
            dt: 1.0 / 60.0,
            avg_ms: 16.7,
            now: Instant::now(),
            frame_index: 0,
        }
    }

    fn key(key: Key) -> Event {
        Event::Key { key, pressed: true }
    }

    fn run(events: &[Event]) -> (bool, WindowState, Recorder, EventQueue) {
        let mut gfx = Recorder::default();
        let mut state = WindowState::new(&Init::default());
        let mut queue = EventQueue::new();
        for e in events {
            queue.push(*e);
        }
        let shutdown = FrameCtx::new(&mut gfx, frame_time(), &mut state, &mut queue).process_events();
        (shutdown, state, gfx, queue)
    }

    // ── bindings ─────────────────────────────────────────────────────────

    #[test]
    fn resize_updates_state_and_resets_backbuffer() {
        let (shutdown, state, gfx, _) = run(&[Event::Resize { width: 800, height: 600 }]);
        assert!(!shutdown);
        assert_eq!((state.width, state.height), (800, 600));
        assert_eq!(gfx.resets, vec![(800, 600, ResetFlags::VSYNC)]);
    }

    #[test]
    fn f1_toggles_stats() {
        let (_, state, gfx, _) = run(&[key(Key::F1), key(Key::F1)]);
        assert_eq!(gfx.debug, vec![DebugFlags::STATS, DebugFlags::empty()]);
        assert_eq!(state.debug, DebugFlags::empty());
    }

    #[test]
    fn f7_toggles_vsync() {
        let (_, state, gfx, _) = run(&[key(Key::F7)]);
        assert_eq!(gfx.resets, vec![(1280, 720, ResetFlags::empty())]);
        assert!(!state.reset.contains(ResetFlags::VSYNC));
    }

    #[test]
    fn key_release_does_not_toggle() {
        let (_, _, gfx, _) = run(&[Event::Key { key: Key::F1, pressed: false }]);
        assert!(gfx.debug.is_empty());
    }

    // ── shutdown ─────────────────────────────────────────────────────────

    #[test]
    fn escape_requests_shutdown() {
        let (shutdown, ..) = run(&[key(Key::Escape)]);
        assert!(shutdown);
    }

    #[test]
    fn exit_stops_draining() {
        let (shutdown, _, gfx, queue) = run(&[Event::Exit, key(Key::F1)]);
        assert!(shutdown);
        assert!(gfx.debug.is_empty());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn mouse_events_update_state() {
        let (shutdown, state, ..) = run(&[
            Event::MouseMove { x: 12, y: 34 },
            Event::MouseButton { button: MouseButton::Left, pressed: true },
        ]);
        assert!(!shutdown);
        assert_eq!((state.mouse.x, state.mouse.y), (12, 34));
        assert!(state.mouse.button(MouseButton::Left));
    }
}
