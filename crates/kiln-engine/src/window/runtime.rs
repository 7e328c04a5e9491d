use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, InitCtx, WindowState};
use crate::device::Init;
use crate::gfx::Graphics;
use crate::input::{platform, Event, EventQueue};
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Engine parameters; the window opens at `init.resolution`.
    pub init: Init,
    /// Request shutdown after this many frames.
    pub max_frames: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "kiln".to_string(),
            init: Init::default(),
            max_frames: None,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, initializes the engine and runs `app` until it
    /// exits. Returns the exit code from [`App::shutdown`], or the error
    /// that stopped the frame loop.
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<i32>
    where
        A: 'static + App,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(state.exit_code),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    graphics: Graphics<'this>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Phase {
    /// Waiting for the first `resumed`.
    Starting,
    Running,
    /// `App::shutdown` has run; only exiting remains.
    Finished,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    app: A,

    entry: Option<WindowEntry>,
    window_id: Option<WindowId>,
    window_state: WindowState,
    events: EventQueue,
    clock: FrameClock,

    phase: Phase,
    frames: u64,
    exit_code: i32,
    fatal: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, app: A) -> Self {
        let window_state = WindowState::new(&config.init);
        Self {
            config,
            app,
            entry: None,
            window_id: None,
            window_state,
            events: EventQueue::new(),
            clock: FrameClock::new(),
            phase: Phase::Starting,
            frames: 0,
            exit_code: 0,
            fatal: None,
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let res = self.config.init.resolution;
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(res.width, res.height));

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;
        self.window_id = Some(window.id());

        let init = &self.config.init;
        let entry = WindowEntryTryBuilder {
            window,
            graphics_builder: |w| Graphics::init(w, init),
        }
        .try_build()
        .context("graphics initialization failed")?;

        // The platform may not honour the requested size exactly.
        let size = entry.borrow_window().inner_size();
        self.window_state.width = size.width;
        self.window_state.height = size.height;

        self.entry = Some(entry);
        Ok(())
    }

    fn init_app(&mut self) -> Result<()> {
        let Self {
            app,
            entry,
            window_state,
            ..
        } = self;
        let Some(entry) = entry.as_mut() else {
            anyhow::bail!("no window to initialize the application against");
        };

        entry.with_graphics_mut(|gfx| {
            let mut ctx = InitCtx::new(gfx, window_state);
            app.init(&mut ctx)
        })
    }

    fn run_frame(&mut self) -> Result<AppControl> {
        let time = self.clock.tick();
        let Self {
            app,
            entry,
            window_state,
            events,
            ..
        } = self;
        let Some(entry) = entry.as_mut() else {
            return Ok(AppControl::Exit);
        };

        entry.with_graphics_mut(|gfx| {
            let mut ctx = FrameCtx::new(gfx, time, window_state, events);
            app.update(&mut ctx)
        })
    }

    /// Runs `App::shutdown` then the engine shutdown, once.
    fn finish(&mut self, fatal: Option<anyhow::Error>) {
        if self.phase == Phase::Finished {
            return;
        }
        self.phase = Phase::Finished;

        if let Some(mut entry) = self.entry.take() {
            let app = &mut self.app;
            let code = entry.with_graphics_mut(|gfx| {
                let code = app.shutdown(gfx);
                gfx.shutdown();
                code
            });
            self.exit_code = code;
            // Graphics drops before the window it borrows.
            drop(entry);
        }

        if let Some(err) = fatal {
            self.exit_code = 1;
            self.fatal = Some(err);
        }
        log::info!("runtime finished after {} frames (exit code {})", self.frames, self.exit_code);
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.phase != Phase::Starting {
            return;
        }

        let started = self
            .create_window_entry(event_loop)
            .and_then(|()| self.init_app().context("application init failed"));

        match started {
            Ok(()) => {
                self.phase = Phase::Running;
                self.clock.reset();
                if let Some(entry) = &self.entry {
                    entry.with_window(|w| w.request_redraw());
                }
            }
            Err(err) => {
                self.finish(Some(err));
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.phase == Phase::Finished {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; the app renders every frame.
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.phase != Phase::Running || self.window_id != Some(window_id) {
            return;
        }

        if let Some(ev) = platform::translate_window_event(&event) {
            self.events.push(ev);
        }

        match event {
            // The app sees the exit in `process_events` and shuts down itself.
            WindowEvent::CloseRequested | WindowEvent::Resized(_) => {
                if let Some(entry) = &self.entry {
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::RedrawRequested => match self.run_frame() {
                Ok(AppControl::Continue) => {
                    self.frames += 1;
                    if self.config.max_frames.is_some_and(|max| self.frames >= max) {
                        log::info!("reached {} frames; requesting exit", self.frames);
                        self.events.push(Event::Exit);
                    }
                }
                Ok(AppControl::Exit) => {
                    self.finish(None);
                    event_loop.exit();
                }
                Err(err) => {
                    self.finish(Some(err.context(format!("frame {} failed", self.frames))));
                    event_loop.exit();
                }
            },

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.finish(None);
    }
}
