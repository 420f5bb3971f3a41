use std::time::Instant;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Fullscreen, Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::render::RenderCtx;
use crate::time::{FpsCounter, FrameClock, FramePacer, RefreshRate};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Borderless full-screen on the current monitor.
    pub fullscreen: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "lumen".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            fullscreen: false,
        }
    }
}

/// Entry point for the runtime.
///
/// Drives a single window: poll events, draw, present, sleep out the frame
/// budget, repeat until a quit event or an error.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error.take() {
            Some(err) => Err(err),
            None => {
                log::info!("shutting down");
                Ok(())
            }
        }
    }
}

#[self_referencing]
struct WindowEntry {
    clock: FrameClock,
    pacer: FramePacer,
    fps: FpsCounter,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    exit_requested: bool,
    /// First fatal error; ends the loop and is returned from `Runtime::run`.
    error: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            exit_requested: false,
            error: None,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        if self.error.is_none() {
            self.error = Some(err);
        }
        self.request_exit(event_loop);
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let fullscreen = self.config.fullscreen.then_some(Fullscreen::Borderless(None));
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_fullscreen(fullscreen)
            .with_visible(false);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let rate = RefreshRate::from_millihertz(
            window
                .current_monitor()
                .and_then(|m| m.refresh_rate_millihertz()),
        );
        log::info!("{} @ {}Hz", self.config.title, rate.hz());

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            clock: FrameClock::new(),
            pacer: FramePacer::new(rate),
            fps: FpsCounter::new(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        self.entry = Some(entry);
        Ok(())
    }

    /// Gives the app its start hook, then shows the window.
    fn start(&mut self) -> Result<()> {
        let (app, entry) = (&mut self.app, &self.entry);
        let Some(entry) = entry else {
            return Ok(());
        };

        entry.with(|fields| {
            let ctx = WindowCtx { id: fields.window.id(), window: fields.window };
            let rctx = RenderCtx::for_gpu(fields.gpu, ctx.viewport());
            app.on_start(&rctx)?;
            fields.window.set_visible(true);
            fields.window.request_redraw();
            Ok(())
        })
    }

    /// One paced iteration: draw, present, sleep out the budget, count it.
    fn frame(&mut self, window_id: WindowId) -> Result<AppControl> {
        let (app, entry) = (&mut self.app, &mut self.entry);
        let Some(entry) = entry else {
            return Ok(AppControl::Continue);
        };

        entry.with_mut(|fields| {
            let frame_start = Instant::now();
            let time = fields.clock.tick_at(frame_start);

            let result = {
                let mut ctx = FrameCtx {
                    window: WindowCtx { id: window_id, window: fields.window },
                    gpu: fields.gpu,
                    time,
                    fps: fields.fps.fps(),
                    refresh: fields.pacer.rate(),
                };
                app.on_frame(&mut ctx)
            };

            fields.pacer.pace(frame_start);
            fields.fps.frame();
            result
        })
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.exit_requested {
            return;
        }

        let started = self
            .create_window_entry(event_loop)
            .and_then(|()| self.start());

        if let Err(e) = started {
            self.fail(event_loop, e);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Continuous redraw; the pacer bounds the rate.
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            log::debug!("quit requested ({event:?})");
            self.request_exit(event_loop);
            return;
        }

        match event {
            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                }
            }

            WindowEvent::RedrawRequested => match self.frame(window_id) {
                Ok(AppControl::Continue) => {}
                Ok(AppControl::Exit) => self.request_exit(event_loop),
                Err(e) => self.fail(event_loop, e),
            },

            _ => {}
        }
    }
}
