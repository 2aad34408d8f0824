use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl};
use crate::device::{Gpu, GpuInit, SceneAssets};
use crate::frame::SceneConfig;
use crate::mode::ModeController;
use crate::render::{RenderOrchestrator, SurfaceSize, TickOutcome};
use crate::time::{FrameClock, FramePacer};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Tick rate. Presentation is additionally paced by the surface's present mode.
    pub target_hz: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "tumble".to_string(),
            initial_size: LogicalSize::new(1024.0, 768.0),
            target_hz: 60,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, brings up the renderer and ticks it until the window
    /// closes, the app asks to exit, or the surface is lost.
    ///
    /// `modes` is shared with the renderer; clones may be handed to other
    /// threads before calling this.
    pub fn run<A>(
        config: RuntimeConfig,
        gpu_init: GpuInit,
        scene: SceneConfig,
        assets: SceneAssets,
        modes: ModeController,
        app: A,
    ) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, Startup { gpu_init, scene, assets }, modes, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Inputs consumed when the window is created.
struct Startup {
    gpu_init: GpuInit,
    scene: SceneConfig,
    assets: SceneAssets,
}

#[self_referencing]
struct WindowEntry {
    clock: FrameClock,

    window: Window,

    // Not covariant: the pipeline handles are reached through `Gpu`'s
    // associated type.
    #[borrows(window)]
    #[not_covariant]
    orchestrator: RenderOrchestrator<Gpu<'this>>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    startup: Option<Startup>,
    modes: ModeController,
    app: A,

    pacer: FramePacer,
    window: Option<WindowEntry>,

    exit_requested: bool,
    failure: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, startup: Startup, modes: ModeController, app: A) -> Self {
        let pacer = FramePacer::from_hz(config.target_hz);
        Self {
            config,
            startup: Some(startup),
            modes,
            app,
            pacer,
            window: None,
            exit_requested: false,
            failure: None,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure.get_or_insert(err);
        self.request_exit(event_loop);
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let Some(Startup { gpu_init, scene, assets }) = self.startup.take() else {
            return Ok(());
        };

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let modes = self.modes.clone();

        let entry = WindowEntryTryBuilder {
            clock: FrameClock::default(),
            window,
            orchestrator_builder: |w| {
                let gpu = pollster::block_on(Gpu::new(w, gpu_init))?;
                let bindings = gpu.build_pipelines(&assets)?;
                RenderOrchestrator::initialize(gpu, bindings, scene, modes)
            },
        }
        .try_build()
        .context("renderer initialization failed")?;

        entry.with_window(|w| w.request_redraw());
        self.window = Some(entry);
        Ok(())
    }

    /// Stops the renderer and drops the window. Safe to call more than once.
    fn shutdown(&mut self) {
        if let Some(mut entry) = self.window.take() {
            entry.with_orchestrator_mut(|o| o.terminate());
        }
    }

    fn tick(&mut self, event_loop: &ActiveEventLoop) {
        let Some(entry) = self.window.as_mut() else {
            return;
        };

        let result = entry.with_mut(|fields| {
            let ft = fields.clock.tick();
            fields.orchestrator.on_tick(ft.dt)
        });

        match result {
            Ok(outcome) => {
                if self.app.on_frame(&outcome) == AppControl::Exit
                    || outcome == TickOutcome::Terminated
                {
                    self.request_exit(event_loop);
                }
            }
            Err(err) => self.fail(event_loop, anyhow::Error::new(err).context("render loop stopped")),
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.exit_requested {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = &self.window else {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        };

        let poll = self.pacer.poll(std::time::Instant::now());
        if poll.due {
            entry.with_window(|w| w.request_redraw());
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(poll.next_deadline));
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

        let Some(entry) = &self.window else {
            return;
        };
        if entry.with_window(|w| w.id()) != window_id {
            return;
        }

        if self.app.on_window_event(&event, &self.modes) == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        // Runtime-managed lifecycle / resize / redraw handling.
        match &event {
            WindowEvent::CloseRequested => self.request_exit(event_loop),

            WindowEvent::Resized(new_size) => {
                let size = SurfaceSize::from(*new_size);
                entry.with_orchestrator(|o| o.on_resize(size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let size = entry.with_window(|w| SurfaceSize::from(w.inner_size()));
                entry.with_orchestrator(|o| o.on_resize(size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested => self.tick(event_loop),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}
