use crate::frame::{FrameState, FrameUniform, SceneConfig};
use crate::mode::{ModeController, RenderMode};

use super::{
    AcquireError, CommandList, FrameError, Geometry, InitError, PipelineBinding, PipelineSet,
    RenderBackend, ResizeQueue, SurfaceSize,
};

/// Lifecycle of a [`RenderOrchestrator`].
///
/// `Uninitialized -> Ready -> (Encoding -> Submitted -> Ready)* -> Terminated`
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OrchestratorState {
    Uninitialized,
    Ready,
    Encoding,
    Submitted,
    Terminated,
}

/// Result of a single tick.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TickOutcome {
    /// A frame was encoded, submitted and queued for presentation.
    Presented { mode: RenderMode, geometry: Geometry },
    /// No drawable was available; nothing was encoded.
    Skipped,
    /// A previous tick never returned to `Ready` (it unwound out of the backend
    /// mid-frame); this one did nothing.
    Deferred,
    /// The orchestrator was terminated; ticks are ignored.
    Terminated,
}

/// Drives one frame per tick: update transforms, acquire a drawable, encode,
/// submit, present.
///
/// Owns the GPU backend and the per-mode pipeline bindings. Single-threaded: all
/// methods taking `&mut self` run on the render thread. Mode changes and resizes
/// may be posted from elsewhere through [`ModeController`] and
/// [`ResizeQueue`] clones; both are picked up at the start of the next tick.
pub struct RenderOrchestrator<B: RenderBackend> {
    backend: B,
    bindings: PipelineSet<B::Handles>,
    frame: FrameState,
    modes: ModeController,
    resizes: ResizeQueue,

    state: OrchestratorState,
    last_mode: RenderMode,

    /// Reused every frame.
    commands: CommandList,

    frames_presented: u64,
    frames_skipped: u64,
}

impl<B: RenderBackend> RenderOrchestrator<B> {
    /// Takes ownership of an initialized backend and its pipeline bindings.
    ///
    /// Fails if `scene` would make the per-frame transform math produce
    /// non-finite results.
    pub fn initialize(
        backend: B,
        bindings: PipelineSet<B::Handles>,
        scene: SceneConfig,
        modes: ModeController,
    ) -> Result<Self, InitError> {
        scene.validate()?;

        let last_mode = modes.current();
        let mut this = Self {
            backend,
            bindings,
            frame: FrameState::new(scene),
            modes,
            resizes: ResizeQueue::new(),
            state: OrchestratorState::Uninitialized,
            last_mode,
            commands: CommandList::new(),
            frames_presented: 0,
            frames_skipped: 0,
        };
        this.state = OrchestratorState::Ready;

        let size = this.backend.surface_size();
        log::info!(
            "renderer ready: {}x{}, mode {}",
            size.width,
            size.height,
            last_mode
        );
        Ok(this)
    }

    /// Runs one frame. Called once per display tick with the time since the
    /// previous tick.
    ///
    /// A missing drawable skips the frame (animation time still advances). A
    /// fatal surface error terminates the orchestrator and is returned. If an
    /// earlier tick panicked inside `encode` or `submit`, the orchestrator stays
    /// in `Encoding`/`Submitted` and every later tick returns
    /// [`TickOutcome::Deferred`] until [`terminate`](Self::terminate).
    pub fn on_tick(&mut self, delta_seconds: f32) -> Result<TickOutcome, FrameError> {
        match self.state {
            OrchestratorState::Ready => {}
            OrchestratorState::Terminated => return Ok(TickOutcome::Terminated),
            _ => return Ok(TickOutcome::Deferred),
        }

        self.apply_pending_resize();

        let mode = self.modes.current();
        if mode != self.last_mode {
            log::debug!("render mode {} -> {}", self.last_mode, mode);
            self.last_mode = mode;
        }

        let size = self.backend.surface_size();
        let constants = self.frame.advance(delta_seconds, mode, size.aspect());

        if !size.is_renderable() {
            self.frames_skipped += 1;
            return Ok(TickOutcome::Skipped);
        }

        let mut drawable = match self.backend.acquire_drawable() {
            Ok(d) => d,
            Err(AcquireError::Unavailable) => {
                self.frames_skipped += 1;
                log::debug!("no drawable available; skipping frame");
                return Ok(TickOutcome::Skipped);
            }
            Err(AcquireError::Fatal) => {
                log::error!("presentation surface lost; stopping renderer");
                self.terminate();
                return Err(FrameError::SurfaceLost);
            }
        };

        self.state = OrchestratorState::Encoding;
        let binding = self.bindings.get(mode);
        self.commands.clear();
        record_frame(&mut self.commands, binding, constants.to_uniform());
        self.backend.encode(&mut drawable, binding, &self.commands);

        self.state = OrchestratorState::Submitted;
        self.backend.submit(drawable);
        self.frames_presented += 1;

        self.state = OrchestratorState::Ready;
        Ok(TickOutcome::Presented {
            mode,
            geometry: binding.geometry,
        })
    }

    /// Queues a viewport size change; applied before the next frame is encoded.
    pub fn on_resize(&self, size: SurfaceSize) {
        self.resizes.post(size);
    }

    /// Handle for posting resizes from other threads.
    pub fn resize_queue(&self) -> ResizeQueue {
        self.resizes.clone()
    }

    /// Requests a mode for the next tick.
    pub fn set_mode(&self, mode: RenderMode) {
        self.modes.set_mode(mode);
    }

    pub fn mode_controller(&self) -> &ModeController {
        &self.modes
    }

    /// Releases the backend. Later ticks return [`TickOutcome::Terminated`].
    pub fn terminate(&mut self) {
        if self.state == OrchestratorState::Terminated {
            return;
        }
        self.backend.release();
        self.state = OrchestratorState::Terminated;
        log::info!(
            "renderer terminated after {} frames ({} skipped)",
            self.frames_presented,
            self.frames_skipped
        );
    }

    #[inline]
    pub fn state(&self) -> OrchestratorState {
        self.state
    }

    #[inline]
    pub fn frame_state(&self) -> &FrameState {
        &self.frame
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    #[inline]
    pub fn frames_skipped(&self) -> u64 {
        self.frames_skipped
    }

    fn apply_pending_resize(&mut self) {
        debug_assert_eq!(self.state, OrchestratorState::Ready);
        let Some(size) = self.resizes.take() else { return };
        if size == self.backend.surface_size() {
            return;
        }
        log::debug!("rebuilding targets for {}x{}", size.width, size.height);
        self.backend.rebuild_targets(size);
    }
}

/// Bind state, then issue the single draw for `binding`.
fn record_frame<H>(commands: &mut CommandList, binding: &PipelineBinding<H>, uniform: FrameUniform) {
    commands.set_pipeline();
    commands.set_depth_stencil();
    commands.set_vertex_buffer();

    match binding.geometry {
        Geometry::Indexed { index_count } => {
            commands.set_index_buffer();
            commands.set_constants(uniform);
            if binding.textured {
                commands.bind_texture();
            }
            commands.draw_indexed(0..index_count);
        }
        Geometry::Vertices { vertex_count } => {
            commands.set_constants(uniform);
            commands.draw(0..vertex_count);
        }
    }
}
