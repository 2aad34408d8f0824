use super::{CommandList, PipelineBinding, SurfaceSize};

/// Why no drawable could be acquired this tick.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AcquireError {
    /// Surface busy, outdated or mid-resize; skip the frame and retry next tick.
    Unavailable,
    /// Surface is gone for good (commonly out of memory).
    Fatal,
}

/// GPU seam driven by `RenderOrchestrator`.
///
/// The backend owns the device, queue, surface and size-dependent targets. All
/// calls come from the render thread, in the order
/// `acquire_drawable -> encode -> submit`, at most once per tick.
pub trait RenderBackend {
    /// A presentable target plus the command recording state for one frame.
    type Drawable;

    /// Opaque handles stored in each [`PipelineBinding`].
    type Handles;

    /// Current drawable size.
    fn surface_size(&self) -> SurfaceSize;

    /// Acquires the next drawable from the presentation surface.
    fn acquire_drawable(&mut self) -> Result<Self::Drawable, AcquireError>;

    /// Reconfigures the surface and rebuilds size-dependent targets (depth buffer).
    ///
    /// Never called while a drawable is held.
    fn rebuild_targets(&mut self, size: SurfaceSize);

    /// Opens a render pass on `drawable`, replays `commands` against `binding`,
    /// and closes the pass.
    fn encode(
        &mut self,
        drawable: &mut Self::Drawable,
        binding: &PipelineBinding<Self::Handles>,
        commands: &CommandList,
    );

    /// Submits the recorded work and schedules presentation. Does not wait for
    /// the GPU.
    fn submit(&mut self, drawable: Self::Drawable);

    /// Drops device-side state ahead of shutdown. No further calls follow.
    fn release(&mut self) {}
}
