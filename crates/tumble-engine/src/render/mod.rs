//! Per-frame render orchestration.
//!
//! `RenderOrchestrator` sequences each frame against a [`RenderBackend`]:
//! - apply a queued resize (between frames only)
//! - advance `FrameState` for the current mode
//! - acquire a drawable; skip the frame if none is available
//! - record bind + draw commands for the mode's [`PipelineBinding`]
//! - hand them to the backend, submit, present
//!
//! The wgpu implementation of the backend lives in `device`.

mod backend;
mod binding;
mod command;
mod error;
mod orchestrator;
mod resize;
mod size;

pub use backend::{AcquireError, RenderBackend};
pub use binding::{Geometry, PipelineBinding, PipelineSet, FLAT_VERTEX_COUNT};
pub use command::{CommandList, RenderCommand};
pub use error::{FrameError, InitError};
pub use orchestrator::{OrchestratorState, RenderOrchestrator, TickOutcome};
pub use resize::ResizeQueue;
pub use size::SurfaceSize;
