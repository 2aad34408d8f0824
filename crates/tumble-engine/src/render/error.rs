use thiserror::Error;

use crate::frame::ConfigError;
use crate::mode::RenderMode;

/// Startup failure. Any of these aborts initialization; nothing is retried.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("window has zero size")]
    ZeroSize,

    #[error("failed to create wgpu surface")]
    Surface(#[source] wgpu::CreateSurfaceError),

    #[error("failed to find a compatible GPU adapter")]
    NoAdapter(#[source] wgpu::RequestAdapterError),

    #[error("failed to create wgpu device/queue")]
    Device(#[source] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,

    #[error("program `{program}` has no entry point `{entry}`")]
    MissingEntryPoint {
        program: &'static str,
        entry: &'static str,
    },

    /// Shader compile or pipeline validation failure reported by the device.
    #[error("GPU rejected shader or pipeline")]
    Pipeline(#[source] wgpu::Error),

    #[error("scene asset rejected: {0}")]
    Asset(&'static str),

    #[error("pipeline binding for {mode} mode is unusable: {reason}")]
    Binding {
        mode: RenderMode,
        reason: &'static str,
    },

    #[error("invalid scene configuration")]
    Config(#[from] ConfigError),
}

/// Unrecoverable failure during a tick. The orchestrator is terminated when
/// one is returned.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("presentation surface lost (out of memory)")]
    SurfaceLost,
}
