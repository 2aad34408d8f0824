//! wgpu implementation of the render backend.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain) and its MSAA colour/depth targets
//! - building the mesh and triangle pipelines from CPU-side assets
//! - acquiring, encoding and presenting frames for `RenderOrchestrator`

mod assets;
mod backend;
mod gpu;
mod init;
mod pipelines;
mod program;
mod surface;
mod targets;

pub use assets::{FlatVertex, MeshData, MeshVertex, SceneAssets, TextureData};
pub use backend::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
pub use pipelines::WgpuHandles;
pub use program::ProgramDesc;
