//! Tumble engine crate.
//!
//! Transform math, per-frame state, and the render orchestration loop that
//! draws either a rotating textured mesh or a flat triangle, plus the wgpu and
//! winit pieces that host it.

pub mod core;
pub mod device;
pub mod frame;
pub mod logging;
pub mod math;
pub mod mode;
pub mod render;
pub mod time;
pub mod window;
