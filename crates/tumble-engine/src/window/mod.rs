//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the window, and drives the renderer at a fixed
//! tick rate.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
