//! Render mode selection.
//!
//! The mode is written by whoever owns the toggle (keyboard, UI) and read by the
//! render thread once per tick.

mod controller;

pub use controller::{ModeController, RenderMode};
