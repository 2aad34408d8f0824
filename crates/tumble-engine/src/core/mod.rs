//! Application-facing contract.
//!
//! The runtime calls into an [`App`] for window events and after every tick.
//! Rendering itself never goes through the app.

mod app;

pub use app::{App, AppControl};
