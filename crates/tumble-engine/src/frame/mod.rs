//! Per-frame transform state.
//!
//! Turns elapsed time, the fixed camera and the current viewport aspect into the
//! constants the GPU consumes:
//! - `model = rotation(accumulated_time * angular_velocity, axis)`
//! - `mvp = projection * view * model`
//! - `normal = inverse_transpose(upper_left_3x3(view * model))`

mod config;
mod constants;
mod state;

pub use config::{AnimationConfig, CameraConfig, ConfigError, SceneConfig};
pub use constants::{FrameConstants, FrameUniform};
pub use state::FrameState;
