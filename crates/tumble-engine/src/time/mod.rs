//! Time subsystem.
//!
//! Provides stable, testable frame timing utilities without coupling to the runtime.
//! Intended usage:
//! - one `FramePacer` per render loop, polled to decide when a tick is due
//! - one `FrameClock` per window; call `tick()` once per tick to obtain `FrameTime`

mod frame_clock;
mod pacer;

pub use frame_clock::{FrameClock, FrameTime};
pub use pacer::{FramePacer, PacerPoll};
