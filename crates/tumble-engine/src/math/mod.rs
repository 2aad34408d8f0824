//! Transform math shared by the frame state and the renderers.
//!
//! Conventions:
//! - column-major storage, column vectors (`M * v`)
//! - right-handed view space, camera looking down `-Z`
//! - clip depth in `0..1` (see [`CLIP_DEPTH_RANGE`])

mod mat3;
mod mat4;
mod transform;
mod vec;

pub use mat3::Mat3;
pub use mat4::Mat4;
pub use transform::{
    degrees_to_radians, inverse_transpose, look_at, perspective, rotation, upper_left_3x3,
    DepthRange, CLIP_DEPTH_RANGE,
};
pub use vec::{Vec3, Vec4};
