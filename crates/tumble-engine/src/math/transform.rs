//! Model / view / projection builders.
//!
//! Every function here is pure and allocation-free. Preconditions are documented
//! rather than checked: these run once per frame on the render thread, and the
//! inputs are validated once at startup by `frame::SceneConfig::validate`.

use super::{Mat3, Mat4, Vec3};

/// Clip-space depth range produced by [`perspective`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DepthRange {
    /// Near plane maps to 0, far plane to 1 (wgpu / Metal / D3D).
    ZeroToOne,
    /// Near plane maps to -1, far plane to 1 (OpenGL).
    NegativeOneToOne,
}

/// Depth convention of the projection matrices built by this module.
///
/// Must agree with the depth-stencil configuration of the 3D pipeline
/// (clear to 1.0, `CompareFunction::Less`).
pub const CLIP_DEPTH_RANGE: DepthRange = DepthRange::ZeroToOne;

/// Rotation of `angle` radians about `axis` (Rodrigues' formula).
///
/// `axis` is normalized here. It must not be the zero vector: the result would be
/// all NaN. The matrix has no translation (right column and bottom row are
/// `[0, 0, 0, 1]`).
pub fn rotation(angle: f32, axis: Vec3) -> Mat4 {
    let Vec3 { x, y, z } = axis.normalize();
    let (st, ct) = angle.sin_cos();
    let ci = 1.0 - ct;

    Mat4::from_cols([
        [ct + x * x * ci, y * x * ci + z * st, z * x * ci - y * st, 0.0],
        [x * y * ci - z * st, ct + y * y * ci, z * y * ci + x * st, 0.0],
        [x * z * ci + y * st, y * z * ci - x * st, ct + z * z * ci, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Right-handed view matrix looking from `eye` towards `center`.
///
/// `eye == center`, or `up` parallel to `eye - center`, normalizes a zero vector and
/// yields NaN entries. That input is rejected at configuration time, not here.
pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Mat4 {
    let z = (eye - center).normalize();
    let x = up.cross(z).normalize();
    let y = z.cross(x);

    Mat4::from_cols([
        [x.x, y.x, z.x, 0.0],
        [x.y, y.y, z.y, 0.0],
        [x.z, y.z, z.z, 0.0],
        [-x.dot(eye), -y.dot(eye), -z.dot(eye), 1.0],
    ])
}

/// Symmetric perspective projection.
///
/// View-space points on the near plane land on clip depth 0 and on the far plane
/// on depth 1 (see [`CLIP_DEPTH_RANGE`]). The camera looks down `-Z`.
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let ys = 1.0 / (fov_y * 0.5).tan();
    let xs = ys / aspect;
    let zs = far / (near - far);

    Mat4::from_cols([
        [xs, 0.0, 0.0, 0.0],
        [0.0, ys, 0.0, 0.0],
        [0.0, 0.0, zs, -1.0],
        [0.0, 0.0, zs * near, 0.0],
    ])
}

#[inline]
pub fn upper_left_3x3(m: Mat4) -> Mat3 {
    m.upper_left_3x3()
}

/// Normal matrix of a linear transform: `inverse(transpose(m))`.
///
/// `m` must be invertible (rotation plus uniform scale in practice). A singular
/// input produces non-finite entries.
#[inline]
pub fn inverse_transpose(m: Mat3) -> Mat3 {
    m.transpose().inverse()
}

#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees / 180.0 * core::f32::consts::PI
}
