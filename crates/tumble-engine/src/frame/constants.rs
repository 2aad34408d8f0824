use bytemuck::{Pod, Zeroable};

use crate::math::{Mat3, Mat4};

/// Per-frame transform constants; the only data uploaded to the GPU each tick.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameConstants {
    pub model_view_projection: Mat4,
    pub normal_matrix: Mat3,
}

impl FrameConstants {
    #[inline]
    pub fn to_uniform(&self) -> FrameUniform {
        FrameUniform {
            model_view_projection: self.model_view_projection.to_cols_array(),
            normal_matrix: self.normal_matrix.to_padded_cols(),
        }
    }
}

/// GPU layout of [`FrameConstants`].
///
/// Matches the WGSL struct
/// `struct Frame { mvp: mat4x4<f32>, normal: mat3x3<f32> }`; a `mat3x3` column
/// occupies 16 bytes in a uniform buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct FrameUniform {
    pub model_view_projection: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 3],
}

impl FrameUniform {
    pub const SIZE: u64 = std::mem::size_of::<FrameUniform>() as u64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_is_112_bytes() {
        assert_eq!(FrameUniform::SIZE, 64 + 48);
        assert_eq!(FrameUniform::SIZE % 16, 0);
    }

    #[test]
    fn uniform_pads_normal_columns() {
        let c = FrameConstants {
            model_view_projection: Mat4::IDENTITY,
            normal_matrix: Mat3::from_cols([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]),
        };
        let u = c.to_uniform();
        assert_eq!(u.normal_matrix[1], [4.0, 5.0, 6.0, 0.0]);
        assert_eq!(u.model_view_projection, Mat4::IDENTITY.cols);
    }
}
