use core::ops::Mul;

use super::{Mat3, Vec3, Vec4};

/// 4x4 column-major matrix.
///
/// `cols[c][r]` is row `r` of column `c`, which is also the memory order wgpu
/// expects for a WGSL `mat4x4<f32>`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    pub cols: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4::from_cols([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    #[inline]
    pub const fn from_cols(cols: [[f32; 4]; 4]) -> Self {
        Self { cols }
    }

    #[inline]
    pub const fn col(&self, c: usize) -> Vec4 {
        Vec4::from_array(self.cols[c])
    }

    #[inline]
    pub const fn row(&self, r: usize) -> Vec4 {
        Vec4::new(self.cols[0][r], self.cols[1][r], self.cols[2][r], self.cols[3][r])
    }

    /// Applies the full transform to a point (`w = 1`) without the perspective divide.
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec4 {
        *self * p.extend(1.0)
    }

    /// Applies only the linear part to a direction (`w = 0`).
    #[inline]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        (*self * v.extend(0.0)).truncate()
    }

    /// Linear (rotation/scale) block, dropping translation and projection terms.
    #[inline]
    pub fn upper_left_3x3(&self) -> Mat3 {
        let c = &self.cols;
        Mat3::from_cols([
            [c[0][0], c[0][1], c[0][2]],
            [c[1][0], c[1][1], c[1][2]],
            [c[2][0], c[2][1], c[2][2]],
        ])
    }

    #[inline]
    pub const fn to_cols_array(&self) -> [[f32; 4]; 4] {
        self.cols
    }

    pub fn is_finite(&self) -> bool {
        self.cols.iter().flatten().all(|v| v.is_finite())
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut out = [[0.0f32; 4]; 4];
        for (c, col) in out.iter_mut().enumerate() {
            *col = (self * rhs.col(c)).to_array();
        }
        Mat4::from_cols(out)
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    #[inline]
    fn mul(self, v: Vec4) -> Vec4 {
        Vec4::new(
            self.row(0).dot(v),
            self.row(1).dot(v),
            self.row(2).dot(v),
            self.row(3).dot(v),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translation(x: f32, y: f32, z: f32) -> Mat4 {
        Mat4::from_cols([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [x, y, z, 1.0],
        ])
    }

    #[test]
    fn identity_is_neutral() {
        let t = translation(1.0, 2.0, 3.0);
        assert_eq!(Mat4::IDENTITY * t, t);
        assert_eq!(t * Mat4::IDENTITY, t);
    }

    #[test]
    fn product_applies_right_operand_first() {
        // Scale by 2, then translate: (1,0,0) -> (2,0,0) -> (3,0,0).
        let mut scale = Mat4::IDENTITY;
        scale.cols[0][0] = 2.0;
        let m = translation(1.0, 0.0, 0.0) * scale;
        assert_eq!(m.transform_point(Vec3::X), Vec4::new(3.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn vectors_ignore_translation() {
        let t = translation(5.0, 5.0, 5.0);
        assert_eq!(t.transform_vector(Vec3::Y), Vec3::Y);
    }

    #[test]
    fn upper_left_drops_translation_column() {
        let m = translation(9.0, 8.0, 7.0).upper_left_3x3();
        assert_eq!(m, Mat3::IDENTITY);
    }
}
