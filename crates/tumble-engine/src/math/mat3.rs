use core::ops::Mul;

use super::Vec3;

/// 3x3 column-major matrix, used for normal transforms.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat3 {
    pub cols: [[f32; 3]; 3],
}

impl Mat3 {
    pub const IDENTITY: Mat3 = Mat3::from_cols([
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
    ]);

    #[inline]
    pub const fn from_cols(cols: [[f32; 3]; 3]) -> Self {
        Self { cols }
    }

    #[inline]
    pub const fn col(&self, c: usize) -> Vec3 {
        Vec3::new(self.cols[c][0], self.cols[c][1], self.cols[c][2])
    }

    #[inline]
    pub const fn row(&self, r: usize) -> Vec3 {
        Vec3::new(self.cols[0][r], self.cols[1][r], self.cols[2][r])
    }

    pub fn transpose(&self) -> Mat3 {
        Mat3::from_cols([
            self.row(0).to_array(),
            self.row(1).to_array(),
            self.row(2).to_array(),
        ])
    }

    pub fn determinant(&self) -> f32 {
        self.col(0).dot(self.col(1).cross(self.col(2)))
    }

    /// Inverse via the adjugate.
    ///
    /// No singularity check: a zero determinant produces infinite or NaN entries.
    /// Callers only invert matrices that are invertible by construction.
    pub fn inverse(&self) -> Mat3 {
        let (a, b, c) = (self.col(0), self.col(1), self.col(2));
        let inv_det = 1.0 / self.determinant();

        // Rows of the inverse are the cross products of the columns.
        let r0 = b.cross(c) * inv_det;
        let r1 = c.cross(a) * inv_det;
        let r2 = a.cross(b) * inv_det;

        Mat3::from_cols([[r0.x, r1.x, r2.x], [r0.y, r1.y, r2.y], [r0.z, r1.z, r2.z]])
    }

    pub fn is_finite(&self) -> bool {
        self.cols.iter().flatten().all(|v| v.is_finite())
    }

    /// Pads each column to a `vec4`, the uniform layout of a WGSL `mat3x3<f32>`.
    pub const fn to_padded_cols(&self) -> [[f32; 4]; 3] {
        let c = &self.cols;
        [
            [c[0][0], c[0][1], c[0][2], 0.0],
            [c[1][0], c[1][1], c[1][2], 0.0],
            [c[2][0], c[2][1], c[2][2], 0.0],
        ]
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Mat3 {
        Mat3::from_cols([
            (self * rhs.col(0)).to_array(),
            (self * rhs.col(1)).to_array(),
            (self * rhs.col(2)).to_array(),
        ])
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, v: Vec3) -> Vec3 {
        Vec3::new(self.row(0).dot(v), self.row(1).dot(v), self.row(2).dot(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> Mat3 {
        Mat3::from_cols([[2.0, 0.0, 1.0], [1.0, 3.0, 0.0], [0.0, 1.0, 4.0]])
    }

    fn assert_mat3_eq(a: Mat3, b: Mat3) {
        for (x, y) in a.cols.iter().flatten().zip(b.cols.iter().flatten()) {
            assert_relative_eq!(x, y, epsilon = 1e-5);
        }
    }

    #[test]
    fn determinant_of_identity_is_one() {
        assert_eq!(Mat3::IDENTITY.determinant(), 1.0);
    }

    #[test]
    fn inverse_times_matrix_is_identity() {
        let m = sample();
        assert_mat3_eq(m * m.inverse(), Mat3::IDENTITY);
        assert_mat3_eq(m.inverse() * m, Mat3::IDENTITY);
    }

    #[test]
    fn transpose_swaps_rows_and_columns() {
        let t = sample().transpose();
        assert_eq!(t.col(0), sample().row(0));
        assert_eq!(t.transpose(), sample());
    }

    #[test]
    fn singular_inverse_is_not_finite() {
        let m = Mat3::from_cols([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 0.0, 1.0]]);
        assert!(!m.inverse().is_finite());
    }
}
