use core::ops::Mul;

use glam::{Mat4, Vec3};

/// 4x4 transform matrix.
///
/// Immutable value type: every operation produces a new matrix.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Matrix4(Mat4);

impl Matrix4 {
    pub const IDENTITY: Matrix4 = Matrix4(Mat4::IDENTITY);

    #[inline]
    pub const fn from_glam(m: Mat4) -> Self {
        Self(m)
    }

    #[inline]
    pub fn from_cols_array_2d(cols: &[[f32; 4]; 4]) -> Self {
        Self(Mat4::from_cols_array_2d(cols))
    }

    #[inline]
    pub fn to_glam(self) -> Mat4 {
        self.0
    }

    /// Columns as arrays, suitable for GPU upload.
    #[inline]
    pub fn to_cols_array_2d(self) -> [[f32; 4]; 4] {
        self.0.to_cols_array_2d()
    }

    /// Transforms a point (w = 1).
    #[inline]
    pub fn transform_point(self, p: [f32; 3]) -> [f32; 3] {
        self.0.transform_point3(Vec3::from_array(p)).to_array()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    #[inline]
    pub fn abs_diff_eq(self, other: Matrix4, max_abs_diff: f32) -> bool {
        self.0.abs_diff_eq(other.0, max_abs_diff)
    }
}

impl Default for Matrix4 {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Matrix4 {
    type Output = Matrix4;
    #[inline]
    fn mul(self, rhs: Matrix4) -> Matrix4 {
        multiply(self, rhs)
    }
}

#[inline]
pub fn identity() -> Matrix4 {
    Matrix4::IDENTITY
}

#[inline]
pub fn translation(tx: f32, ty: f32, tz: f32) -> Matrix4 {
    Matrix4(Mat4::from_translation(Vec3::new(tx, ty, tz)))
}

/// Rotation of `angle_degrees` around `axis`.
///
/// The axis does not need to be normalized. A zero-length axis has no
/// defined rotation and yields the identity matrix.
#[inline]
pub fn rotation(angle_degrees: f32, axis: [f32; 3]) -> Matrix4 {
    let axis = Vec3::from_array(axis).normalize_or_zero();
    if axis == Vec3::ZERO {
        return Matrix4::IDENTITY;
    }
    Matrix4(Mat4::from_axis_angle(axis, angle_degrees.to_radians()))
}

#[inline]
pub fn scale(sx: f32, sy: f32, sz: f32) -> Matrix4 {
    Matrix4(Mat4::from_scale(Vec3::new(sx, sy, sz)))
}

/// Returns `a * b`.
#[inline]
pub fn multiply(a: Matrix4, b: Matrix4) -> Matrix4 {
    Matrix4(a.0 * b.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn close(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < EPS)
    }

    #[test]
    fn identity_leaves_points_unchanged() {
        assert_eq!(identity().transform_point([1.0, -2.0, 3.0]), [1.0, -2.0, 3.0]);
    }

    #[test]
    fn translation_moves_points() {
        let m = translation(1.0, 2.0, 3.0);
        assert_eq!(m.transform_point([0.0, 0.0, 0.0]), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn rotation_is_in_degrees() {
        let m = rotation(90.0, [0.0, 0.0, 1.0]);
        assert!(close(m.transform_point([1.0, 0.0, 0.0]), [0.0, 1.0, 0.0]));
    }

    #[test]
    fn rotation_normalizes_axis() {
        assert!(rotation(30.0, [0.0, 0.0, 5.0]).abs_diff_eq(rotation(30.0, [0.0, 0.0, 1.0]), EPS));
    }

    #[test]
    fn rotation_around_zero_axis_is_identity() {
        assert_eq!(rotation(45.0, [0.0, 0.0, 0.0]), identity());
    }

    #[test]
    fn multiply_applies_right_operand_first() {
        // scale first, then translate
        let m = multiply(translation(10.0, 0.0, 0.0), scale(2.0, 2.0, 2.0));
        assert_eq!(m.transform_point([1.0, 0.0, 0.0]), [12.0, 0.0, 0.0]);
    }
}
