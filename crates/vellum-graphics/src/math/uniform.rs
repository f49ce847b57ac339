use bytemuck::{Pod, Zeroable};

use super::Matrix4;

/// Plain-old-data matrix snapshot for uniform buffer uploads.
///
/// 64 bytes, column-major, already 16-byte aligned.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MatrixUniform {
    pub cols: [[f32; 4]; 4],
}

impl From<Matrix4> for MatrixUniform {
    #[inline]
    fn from(m: Matrix4) -> Self {
        Self { cols: m.to_cols_array_2d() }
    }
}

impl MatrixUniform {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::translation;

    #[test]
    fn uniform_is_sixty_four_bytes() {
        let u = MatrixUniform::from(Matrix4::IDENTITY);
        assert_eq!(u.as_bytes().len(), 64);
    }

    #[test]
    fn translation_lands_in_last_column() {
        let u = MatrixUniform::from(translation(1.0, 2.0, 3.0));
        assert_eq!(u.cols[3], [1.0, 2.0, 3.0, 1.0]);
    }
}
