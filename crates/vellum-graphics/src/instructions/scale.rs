use crate::context::{Context, MatrixStackKind};
use crate::error::Result;
use crate::math::{self, Matrix4};

use super::matrix::{about_origin, finite, finite3};
use super::{Binding, MatrixInstruction};

/// Uniform scale by a single factor, pivoting on `origin`.
///
/// Setters rebuild the matrix from scratch; repeated sets do not accumulate.
#[derive(Debug, Clone)]
pub struct Scale {
    base: MatrixInstruction,
    factor: f32,
    origin: [f32; 3],
}

impl Scale {
    pub const NAME: &'static str = "Scale";

    pub fn new(factor: f32) -> Result<Self> {
        let mut scale = Self {
            base: MatrixInstruction::new(),
            factor: finite("scale", factor)?,
            origin: [0.0; 3],
        };
        scale.rebuild();
        Ok(scale)
    }

    pub fn with_origin(mut self, origin: [f32; 3]) -> Result<Self> {
        self.origin = finite3("origin", origin)?;
        self.rebuild();
        Ok(self)
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.factor
    }

    pub fn set_scale(&mut self, factor: f32) -> Result<()> {
        self.factor = finite("scale", factor)?;
        self.rebuild();
        Ok(())
    }

    #[inline]
    pub fn origin(&self) -> [f32; 3] {
        self.origin
    }

    pub fn set_origin(&mut self, origin: [f32; 3]) -> Result<()> {
        self.origin = finite3("origin", origin)?;
        self.rebuild();
        Ok(())
    }

    #[inline]
    pub fn matrix(&self) -> Matrix4 {
        self.base.matrix()
    }

    #[inline]
    pub fn stack(&self) -> MatrixStackKind {
        self.base.stack()
    }

    pub fn set_stack(&mut self, stack: MatrixStackKind) {
        self.base.set_stack(stack);
    }

    pub fn apply(&self, ctx: &mut Context) -> Result<()> {
        self.base.apply_as(ctx, Self::NAME)
    }

    fn rebuild(&mut self) {
        let s = self.factor;
        self.base.replace(about_origin(math::scale(s, s, s), self.origin));
    }

    pub(crate) fn binding(&self) -> &Binding {
        self.base.binding()
    }

    pub(crate) fn binding_mut(&mut self) -> &mut Binding {
        self.base.binding_mut()
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self { base: MatrixInstruction::new(), factor: 1.0, origin: [0.0; 3] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_factor_builds_uniform_matrix() {
        let s = Scale::new(2.5).unwrap();
        assert_eq!(s.matrix(), math::scale(2.5, 2.5, 2.5));
    }

    #[test]
    fn repeated_sets_do_not_compound() {
        let mut s = Scale::new(2.0).unwrap();
        s.set_scale(2.0).unwrap();
        assert_eq!(s.matrix(), math::scale(2.0, 2.0, 2.0));
    }

    #[test]
    fn origin_stays_fixed() {
        let s = Scale::new(3.0).unwrap().with_origin([1.0, 1.0, 0.0]).unwrap();
        assert_eq!(s.matrix().transform_point([1.0, 1.0, 0.0]), [1.0, 1.0, 0.0]);
        assert_eq!(s.matrix().transform_point([2.0, 1.0, 0.0]), [4.0, 1.0, 0.0]);
    }

    #[test]
    fn set_scale_posts_once_and_rejects_nan() {
        let ctx = Context::new();
        let mut s = Scale::default();
        s.binding_mut().attach(ctx.update_signal());
        s.set_scale(0.5).unwrap();
        assert_eq!(ctx.update_count(), 1);
        assert!(s.set_scale(f32::NAN).is_err());
        assert_eq!(s.scale(), 0.5);
        assert_eq!(ctx.update_count(), 1);
    }
}
