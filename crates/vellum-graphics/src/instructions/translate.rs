use crate::context::{Context, MatrixStackKind};
use crate::error::Result;
use crate::math::{self, Matrix4};

use super::matrix::{finite, finite3};
use super::{Binding, MatrixInstruction};

/// Translation by `(x, y, z)`.
///
/// Single-component setters rebuild once each; `set_xy` and `set_xyz` update
/// several components with one rebuild and one notification.
#[derive(Debug, Clone, Default)]
pub struct Translate {
    base: MatrixInstruction,
    xyz: [f32; 3],
}

impl Translate {
    pub const NAME: &'static str = "Translate";

    pub fn new(x: f32, y: f32, z: f32) -> Result<Self> {
        let mut translate = Self {
            base: MatrixInstruction::new(),
            xyz: finite3("xyz", [x, y, z])?,
        };
        translate.rebuild();
        Ok(translate)
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.xyz[0]
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.xyz[1]
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.xyz[2]
    }

    #[inline]
    pub fn xy(&self) -> [f32; 2] {
        [self.xyz[0], self.xyz[1]]
    }

    #[inline]
    pub fn xyz(&self) -> [f32; 3] {
        self.xyz
    }

    pub fn set_x(&mut self, x: f32) -> Result<()> {
        self.xyz[0] = finite("x", x)?;
        self.rebuild();
        Ok(())
    }

    pub fn set_y(&mut self, y: f32) -> Result<()> {
        self.xyz[1] = finite("y", y)?;
        self.rebuild();
        Ok(())
    }

    pub fn set_z(&mut self, z: f32) -> Result<()> {
        self.xyz[2] = finite("z", z)?;
        self.rebuild();
        Ok(())
    }

    /// Sets x and y; z is kept.
    pub fn set_xy(&mut self, xy: [f32; 2]) -> Result<()> {
        let [x, y] = xy;
        finite("x", x)?;
        finite("y", y)?;
        self.xyz[0] = x;
        self.xyz[1] = y;
        self.rebuild();
        Ok(())
    }

    pub fn set_xyz(&mut self, xyz: [f32; 3]) -> Result<()> {
        self.xyz = finite3("xyz", xyz)?;
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
        let [x, y, z] = self.xyz;
        self.base.replace(math::translation(x, y, z));
    }

    pub(crate) fn binding(&self) -> &Binding {
        self.base.binding()
    }

    pub(crate) fn binding_mut(&mut self) -> &mut Binding {
        self.base.binding_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attached(mut t: Translate) -> (Translate, Context) {
        let ctx = Context::new();
        t.binding_mut().attach(ctx.update_signal());
        (t, ctx)
    }

    #[test]
    fn xyz_round_trips() {
        let (mut t, _ctx) = attached(Translate::default());
        t.set_xyz([1.0, 2.0, 3.0]).unwrap();
        assert_eq!(t.xyz(), [1.0, 2.0, 3.0]);
        assert_eq!(t.matrix(), math::translation(1.0, 2.0, 3.0));
    }

    #[test]
    fn xy_keeps_z() {
        let (mut t, _ctx) = attached(Translate::new(1.0, 2.0, 3.0).unwrap());
        t.set_xy([4.0, 5.0]).unwrap();
        assert_eq!(t.z(), 3.0);
        assert_eq!(t.xyz(), [4.0, 5.0, 3.0]);
        assert_eq!(t.xy(), [4.0, 5.0]);
    }

    #[test]
    fn compound_setters_post_once() {
        let (mut t, ctx) = attached(Translate::default());
        t.set_xy([1.0, 1.0]).unwrap();
        assert_eq!(ctx.update_count(), 1);
        t.set_xyz([1.0, 2.0, 3.0]).unwrap();
        assert_eq!(ctx.update_count(), 2);
        t.set_z(9.0).unwrap();
        assert_eq!(ctx.update_count(), 3);
    }

    #[test]
    fn rejected_xy_leaves_both_components() {
        let (mut t, ctx) = attached(Translate::new(1.0, 2.0, 3.0).unwrap());
        assert!(t.set_xy([7.0, f32::NAN]).is_err());
        assert_eq!(t.xyz(), [1.0, 2.0, 3.0]);
        assert_eq!(ctx.update_count(), 0);
    }

    #[test]
    fn single_axis_sets_are_absolute() {
        let (mut t, _ctx) = attached(Translate::default());
        t.set_x(2.0).unwrap();
        t.set_x(2.0).unwrap();
        assert_eq!(t.matrix(), math::translation(2.0, 0.0, 0.0));
    }
}
