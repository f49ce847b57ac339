use crate::context::{Context, MatrixStackKind};
use crate::error::Result;
use crate::math::{self, Matrix4};

use super::matrix::{about_origin, axis, finite, finite3};
use super::{Binding, MatrixInstruction};

/// Rotation by `angle` degrees around `axis`, pivoting on `origin`.
///
/// Every setter rebuilds the matrix from all current parameters, so values are
/// absolute: setting `angle` twice never compounds.
#[derive(Debug, Clone)]
pub struct Rotate {
    base: MatrixInstruction,
    angle: f32,
    axis: [f32; 3],
    origin: [f32; 3],
}

impl Rotate {
    pub const NAME: &'static str = "Rotate";

    /// `angle` in degrees; the axis need not be normalized but must be non-zero.
    pub fn new(angle: f32, ax: f32, ay: f32, az: f32) -> Result<Self> {
        let mut rotate = Self {
            base: MatrixInstruction::new(),
            angle: finite("angle", angle)?,
            axis: axis("axis", [ax, ay, az])?,
            origin: [0.0; 3],
        };
        rotate.rebuild();
        Ok(rotate)
    }

    pub fn with_origin(mut self, origin: [f32; 3]) -> Result<Self> {
        self.origin = finite3("origin", origin)?;
        self.rebuild();
        Ok(self)
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f32) -> Result<()> {
        self.angle = finite("angle", angle)?;
        self.rebuild();
        Ok(())
    }

    #[inline]
    pub fn axis(&self) -> [f32; 3] {
        self.axis
    }

    pub fn set_axis(&mut self, axis_xyz: [f32; 3]) -> Result<()> {
        self.axis = axis("axis", axis_xyz)?;
        self.rebuild();
        Ok(())
    }

    /// Sets angle and axis with a single rebuild.
    pub fn set(&mut self, angle: f32, axis_xyz: [f32; 3]) -> Result<()> {
        let angle = finite("angle", angle)?;
        self.axis = axis("axis", axis_xyz)?;
        self.angle = angle;
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
        let rotation = math::rotation(self.angle, self.axis);
        self.base.replace(about_origin(rotation, self.origin));
    }

    pub(crate) fn binding(&self) -> &Binding {
        self.base.binding()
    }

    pub(crate) fn binding_mut(&mut self) -> &mut Binding {
        self.base.binding_mut()
    }
}

impl Default for Rotate {
    /// Zero degrees around +Z.
    fn default() -> Self {
        let mut rotate = Self {
            base: MatrixInstruction::new(),
            angle: 0.0,
            axis: [0.0, 0.0, 1.0],
            origin: [0.0; 3],
        };
        rotate.rebuild();
        rotate
    }
}
