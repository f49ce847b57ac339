use crate::context::{Context, MatrixStackKind};
use crate::error::{GraphicsError, Result};
use crate::math::{self, Matrix4};

use super::Binding;

/// Holds one matrix and composes it into a context matrix stack on apply.
///
/// `apply` right-multiplies the stack top by the held matrix; it never
/// replaces the top.
#[derive(Debug, Clone, Default)]
pub struct MatrixInstruction {
    mat: Matrix4,
    stack: MatrixStackKind,
    binding: Binding,
}

impl MatrixInstruction {
    pub const NAME: &'static str = "MatrixInstruction";

    /// Identity, targeting the model-view stack.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_matrix(mat: Matrix4) -> Result<Self> {
        Ok(Self { mat: finite_matrix(mat)?, ..Self::default() })
    }

    #[inline]
    pub fn matrix(&self) -> Matrix4 {
        self.mat
    }

    /// Fails on any non-finite element, leaving the stored matrix as is.
    pub fn set_matrix(&mut self, mat: Matrix4) -> Result<()> {
        self.replace(finite_matrix(mat)?);
        Ok(())
    }

    /// Stores a matrix built from already validated parameters.
    pub(super) fn replace(&mut self, mat: Matrix4) {
        self.mat = mat;
        self.binding.notify();
    }

    #[inline]
    pub fn stack(&self) -> MatrixStackKind {
        self.stack
    }

    pub fn set_stack(&mut self, stack: MatrixStackKind) {
        self.stack = stack;
        self.binding.notify();
    }

    pub fn apply(&self, ctx: &mut Context) -> Result<()> {
        self.apply_as(ctx, Self::NAME)
    }

    pub(super) fn apply_as(&self, ctx: &mut Context, name: &'static str) -> Result<()> {
        self.binding.check(ctx, name)?;
        ctx.matrix_stack_mut(self.stack).apply(self.mat);
        Ok(())
    }

    pub(crate) fn binding(&self) -> &Binding {
        &self.binding
    }

    pub(crate) fn binding_mut(&mut self) -> &mut Binding {
        &mut self.binding
    }
}

/// Matrix instruction with authoring-time composition.
///
/// Each composition op folds into the stored matrix (`mat = mat * op`) and
/// notifies once. Nothing reaches the context until the next replay.
#[derive(Debug, Clone, Default)]
pub struct Transform {
    base: MatrixInstruction,
}

impl Transform {
    pub const NAME: &'static str = "Transform";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_matrix(mat: Matrix4) -> Result<Self> {
        Ok(Self { base: MatrixInstruction::from_matrix(mat)? })
    }

    #[inline]
    pub fn matrix(&self) -> Matrix4 {
        self.base.matrix()
    }

    pub fn set_matrix(&mut self, mat: Matrix4) -> Result<()> {
        self.base.set_matrix(mat)
    }

    #[inline]
    pub fn stack(&self) -> MatrixStackKind {
        self.base.stack()
    }

    pub fn set_stack(&mut self, stack: MatrixStackKind) {
        self.base.set_stack(stack);
    }

    /// `mat = mat * other`. The product must stay finite.
    pub fn transform(&mut self, other: Matrix4) -> Result<()> {
        let other = finite_matrix(other)?;
        self.set_matrix(math::multiply(self.matrix(), other))
    }

    pub fn translate(&mut self, tx: f32, ty: f32, tz: f32) -> Result<()> {
        let [tx, ty, tz] = finite3("translate", [tx, ty, tz])?;
        self.transform(math::translation(tx, ty, tz))
    }

    /// Rotates `angle` degrees around `(ax, ay, az)`.
    pub fn rotate(&mut self, angle: f32, ax: f32, ay: f32, az: f32) -> Result<()> {
        let angle = finite("angle", angle)?;
        let axis = axis("axis", [ax, ay, az])?;
        self.transform(math::rotation(angle, axis))
    }

    /// Uniform scale.
    pub fn scale(&mut self, s: f32) -> Result<()> {
        let s = finite("scale", s)?;
        self.transform(math::scale(s, s, s))
    }

    pub fn identity(&mut self) {
        self.base.replace(math::identity());
    }

    pub fn apply(&self, ctx: &mut Context) -> Result<()> {
        self.base.apply_as(ctx, Self::NAME)
    }

    pub(crate) fn binding(&self) -> &Binding {
        self.base.binding()
    }

    pub(crate) fn binding_mut(&mut self) -> &mut Binding {
        self.base.binding_mut()
    }
}

// ── parameter validation ──────────────────────────────────────────────────

pub(super) fn finite(name: &'static str, value: f32) -> Result<f32> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GraphicsError::transform_param(name, value))
    }
}

pub(super) fn finite3(name: &'static str, v: [f32; 3]) -> Result<[f32; 3]> {
    if v.iter().all(|c| c.is_finite()) {
        Ok(v)
    } else {
        Err(GraphicsError::transform_param(name, v))
    }
}

pub(super) fn finite_matrix(mat: Matrix4) -> Result<Matrix4> {
    if mat.is_finite() {
        Ok(mat)
    } else {
        Err(GraphicsError::transform_param("matrix", mat))
    }
}

/// Finite and non-zero length. Normalization is left to the math layer.
pub(super) fn axis(name: &'static str, v: [f32; 3]) -> Result<[f32; 3]> {
    let v = finite3(name, v)?;
    if v.iter().all(|&c| c == 0.0) {
        return Err(GraphicsError::transform_param(name, v));
    }
    Ok(v)
}

/// `translation(o) * m * translation(-o)`, or `m` itself for the zero origin.
pub(super) fn about_origin(m: Matrix4, origin: [f32; 3]) -> Matrix4 {
    if origin == [0.0; 3] {
        return m;
    }
    let [ox, oy, oz] = origin;
    math::multiply(
        math::multiply(math::translation(ox, oy, oz), m),
        math::translation(-ox, -oy, -oz),
    )
}
