use crate::context::Context;
use crate::error::{GraphicsError, Result};

use super::Binding;

/// Sets the context line width.
#[derive(Debug, Clone)]
pub struct LineWidth {
    width: f32,
    binding: Binding,
}

impl LineWidth {
    pub const NAME: &'static str = "LineWidth";

    pub fn new(width: f32) -> Result<Self> {
        Ok(Self { width: validate(width)?, binding: Binding::default() })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn set_width(&mut self, width: f32) -> Result<()> {
        self.width = validate(width)?;
        self.binding.notify();
        Ok(())
    }

    pub fn apply(&self, ctx: &mut Context) -> Result<()> {
        self.binding.check(ctx, Self::NAME)?;
        ctx.set_line_width(self.width);
        Ok(())
    }

    pub(crate) fn binding(&self) -> &Binding {
        &self.binding
    }

    pub(crate) fn binding_mut(&mut self) -> &mut Binding {
        &mut self.binding
    }
}

impl Default for LineWidth {
    fn default() -> Self {
        Self { width: 1.0, binding: Binding::default() }
    }
}

fn validate(width: f32) -> Result<f32> {
    if width.is_finite() && width >= 0.0 {
        Ok(width)
    } else {
        Err(GraphicsError::InvalidLineWidth(width))
    }
}
