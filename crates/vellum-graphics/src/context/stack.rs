use std::fmt;

use crate::error::{GraphicsError, Result};
use crate::math::{self, Matrix4};

/// Selects which matrix stack an instruction targets.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum MatrixStackKind {
    #[default]
    ModelView,
    Projection,
}

impl fmt::Display for MatrixStackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixStackKind::ModelView => f.write_str("model-view"),
            MatrixStackKind::Projection => f.write_str("projection"),
        }
    }
}

/// LIFO stack of matrices whose top is the active transform.
///
/// Invariant: never empty. The base entry cannot be popped.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixStack {
    kind: MatrixStackKind,
    base: Matrix4,
    entries: Vec<Matrix4>,
}

impl MatrixStack {
    pub fn new(kind: MatrixStackKind, base: Matrix4) -> Self {
        Self { kind, base, entries: vec![base] }
    }

    #[inline]
    pub fn kind(&self) -> MatrixStackKind {
        self.kind
    }

    /// Active matrix.
    #[inline]
    pub fn top(&self) -> Matrix4 {
        self.entries.last().copied().unwrap_or(self.base)
    }

    /// Number of pushes not yet popped.
    #[inline]
    pub fn depth(&self) -> usize {
        self.entries.len().saturating_sub(1)
    }

    #[inline]
    pub fn is_balanced(&self) -> bool {
        self.depth() == 0
    }

    /// Duplicates the top entry.
    #[inline]
    pub fn push(&mut self) {
        let top = self.top();
        self.entries.push(top);
    }

    /// Discards the top entry and returns it.
    ///
    /// Fails without touching the stack when nothing was pushed.
    pub fn pop(&mut self) -> Result<Matrix4> {
        if self.entries.len() <= 1 {
            return Err(GraphicsError::ImbalancedMatrixStack { stack: self.kind });
        }
        Ok(self.entries.pop().unwrap_or(self.base))
    }

    /// Replaces the top with `top * mat`.
    #[inline]
    pub fn apply(&mut self, mat: Matrix4) {
        let composed = math::multiply(self.top(), mat);
        self.set_top(composed);
    }

    #[inline]
    pub fn load_identity(&mut self) {
        self.set_top(math::identity());
    }

    /// Drops every pushed entry and restores the base matrix.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.entries.push(self.base);
    }

    pub(crate) fn set_base(&mut self, base: Matrix4) {
        self.base = base;
        self.reset();
    }

    fn set_top(&mut self, mat: Matrix4) {
        match self.entries.last_mut() {
            Some(top) => *top = mat,
            None => self.entries.push(mat),
        }
    }
}
