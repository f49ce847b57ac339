//! Error types for instruction authoring and replay.

use thiserror::Error;

use crate::context::{ContextKey, MatrixStackKind};

/// Misuse of the instruction/context protocol.
///
/// None of these are transient: replaying the same instruction list against
/// the same starting state fails the same way.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphicsError {
    /// A color was given with a channel count other than 0, 3 or 4.
    #[error("invalid color arity: expected 3 or 4 channels, got {got}")]
    InvalidColorArity { got: usize },

    /// `PopMatrix` without a matching `PushMatrix`.
    #[error("imbalanced {stack} matrix stack: pop without matching push")]
    ImbalancedMatrixStack { stack: MatrixStackKind },

    /// Non-finite or degenerate transform parameter.
    #[error("invalid transform parameter `{name}`: {value}")]
    InvalidTransformParameter { name: &'static str, value: String },

    /// `apply` called on an instruction not attached to the target context.
    #[error("{instruction} is not attached to this context")]
    UnboundContext { instruction: &'static str },

    #[error("invalid line width: {0}")]
    InvalidLineWidth(f32),

    /// `Context::set` called with a value of another kind than `key`.
    #[error("value kind does not match context key {key:?}")]
    ValueKindMismatch { key: ContextKey },

    /// `PopState` for a key that was never pushed.
    #[error("imbalanced state stack for {key:?}: pop without matching push")]
    ImbalancedStateStack { key: ContextKey },

    #[error("texture unit {index} out of range")]
    TextureUnitOutOfRange { index: usize },
}

impl GraphicsError {
    pub(crate) fn transform_param(name: &'static str, value: impl core::fmt::Debug) -> Self {
        Self::InvalidTransformParameter { name, value: format!("{value:?}") }
    }
}

/// Result type for graphics operations.
pub type Result<T> = std::result::Result<T, GraphicsError>;
