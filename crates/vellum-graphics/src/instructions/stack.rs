//! Scope instructions: matrix stack push/pop and keyed state save/restore.
//!
//! Pairing is the author's job. An unmatched pop fails at apply time.

use crate::context::{Context, ContextKey, MatrixStackKind};
use crate::error::Result;

use super::Binding;

macro_rules! matrix_stack_instruction {
    ($(#[$doc:meta])* $ty:ident, $name:literal, |$stack:ident| $body:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default)]
        pub struct $ty {
            stack: MatrixStackKind,
            binding: Binding,
        }

        impl $ty {
            pub const NAME: &'static str = $name;

            /// Targets the model-view stack.
            pub fn new() -> Self {
                Self::default()
            }

            pub fn on(stack: MatrixStackKind) -> Self {
                Self { stack, binding: Binding::default() }
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
                self.binding.check(ctx, Self::NAME)?;
                let $stack = ctx.matrix_stack_mut(self.stack);
                $body
            }

            pub(crate) fn binding(&self) -> &Binding {
                &self.binding
            }

            pub(crate) fn binding_mut(&mut self) -> &mut Binding {
                &mut self.binding
            }
        }
    };
}

matrix_stack_instruction!(
    /// Duplicates the top of a matrix stack.
    PushMatrix,
    "PushMatrix",
    |stack| {
        stack.push();
        Ok(())
    }
);

matrix_stack_instruction!(
    /// Discards the top of a matrix stack.
    PopMatrix,
    "PopMatrix",
    |stack| stack.pop().map(|_| ())
);

matrix_stack_instruction!(
    /// Replaces the top of a matrix stack with identity.
    LoadIdentity,
    "LoadIdentity",
    |stack| {
        stack.load_identity();
        Ok(())
    }
);

macro_rules! state_instruction {
    ($(#[$doc:meta])* $ty:ident, $name:literal, $method:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default)]
        pub struct $ty {
            keys: Vec<ContextKey>,
            binding: Binding,
        }

        impl $ty {
            pub const NAME: &'static str = $name;

            pub fn new(keys: impl Into<Vec<ContextKey>>) -> Self {
                Self { keys: keys.into(), binding: Binding::default() }
            }

            #[inline]
            pub fn keys(&self) -> &[ContextKey] {
                &self.keys
            }

            pub fn set_keys(&mut self, keys: impl Into<Vec<ContextKey>>) {
                self.keys = keys.into();
                self.binding.notify();
            }

            pub fn apply(&self, ctx: &mut Context) -> Result<()> {
                self.binding.check(ctx, Self::NAME)?;
                ctx.$method(&self.keys)
            }

            pub(crate) fn binding(&self) -> &Binding {
                &self.binding
            }

            pub(crate) fn binding_mut(&mut self) -> &mut Binding {
                &mut self.binding
            }
        }
    };
}

state_instruction!(
    /// Saves the current value of each listed context key.
    PushState,
    "PushState",
    push_state
);

state_instruction!(
    /// Restores the values saved by the matching [`PushState`].
    PopState,
    "PopState",
    pop_state
);
