//! Replayable context-state instructions.
//!
//! Each instruction owns only its parameters. `apply` writes them into the
//! context passed in; setters validate, store, then notify the attached
//! context that a redraw is needed.
//!
//! Extending the set:
//! - add the instruction type in its own module with `NAME`, `apply`
//!   and `binding`/`binding_mut`
//! - add a variant to [`Instruction`] through `instruction_set!`

mod binding;
mod color;
mod draw;
mod line_width;
mod matrix;
mod rotate;
mod scale;
mod stack;
mod texture;
mod translate;

pub use binding::Binding;
pub use color::{Color, ColorConfig};
pub use draw::{CanvasDraw, Drawable};
pub use line_width::LineWidth;
pub use matrix::{MatrixInstruction, Transform};
pub use rotate::Rotate;
pub use scale::Scale;
pub use stack::{LoadIdentity, PopMatrix, PopState, PushMatrix, PushState};
pub use texture::BindTexture;
pub use translate::Translate;

use crate::context::Context;
use crate::error::Result;

/// Concrete instruction types that can be recovered from an [`Instruction`].
pub trait InstructionKind: Into<Instruction> {
    fn from_instruction(instruction: &Instruction) -> Option<&Self>;
    fn from_instruction_mut(instruction: &mut Instruction) -> Option<&mut Self>;
}

macro_rules! instruction_set {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        /// Closed set of instructions a canvas can replay.
        #[derive(Debug, Clone)]
        pub enum Instruction {
            $($variant($ty),)*
        }

        impl Instruction {
            /// Applies this instruction's effect to `ctx`.
            pub fn apply(&self, ctx: &mut Context) -> Result<()> {
                match self {
                    $(Instruction::$variant(i) => i.apply(ctx),)*
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $(Instruction::$variant(_) => <$ty>::NAME,)*
                }
            }

            fn binding(&self) -> &Binding {
                match self {
                    $(Instruction::$variant(i) => i.binding(),)*
                }
            }

            fn binding_mut(&mut self) -> &mut Binding {
                match self {
                    $(Instruction::$variant(i) => i.binding_mut(),)*
                }
            }
        }

        $(
            impl From<$ty> for Instruction {
                #[inline]
                fn from(i: $ty) -> Self {
                    Instruction::$variant(i)
                }
            }

            impl InstructionKind for $ty {
                #[inline]
                fn from_instruction(instruction: &Instruction) -> Option<&Self> {
                    match instruction {
                        Instruction::$variant(i) => Some(i),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }

                #[inline]
                fn from_instruction_mut(instruction: &mut Instruction) -> Option<&mut Self> {
                    match instruction {
                        Instruction::$variant(i) => Some(i),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
            }
        )*
    };
}

instruction_set! {
    Color(Color),
    LineWidth(LineWidth),
    BindTexture(BindTexture),
    CanvasDraw(CanvasDraw),
    PushMatrix(PushMatrix),
    PopMatrix(PopMatrix),
    LoadIdentity(LoadIdentity),
    PushState(PushState),
    PopState(PopState),
    Matrix(MatrixInstruction),
    Transform(Transform),
    Rotate(Rotate),
    Scale(Scale),
    Translate(Translate),
}

impl Instruction {
    /// Attaches to `ctx`: later setter calls notify it and `apply` accepts it.
    pub fn attach(&mut self, ctx: &Context) {
        log::debug!("attaching {}", self.name());
        self.binding_mut().attach(ctx.update_signal());
    }

    pub fn detach(&mut self) {
        self.binding_mut().detach();
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.binding().is_attached()
    }

    #[inline]
    pub fn downcast_ref<T: InstructionKind>(&self) -> Option<&T> {
        T::from_instruction(self)
    }

    #[inline]
    pub fn downcast_mut<T: InstructionKind>(&mut self) -> Option<&mut T> {
        T::from_instruction_mut(self)
    }
}
