//! Vellum graphics crate.
//!
//! Retained-mode drawing state: an ordered list of instructions that, replayed
//! against a [`Context`](context::Context), reproduce the active color, line
//! width, bound textures and matrix stacks at every point of the sequence.

pub mod canvas;
pub mod context;
pub mod error;
pub mod instructions;
pub mod logging;
pub mod math;

pub use canvas::{Canvas, InstructionId};
pub use context::{Context, ContextConfig};
pub use error::{GraphicsError, Result};
pub use instructions::Instruction;
