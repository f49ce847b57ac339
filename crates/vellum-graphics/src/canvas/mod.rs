//! Canvas: an ordered instruction list replayed against one context.
//!
//! Responsibilities:
//! - own the context and the instruction sequence
//! - attach/detach instructions as they enter/leave the sequence
//! - replay in insertion order, failing fast on the first error

mod list;

pub use list::{Canvas, InstructionId};
