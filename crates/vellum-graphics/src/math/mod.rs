//! Matrix math used by the transform instructions.
//!
//! The instruction layer only depends on the pure functions exported here,
//! so the backing library (`glam`) can be swapped without touching callers.
//!
//! Conventions:
//! - column-major 4x4 matrices, `f32`
//! - angles are in degrees
//! - `multiply(a, b)` is `a * b`: `b` is applied to points first

mod matrix;
mod uniform;

pub use matrix::{identity, multiply, rotation, scale, translation, Matrix4};
pub use uniform::MatrixUniform;
