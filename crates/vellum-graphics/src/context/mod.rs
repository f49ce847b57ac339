//! Shared drawing state mutated by instructions during replay.
//!
//! Responsibilities:
//! - hold the active color, line width, bound textures and matrix stacks
//! - expose keyed `get`/`set` plus typed accessors
//! - carry the update signal instructions use to request a redraw
//!
//! A context is owned by one canvas. Instructions receive it explicitly in
//! `apply`; nothing keeps a long-lived reference to it.

mod config;
mod signal;
mod stack;
mod state;
mod value;

pub use config::ContextConfig;
pub use signal::UpdateSignal;
pub use stack::{MatrixStack, MatrixStackKind};
pub use state::{Context, MAX_TEXTURE_UNITS};
pub use value::{ContextKey, ContextValue, Texture, TextureId, TextureRef};
