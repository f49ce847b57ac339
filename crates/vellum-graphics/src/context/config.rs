use crate::math::Matrix4;

/// Initial state of a context.
///
/// Applied at creation and on every [`Context::reset`](super::Context::reset),
/// so each replay starts from the same place.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextConfig {
    /// Straight-alpha RGBA.
    pub color: [f32; 4],
    pub line_width: f32,
    /// Bottom of the projection stack. The model-view stack always starts at identity.
    pub projection: Matrix4,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0, 1.0],
            line_width: 1.0,
            projection: Matrix4::IDENTITY,
        }
    }
}
