use std::collections::HashMap;

use crate::error::{GraphicsError, Result};
use crate::math::{Matrix4, MatrixUniform};

use super::{
    ContextConfig, ContextKey, ContextValue, MatrixStack, MatrixStackKind, TextureRef,
    UpdateSignal,
};

/// Number of texture units a context tracks.
pub const MAX_TEXTURE_UNITS: usize = 8;

/// Mutable drawing state shared by every instruction of one canvas.
///
/// Mutations are visible to all instructions applied later in the same
/// replay. Setters here never post an update: replay writes through them,
/// and a replay must not mark its own canvas dirty.
#[derive(Debug)]
pub struct Context {
    config: ContextConfig,

    color: [f32; 4],
    line_width: f32,
    textures: [Option<TextureRef>; MAX_TEXTURE_UNITS],

    modelview: MatrixStack,
    projection: MatrixStack,

    /// Per-key LIFO of values saved by `push_state`.
    saved: HashMap<ContextKey, Vec<ContextValue>>,

    signal: UpdateSignal,
}

impl Context {
    pub fn new() -> Self {
        Self::with_config(ContextConfig::default())
    }

    pub fn with_config(config: ContextConfig) -> Self {
        Self {
            color: config.color,
            line_width: config.line_width,
            textures: std::array::from_fn(|_| None),
            modelview: MatrixStack::new(MatrixStackKind::ModelView, Matrix4::IDENTITY),
            projection: MatrixStack::new(MatrixStackKind::Projection, config.projection),
            saved: HashMap::new(),
            signal: UpdateSignal::new(),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// Replaces the initial state and resets to it.
    pub fn set_config(&mut self, config: ContextConfig) {
        self.projection.set_base(config.projection);
        self.config = config;
        self.reset();
        self.post_update();
    }

    /// Restores the configured initial state. Does not post an update.
    pub fn reset(&mut self) {
        self.color = self.config.color;
        self.line_width = self.config.line_width;
        self.textures = std::array::from_fn(|_| None);
        self.modelview.reset();
        self.projection.reset();
        self.saved.clear();
    }

    // ── keyed access ──────────────────────────────────────────────────────

    pub fn get(&self, key: ContextKey) -> Result<ContextValue> {
        Ok(match key {
            ContextKey::Color => ContextValue::Color(self.color),
            ContextKey::LineWidth => ContextValue::LineWidth(self.line_width),
            ContextKey::Texture(unit) => ContextValue::Texture(self.texture(unit)?.cloned()),
        })
    }

    pub fn set(&mut self, key: ContextKey, value: ContextValue) -> Result<()> {
        match (key, value) {
            (ContextKey::Color, ContextValue::Color(rgba)) => self.set_color(rgba),
            (ContextKey::LineWidth, ContextValue::LineWidth(w)) => self.set_line_width(w),
            (ContextKey::Texture(unit), ContextValue::Texture(t)) => self.bind_texture(unit, t)?,
            (key, _) => return Err(GraphicsError::ValueKindMismatch { key }),
        }
        Ok(())
    }

    // ── typed access ──────────────────────────────────────────────────────

    #[inline]
    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    #[inline]
    pub fn set_color(&mut self, rgba: [f32; 4]) {
        self.color = rgba;
    }

    #[inline]
    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    #[inline]
    pub fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    /// Texture on unit 0.
    #[inline]
    pub fn bound_texture(&self) -> Option<&TextureRef> {
        self.textures[0].as_ref()
    }

    pub fn texture(&self, unit: usize) -> Result<Option<&TextureRef>> {
        self.textures
            .get(unit)
            .map(Option::as_ref)
            .ok_or(GraphicsError::TextureUnitOutOfRange { index: unit })
    }

    pub fn bind_texture(&mut self, unit: usize, texture: Option<TextureRef>) -> Result<()> {
        let slot = self
            .textures
            .get_mut(unit)
            .ok_or(GraphicsError::TextureUnitOutOfRange { index: unit })?;
        *slot = texture;
        Ok(())
    }

    // ── matrix stacks ─────────────────────────────────────────────────────

    #[inline]
    pub fn matrix_stack(&self, kind: MatrixStackKind) -> &MatrixStack {
        match kind {
            MatrixStackKind::ModelView => &self.modelview,
            MatrixStackKind::Projection => &self.projection,
        }
    }

    #[inline]
    pub fn matrix_stack_mut(&mut self, kind: MatrixStackKind) -> &mut MatrixStack {
        match kind {
            MatrixStackKind::ModelView => &mut self.modelview,
            MatrixStackKind::Projection => &mut self.projection,
        }
    }

    /// Top of the model-view stack.
    #[inline]
    pub fn model_view_matrix(&self) -> Matrix4 {
        self.modelview.top()
    }

    #[inline]
    pub fn projection_matrix(&self) -> Matrix4 {
        self.projection.top()
    }

    #[inline]
    pub fn model_view_uniform(&self) -> MatrixUniform {
        self.model_view_matrix().into()
    }

    #[inline]
    pub fn projection_uniform(&self) -> MatrixUniform {
        self.projection_matrix().into()
    }

    // ── state save / restore ──────────────────────────────────────────────

    /// Saves the current value of each key.
    pub fn push_state(&mut self, keys: &[ContextKey]) -> Result<()> {
        let values = keys
            .iter()
            .map(|&k| self.get(k).map(|v| (k, v)))
            .collect::<Result<Vec<_>>>()?;
        for (key, value) in values {
            self.saved.entry(key).or_default().push(value);
        }
        Ok(())
    }

    /// Restores the most recently saved value of each key.
    ///
    /// A key listed twice pops twice. Fails without restoring anything if any
    /// key has fewer saved values than it is listed. Restored textures are
    /// re-bound on their unit.
    pub fn pop_state(&mut self, keys: &[ContextKey]) -> Result<()> {
        let mut wanted: HashMap<ContextKey, usize> = HashMap::new();
        for &key in keys {
            let n = wanted.entry(key).or_default();
            *n += 1;
            if self.saved.get(&key).map_or(0, Vec::len) < *n {
                return Err(GraphicsError::ImbalancedStateStack { key });
            }
        }
        for &key in keys {
            if let Some(value) = self.saved.get_mut(&key).and_then(Vec::pop) {
                self.restore(key, value)?;
            }
        }
        Ok(())
    }

    fn restore(&mut self, key: ContextKey, value: ContextValue) -> Result<()> {
        if let (ContextKey::Texture(unit), ContextValue::Texture(Some(texture))) = (key, &value) {
            texture.bind(unit);
        }
        self.set(key, value)
    }

    // ── update signal ─────────────────────────────────────────────────────

    /// Flags the owning canvas for a future redraw.
    #[inline]
    pub fn post_update(&self) {
        self.signal.post();
    }

    #[inline]
    pub fn needs_redraw(&self) -> bool {
        self.signal.is_dirty()
    }

    /// Total `post_update` calls so far, including those from attached instructions.
    #[inline]
    pub fn update_count(&self) -> u64 {
        self.signal.post_count()
    }

    #[inline]
    pub fn update_signal(&self) -> &UpdateSignal {
        &self.signal
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
