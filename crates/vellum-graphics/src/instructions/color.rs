use crate::context::Context;
use crate::error::{GraphicsError, Result};

use super::Binding;

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Recognized fields for building a [`Color`].
///
/// Precedence: `rgba`, then `rgb`, then `hsv`, else opaque white.
/// `a` overrides the alpha of whichever source won.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorConfig {
    pub rgba: Option<Vec<f32>>,
    pub rgb: Option<[f32; 3]>,
    pub hsv: Option<[f32; 3]>,
    pub a: Option<f32>,
}

/// Sets the context color for every instruction replayed after it.
///
/// Stored as straight-alpha RGBA. All channel accessors are views over the
/// same vector; each setter rewrites the whole vector and notifies once.
#[derive(Debug, Clone)]
pub struct Color {
    rgba: [f32; 4],
    binding: Binding,
}

impl Color {
    pub const NAME: &'static str = "Color";

    /// Opaque white.
    pub fn new() -> Self {
        Self::from_rgba(1.0, 1.0, 1.0, 1.0)
    }

    pub fn from_rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { rgba: [r, g, b, a], binding: Binding::default() }
    }

    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self::from_rgba(r, g, b, 1.0)
    }

    /// Hue, saturation and value in `[0, 1]`. Alpha is 1.
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        let [r, g, b] = hsv_to_rgb([h, s, v]);
        Self::from_rgb(r, g, b)
    }

    /// Positional channels: empty means white, 3 channels get alpha 1.
    pub fn from_slice(values: &[f32]) -> Result<Self> {
        let [r, g, b, a] = normalize_rgba(values)?;
        Ok(Self::from_rgba(r, g, b, a))
    }

    pub fn with_config(config: ColorConfig) -> Result<Self> {
        let mut rgba = match (&config.rgba, config.rgb, config.hsv) {
            (Some(rgba), _, _) => normalize_rgba(rgba)?,
            (None, Some([r, g, b]), _) => [r, g, b, 1.0],
            (None, None, Some(hsv)) => {
                let [r, g, b] = hsv_to_rgb(hsv);
                [r, g, b, 1.0]
            }
            (None, None, None) => WHITE,
        };
        if let Some(a) = config.a {
            rgba[3] = a;
        }
        Ok(Self { rgba, binding: Binding::default() })
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn rgba(&self) -> [f32; 4] {
        self.rgba
    }

    #[inline]
    pub fn rgb(&self) -> [f32; 3] {
        [self.rgba[0], self.rgba[1], self.rgba[2]]
    }

    #[inline]
    pub fn r(&self) -> f32 {
        self.rgba[0]
    }

    #[inline]
    pub fn g(&self) -> f32 {
        self.rgba[1]
    }

    #[inline]
    pub fn b(&self) -> f32 {
        self.rgba[2]
    }

    #[inline]
    pub fn a(&self) -> f32 {
        self.rgba[3]
    }

    pub fn hsv(&self) -> [f32; 3] {
        rgb_to_hsv(self.rgb())
    }

    // ── setters ───────────────────────────────────────────────────────────

    /// Accepts 0, 3 or 4 channels. Empty resets to opaque white.
    pub fn set_rgba(&mut self, values: &[f32]) -> Result<()> {
        let rgba = normalize_rgba(values)?;
        self.store(rgba);
        Ok(())
    }

    /// Sets the color channels and resets alpha to 1.
    pub fn set_rgb(&mut self, rgb: [f32; 3]) {
        self.store([rgb[0], rgb[1], rgb[2], 1.0]);
    }

    /// Sets the color from HSV and resets alpha to 1.
    pub fn set_hsv(&mut self, hsv: [f32; 3]) {
        self.set_rgb(hsv_to_rgb(hsv));
    }

    pub fn set_r(&mut self, r: f32) {
        self.set_channel(0, r);
    }

    pub fn set_g(&mut self, g: f32) {
        self.set_channel(1, g);
    }

    pub fn set_b(&mut self, b: f32) {
        self.set_channel(2, b);
    }

    pub fn set_a(&mut self, a: f32) {
        self.set_channel(3, a);
    }

    pub fn apply(&self, ctx: &mut Context) -> Result<()> {
        self.binding.check(ctx, Self::NAME)?;
        ctx.set_color(self.rgba);
        Ok(())
    }

    fn set_channel(&mut self, index: usize, value: f32) {
        let mut rgba = self.rgba;
        rgba[index] = value;
        self.store(rgba);
    }

    fn store(&mut self, rgba: [f32; 4]) {
        self.rgba = rgba;
        self.binding.notify();
    }

    pub(crate) fn binding(&self) -> &Binding {
        &self.binding
    }

    pub(crate) fn binding_mut(&mut self) -> &mut Binding {
        &mut self.binding
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_rgba(values: &[f32]) -> Result<[f32; 4]> {
    match *values {
        [] => Ok(WHITE),
        [r, g, b] => Ok([r, g, b, 1.0]),
        [r, g, b, a] => Ok([r, g, b, a]),
        _ => Err(GraphicsError::InvalidColorArity { got: values.len() }),
    }
}

fn rgb_to_hsv([r, g, b]: [f32; 3]) -> [f32; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let v = max;
    if max == min {
        return [0.0, 0.0, v];
    }
    let delta = max - min;
    let s = delta / max;
    let rc = (max - r) / delta;
    let gc = (max - g) / delta;
    let bc = (max - b) / delta;
    let h = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    [(h / 6.0).rem_euclid(1.0), s, v]
}

fn hsv_to_rgb([h, s, v]: [f32; 3]) -> [f32; 3] {
    if s == 0.0 {
        return [v, v, v];
    }
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (sector as i32).rem_euclid(6) {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}
