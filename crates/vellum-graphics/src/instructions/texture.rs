use crate::context::{Context, TextureRef, MAX_TEXTURE_UNITS};
use crate::error::{GraphicsError, Result};

use super::Binding;

/// Binds an externally owned texture to a texture unit.
///
/// `apply` first lets the texture bind itself, then records it in the
/// context so later instructions see it as current. `None` unbinds the unit.
#[derive(Debug, Clone, Default)]
pub struct BindTexture {
    texture: Option<TextureRef>,
    index: usize,
    binding: Binding,
}

impl BindTexture {
    pub const NAME: &'static str = "BindTexture";

    /// Binds on unit 0.
    pub fn new(texture: Option<TextureRef>) -> Self {
        Self { texture, index: 0, binding: Binding::default() }
    }

    pub fn with_index(texture: Option<TextureRef>, index: usize) -> Result<Self> {
        Ok(Self { texture, index: validate_index(index)?, binding: Binding::default() })
    }

    #[inline]
    pub fn texture(&self) -> Option<&TextureRef> {
        self.texture.as_ref()
    }

    pub fn set_texture(&mut self, texture: Option<TextureRef>) {
        self.texture = texture;
        self.binding.notify();
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn set_index(&mut self, index: usize) -> Result<()> {
        self.index = validate_index(index)?;
        self.binding.notify();
        Ok(())
    }

    pub fn apply(&self, ctx: &mut Context) -> Result<()> {
        self.binding.check(ctx, Self::NAME)?;
        if let Some(texture) = &self.texture {
            texture.bind(self.index);
        }
        ctx.bind_texture(self.index, self.texture.clone())
    }

    pub(crate) fn binding(&self) -> &Binding {
        &self.binding
    }

    pub(crate) fn binding_mut(&mut self) -> &mut Binding {
        &mut self.binding
    }
}

fn validate_index(index: usize) -> Result<usize> {
    if index < MAX_TEXTURE_UNITS {
        Ok(index)
    } else {
        Err(GraphicsError::TextureUnitOutOfRange { index })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::context::{Texture, TextureId};

    struct CountingTexture {
        id: u64,
        binds: Rc<Cell<usize>>,
        last_unit: Rc<Cell<usize>>,
    }

    impl Texture for CountingTexture {
        fn id(&self) -> TextureId {
            TextureId(self.id)
        }

        fn bind(&self, unit: usize) {
            self.binds.set(self.binds.get() + 1);
            self.last_unit.set(unit);
        }
    }

    #[test]
    fn apply_binds_texture_and_records_it() {
        let binds = Rc::new(Cell::new(0));
        let last_unit = Rc::new(Cell::new(usize::MAX));
        let tex = TextureRef::new(CountingTexture {
            id: 3,
            binds: binds.clone(),
            last_unit: last_unit.clone(),
        });

        let mut ctx = Context::new();
        let mut bind = BindTexture::with_index(Some(tex.clone()), 2).unwrap();
        bind.binding_mut().attach(ctx.update_signal());
        bind.apply(&mut ctx).unwrap();

        assert_eq!(binds.get(), 1);
        assert_eq!(last_unit.get(), 2);
        assert_eq!(ctx.texture(2).unwrap(), Some(&tex));
        assert!(ctx.bound_texture().is_none());
    }

    #[test]
    fn none_unbinds_unit() {
        let mut ctx = Context::new();
        let mut bind = BindTexture::new(None);
        bind.binding_mut().attach(ctx.update_signal());
        bind.apply(&mut ctx).unwrap();
        assert!(ctx.bound_texture().is_none());
    }

    #[test]
    fn index_out_of_range_is_rejected() {
        assert!(BindTexture::with_index(None, MAX_TEXTURE_UNITS).is_err());
        let mut bind = BindTexture::new(None);
        assert!(bind.set_index(MAX_TEXTURE_UNITS + 1).is_err());
        assert_eq!(bind.index(), 0);
    }
}
