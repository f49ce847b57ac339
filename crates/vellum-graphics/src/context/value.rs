use std::fmt;
use std::rc::Rc;

/// Identity of an externally owned texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureId(pub u64);

/// Externally owned texture.
///
/// Upload and GPU binding live outside this crate; `bind` is the hook a
/// backend uses to make the texture current on a unit.
pub trait Texture {
    fn id(&self) -> TextureId;

    fn bind(&self, unit: usize) {
        let _ = unit;
    }
}

/// Shared handle to a [`Texture`]. Equality is identity.
#[derive(Clone)]
pub struct TextureRef(Rc<dyn Texture>);

impl TextureRef {
    pub fn new<T: Texture + 'static>(texture: T) -> Self {
        Self(Rc::new(texture))
    }

    pub fn from_rc(texture: Rc<dyn Texture>) -> Self {
        Self(texture)
    }

    #[inline]
    pub fn id(&self) -> TextureId {
        self.0.id()
    }

    #[inline]
    pub fn bind(&self, unit: usize) {
        self.0.bind(unit)
    }
}

impl PartialEq for TextureRef {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

impl fmt::Debug for TextureRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextureRef").field(&self.id()).finish()
    }
}

/// Named scalar/vector slot of a context.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ContextKey {
    Color,
    LineWidth,
    /// Texture bound on the given unit.
    Texture(usize),
}

/// Value stored in a [`ContextKey`] slot.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextValue {
    /// Straight-alpha RGBA.
    Color([f32; 4]),
    LineWidth(f32),
    Texture(Option<TextureRef>),
}
