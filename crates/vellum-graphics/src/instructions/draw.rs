use std::fmt;
use std::rc::Rc;

use crate::context::Context;
use crate::error::Result;

use super::Binding;

/// Externally owned object that participates in replay.
///
/// Implementors that need to mutate themselves use interior mutability.
pub trait Drawable {
    fn draw(&self);
}

/// Pass-through hook: calls `drawable.draw()` in sequence order.
///
/// Never touches the context.
#[derive(Clone)]
pub struct CanvasDraw {
    drawable: Rc<dyn Drawable>,
    binding: Binding,
}

impl CanvasDraw {
    pub const NAME: &'static str = "CanvasDraw";

    pub fn new(drawable: Rc<dyn Drawable>) -> Self {
        Self { drawable, binding: Binding::default() }
    }

    #[inline]
    pub fn drawable(&self) -> &Rc<dyn Drawable> {
        &self.drawable
    }

    pub fn set_drawable(&mut self, drawable: Rc<dyn Drawable>) {
        self.drawable = drawable;
        self.binding.notify();
    }

    pub fn apply(&self, ctx: &mut Context) -> Result<()> {
        self.binding.check(ctx, Self::NAME)?;
        self.drawable.draw();
        Ok(())
    }

    pub(crate) fn binding(&self) -> &Binding {
        &self.binding
    }

    pub(crate) fn binding_mut(&mut self) -> &mut Binding {
        &mut self.binding
    }
}

impl fmt::Debug for CanvasDraw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanvasDraw")
            .field("drawable", &Rc::as_ptr(&self.drawable))
            .field("binding", &self.binding)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[derive(Default)]
    struct Counter(Cell<usize>);

    impl Drawable for Counter {
        fn draw(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn apply_calls_draw_without_touching_context() {
        let counter = Rc::new(Counter::default());
        let mut ctx = Context::new();
        let mut draw = CanvasDraw::new(counter.clone());
        draw.binding_mut().attach(ctx.update_signal());

        draw.apply(&mut ctx).unwrap();
        draw.apply(&mut ctx).unwrap();

        assert_eq!(counter.0.get(), 2);
        assert_eq!(ctx.color(), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(ctx.update_count(), 0);
    }

    #[test]
    fn detached_draw_does_not_call_drawable() {
        let counter = Rc::new(Counter::default());
        let mut ctx = Context::new();
        assert!(CanvasDraw::new(counter.clone()).apply(&mut ctx).is_err());
        assert_eq!(counter.0.get(), 0);
    }
}
