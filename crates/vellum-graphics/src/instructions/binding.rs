use crate::context::{Context, UpdateSignal};
use crate::error::{GraphicsError, Result};

/// Attach point between an instruction and the context it is replayed against.
///
/// Holds a clone of the context's update signal, never the context itself.
/// Detached instructions store parameter changes silently and refuse to apply.
#[derive(Debug, Clone, Default)]
pub struct Binding(Option<UpdateSignal>);

impl Binding {
    #[inline]
    pub(crate) fn attach(&mut self, signal: &UpdateSignal) {
        self.0 = Some(signal.clone());
    }

    #[inline]
    pub(crate) fn detach(&mut self) {
        self.0 = None;
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.0.is_some()
    }

    /// Posts an update to the attached context, if any.
    #[inline]
    pub(crate) fn notify(&self) {
        if let Some(signal) = &self.0 {
            signal.post();
        }
    }

    /// Fails unless attached to `ctx`.
    pub(crate) fn check(&self, ctx: &Context, instruction: &'static str) -> Result<()> {
        match &self.0 {
            Some(signal) if signal.same_as(ctx.update_signal()) => Ok(()),
            _ => Err(GraphicsError::UnboundContext { instruction }),
        }
    }
}
