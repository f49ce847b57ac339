use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

#[derive(Default)]
struct SignalState {
    dirty: Cell<bool>,
    posts: Cell<u64>,
}

/// "Redraw needed" hook shared between a context and its attached instructions.
///
/// Posting only raises a flag; it never triggers a render. Any number of posts
/// before the next replay collapse into one redraw, while `post_count` keeps
/// counting every individual post.
///
/// Single-threaded by construction (`Rc`), matching the replay model.
#[derive(Clone)]
pub struct UpdateSignal(Rc<SignalState>);

impl UpdateSignal {
    /// Creates a signal that starts dirty: nothing has been drawn yet.
    pub fn new() -> Self {
        let state = SignalState::default();
        state.dirty.set(true);
        Self(Rc::new(state))
    }

    #[inline]
    pub fn post(&self) {
        self.0.dirty.set(true);
        self.0.posts.set(self.0.posts.get().wrapping_add(1));
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.0.dirty.get()
    }

    /// Clears the dirty flag after a successful redraw.
    #[inline]
    pub fn clear(&self) {
        self.0.dirty.set(false);
    }

    /// Total posts since creation.
    #[inline]
    pub fn post_count(&self) -> u64 {
        self.0.posts.get()
    }

    /// True when both handles refer to the same context's signal.
    #[inline]
    pub fn same_as(&self, other: &UpdateSignal) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for UpdateSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UpdateSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateSignal")
            .field("dirty", &self.is_dirty())
            .field("posts", &self.post_count())
            .finish()
    }
}
