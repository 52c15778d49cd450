//! Animator handles held by nodes.
//!
//! A handle wraps the stop closure returned by whatever started the
//! animation. The node clears its `is_animating` flag before it cancels the
//! handle, so callbacks that fire during cancellation see a dead node.

use std::fmt;

pub struct AnimatorHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl AnimatorHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stop the animation. Consumes the handle.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for AnimatorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimatorHandle")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
