//! Native view handles.
//!
//! The tree never builds or draws views; it only holds them and tears them
//! down. A view that owns native resources exposes the [`Releasable`]
//! capability, which [`Node::release`](crate::node::Node::release) invokes.

use std::fmt;

/// Teardown capability of a native view.
pub trait Releasable {
    fn release(&mut self);
}

/// A platform view attached to a node.
pub trait NativeView {
    /// Returns the teardown capability, if this view has one.
    fn as_releasable(&mut self) -> Option<&mut dyn Releasable> {
        None
    }
}

/// Release `view` if it exposes the teardown capability.
pub fn release_view(view: &mut dyn NativeView) {
    if let Some(releasable) = view.as_releasable() {
        releasable.release();
    }
}

// =============================================================================
// Item Container
// =============================================================================

/// Rendering surface for container-category nodes.
///
/// Hosts the views of the items a container binds at runtime.
#[derive(Default)]
pub struct ItemContainer {
    items: Vec<Box<dyn NativeView>>,
}

impl ItemContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, view: Box<dyn NativeView>) {
        self.items.push(view);
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

impl fmt::Debug for ItemContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemContainer")
            .field("items", &self.items.len())
            .finish()
    }
}

impl NativeView for ItemContainer {
    fn as_releasable(&mut self) -> Option<&mut dyn Releasable> {
        Some(self)
    }
}

impl Releasable for ItemContainer {
    fn release(&mut self) {
        for item in &mut self.items {
            release_view(item.as_mut());
        }
        self.items.clear();
    }
}
