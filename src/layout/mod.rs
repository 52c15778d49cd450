//! Layout Module - the bridge between nodes and the flexbox engine.
//!
//! # Architecture
//!
//! Every [`Node`](crate::node::Node) owns one [`LayoutNode`]. The trait is the
//! whole contract the tree relies on:
//!
//! 1. `reset` reseeds engine state from the template's current style
//! 2. `free` releases engine resources when the node is torn down
//! 3. `display` reports the display value last applied
//!
//! [`TaffyLayoutNode`] implements it on top of
//! [Taffy](https://github.com/DioxusLabs/taffy). All layout nodes of a tree
//! share one [`LayoutEngine`] carried by the
//! [`TemplateContext`](crate::context::TemplateContext).

mod taffy_bridge;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use taffy::{AvailableSpace, Layout, NodeId, Size, TaffyTree};

use crate::context::TemplateContext;
use crate::error::Result;
use crate::template::TemplateNode;
use crate::types::Display;

pub use taffy_bridge::{to_taffy_style, TaffyLayoutNode};

// =============================================================================
// Layout Phase
// =============================================================================

/// Which cached snapshot a layout pass writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutPhase {
    /// Before data is bound; stored in `layout_by_prepare`.
    Prepare,
    /// After data is bound; stored in `layout_by_bind`.
    Bind,
}

// =============================================================================
// Layout Node contract
// =============================================================================

/// Flexbox computation unit for one tree node.
pub trait LayoutNode {
    /// Rebuild engine state from the template's current style and `context`.
    fn reset(
        &mut self,
        context: &TemplateContext,
        template: &TemplateNode,
        is_root: bool,
    ) -> Result<()>;

    /// Release engine resources. Calling it again is a no-op.
    fn free(&mut self);

    /// Display value applied by the last reseed.
    fn display(&self) -> Display;

    /// Engine handle, if this node lives in a Taffy tree and is not freed.
    fn node_id(&self) -> Option<NodeId> {
        None
    }

    /// Attach `child` under this node in the engine.
    fn add_child(&mut self, _child: &dyn LayoutNode) -> Result<()> {
        Ok(())
    }

    /// Run the flexbox algorithm with this node as root.
    fn compute(&mut self, _available: Size<AvailableSpace>) -> Result<()> {
        Ok(())
    }

    /// Result of the last computation.
    fn layout(&self) -> Option<Layout> {
        None
    }
}

// =============================================================================
// Layout Engine
// =============================================================================

/// Shared handle to the Taffy tree backing a node tree.
#[derive(Clone)]
pub struct LayoutEngine(Rc<RefCell<TaffyTree>>);

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(TaffyTree::new())))
    }

    /// Number of live engine nodes.
    pub fn node_count(&self) -> usize {
        self.0.borrow().total_node_count()
    }

    pub(crate) fn tree(&self) -> &RefCell<TaffyTree> {
        &self.0
    }
}

impl fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutEngine")
            .field("nodes", &self.node_count())
            .finish()
    }
}
