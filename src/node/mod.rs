//! Node - the virtual tree entity.
//!
//! A [`Node`] ties one [`TemplateNode`] and one [`LayoutNode`] to the native
//! views rendered for it, its children, an optional event handler, nested
//! template slots and animation state.
//!
//! # Ownership
//!
//! Nodes live behind [`NodeRef`] (`Rc<RefCell<Node>>`). A parent owns its
//! children; a child points back through a `Weak`. Dropping the root does not
//! tear anything down: [`Node::release`] must be called to free layout
//! resources, release native views and sever the back-references.
//!
//! ```text
//! root ──owns──▶ [child, child]
//!   ▲                 │
//!   └─────weak────────┘
//! ```

mod animation;
pub mod tree;

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use taffy::Layout;

use crate::context::TemplateContext;
use crate::layout::LayoutNode;
use crate::registry::{report_exception, ExtensionRegistry, NodeEvent};
use crate::template::{TemplateItem, TemplateNode};
use crate::types::{Display, EdgeInsets, NodeFlags, NodeType};
use crate::view::{release_view, NativeView};

pub use animation::AnimatorHandle;
pub use tree::{
    add_child, build_nested_tree, build_tree, compute_layout, find_node_by_id, is_attached,
};

/// Shared handle to a node.
pub type NodeRef = Rc<RefCell<Node>>;

pub struct Node {
    pub id: String,
    pub flags: NodeFlags,

    /// Primary native view.
    pub view: Option<Box<dyn NativeView>>,
    /// Sibling view drawing the box shadow.
    pub box_layout_view: Option<Box<dyn NativeView>>,
    /// Lottie overlay view.
    pub lottie_view: Option<Box<dyn NativeView>>,

    /// Layout computed before data was bound.
    pub layout_by_prepare: Option<Layout>,
    /// Layout computed after data was bound. Cleared on every reset.
    pub layout_by_bind: Option<Layout>,

    pub prop_animator: Option<AnimatorHandle>,
    pub is_animating: bool,

    template_node: TemplateNode,
    layout_node: Box<dyn LayoutNode>,

    parent: Weak<RefCell<Node>>,
    children: Option<Vec<NodeRef>>,

    event: Option<Rc<dyn NodeEvent>>,
    child_template_items: Option<Vec<(TemplateItem, TemplateNode)>>,
}

impl Node {
    pub fn new(
        id: impl Into<String>,
        template_node: TemplateNode,
        layout_node: Box<dyn LayoutNode>,
    ) -> Self {
        Self {
            id: id.into(),
            flags: NodeFlags::empty(),
            view: None,
            box_layout_view: None,
            lottie_view: None,
            layout_by_prepare: None,
            layout_by_bind: None,
            prop_animator: None,
            is_animating: false,
            template_node,
            layout_node,
            parent: Weak::new(),
            children: None,
            event: None,
            child_template_items: None,
        }
    }

    pub fn into_ref(self) -> NodeRef {
        Rc::new(RefCell::new(self))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn template_node(&self) -> &TemplateNode {
        &self.template_node
    }

    pub fn template_node_mut(&mut self) -> &mut TemplateNode {
        &mut self.template_node
    }

    pub fn layout_node(&self) -> &dyn LayoutNode {
        self.layout_node.as_ref()
    }

    pub fn layout_node_mut(&mut self) -> &mut dyn LayoutNode {
        self.layout_node.as_mut()
    }

    pub fn is_root(&self) -> bool {
        self.flags.contains(NodeFlags::ROOT)
    }

    pub fn is_nest_root(&self) -> bool {
        self.flags.contains(NodeFlags::NEST_ROOT)
    }

    pub fn set_nest_root(&mut self, nest_root: bool) {
        self.flags.set(NodeFlags::NEST_ROOT, nest_root);
    }

    pub fn parent(&self) -> Option<NodeRef> {
        self.parent.upgrade()
    }

    /// Children in render order. Empty until the first child is added.
    pub fn children(&self) -> &[NodeRef] {
        self.children.as_deref().unwrap_or_default()
    }

    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    pub fn event(&self) -> Option<&Rc<dyn NodeEvent>> {
        self.event.as_ref()
    }

    /// Resolved padding of the current style.
    pub fn padding_rect(&self) -> EdgeInsets {
        self.template_node.style().padding
    }

    // =========================================================================
    // Nested template items
    // =========================================================================

    /// Record a template the container binds at runtime. Items are kept in
    /// call order; duplicates are kept.
    pub fn add_child_template_items(&mut self, item: TemplateItem, template: TemplateNode) {
        self.child_template_items
            .get_or_insert_with(Vec::new)
            .push((item, template));
    }

    pub fn child_template_items(&self) -> &[(TemplateItem, TemplateNode)] {
        self.child_template_items.as_deref().unwrap_or_default()
    }

    // =========================================================================
    // Animation
    // =========================================================================

    /// Attach a running animation, cancelling any previous one.
    pub fn start_animation(&mut self, animator: AnimatorHandle) {
        if let Some(previous) = self.prop_animator.replace(animator) {
            previous.cancel();
        }
        self.is_animating = true;
    }

    /// Mark the running animation as finished. The handle is kept.
    pub fn finish_animation(&mut self) {
        self.is_animating = false;
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Tear down this subtree.
    ///
    /// Safe to call any number of times. The layout node stays assigned but
    /// its engine resources are gone; do not run layout on a released node.
    pub fn release(&mut self) {
        tracing::debug!(id = %self.id, "release node");

        // Cleared first: animation callbacks must not see a live view.
        self.is_animating = false;

        if let Some(view) = self.view.as_deref_mut() {
            release_view(view);
        }
        self.view = None;
        self.box_layout_view = None;
        self.lottie_view = None;
        if let Some(animator) = self.prop_animator.take() {
            animator.cancel();
        }

        self.layout_node.free();

        if let Some(children) = self.children.as_mut() {
            for child in children.iter() {
                child.borrow_mut().release();
            }
            children.clear();
        }

        self.parent = Weak::new();
    }

    /// Reset this node, then every descendant, in pre-order.
    pub fn reset_tree(&mut self, context: &TemplateContext) {
        self.reset(context);
        for child in self.children() {
            child.borrow_mut().reset_tree(context);
        }
    }

    /// Drop per-bind state and reseed the layout node from the current style.
    pub fn reset(&mut self, context: &TemplateContext) {
        tracing::trace!(id = %self.id, "reset node");

        self.layout_by_bind = None;
        self.template_node.reset();

        let is_root = self.is_root();
        if let Err(err) = self
            .layout_node
            .reset(context, &self.template_node, is_root)
        {
            report_exception(context.registry(), &err);
        }
    }

    /// Create the event handler from the registry's factory, once.
    pub fn init_event_by_registry(&mut self, registry: &ExtensionRegistry) {
        if self.event.is_none() {
            self.event = registry.node_event().map(|factory| factory.create());
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Visible unless this node or an ancestor has `display: none`.
    pub fn is_node_visible_in_tree(&self) -> bool {
        if self.layout_node.display() == Display::None {
            return false;
        }
        match self.parent() {
            Some(parent) => parent.borrow().is_node_visible_in_tree(),
            None => true,
        }
    }

    pub fn is_need_shadow(&self) -> bool {
        (self.is_view_type() || self.is_image_type())
            && self.template_node.style().box_shadow.is_some()
    }

    pub fn is_need_lottie(&self) -> bool {
        self.template_node
            .animation_binding()
            .is_some_and(|binding| binding.is_lottie())
    }

    // =========================================================================
    // Category dispatch
    // =========================================================================

    pub fn node_type(&self) -> NodeType {
        self.template_node.node_type()
    }

    pub fn custom_view_class(&self) -> Option<&str> {
        self.template_node.custom_view_class()
    }

    pub fn is_view_type(&self) -> bool {
        self.template_node.is_view_type()
    }

    pub fn is_text_type(&self) -> bool {
        self.template_node.is_text_type()
    }

    pub fn is_rich_text_type(&self) -> bool {
        self.template_node.is_rich_text_type()
    }

    pub fn is_template_type(&self) -> bool {
        self.template_node.is_template_type()
    }

    pub fn is_custom_view_type(&self) -> bool {
        self.template_node.is_custom_view_type()
    }

    pub fn is_icon_font_type(&self) -> bool {
        self.template_node.is_icon_font_type()
    }

    pub fn is_image_type(&self) -> bool {
        self.template_node.is_image_type()
    }

    pub fn is_container_type(&self) -> bool {
        self.template_node.is_container_type()
    }

    pub fn is_grid_type(&self) -> bool {
        self.template_node.is_grid_type()
    }

    pub fn is_scroll_type(&self) -> bool {
        self.template_node.is_scroll_type()
    }

    pub fn is_slider_type(&self) -> bool {
        self.template_node.is_slider_type()
    }

    pub fn is_progress_type(&self) -> bool {
        self.template_node.is_progress_type()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("type", &self.node_type())
            .field("flags", &self.flags)
            .field("children", &self.children())
            .finish_non_exhaustive()
    }
}
