//! Template descriptions.
//!
//! A [`TemplateLayer`] is the static, parsed definition of one render unit and
//! is shared between every node instantiated from it. A [`TemplateNode`] wraps
//! a layer together with the state a data bind derives from it, so a rebind
//! can throw the derived state away without touching the definition.

use std::rc::Rc;

use crate::types::{AnimationBinding, NodeStyle, NodeType};

// =============================================================================
// Template Layer - static definition
// =============================================================================

/// Parsed definition of one render unit.
#[derive(Debug, Clone, Default)]
pub struct TemplateLayer {
    pub id: String,
    pub node_type: NodeType,
    pub style: NodeStyle,
    pub animation: Option<AnimationBinding>,
    /// Platform class name for `custom` nodes.
    pub custom_view_class: Option<String>,
    pub children: Vec<Rc<TemplateLayer>>,
}

impl TemplateLayer {
    pub fn new(id: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            node_type,
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style: NodeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_animation(mut self, animation: AnimationBinding) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn with_custom_view_class(mut self, class: impl Into<String>) -> Self {
        self.custom_view_class = Some(class.into());
        self
    }

    pub fn with_child(mut self, child: TemplateLayer) -> Self {
        self.children.push(Rc::new(child));
        self
    }

    pub fn into_rc(self) -> Rc<TemplateLayer> {
        Rc::new(self)
    }
}

// =============================================================================
// Template Item - nested template slot
// =============================================================================

/// Identifies a template that a container binds at runtime (e.g. a cell).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TemplateItem {
    pub biz_id: String,
    pub template_id: String,
}

impl TemplateItem {
    pub fn new(biz_id: impl Into<String>, template_id: impl Into<String>) -> Self {
        Self {
            biz_id: biz_id.into(),
            template_id: template_id.into(),
        }
    }
}

// =============================================================================
// Template Node - layer plus per-bind state
// =============================================================================

/// The template description owned by one [`Node`](crate::node::Node).
#[derive(Debug, Clone)]
pub struct TemplateNode {
    layer: Rc<TemplateLayer>,
    /// Style produced by the last data bind, if it changed anything.
    bound_style: Option<NodeStyle>,
}

impl TemplateNode {
    pub fn new(layer: Rc<TemplateLayer>) -> Self {
        Self {
            layer,
            bound_style: None,
        }
    }

    pub fn layer(&self) -> &Rc<TemplateLayer> {
        &self.layer
    }

    pub fn id(&self) -> &str {
        &self.layer.id
    }

    pub fn node_type(&self) -> NodeType {
        self.layer.node_type
    }

    pub fn custom_view_class(&self) -> Option<&str> {
        self.layer.custom_view_class.as_deref()
    }

    pub fn animation_binding(&self) -> Option<&AnimationBinding> {
        self.layer.animation.as_ref()
    }

    /// Current style: the bound style if a bind produced one, else the
    /// layer's declared style.
    pub fn style(&self) -> &NodeStyle {
        self.bound_style.as_ref().unwrap_or(&self.layer.style)
    }

    /// Store the style a data bind resolved for this node.
    pub fn bind_style(&mut self, style: NodeStyle) {
        self.bound_style = Some(style);
    }

    pub fn is_bound(&self) -> bool {
        self.bound_style.is_some()
    }

    /// Drop per-bind derived state. The layer is untouched.
    pub fn reset(&mut self) {
        self.bound_style = None;
    }

    pub fn is_view_type(&self) -> bool {
        self.node_type() == NodeType::View
    }

    pub fn is_text_type(&self) -> bool {
        self.node_type() == NodeType::Text
    }

    pub fn is_rich_text_type(&self) -> bool {
        self.node_type() == NodeType::RichText
    }

    pub fn is_template_type(&self) -> bool {
        self.node_type() == NodeType::Template
    }

    pub fn is_custom_view_type(&self) -> bool {
        self.node_type() == NodeType::CustomView
    }

    pub fn is_icon_font_type(&self) -> bool {
        self.node_type() == NodeType::IconFont
    }

    pub fn is_image_type(&self) -> bool {
        self.node_type() == NodeType::Image
    }

    pub fn is_container_type(&self) -> bool {
        self.node_type() == NodeType::Container
    }

    pub fn is_grid_type(&self) -> bool {
        self.node_type() == NodeType::Grid
    }

    pub fn is_scroll_type(&self) -> bool {
        self.node_type() == NodeType::Scroll
    }

    pub fn is_slider_type(&self) -> bool {
        self.node_type() == NodeType::Slider
    }

    pub fn is_progress_type(&self) -> bool {
        self.node_type() == NodeType::Progress
    }
}
