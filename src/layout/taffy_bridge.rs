//! Taffy Bridge - Integration with Taffy layout engine
//!
//! Converts template styles to Taffy styles and wraps one Taffy node per tree
//! node behind the [`LayoutNode`] contract.

use taffy::{
    AlignItems as TaffyAlignItems, AlignSelf as TaffyAlignSelf, AvailableSpace,
    Dimension as TaffyDimension, Display as TaffyDisplay, FlexDirection as TaffyFlexDirection,
    FlexWrap as TaffyFlexWrap, JustifyContent as TaffyJustifyContent, Layout, LengthPercentage,
    LengthPercentageAuto, NodeId, Overflow as TaffyOverflow, Position as TaffyPosition, Rect, Size,
    Style,
};

use crate::context::TemplateContext;
use crate::error::{Error, Result};
use crate::template::TemplateNode;
use crate::types::{
    AlignItems, AlignSelf, Dimension, Display, EdgeInsets, FlexDirection, FlexWrap,
    JustifyContent, NodeStyle, Overflow, Position,
};

use super::{LayoutEngine, LayoutNode};

// =============================================================================
// DIMENSION CONVERSION
// =============================================================================

/// Convert our Dimension to Taffy's Dimension.
fn to_taffy_dimension(dim: Dimension) -> TaffyDimension {
    match dim {
        Dimension::Auto => TaffyDimension::Auto,
        Dimension::Points(n) => TaffyDimension::Length(n),
        Dimension::Percent(p) => TaffyDimension::Percent(p / 100.0),
    }
}

fn to_taffy_margin(edges: EdgeInsets) -> Rect<LengthPercentageAuto> {
    Rect {
        top: LengthPercentageAuto::Length(edges.top),
        right: LengthPercentageAuto::Length(edges.right),
        bottom: LengthPercentageAuto::Length(edges.bottom),
        left: LengthPercentageAuto::Length(edges.left),
    }
}

fn to_taffy_padding(edges: EdgeInsets) -> Rect<LengthPercentage> {
    Rect {
        top: LengthPercentage::Length(edges.top),
        right: LengthPercentage::Length(edges.right),
        bottom: LengthPercentage::Length(edges.bottom),
        left: LengthPercentage::Length(edges.left),
    }
}

// =============================================================================
// ENUM CONVERSIONS
// =============================================================================

fn to_taffy_display(display: Display) -> TaffyDisplay {
    match display {
        Display::Flex => TaffyDisplay::Flex,
        Display::None => TaffyDisplay::None,
    }
}

fn to_taffy_position(position: Position) -> TaffyPosition {
    match position {
        Position::Relative => TaffyPosition::Relative,
        Position::Absolute => TaffyPosition::Absolute,
    }
}

fn to_taffy_flex_direction(dir: FlexDirection) -> TaffyFlexDirection {
    match dir {
        FlexDirection::Row => TaffyFlexDirection::Row,
        FlexDirection::Column => TaffyFlexDirection::Column,
        FlexDirection::RowReverse => TaffyFlexDirection::RowReverse,
        FlexDirection::ColumnReverse => TaffyFlexDirection::ColumnReverse,
    }
}

fn to_taffy_flex_wrap(wrap: FlexWrap) -> TaffyFlexWrap {
    match wrap {
        FlexWrap::NoWrap => TaffyFlexWrap::NoWrap,
        FlexWrap::Wrap => TaffyFlexWrap::Wrap,
        FlexWrap::WrapReverse => TaffyFlexWrap::WrapReverse,
    }
}

fn to_taffy_justify_content(justify: JustifyContent) -> Option<TaffyJustifyContent> {
    Some(match justify {
        JustifyContent::FlexStart => TaffyJustifyContent::FlexStart,
        JustifyContent::Center => TaffyJustifyContent::Center,
        JustifyContent::FlexEnd => TaffyJustifyContent::FlexEnd,
        JustifyContent::SpaceBetween => TaffyJustifyContent::SpaceBetween,
        JustifyContent::SpaceAround => TaffyJustifyContent::SpaceAround,
        JustifyContent::SpaceEvenly => TaffyJustifyContent::SpaceEvenly,
    })
}

fn to_taffy_align_items(align: AlignItems) -> Option<TaffyAlignItems> {
    Some(match align {
        AlignItems::Stretch => TaffyAlignItems::Stretch,
        AlignItems::FlexStart => TaffyAlignItems::FlexStart,
        AlignItems::Center => TaffyAlignItems::Center,
        AlignItems::FlexEnd => TaffyAlignItems::FlexEnd,
        AlignItems::Baseline => TaffyAlignItems::Baseline,
    })
}

fn to_taffy_align_self(align: AlignSelf) -> Option<TaffyAlignSelf> {
    match align {
        AlignSelf::Auto => None, // inherit from parent
        AlignSelf::Stretch => Some(TaffyAlignSelf::Stretch),
        AlignSelf::FlexStart => Some(TaffyAlignSelf::FlexStart),
        AlignSelf::Center => Some(TaffyAlignSelf::Center),
        AlignSelf::FlexEnd => Some(TaffyAlignSelf::FlexEnd),
        AlignSelf::Baseline => Some(TaffyAlignSelf::Baseline),
    }
}

fn to_taffy_overflow(overflow: Overflow) -> TaffyOverflow {
    match overflow {
        Overflow::Visible => TaffyOverflow::Visible,
        Overflow::Hidden => TaffyOverflow::Hidden,
        Overflow::Scroll => TaffyOverflow::Scroll,
    }
}

// =============================================================================
// STYLE BUILDING
// =============================================================================

/// Build a Taffy Style from a template style.
pub fn to_taffy_style(style: &NodeStyle) -> Style {
    let overflow = to_taffy_overflow(style.overflow);

    Style {
        display: to_taffy_display(style.display),
        position: to_taffy_position(style.position),

        flex_direction: to_taffy_flex_direction(style.flex_direction),
        flex_wrap: to_taffy_flex_wrap(style.flex_wrap),
        justify_content: to_taffy_justify_content(style.justify_content),
        align_items: to_taffy_align_items(style.align_items),
        align_self: to_taffy_align_self(style.align_self),

        flex_grow: style.flex_grow,
        flex_shrink: style.flex_shrink,
        flex_basis: to_taffy_dimension(style.flex_basis),

        size: Size {
            width: to_taffy_dimension(style.width),
            height: to_taffy_dimension(style.height),
        },
        min_size: Size {
            width: to_taffy_dimension(style.min_width),
            height: to_taffy_dimension(style.min_height),
        },
        max_size: Size {
            width: to_taffy_dimension(style.max_width),
            height: to_taffy_dimension(style.max_height),
        },

        margin: to_taffy_margin(style.margin),
        padding: to_taffy_padding(style.padding),

        overflow: taffy::Point {
            x: overflow,
            y: overflow,
        },

        ..Default::default()
    }
}

// =============================================================================
// TAFFY LAYOUT NODE
// =============================================================================

/// One Taffy node in a shared [`LayoutEngine`].
///
/// After [`free`](LayoutNode::free) the wrapper stays in place but no longer
/// owns an engine node; engine operations then fail with
/// [`Error::LayoutNodeFreed`].
#[derive(Debug)]
pub struct TaffyLayoutNode {
    engine: LayoutEngine,
    node: Option<NodeId>,
    display: Display,
}

impl TaffyLayoutNode {
    /// Allocate a default-styled leaf in `engine`.
    pub fn new(engine: &LayoutEngine) -> Result<Self> {
        let node = engine.tree().borrow_mut().new_leaf(Style::default())?;
        Ok(Self {
            engine: engine.clone(),
            node: Some(node),
            display: Display::Flex,
        })
    }

    pub fn is_freed(&self) -> bool {
        self.node.is_none()
    }

    fn live_node(&self) -> Result<NodeId> {
        self.node.ok_or(Error::LayoutNodeFreed)
    }
}

impl LayoutNode for TaffyLayoutNode {
    fn reset(
        &mut self,
        context: &TemplateContext,
        template: &TemplateNode,
        is_root: bool,
    ) -> Result<()> {
        let node = self.live_node()?;
        let source = template.style();
        let mut style = to_taffy_style(source);

        // An unsized root fills the viewport.
        if is_root {
            let viewport = context.viewport();
            if let (TaffyDimension::Auto, Some(width)) = (style.size.width, viewport.width) {
                style.size.width = TaffyDimension::Length(width);
            }
            if let (TaffyDimension::Auto, Some(height)) = (style.size.height, viewport.height) {
                style.size.height = TaffyDimension::Length(height);
            }
        }

        self.engine.tree().borrow_mut().set_style(node, style)?;
        self.display = source.display;
        Ok(())
    }

    fn free(&mut self) {
        let Some(node) = self.node.take() else { return };
        if let Err(err) = self.engine.tree().borrow_mut().remove(node) {
            tracing::warn!(%err, "failed to free layout node");
        }
    }

    fn display(&self) -> Display {
        self.display
    }

    fn node_id(&self) -> Option<NodeId> {
        self.node
    }

    fn add_child(&mut self, child: &dyn LayoutNode) -> Result<()> {
        let parent = self.live_node()?;
        let child = child.node_id().ok_or(Error::LayoutNodeFreed)?;
        self.engine.tree().borrow_mut().add_child(parent, child)?;
        Ok(())
    }

    fn compute(&mut self, available: Size<AvailableSpace>) -> Result<()> {
        let node = self.live_node()?;
        self.engine.tree().borrow_mut().compute_layout(node, available)?;
        Ok(())
    }

    fn layout(&self) -> Option<Layout> {
        let node = self.node?;
        self.engine.tree().borrow().layout(node).ok().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateLayer;
    use crate::types::NodeType;

    fn template(style: NodeStyle) -> TemplateNode {
        TemplateNode::new(TemplateLayer::new("n", NodeType::View).with_style(style).into_rc())
    }

    fn definite(width: f32, height: f32) -> Size<AvailableSpace> {
        Size {
            width: AvailableSpace::Definite(width),
            height: AvailableSpace::Definite(height),
        }
    }

    #[test]
    fn test_dimension_conversion() {
        assert!(matches!(to_taffy_dimension(Dimension::Auto), TaffyDimension::Auto));
        assert!(matches!(
            to_taffy_dimension(Dimension::Points(50.0)),
            TaffyDimension::Length(50.0)
        ));
        // Percent: 50% → 0.5
        if let TaffyDimension::Percent(p) = to_taffy_dimension(Dimension::Percent(50.0)) {
            assert!((p - 0.5).abs() < 0.001);
        } else {
            panic!("Expected Percent variant");
        }
    }

    #[test]
    fn test_style_conversion() {
        let style = to_taffy_style(&NodeStyle {
            display: Display::None,
            flex_direction: FlexDirection::Column,
            align_self: AlignSelf::Auto,
            padding: EdgeInsets::all(4.0),
            ..Default::default()
        });

        assert_eq!(style.display, TaffyDisplay::None);
        assert_eq!(style.flex_direction, TaffyFlexDirection::Column);
        assert_eq!(style.align_self, None);
        assert_eq!(style.padding.left, LengthPercentage::Length(4.0));
    }

    #[test]
    fn test_reset_applies_style_and_display() {
        let engine = LayoutEngine::new();
        let ctx = TemplateContext::new().with_engine(engine.clone());
        let mut node = TaffyLayoutNode::new(&engine).unwrap();

        node.reset(
            &ctx,
            &template(NodeStyle {
                width: Dimension::Points(40.0),
                height: Dimension::Points(10.0),
                display: Display::None,
                ..Default::default()
            }),
            false,
        )
        .unwrap();

        assert_eq!(node.display(), Display::None);
        let id = node.node_id().unwrap();
        let tree = engine.tree().borrow();
        assert_eq!(tree.style(id).unwrap().size.width, TaffyDimension::Length(40.0));
    }

    #[test]
    fn test_root_fills_viewport() {
        let engine = LayoutEngine::new();
        let ctx = TemplateContext::new()
            .with_engine(engine.clone())
            .with_viewport(Some(375.0), None);
        let mut node = TaffyLayoutNode::new(&engine).unwrap();

        node.reset(&ctx, &template(NodeStyle::default()), true).unwrap();
        node.compute(definite(375.0, 800.0)).unwrap();

        assert_eq!(node.layout().unwrap().size.width, 375.0);
    }

    #[test]
    fn test_parent_child_layout() {
        let engine = LayoutEngine::new();
        let ctx = TemplateContext::new().with_engine(engine.clone());

        let mut parent = TaffyLayoutNode::new(&engine).unwrap();
        parent
            .reset(
                &ctx,
                &template(NodeStyle {
                    width: Dimension::Points(100.0),
                    height: Dimension::Points(10.0),
                    padding: EdgeInsets::new(1.0, 0.0, 0.0, 2.0),
                    ..Default::default()
                }),
                true,
            )
            .unwrap();

        let mut child = TaffyLayoutNode::new(&engine).unwrap();
        child
            .reset(
                &ctx,
                &template(NodeStyle {
                    width: Dimension::Points(20.0),
                    height: Dimension::Points(5.0),
                    ..Default::default()
                }),
                false,
            )
            .unwrap();

        parent.add_child(&child).unwrap();
        parent.compute(definite(100.0, 10.0)).unwrap();

        let layout = child.layout().unwrap();
        assert_eq!(layout.location.x, 2.0);
        assert_eq!(layout.location.y, 1.0);
        assert_eq!(layout.size.width, 20.0);
    }

    #[test]
    fn test_free_is_idempotent() {
        let engine = LayoutEngine::new();
        let mut node = TaffyLayoutNode::new(&engine).unwrap();
        assert_eq!(engine.node_count(), 1);

        node.free();
        node.free();

        assert!(node.is_freed());
        assert_eq!(engine.node_count(), 0);
        assert!(node.layout().is_none());
        assert!(matches!(
            node.compute(definite(1.0, 1.0)),
            Err(Error::LayoutNodeFreed)
        ));
    }
}
