//! Tree operations over [`NodeRef`]s.
//!
//! Building a tree from a [`TemplateLayer`], linking children, running a
//! layout pass and snapshotting its results, and id lookups.

use std::rc::Rc;

use taffy::{AvailableSpace, Size};

use crate::context::TemplateContext;
use crate::error::{Error, Result};
use crate::layout::{LayoutPhase, TaffyLayoutNode};
use crate::template::{TemplateLayer, TemplateNode};
use crate::types::NodeFlags;

use super::{Node, NodeRef};

// =============================================================================
// Linking
// =============================================================================

/// Append `child` to `parent`, in both the node tree and the layout engine.
///
/// Fails without touching either tree if `child` already has a parent or is
/// `parent` itself or one of its ancestors.
pub fn add_child(parent: &NodeRef, child: NodeRef) -> Result<()> {
    if child.borrow().parent().is_some() {
        return Err(invalid_link(&child, "already has a parent"));
    }
    let mut ancestor = Some(parent.clone());
    while let Some(node) = ancestor {
        if Rc::ptr_eq(&node, &child) {
            return Err(invalid_link(&child, "would create a cycle"));
        }
        ancestor = node.borrow().parent();
    }

    {
        let mut parent = parent.borrow_mut();
        let child = child.borrow();
        parent.layout_node.add_child(child.layout_node.as_ref())?;
    }
    child.borrow_mut().parent = Rc::downgrade(parent);
    parent
        .borrow_mut()
        .children
        .get_or_insert_with(Vec::new)
        .push(child);
    Ok(())
}

fn invalid_link(child: &NodeRef, reason: &'static str) -> Error {
    Error::InvalidLink {
        child: child.borrow().id.clone(),
        reason,
    }
}

// =============================================================================
// Building
// =============================================================================

/// Instantiate a node tree mirroring `layer`, one node per layer.
///
/// Every node gets a [`TaffyLayoutNode`] in the context's engine and is reset
/// once, so its layout state reflects the declared style.
pub fn build_tree(context: &TemplateContext, layer: &Rc<TemplateLayer>) -> Result<NodeRef> {
    let root = build_node(context, layer, NodeFlags::ROOT)?;
    tracing::debug!(id = %layer.id, "built template tree");
    Ok(root)
}

/// Like [`build_tree`], for a template nested inside another tree. The
/// result is flagged `NEST_ROOT` and is meant to be linked with [`add_child`].
pub fn build_nested_tree(context: &TemplateContext, layer: &Rc<TemplateLayer>) -> Result<NodeRef> {
    let root = build_node(context, layer, NodeFlags::NEST_ROOT)?;
    tracing::debug!(id = %layer.id, "built nested template tree");
    Ok(root)
}

fn build_node(
    context: &TemplateContext,
    layer: &Rc<TemplateLayer>,
    flags: NodeFlags,
) -> Result<NodeRef> {
    let layout_node = TaffyLayoutNode::new(context.engine())?;
    let mut node = Node::new(
        layer.id.clone(),
        TemplateNode::new(layer.clone()),
        Box::new(layout_node),
    );
    node.flags = flags;
    node.reset(context);

    let node = node.into_ref();
    for child_layer in &layer.children {
        let child = build_node(context, child_layer, NodeFlags::empty())?;
        add_child(&node, child)?;
    }
    Ok(node)
}

// =============================================================================
// Layout
// =============================================================================

/// Run a layout pass from `root` against the context viewport and store each
/// node's result as its `phase` snapshot.
pub fn compute_layout(root: &NodeRef, context: &TemplateContext, phase: LayoutPhase) -> Result<()> {
    let viewport = context.viewport();
    let available = Size {
        width: viewport
            .width
            .map_or(AvailableSpace::MaxContent, AvailableSpace::Definite),
        height: viewport
            .height
            .map_or(AvailableSpace::MaxContent, AvailableSpace::Definite),
    };

    root.borrow_mut().layout_node.compute(available)?;
    snapshot_layout(root, phase);
    Ok(())
}

fn snapshot_layout(node: &NodeRef, phase: LayoutPhase) {
    let mut node = node.borrow_mut();
    let layout = node.layout_node.layout();
    match phase {
        LayoutPhase::Prepare => node.layout_by_prepare = layout,
        LayoutPhase::Bind => node.layout_by_bind = layout,
    }
    for child in node.children() {
        snapshot_layout(child, phase);
    }
}

// =============================================================================
// Lookups
// =============================================================================

/// First node with `id` in pre-order, starting at `root`.
pub fn find_node_by_id(root: &NodeRef, id: &str) -> Option<NodeRef> {
    if root.borrow().id == id {
        return Some(root.clone());
    }
    root.borrow()
        .children()
        .iter()
        .find_map(|child| find_node_by_id(child, id))
}

/// True if `node` currently has a parent link.
pub fn is_attached(node: &Node) -> bool {
    node.parent().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Dimension, Display, FlexDirection, NodeStyle, NodeType};

    fn sized(width: f32, height: f32) -> NodeStyle {
        NodeStyle {
            width: Dimension::Points(width),
            height: Dimension::Points(height),
            ..Default::default()
        }
    }

    fn card() -> Rc<TemplateLayer> {
        TemplateLayer::new("card", NodeType::View)
            .with_style(NodeStyle {
                flex_direction: FlexDirection::Row,
                ..sized(300.0, 100.0)
            })
            .with_child(
                TemplateLayer::new("cover", NodeType::Image).with_style(sized(100.0, 100.0)),
            )
            .with_child(
                TemplateLayer::new("body", NodeType::View)
                    .with_style(NodeStyle {
                        display: Display::None,
                        ..sized(50.0, 50.0)
                    })
                    .with_child(
                        TemplateLayer::new("title", NodeType::Text).with_style(sized(40.0, 20.0)),
                    ),
            )
            .with_child(
                TemplateLayer::new("badge", NodeType::IconFont).with_style(sized(20.0, 20.0)),
            )
            .into_rc()
    }

    #[test]
    fn test_build_mirrors_template() {
        let ctx = TemplateContext::new();
        let root = build_tree(&ctx, &card()).unwrap();

        let root_ref = root.borrow();
        assert!(root_ref.is_root());
        assert!(!root_ref.is_nest_root());
        let ids: Vec<_> = root_ref.children().iter().map(|c| c.borrow().id.clone()).collect();
        assert_eq!(ids, ["cover", "body", "badge"]);
        assert_eq!(ctx.engine().node_count(), 5);

        let title = find_node_by_id(&root, "title").unwrap();
        let parent = title.borrow().parent().unwrap();
        assert_eq!(parent.borrow().id, "body");
        assert!(!title.borrow().is_root());
    }

    #[test]
    fn test_nested_tree_flags() {
        let ctx = TemplateContext::new();
        let host = build_tree(&ctx, &card()).unwrap();
        let cell = build_nested_tree(
            &ctx,
            &TemplateLayer::new("cell", NodeType::View).with_style(sized(10.0, 10.0)).into_rc(),
        )
        .unwrap();

        assert!(cell.borrow().is_nest_root());
        assert!(!cell.borrow().is_root());

        add_child(&host, cell.clone()).unwrap();
        assert!(is_attached(&cell.borrow()));
        assert_eq!(host.borrow().child_count(), 4);
    }

    #[test]
    fn test_add_child_rejects_second_parent() {
        let ctx = TemplateContext::new();
        let first = build_tree(&ctx, &card()).unwrap();
        let second = build_tree(&ctx, &card()).unwrap();
        let cover = find_node_by_id(&first, "cover").unwrap();

        let err = add_child(&second, cover.clone()).unwrap_err();
        assert!(matches!(err, Error::InvalidLink { ref child, .. } if child == "cover"));
        assert_eq!(second.borrow().child_count(), 3);

        // The first parent keeps sole ownership; releasing it leaves the
        // second tree untouched.
        first.borrow_mut().release();
        assert_eq!(second.borrow().child_count(), 3);
        assert!(second.borrow().children().iter().all(|c| !Rc::ptr_eq(c, &cover)));
        let second_cover = find_node_by_id(&second, "cover").unwrap();
        assert!(second_cover.borrow().layout_node().node_id().is_some());
    }

    #[test]
    fn test_add_child_rejects_cycles() {
        let ctx = TemplateContext::new();
        let root = build_tree(&ctx, &card()).unwrap();
        let title = find_node_by_id(&root, "title").unwrap();

        let err = add_child(&title, root.clone()).unwrap_err();
        assert!(matches!(err, Error::InvalidLink { ref child, .. } if child == "card"));
        assert_eq!(title.borrow().child_count(), 0);
        assert!(!crate::is_attached(&root.borrow()));

        let err = add_child(&root, root.clone()).unwrap_err();
        assert!(matches!(err, Error::InvalidLink { .. }));
        assert_eq!(root.borrow().child_count(), 3);
    }

    #[test]
    fn test_add_child_twice_is_rejected() {
        let ctx = TemplateContext::new();
        let host = build_tree(&ctx, &card()).unwrap();
        let cell = build_nested_tree(
            &ctx,
            &TemplateLayer::new("cell", NodeType::View).with_style(sized(10.0, 10.0)).into_rc(),
        )
        .unwrap();

        add_child(&host, cell.clone()).unwrap();
        assert!(add_child(&host, cell.clone()).is_err());
        assert_eq!(host.borrow().child_count(), 4);
    }

    #[test]
    fn test_layout_passes_snapshot_separately() {
        let ctx = TemplateContext::new().with_viewport(Some(375.0), None);
        let root = build_tree(&ctx, &card()).unwrap();

        compute_layout(&root, &ctx, LayoutPhase::Prepare).unwrap();
        let badge = find_node_by_id(&root, "badge").unwrap();
        {
            let badge = badge.borrow();
            let prepared = badge.layout_by_prepare.unwrap();
            // cover (100) + hidden body (0)
            assert_eq!(prepared.location.x, 100.0);
            assert!(badge.layout_by_bind.is_none());
        }

        compute_layout(&root, &ctx, LayoutPhase::Bind).unwrap();
        assert!(badge.borrow().layout_by_bind.is_some());

        root.borrow_mut().reset_tree(&ctx);
        let badge = badge.borrow();
        assert!(badge.layout_by_bind.is_none());
        assert!(badge.layout_by_prepare.is_some());
    }

    #[test]
    fn test_rebind_style_changes_layout() {
        let ctx = TemplateContext::new();
        let root = build_tree(&ctx, &card()).unwrap();
        let cover = find_node_by_id(&root, "cover").unwrap();

        // A bind widens the cover; the reset that follows rebinding drops it.
        {
            let mut cover = cover.borrow_mut();
            cover.template_node_mut().bind_style(sized(150.0, 100.0));
            let template = cover.template_node().clone();
            cover.layout_node_mut().reset(&ctx, &template, false).unwrap();
        }
        compute_layout(&root, &ctx, LayoutPhase::Bind).unwrap();
        assert_eq!(cover.borrow().layout_by_bind.unwrap().size.width, 150.0);

        root.borrow_mut().reset_tree(&ctx);
        compute_layout(&root, &ctx, LayoutPhase::Bind).unwrap();
        assert_eq!(cover.borrow().layout_by_bind.unwrap().size.width, 100.0);
    }

    #[test]
    fn test_visibility_follows_display() {
        let ctx = TemplateContext::new();
        let root = build_tree(&ctx, &card()).unwrap();

        let title = find_node_by_id(&root, "title").unwrap();
        let cover = find_node_by_id(&root, "cover").unwrap();
        assert!(!title.borrow().is_node_visible_in_tree());
        assert!(cover.borrow().is_node_visible_in_tree());
        assert!(root.borrow().is_node_visible_in_tree());
    }

    #[test]
    fn test_release_frees_engine_nodes() {
        let ctx = TemplateContext::new();
        let root = build_tree(&ctx, &card()).unwrap();
        let title = find_node_by_id(&root, "title").unwrap();

        root.borrow_mut().release();

        assert_eq!(ctx.engine().node_count(), 0);
        assert!(!is_attached(&title.borrow()));
        assert_eq!(root.borrow().child_count(), 0);

        // Second release is a no-op.
        root.borrow_mut().release();
        assert_eq!(ctx.engine().node_count(), 0);
    }

    #[test]
    fn test_find_missing_node() {
        let ctx = TemplateContext::new();
        let root = build_tree(&ctx, &card()).unwrap();
        assert!(find_node_by_id(&root, "footer").is_none());
    }
}
