//! # spark-template
//!
//! Virtual node tree between parsed templates, native views and
//! [Taffy](https://github.com/DioxusLabs/taffy) flexbox layout.
//!
//! ## Architecture
//!
//! A parsed template is a tree of [`TemplateLayer`]s. The tree built from it
//! mirrors that shape one node per layer:
//!
//! ```text
//! TemplateLayer tree → Node tree → LayoutNode (Taffy) → Layout snapshots
//!                          │
//!                          └──→ native views (held, released on teardown)
//! ```
//!
//! Data binds reset the tree top-down ([`Node::reset_tree`]); teardown
//! releases it ([`Node::release`]). Layout results are cached twice per
//! node: once before data is bound and once after.
//!
//! The tree is single-threaded. Callers serialize builds, resets, layout
//! passes and releases.
//!
//! ## Modules
//!
//! - [`types`] - Core types (NodeType, NodeStyle, Dimension, etc.)
//! - [`template`] - Template descriptions and nested template items
//! - [`node`] - The node entity and tree operations
//! - [`layout`] - Layout node contract and the Taffy bridge
//! - [`view`] - Native view handles and the item container
//! - [`registry`] - Optional extension hooks (event handlers, exceptions)
//! - [`context`] - Per-tree context passed through walks

pub mod context;
pub mod error;
pub mod layout;
pub mod node;
pub mod registry;
pub mod template;
pub mod types;
pub mod view;

// Re-export commonly used items
pub use types::*;

pub use context::TemplateContext;
pub use error::{Error, Result};

pub use layout::{to_taffy_style, LayoutEngine, LayoutNode, LayoutPhase, TaffyLayoutNode};

pub use node::{
    add_child, build_nested_tree, build_tree, compute_layout, find_node_by_id, is_attached,
    AnimatorHandle, Node, NodeRef,
};

pub use registry::{
    report_exception, ExceptionSink, ExtensionRegistry, NodeEvent, NodeEventFactory,
};

pub use template::{TemplateItem, TemplateLayer, TemplateNode};

pub use view::{release_view, ItemContainer, NativeView, Releasable};
