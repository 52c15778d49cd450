//! Template Context - the value shared by every node of one tree.
//!
//! Carries the extension registry, the layout engine the tree's layout nodes
//! live in, and the viewport the root is laid out against. Tree walks pass the
//! same context to every node unchanged.

use std::rc::Rc;

use taffy::Size;

use crate::layout::LayoutEngine;
use crate::registry::ExtensionRegistry;

#[derive(Debug, Clone)]
pub struct TemplateContext {
    registry: Rc<ExtensionRegistry>,
    engine: LayoutEngine,
    /// Width/height available to the root. `None` means unconstrained.
    viewport: Size<Option<f32>>,
}

impl Default for TemplateContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateContext {
    /// Context with an empty registry, a fresh engine and no viewport limits.
    pub fn new() -> Self {
        Self {
            registry: Rc::new(ExtensionRegistry::new()),
            engine: LayoutEngine::new(),
            viewport: Size {
                width: None,
                height: None,
            },
        }
    }

    pub fn with_registry(mut self, registry: Rc<ExtensionRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_engine(mut self, engine: LayoutEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_viewport(mut self, width: Option<f32>, height: Option<f32>) -> Self {
        self.viewport = Size { width, height };
        self
    }

    pub fn registry(&self) -> &ExtensionRegistry {
        &self.registry
    }

    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    pub fn viewport(&self) -> Size<Option<f32>> {
        self.viewport
    }
}
