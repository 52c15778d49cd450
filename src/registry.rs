//! Extension Registry - optional hooks supplied by the embedding app.
//!
//! The registry is built once, wrapped in an `Rc` and handed to the tree
//! through [`TemplateContext`](crate::context::TemplateContext). Both hooks are
//! optional; the tree works without either.

use std::error::Error as StdError;
use std::fmt;
use std::rc::Rc;

// =============================================================================
// Hook Traits
// =============================================================================

/// Event handler attached to one node.
pub trait NodeEvent {
    /// Wire an event of `event_type` for the node with `node_id`.
    fn add_event(&self, node_id: &str, event_type: &str);
}

/// Creates event handlers for nodes. Called at most once per node.
pub trait NodeEventFactory {
    fn create(&self) -> Rc<dyn NodeEvent>;
}

impl<F> NodeEventFactory for F
where
    F: Fn() -> Rc<dyn NodeEvent>,
{
    fn create(&self) -> Rc<dyn NodeEvent> {
        self()
    }
}

/// Receives failures the tree cannot propagate.
pub trait ExceptionSink {
    fn exception(&self, error: &dyn StdError);
}

// =============================================================================
// Registry
// =============================================================================

#[derive(Default)]
pub struct ExtensionRegistry {
    node_event: Option<Box<dyn NodeEventFactory>>,
    exception: Option<Box<dyn ExceptionSink>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node_event(mut self, factory: impl NodeEventFactory + 'static) -> Self {
        self.node_event = Some(Box::new(factory));
        self
    }

    pub fn with_exception(mut self, sink: impl ExceptionSink + 'static) -> Self {
        self.exception = Some(Box::new(sink));
        self
    }

    pub fn node_event(&self) -> Option<&dyn NodeEventFactory> {
        self.node_event.as_deref()
    }

    pub fn exception(&self) -> Option<&dyn ExceptionSink> {
        self.exception.as_deref()
    }

    pub fn has_exception(&self) -> bool {
        self.exception.is_some()
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("node_event", &self.node_event.is_some())
            .field("exception", &self.exception.is_some())
            .finish()
    }
}

/// Log `error` and hand it to the registry's exception sink, if any.
pub fn report_exception(registry: &ExtensionRegistry, error: &dyn StdError) {
    tracing::error!(%error, "template node exception");
    if let Some(sink) = registry.exception() {
        sink.exception(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::error::Error;

    struct CollectingSink(Rc<RefCell<Vec<String>>>);

    impl ExceptionSink for CollectingSink {
        fn exception(&self, error: &dyn StdError) {
            self.0.borrow_mut().push(error.to_string());
        }
    }

    struct NoopEvent;

    impl NodeEvent for NoopEvent {
        fn add_event(&self, _node_id: &str, _event_type: &str) {}
    }

    #[test]
    fn test_empty_registry() {
        let registry = ExtensionRegistry::new();
        assert!(registry.node_event().is_none());
        assert!(!registry.has_exception());

        // No sink: must not panic.
        report_exception(&registry, &Error::LayoutNodeFreed);
    }

    #[test]
    fn test_report_exception_reaches_sink() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let registry = ExtensionRegistry::new().with_exception(CollectingSink(seen.clone()));

        report_exception(&registry, &Error::UnknownNodeType("marquee".into()));

        assert_eq!(seen.borrow().as_slice(), ["unknown node type: marquee"]);
    }

    #[test]
    fn test_closure_factory() {
        let registry =
            ExtensionRegistry::new().with_node_event(|| Rc::new(NoopEvent) as Rc<dyn NodeEvent>);
        let factory = registry.node_event().unwrap();
        let a = factory.create();
        let b = factory.create();
        assert!(!Rc::ptr_eq(&a, &b));
    }
}
