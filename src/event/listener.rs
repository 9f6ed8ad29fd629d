//! Event object and listener handler types.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::dom::node::NodeId;
use crate::dom::Document;

/// A listener callback. Shared so dispatch can clone it out of the tree
/// before invoking it.
pub type Handler = Rc<dyn Fn(&Event)>;

/// A listener as stored on a node.
pub(crate) struct RegisteredListener {
    pub(crate) event: String,
    pub(crate) handler: Handler,
}

/// An event travelling from its target up to the document root.
pub struct Event {
    name: String,
    target: NodeId,
    current_target: Cell<NodeId>,
    document: Document,
    propagation_stopped: Cell<bool>,
}

impl Event {
    pub(crate) fn new(name: &str, target: NodeId, document: Document) -> Self {
        Self {
            name: name.to_owned(),
            target,
            current_target: Cell::new(target),
            document,
            propagation_stopped: Cell::new(false),
        }
    }

    /// Event name, e.g. `"click"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The node the event was dispatched at.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// The node whose listener is currently running.
    pub fn current_target(&self) -> NodeId {
        self.current_target.get()
    }

    /// The document the event is travelling through.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Stop the event after the listeners of the current node have run.
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }

    pub(crate) fn set_current_target(&self, node: NodeId) {
        self.current_target.set(node);
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("target", &self.target)
            .field("current_target", &self.current_target.get())
            .finish()
    }
}
