//! Document: a shared, cloneable handle over the element tree.
//!
//! Everything the binding layer needs from a host page goes through here:
//! selector resolution, tag classification, the text/value/markup slots,
//! listener attachment, and synthetic event dispatch. Borrows of the
//! underlying [`Dom`] never outlive a single call, so listeners are free to
//! call back into the document.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::markup;
use super::node::{NodeData, NodeId};
use super::tree::Dom;
use crate::css::parser::{parse_selector_list, SelectorError};
use crate::error::BindError;
use crate::event::{self, Event};

/// Shared handle to an element tree. Clones refer to the same tree.
#[derive(Clone)]
pub struct Document {
    dom: Rc<RefCell<Dom>>,
    root: NodeId,
}

impl Document {
    /// An empty document (just the root node).
    pub fn new() -> Self {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::document());
        Self {
            dom: Rc::new(RefCell::new(dom)),
            root,
        }
    }

    /// A document whose root holds the nodes parsed from `markup`.
    pub fn parse(markup: &str) -> Self {
        let doc = Self::new();
        markup::parse_fragment(&mut doc.dom.borrow_mut(), doc.root, markup);
        doc
    }

    /// The document root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Run `f` with read access to the tree.
    pub fn with_dom<R>(&self, f: impl FnOnce(&Dom) -> R) -> R {
        f(&self.dom.borrow())
    }

    /// Run `f` with write access to the tree.
    pub fn with_dom_mut<R>(&self, f: impl FnOnce(&mut Dom) -> R) -> R {
        f(&mut self.dom.borrow_mut())
    }

    /// Whether two handles refer to the same tree.
    pub fn ptr_eq(&self, other: &Document) -> bool {
        Rc::ptr_eq(&self.dom, &other.dom)
    }

    // ── Resolution ───────────────────────────────────────────────────

    /// First element in the document matching `selector`.
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        self.query_selector_in(self.root, selector)
    }

    /// First element among the descendants of `scope` matching `selector`.
    pub fn query_selector_in(
        &self,
        scope: NodeId,
        selector: &str,
    ) -> Result<Option<NodeId>, SelectorError> {
        let parsed = parse_selector_list(selector)?;
        Ok(self.with_dom(|dom| dom.query_selector(scope, &parsed)))
    }

    /// All elements in the document matching `selector`.
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        let parsed = parse_selector_list(selector)?;
        Ok(self.with_dom(|dom| dom.query_selector_all(self.root, &parsed)))
    }

    /// Resolve `selector` to its first match, or say why it can't be.
    pub fn resolve(&self, selector: &str) -> Result<NodeId, BindError> {
        self.resolve_in(self.root, selector)
    }

    /// [`resolve`](Self::resolve) restricted to the descendants of `scope`.
    pub fn resolve_in(&self, scope: NodeId, selector: &str) -> Result<NodeId, BindError> {
        self.query_selector_in(scope, selector)
            .map_err(|source| BindError::InvalidSelector {
                selector: selector.to_owned(),
                source,
            })?
            .ok_or_else(|| BindError::TargetNotFound {
                selector: selector.to_owned(),
            })
    }

    /// Whether `node` still exists in the tree.
    pub fn contains(&self, node: NodeId) -> bool {
        self.with_dom(|dom| dom.contains(node))
    }

    // ── Element slots ────────────────────────────────────────────────

    /// Lowercase tag name, or `None` for non-elements and removed nodes.
    pub fn tag_name(&self, node: NodeId) -> Option<String> {
        self.with_dom(|dom| {
            dom.get(node)
                .filter(|d| d.is_element())
                .map(|d| d.tag.clone())
        })
    }

    /// Whether `node` is an `<input>` or `<textarea>`.
    pub fn is_input_capable(&self, node: NodeId) -> bool {
        self.with_dom(|dom| dom.get(node).is_some_and(NodeData::is_input_capable))
    }

    /// Attribute value by name.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.with_dom(|dom| dom.get(node).and_then(|d| d.attribute(name)))
    }

    /// Concatenated descendant text.
    pub fn text_content(&self, node: NodeId) -> String {
        self.with_dom(|dom| dom.text_content(node))
    }

    /// Replace the node's children with a single text node.
    pub fn set_text_content(&self, node: NodeId, text: &str) {
        self.with_dom_mut(|dom| dom.set_text_content(node, text));
    }

    /// Current value slot. `None` unless the node is input-capable.
    pub fn value(&self, node: NodeId) -> Option<String> {
        self.with_dom(|dom| dom.get(node).and_then(|d| d.value.clone()))
    }

    /// Write the value slot. Returns `false` if the node has none.
    pub fn set_value(&self, node: NodeId, value: &str) -> bool {
        self.with_dom_mut(|dom| match dom.get_mut(node) {
            Some(data) if data.is_input_capable() => {
                data.value = Some(value.to_owned());
                true
            }
            _ => false,
        })
    }

    /// Serialized children of `node`.
    pub fn inner_html(&self, node: NodeId) -> String {
        self.with_dom(|dom| markup::inner_html(dom, node))
    }

    /// Serialized `node` including its own tags.
    pub fn outer_html(&self, node: NodeId) -> String {
        self.with_dom(|dom| markup::outer_html(dom, node))
    }

    /// Replace all children of `node` with the nodes parsed from `html`.
    ///
    /// Replaced descendants are removed from the tree together with any
    /// listeners attached to them.
    pub fn set_inner_html(&self, node: NodeId, html: &str) {
        self.with_dom_mut(|dom| {
            if !dom.contains(node) {
                return;
            }
            dom.remove_children(node);
            markup::parse_fragment(dom, node, html);
        });
    }

    // ── Events ───────────────────────────────────────────────────────

    /// Attach `listener` for `event` on `node`. Returns `false` if the node is gone.
    pub fn add_event_listener(
        &self,
        node: NodeId,
        event: &str,
        listener: impl Fn(&Event) + 'static,
    ) -> bool {
        self.with_dom_mut(|dom| dom.add_listener(node, event, Rc::new(listener)))
    }

    /// Number of listeners attached to `node`.
    pub fn listener_count(&self, node: NodeId) -> usize {
        self.with_dom(|dom| dom.listener_count(node))
    }

    /// Dispatch the event `name` at `target`, bubbling to the root.
    ///
    /// Returns the number of listeners invoked.
    pub fn dispatch(&self, target: NodeId, name: &str) -> usize {
        event::dispatch(self, target, name)
    }

    /// Simulate a click on `target`.
    pub fn click(&self, target: NodeId) -> usize {
        self.dispatch(target, "click")
    }

    /// Simulate the user typing: replace the value slot with `text`, then
    /// dispatch `input_event`.
    ///
    /// Returns `false` (and dispatches nothing) if `target` has no value slot.
    pub fn input_with(&self, target: NodeId, text: &str, input_event: &str) -> bool {
        if !self.set_value(target, text) {
            return false;
        }
        self.dispatch(target, input_event);
        true
    }

    /// [`input_with`](Self::input_with) using the standard `input` event.
    pub fn input(&self, target: NodeId, text: &str) -> bool {
        self.input_with(target, text, "input")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.with_dom(Dom::len))
            .finish()
    }
}
