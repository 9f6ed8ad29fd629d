//! Event dispatch: bubble path computation and listener invocation.
//!
//! [`bubble_path`] computes the traversal order from a node up to the root.
//! [`dispatch`] walks that path, invoking each node's listeners for the event.

use super::listener::Event;
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::dom::Document;

/// Compute the bubble path from `start` up to the root (inclusive).
///
/// Returns `[start, parent, grandparent, ..., root]`.
/// If `start` does not exist in the DOM, returns an empty vec.
pub fn bubble_path(dom: &Dom, start: NodeId) -> Vec<NodeId> {
    if !dom.contains(start) {
        return Vec::new();
    }
    let mut path = vec![start];
    path.extend(dom.ancestors(start));
    path
}

/// Dispatch `name` at `target` and bubble it to the root.
///
/// Handlers are cloned out of the tree per node, so no borrow is held while
/// user code runs. A node removed by an earlier handler contributes no
/// listeners. Returns the number of handlers invoked.
pub fn dispatch(document: &Document, target: NodeId, name: &str) -> usize {
    let path = document.with_dom(|dom| bubble_path(dom, target));
    if path.is_empty() {
        tracing::debug!(event = name, "dispatch target no longer exists");
        return 0;
    }

    let event = Event::new(name, target, document.clone());
    let mut invoked = 0;
    for node in path {
        let handlers = document.with_dom(|dom| dom.listeners_for(node, name));
        event.set_current_target(node);
        for handler in handlers {
            handler(&event);
            invoked += 1;
        }
        if event.is_propagation_stopped() {
            break;
        }
    }

    tracing::trace!(event = name, invoked, "event dispatched");
    invoked
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::dom::node::NodeData;

    /// Build a small test tree:
    /// ```text
    ///       root
    ///      /    \
    ///    a        b
    ///   / \
    ///  c   d
    /// ```
    fn build_tree() -> (Dom, NodeId, NodeId, NodeId, NodeId, NodeId) {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::document());
        let a = dom.insert_child(root, NodeData::element("div")).unwrap();
        let b = dom.insert_child(root, NodeData::element("div")).unwrap();
        let c = dom.insert_child(a, NodeData::element("button")).unwrap();
        let d = dom.insert_child(a, NodeData::element("span")).unwrap();
        (dom, root, a, b, c, d)
    }

    // ── Bubble path ──────────────────────────────────────────────────

    #[test]
    fn bubble_path_from_leaf() {
        let (dom, root, a, _, c, _) = build_tree();
        assert_eq!(bubble_path(&dom, c), vec![c, a, root]);
    }

    #[test]
    fn bubble_path_from_root() {
        let (dom, root, ..) = build_tree();
        assert_eq!(bubble_path(&dom, root), vec![root]);
    }

    #[test]
    fn bubble_path_sibling() {
        let (dom, root, _, b, ..) = build_tree();
        assert_eq!(bubble_path(&dom, b), vec![b, root]);
    }

    #[test]
    fn bubble_path_nonexistent_node() {
        let (mut dom, ..) = build_tree();
        let stale = dom.insert(NodeData::element("ghost"));
        dom.remove(stale);
        assert!(bubble_path(&dom, stale).is_empty());
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    fn document_with_log() -> (Document, NodeId, NodeId, Rc<RefCell<Vec<String>>>) {
        let doc = Document::parse(r#"<div id="outer"><button id="inner">go</button></div>"#);
        let outer = doc.query_selector("#outer").unwrap().unwrap();
        let inner = doc.query_selector("#inner").unwrap().unwrap();
        (doc, outer, inner, Rc::new(RefCell::new(Vec::new())))
    }

    #[test]
    fn dispatch_runs_target_then_ancestors() {
        let (doc, outer, inner, log) = document_with_log();
        for (node, label) in [(outer, "outer"), (inner, "inner")] {
            let log = Rc::clone(&log);
            doc.add_event_listener(node, "click", move |event| {
                log.borrow_mut().push(format!("{label}:{:?}", event.current_target() == event.target()));
            });
        }
        assert_eq!(doc.click(inner), 2);
        assert_eq!(*log.borrow(), vec!["inner:true", "outer:false"]);
    }

    #[test]
    fn dispatch_filters_by_event_name() {
        let (doc, _outer, inner, log) = document_with_log();
        let sink = Rc::clone(&log);
        doc.add_event_listener(inner, "input", move |_| sink.borrow_mut().push("input".into()));
        assert_eq!(doc.click(inner), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn stop_propagation_halts_bubbling() {
        let (doc, outer, inner, log) = document_with_log();
        doc.add_event_listener(inner, "click", |event| event.stop_propagation());
        let sink = Rc::clone(&log);
        doc.add_event_listener(outer, "click", move |_| sink.borrow_mut().push("outer".into()));
        assert_eq!(doc.click(inner), 1);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn dispatch_to_removed_node_invokes_nothing() {
        let (doc, outer, inner, _log) = document_with_log();
        doc.set_inner_html(outer, "");
        assert_eq!(doc.click(inner), 0);
    }
}
