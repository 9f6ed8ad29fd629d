//! Selector queries over the tree.

use super::node::NodeId;
use super::tree::Dom;
use crate::css::model::SelectorList;

impl Dom {
    /// First element in document order under `scope` (excluding `scope`
    /// itself) that matches `selector`.
    pub fn query_selector(&self, scope: NodeId, selector: &SelectorList) -> Option<NodeId> {
        self.descendants(scope)
            .find(|&node| selector.matches(self, node))
    }

    /// Every element under `scope` that matches `selector`, in document order.
    pub fn query_selector_all(&self, scope: NodeId, selector: &SelectorList) -> Vec<NodeId> {
        self.descendants(scope)
            .filter(|&node| selector.matches(self, node))
            .collect()
    }

    fn descendants(&self, scope: NodeId) -> impl Iterator<Item = NodeId> {
        self.walk_depth_first(scope).into_iter().skip(1)
    }
}
