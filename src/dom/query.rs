//! DOM queries: by class, closest ancestor matching a selector.

use crate::css::model::SelectorList;

use super::node::{NodeData, NodeId};
use super::tree::Dom;

impl Dom {
    /// Find all nodes that have the given CSS class.
    pub fn query_by_class(&self, class: &str) -> Vec<NodeId> {
        self.iter_nodes()
            .filter(|(_, data)| data.has_class(class))
            .map(|(node_id, _)| node_id)
            .collect()
    }

    /// The node itself or its nearest ancestor matching `selectors`
    /// (jQuery's `closest`).
    pub fn closest(&self, id: NodeId, selectors: &SelectorList) -> Option<NodeId> {
        if !self.contains(id) {
            return None;
        }
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|&candidate| selectors.matches(candidate, self))
    }

    /// Iterate `(NodeId, &NodeData)` pairs in slotmap order (not tree order).
    fn iter_nodes(&self) -> impl Iterator<Item = (NodeId, &NodeData)> {
        self.nodes.iter()
    }
}
