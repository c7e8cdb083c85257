//! Read-only traversal interface consumed by the box-tree builder.

use crate::element::TagName;
use crate::node::{NodeData, NodeId, NodeType};
use crate::tree::DomTree;

/// Read access to a document tree.
///
/// Implementations must be safe to share between threads for reading; the
/// box-tree builder never mutates the document.
pub trait DocumentTree: Sync {
    /// Kind of the node, or `None` if the id is unknown.
    fn node_type(&self, node: NodeId) -> Option<NodeType>;

    /// Tag name of an element node.
    fn tag_name(&self, node: NodeId) -> Option<&TagName>;

    /// Character data of a text node.
    fn text(&self, node: NodeId) -> Option<&str>;

    /// Ordered child nodes. Unknown ids have no children.
    fn child_nodes(&self, node: NodeId) -> &[NodeId];

    /// The element the box tree is built from.
    fn document_element(&self) -> Option<NodeId>;
}

impl DocumentTree for DomTree {
    fn node_type(&self, node: NodeId) -> Option<NodeType> {
        self.get(node).map(|n| n.node_type)
    }

    fn tag_name(&self, node: NodeId) -> Option<&TagName> {
        self.get_element(node).map(|e| &e.tag_name)
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        match &self.get(node)?.data {
            NodeData::Text { content } => Some(content),
            _ => None,
        }
    }

    fn child_nodes(&self, node: NodeId) -> &[NodeId] {
        self.get(node).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    fn document_element(&self) -> Option<NodeId> {
        DomTree::document_element(self)
    }
}
