//! DOM Tree implementation.

use crate::element::{ElementData, TagName};
use crate::node::{Node, NodeId, NodeType};
use slotmap::SlotMap;

/// The DOM tree structure.
pub struct DomTree {
    /// All nodes in the tree.
    nodes: SlotMap<NodeId, Node>,
    /// Document node.
    root: NodeId,
}

impl DomTree {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert_with_key(Node::new_document);
        Self { nodes, root }
    }

    /// Get the document node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Get element data for a node.
    pub fn get_element(&self, id: NodeId) -> Option<&ElementData> {
        self.nodes.get(id).and_then(|n| n.as_element())
    }

    /// Get mutable element data for a node.
    pub fn get_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.nodes.get_mut(id).and_then(|n| n.as_element_mut())
    }

    /// Create a detached element node.
    pub fn create_element(&mut self, data: ElementData) -> NodeId {
        self.nodes.insert_with_key(|id| Node::new_element(id, data))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, content: String) -> NodeId {
        self.nodes.insert_with_key(|id| Node::new_text(id, content))
    }

    /// Create a detached comment node.
    pub fn create_comment(&mut self, content: String) -> NodeId {
        self.nodes.insert_with_key(|id| Node::new_comment(id, content))
    }

    /// Append a child to a parent node, detaching it from any previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || !self.nodes.contains_key(parent) {
            return;
        }
        self.remove_from_parent(child);

        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.push(child);
        }
        if let Some(child_node) = self.nodes.get_mut(child) {
            child_node.parent = Some(parent);
        }
    }

    /// Create an element with the given tag and append it to `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.create_element(ElementData::new(TagName::new(tag)));
        self.append_child(parent, id);
        id
    }

    /// Create a text node and append it to `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.create_text(text.to_string());
        self.append_child(parent, id);
        id
    }

    /// Remove a node from its parent.
    pub fn remove_from_parent(&mut self, node: NodeId) {
        let parent = match self.nodes.get_mut(node) {
            Some(n) => n.parent.take(),
            None => return,
        };

        if let Some(parent_id) = parent {
            if let Some(parent_node) = self.nodes.get_mut(parent_id) {
                parent_node.children.retain(|id| *id != node);
            }
        }
    }

    /// Get parent node.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    /// Get all children.
    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .get(node)
            .into_iter()
            .flat_map(|n| n.children.iter().copied())
    }

    /// Get descendants (pre-order).
    pub fn descendants(&self, node: NodeId) -> DescendantIterator<'_> {
        let mut stack = Vec::new();
        if let Some(n) = self.nodes.get(node) {
            for &child in n.children.iter().rev() {
                stack.push(child);
            }
        }
        DescendantIterator { tree: self, stack }
    }

    /// The first element child of the document node (`<html>` in a parsed page).
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(self.root)
            .find(|&id| self.nodes.get(id).map(|n| n.node_type) == Some(NodeType::Element))
    }

    /// Get text content of a node and its descendants.
    pub fn get_text_content(&self, node: NodeId) -> String {
        let mut result = String::new();
        if let Some(text) = self.nodes.get(node).and_then(|n| n.as_text()) {
            result.push_str(text);
        }
        for id in self.descendants(node) {
            if let Some(text) = self.nodes.get(id).and_then(|n| n.as_text()) {
                result.push_str(text);
            }
        }
        result
    }

    /// Get total number of nodes, including the document node.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (only the document node).
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over descendant nodes (pre-order traversal).
pub struct DescendantIterator<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for DescendantIterator<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        if let Some(node) = self.tree.get(id) {
            for &child in node.children.iter().rev() {
                self.stack.push(child);
            }
        }
        Some(id)
    }
}
