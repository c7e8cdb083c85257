//! DOM Node implementation.

use crate::element::ElementData;
use slotmap::new_key_type;
use smallvec::SmallVec;

new_key_type! {
    /// Unique identifier for a DOM node.
    pub struct NodeId;
}

/// Kind of a node. Discriminants follow the DOM `nodeType` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeType {
    Element = 1,
    Text = 3,
    Comment = 8,
    Document = 9,
}

/// Payload of a node.
#[derive(Clone, Debug)]
pub enum NodeData {
    Document,
    Element(ElementData),
    Text { content: String },
    Comment { content: String },
}

/// A node of the document tree.
#[derive(Clone, Debug)]
pub struct Node {
    pub id: NodeId,
    pub node_type: NodeType,
    pub data: NodeData,
    pub parent: Option<NodeId>,
    /// Children in document order.
    pub children: SmallVec<[NodeId; 8]>,
}

impl Node {
    pub fn new(id: NodeId, node_type: NodeType, data: NodeData) -> Self {
        Self {
            id,
            node_type,
            data,
            parent: None,
            children: SmallVec::new(),
        }
    }

    pub fn new_document(id: NodeId) -> Self {
        Self::new(id, NodeType::Document, NodeData::Document)
    }

    pub fn new_element(id: NodeId, data: ElementData) -> Self {
        Self::new(id, NodeType::Element, NodeData::Element(data))
    }

    pub fn new_text(id: NodeId, content: String) -> Self {
        Self::new(id, NodeType::Text, NodeData::Text { content })
    }

    pub fn new_comment(id: NodeId, content: String) -> Self {
        Self::new(id, NodeType::Comment, NodeData::Comment { content })
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Character data of a text node.
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text { content } => Some(content),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::TagName;
    use slotmap::SlotMap;

    #[test]
    fn test_node_types() {
        assert_eq!(NodeType::Element as u8, 1);
        assert_eq!(NodeType::Text as u8, 3);
        assert_eq!(NodeType::Document as u8, 9);
    }

    #[test]
    fn test_node_accessors() {
        let mut nodes: SlotMap<NodeId, Node> = SlotMap::with_key();
        let elem = nodes.insert_with_key(|id| Node::new_element(id, ElementData::new(TagName::new("P"))));
        let text = nodes.insert_with_key(|id| Node::new_text(id, "hi".to_string()));

        assert_eq!(nodes[elem].as_element().map(|e| e.tag_name.as_str()), Some("p"));
        assert!(nodes[elem].is_element());
        assert_eq!(nodes[text].as_text(), Some("hi"));
        assert!(nodes[text].as_element().is_none());
    }
}
