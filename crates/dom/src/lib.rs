//! DOM (Document Object Model) implementation.
//!
//! This crate provides the document tree consumed by the style resolver and
//! the box-tree builder.

pub mod node;
pub mod element;
pub mod tree;
pub mod attributes;
pub mod traversal;

pub use node::{Node, NodeId, NodeType, NodeData};
pub use element::{ElementData, ElementFlags, TagName};
pub use tree::DomTree;
pub use attributes::AttributeMap;
pub use traversal::DocumentTree;
