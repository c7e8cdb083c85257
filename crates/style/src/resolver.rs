//! Style resolution for full documents.

use crate::computed::ComputedStyle;
use crate::inheritance::inherited_style;
use crate::ua::default_display;
use crate::computed::Display;
use dom::node::{NodeId, NodeType};
use dom::tree::DomTree;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Source of computed styles for the box-tree builder.
///
/// Resolvers are read concurrently while a tree is built, so they must be
/// `Sync`.
pub trait StyleResolver: Sync {
    /// Inheritance-aware computed style of an element, or `None` if the
    /// node has no style of its own.
    fn resolve_inherited_style(&self, node: NodeId) -> Option<Arc<ComputedStyle>>;
}

/// Resolved styles for all elements in a document.
///
/// Each element gets the inherited values of its parent, the user-agent
/// `display` for its tag and then the declarations of its `style`
/// attribute.
pub struct DocumentStyles {
    styles: RwLock<HashMap<NodeId, Arc<ComputedStyle>>>,
}

impl DocumentStyles {
    pub fn new() -> Self {
        Self {
            styles: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve styles for an entire document, replacing earlier results.
    pub fn resolve_document(&self, tree: &DomTree) {
        self.styles.write().clear();
        self.resolve_subtree(tree, tree.root(), None);
        debug!(count = self.styles.read().len(), "resolved document styles");
    }

    fn resolve_subtree(&self, tree: &DomTree, node_id: NodeId, parent_style: Option<&ComputedStyle>) {
        let node = match tree.get(node_id) {
            Some(n) => n,
            None => return,
        };

        let style = match (node.node_type, node.as_element()) {
            (NodeType::Element, Some(elem)) => {
                let mut computed = inherited_style(parent_style);
                computed.display = if elem.is_hidden() {
                    Display::None
                } else {
                    default_display(elem.tag_name.as_str())
                };

                if let Some(inline) = &elem.inline_style {
                    for err in computed.apply_declarations(inline, parent_style) {
                        warn!(tag = %elem.tag_name, error = %err, "ignoring style declaration");
                    }
                }

                let style = Arc::new(computed);
                self.styles.write().insert(node_id, style.clone());
                Some(style)
            }
            _ => None,
        };

        let parent_for_children = style.as_deref().or(parent_style);
        for &child in node.children.iter() {
            self.resolve_subtree(tree, child, parent_for_children);
        }
    }

    /// Override the style of a single node.
    pub fn set_style(&self, node_id: NodeId, style: ComputedStyle) {
        self.styles.write().insert(node_id, Arc::new(style));
    }

    /// Get computed style for a node.
    pub fn get_style(&self, node_id: NodeId) -> Option<Arc<ComputedStyle>> {
        self.styles.read().get(&node_id).cloned()
    }

    /// Drop the styles of a node and its descendants.
    pub fn invalidate_subtree(&self, tree: &DomTree, node_id: NodeId) {
        let mut styles = self.styles.write();
        styles.remove(&node_id);
        for id in tree.descendants(node_id) {
            styles.remove(&id);
        }
    }

    pub fn len(&self) -> usize {
        self.styles.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.read().is_empty()
    }

    /// Clear all styles.
    pub fn clear(&self) {
        self.styles.write().clear();
    }
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleResolver for DocumentStyles {
    fn resolve_inherited_style(&self, node: NodeId) -> Option<Arc<ComputedStyle>> {
        self.get_style(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::computed::{Position, TextAlign};

    #[test]
    fn test_resolve_document() {
        let mut tree = DomTree::new();
        let html = tree.append_element(tree.root(), "html");
        let body = tree.append_element(html, "body");
        let span = tree.append_element(body, "span");
        let text = tree.append_text(span, "x");

        let styles = DocumentStyles::new();
        styles.resolve_document(&tree);

        assert_eq!(styles.len(), 3);
        assert_eq!(styles.get_style(body).map(|s| s.display), Some(Display::Block));
        assert_eq!(styles.get_style(span).map(|s| s.display), Some(Display::Inline));
        assert!(styles.resolve_inherited_style(text).is_none());
    }

    #[test]
    fn test_inline_style_and_inheritance() {
        let mut tree = DomTree::new();
        let div = tree.append_element(tree.root(), "div");
        tree.get_element_mut(div)
            .unwrap()
            .set_attribute("style", "text-align: center; position: relative; display: nope");
        let span = tree.append_element(div, "span");
        tree.get_element_mut(span)
            .unwrap()
            .set_attribute("style", "position: inherit");

        let styles = DocumentStyles::new();
        styles.resolve_document(&tree);

        let div_style = styles.get_style(div).unwrap();
        assert_eq!(div_style.display, Display::Block);
        assert_eq!(div_style.position, Position::Relative);

        let span_style = styles.get_style(span).unwrap();
        assert_eq!(span_style.text_align, TextAlign::Center);
        assert_eq!(span_style.position, Position::Relative);
    }

    #[test]
    fn test_hidden_attribute() {
        let mut tree = DomTree::new();
        let div = tree.append_element(tree.root(), "div");
        tree.get_element_mut(div).unwrap().set_attribute("hidden", "");

        let styles = DocumentStyles::new();
        styles.resolve_document(&tree);
        assert_eq!(styles.get_style(div).map(|s| s.display), Some(Display::None));
    }

    #[test]
    fn test_invalidate_subtree() {
        let mut tree = DomTree::new();
        let div = tree.append_element(tree.root(), "div");
        let p = tree.append_element(div, "p");
        let other = tree.append_element(tree.root(), "section");

        let styles = DocumentStyles::new();
        styles.resolve_document(&tree);
        styles.invalidate_subtree(&tree, div);

        assert!(styles.get_style(div).is_none());
        assert!(styles.get_style(p).is_none());
        assert!(styles.get_style(other).is_some());

        styles.set_style(p, ComputedStyle::anonymous(Display::Block));
        assert!(styles.get_style(p).map(|s| s.is_anonymous()).unwrap_or(false));

        styles.clear();
        assert!(styles.is_empty());
    }
}
