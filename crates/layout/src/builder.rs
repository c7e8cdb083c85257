//! Box-tree construction from the document tree.

use crate::anonymous::AnonymousBoxInserter;
use crate::box_model::AnonymousKind;
use crate::config::BuildConfig;
use crate::factory::BoxFactory;
use crate::layout_box::{BoxFlags, LayoutBoxId};
use crate::tree::LayoutTree;
use common::error::{BoxTreeError, BoxTreeResult};
use dom::node::{NodeId, NodeType};
use dom::traversal::DocumentTree;
use std::sync::Arc;
use style::computed::{ComputedStyle, Display, Position};
use style::resolver::StyleResolver;
use tracing::debug;

/// The boxes a subtree is built against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContainingBoxes {
    /// Containing block for boxes in normal flow and floats.
    pub containing: LayoutBoxId,
    /// Containing block for absolutely positioned boxes.
    pub absolute: LayoutBoxId,
    /// Clipping block.
    pub clip: LayoutBoxId,
}

impl ContainingBoxes {
    /// All three roles played by one box, as the viewport does for the root.
    pub fn uniform(id: LayoutBoxId) -> Self {
        Self {
            containing: id,
            absolute: id,
            clip: id,
        }
    }
}

/// Walks the document and builds the box tree.
///
/// Each element's subtree is built depth first. Children are routed either
/// into their parent's child list or, when floated or absolutely
/// positioned, into their own containing block. Inline boxes that turn out
/// to hold in-flow blocks are promoted to block boxes, and every finished
/// box is repaired by the [`AnonymousBoxInserter`] before it is returned.
pub struct TreeBuilder<'a, D: DocumentTree, R: StyleResolver> {
    document: &'a D,
    styles: &'a R,
    factory: BoxFactory<'a>,
    config: &'a BuildConfig,
    inserter: AnonymousBoxInserter<'a>,
}

impl<'a, D: DocumentTree, R: StyleResolver> TreeBuilder<'a, D, R> {
    pub fn new(document: &'a D, styles: &'a R, factory: BoxFactory<'a>, config: &'a BuildConfig) -> Self {
        Self {
            document,
            styles,
            factory,
            config,
            inserter: AnonymousBoxInserter::new(factory, config.retain_whitespace),
        }
    }

    /// Build the subtree of `node`. `parent` is the box of the DOM parent;
    /// text takes its style from it.
    pub fn build(
        &self,
        tree: &mut LayoutTree,
        node: NodeId,
        boxes: ContainingBoxes,
        parent: Option<LayoutBoxId>,
    ) -> BoxTreeResult<LayoutBoxId> {
        self.build_node(tree, node, boxes, parent, 0)
    }

    fn build_node(
        &self,
        tree: &mut LayoutTree,
        node: NodeId,
        boxes: ContainingBoxes,
        parent: Option<LayoutBoxId>,
        depth: usize,
    ) -> BoxTreeResult<LayoutBoxId> {
        match self.document.node_type(node) {
            Some(NodeType::Text) => {
                let text = self.document.text(node).unwrap_or_default();
                let style = parent
                    .and_then(|p| tree.get(p))
                    .map(|p| p.style.clone())
                    .unwrap_or_else(|| Arc::new(ComputedStyle::anonymous(Display::Inline)));
                let id = self.factory.create_text_box(tree, node, text, style);
                tree[id].containing_block = boxes.containing;
                tree[id].clip_block = boxes.clip;
                Ok(id)
            }
            Some(NodeType::Element) => self.build_element(tree, node, boxes, depth),
            other => Err(BoxTreeError::unknown_node(format!(
                "{:?} cannot produce a box ({:?})",
                node, other
            ))),
        }
    }

    fn build_element(
        &self,
        tree: &mut LayoutTree,
        node: NodeId,
        boxes: ContainingBoxes,
        depth: usize,
    ) -> BoxTreeResult<LayoutBoxId> {
        if depth > self.config.max_depth {
            return Err(BoxTreeError::DepthLimitExceeded {
                depth,
                limit: self.config.max_depth,
            });
        }

        let style = self.styles.resolve_inherited_style(node);
        let root = self.factory.create_element_box(
            tree,
            Some(node),
            self.document.tag_name(node),
            style,
            Display::Inline,
        );

        tree[root].containing_block = own_containing_block(tree, root, boxes);
        tree[root].clip_block = boxes.clip;
        let mut inner = descendant_boxes(tree, root, boxes);

        if tree[root].is_displayed() {
            let children = self.document.child_nodes(node);
            let text_only = !children
                .iter()
                .any(|&c| self.document.node_type(c) == Some(NodeType::Element));
            let mut inflow_reference: Option<LayoutBoxId> = None;

            for &child in children {
                let child_type = self.document.node_type(child);
                if !matches!(child_type, Some(NodeType::Element) | Some(NodeType::Text)) {
                    continue;
                }

                // Text among elements gets an anonymous inline wrapper. It is
                // created first so that it precedes the text in document order.
                let wrapper = if child_type == Some(NodeType::Text) && !text_only && self.config.wrap_text_runs {
                    Some(self.factory.create_anonymous(
                        tree,
                        AnonymousKind::Inline,
                        Arc::new(ComputedStyle::anonymous(Display::Inline)),
                    ))
                } else {
                    None
                };

                let child_box = self.build_node(tree, child, inner, Some(root), depth + 1)?;

                if tree[child_box].is_block() && tree[child_box].is_in_flow() {
                    if !tree[root].is_block() {
                        let promoted = tree[root].promoted();
                        tree.replace(root, promoted);
                        tree.stats_mut().promotions += 1;
                        debug!(order = tree[root].order, "promoted inline box holding block content");
                    }
                    tree[root].flags.insert(BoxFlags::CONTAINS_BLOCKS);
                    update_containing_boxes(tree, root, boxes);
                    inner = descendant_boxes(tree, root, boxes);
                    update_containing_boxes(tree, child_box, inner);
                }

                let child_has_content = tree[child_box].has_content();
                if tree[child_box].is_in_flow() {
                    if child_has_content {
                        tree[root].flags.remove(BoxFlags::EMPTY);
                    }
                    if tree[root].is_block() {
                        tree[root].flags.insert(BoxFlags::ANY_IN_FLOW);
                    }
                    let accepted = match wrapper {
                        Some(wrapper) => {
                            let w = &mut tree[wrapper];
                            w.containing_block = inner.containing;
                            w.clip_block = inner.clip;
                            if child_has_content {
                                w.flags.remove(BoxFlags::EMPTY);
                            }
                            tree.append_child(wrapper, child_box);
                            wrapper
                        }
                        None => child_box,
                    };
                    tree.append_child(root, accepted);
                    inflow_reference = Some(child_box);
                } else {
                    let cb = tree[child_box].containing_block;
                    if tree[cb].is_displayed() && child_has_content {
                        tree[cb].flags.remove(BoxFlags::EMPTY);
                    }
                    tree.append_child(cb, child_box);
                    tree[child_box].static_position_ref = inflow_reference;
                    tree.note_out_of_flow(child_box);
                    debug!(
                        order = tree[child_box].order,
                        containing_block = tree[cb].order,
                        "moved out-of-flow box to its containing block"
                    );
                }
            }
        }

        self.inserter.repair(tree, root);
        Ok(root)
    }
}

fn establishes_absolute_containing_block(style: &ComputedStyle) -> bool {
    matches!(style.position, Position::Relative | Position::Absolute | Position::Fixed)
}

/// Containing block of `id` itself: the absolute one for absolutely
/// positioned boxes, the normal-flow one otherwise.
fn own_containing_block(tree: &LayoutTree, id: LayoutBoxId, boxes: ContainingBoxes) -> LayoutBoxId {
    if tree[id].style.is_absolutely_positioned() {
        boxes.absolute
    } else {
        boxes.containing
    }
}

/// Boxes the descendants of `id` are built against.
fn descendant_boxes(tree: &LayoutTree, id: LayoutBoxId, boxes: ContainingBoxes) -> ContainingBoxes {
    let b = &tree[id];
    let mut inner = boxes;
    if establishes_absolute_containing_block(&b.style) {
        inner.absolute = id;
    }
    if b.is_block() {
        inner.containing = id;
        if b.style.clips_overflow() {
            inner.clip = id;
        }
    }
    inner
}

/// Recompute containing and clip blocks for a subtree that was built before
/// its root became a block box.
fn update_containing_boxes(tree: &mut LayoutTree, id: LayoutBoxId, boxes: ContainingBoxes) {
    let mut stack = vec![(id, boxes)];
    while let Some((id, boxes)) = stack.pop() {
        if tree[id].is_text() {
            tree[id].containing_block = boxes.containing;
            tree[id].clip_block = boxes.clip;
            continue;
        }
        tree[id].containing_block = own_containing_block(tree, id, boxes);
        tree[id].clip_block = boxes.clip;
        let inner = descendant_boxes(tree, id, boxes);
        for &child in tree.children(id) {
            stack.push((child, inner));
        }
    }
}
