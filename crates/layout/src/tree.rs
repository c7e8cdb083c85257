//! Layout tree structure.

use crate::layout_box::{BoxFlags, LayoutBox, LayoutBoxId};
use common::error::{BoxTreeError, BoxTreeResult};
use serde::Serialize;
use slotmap::SlotMap;
use smallvec::SmallVec;
use std::collections::HashSet;
use std::ops::{Index, IndexMut};

/// Counters collected while a tree is built.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub boxes_created: usize,
    pub promotions: usize,
    pub out_of_flow: usize,
    pub anonymous_inline: usize,
    pub anonymous_block: usize,
    pub anonymous_table: usize,
    pub collapsed_whitespace: usize,
}

impl BuildStats {
    /// Number of synthesized boxes of every kind.
    pub fn anonymous_total(&self) -> usize {
        self.anonymous_inline + self.anonymous_block + self.anonymous_table
    }
}

/// The layout tree.
pub struct LayoutTree {
    /// All layout boxes.
    boxes: SlotMap<LayoutBoxId, LayoutBox>,
    /// Viewport box, root of the whole tree.
    viewport: Option<LayoutBoxId>,
    /// Box built for the document element.
    root: Option<LayoutBoxId>,
    /// Boxes moved to their containing block out of normal flow.
    out_of_flow: Vec<LayoutBoxId>,
    stats: BuildStats,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self {
            boxes: SlotMap::with_key(),
            viewport: None,
            root: None,
            out_of_flow: Vec::new(),
            stats: BuildStats::default(),
        }
    }

    pub fn viewport(&self) -> Option<LayoutBoxId> {
        self.viewport
    }

    pub fn set_viewport(&mut self, id: LayoutBoxId) {
        self.viewport = Some(id);
    }

    /// Get root box.
    pub fn root(&self) -> Option<LayoutBoxId> {
        self.root
    }

    /// Set root box.
    pub fn set_root(&mut self, box_id: LayoutBoxId) {
        self.root = Some(box_id);
    }

    /// Insert a box built from its freshly allocated id.
    pub fn insert_with_key(&mut self, f: impl FnOnce(LayoutBoxId) -> LayoutBox) -> LayoutBoxId {
        self.stats.boxes_created += 1;
        self.boxes.insert_with_key(f)
    }

    /// Get a box by ID.
    pub fn get(&self, id: LayoutBoxId) -> Option<&LayoutBox> {
        self.boxes.get(id)
    }

    /// Get a mutable box by ID.
    pub fn get_mut(&mut self, id: LayoutBoxId) -> Option<&mut LayoutBox> {
        self.boxes.get_mut(id)
    }

    pub fn contains(&self, id: LayoutBoxId) -> bool {
        self.boxes.contains_key(id)
    }

    /// Append child to parent.
    pub fn append_child(&mut self, parent: LayoutBoxId, child: LayoutBoxId) {
        if let Some(child_box) = self.boxes.get_mut(child) {
            child_box.parent = Some(parent);
        }
        if let Some(parent_box) = self.boxes.get_mut(parent) {
            parent_box.children.push(child);
        }
    }

    /// Replace the child list of `parent`, re-pointing each child at it.
    pub fn set_children(&mut self, parent: LayoutBoxId, children: SmallVec<[LayoutBoxId; 8]>) {
        for &child in &children {
            if let Some(child_box) = self.boxes.get_mut(child) {
                child_box.parent = Some(parent);
            }
        }
        if let Some(parent_box) = self.boxes.get_mut(parent) {
            parent_box.children = children;
        }
    }

    /// Put `new_box` into the slot of `id`. Handles held elsewhere keep
    /// pointing at the same slot.
    pub fn replace(&mut self, id: LayoutBoxId, mut new_box: LayoutBox) {
        if let Some(slot) = self.boxes.get_mut(id) {
            new_box.id = id;
            *slot = new_box;
        }
    }

    /// Record a box reparented out of normal flow.
    pub fn note_out_of_flow(&mut self, id: LayoutBoxId) {
        self.out_of_flow.push(id);
        self.stats.out_of_flow += 1;
    }

    /// Boxes reparented out of normal flow, in the order they were moved.
    pub fn out_of_flow_boxes(&self) -> &[LayoutBoxId] {
        &self.out_of_flow
    }

    /// Drop a collapsed whitespace box and its subtree from the tree and the
    /// arena. Static-position references into it are moved to `fallback`.
    pub fn discard(&mut self, box_id: LayoutBoxId, fallback: Option<LayoutBoxId>) {
        if let Some(parent_id) = self.boxes.get(box_id).and_then(|b| b.parent) {
            if let Some(parent) = self.boxes.get_mut(parent_id) {
                parent.children.retain(|id| *id != box_id);
            }
        }

        let mut to_remove = vec![box_id];
        let mut i = 0;
        while i < to_remove.len() {
            if let Some(b) = self.boxes.get(to_remove[i]) {
                to_remove.extend(b.children.iter().copied());
            }
            i += 1;
        }

        for &id in &self.out_of_flow {
            if let Some(b) = self.boxes.get_mut(id) {
                if b.static_position_ref.map_or(false, |r| to_remove.contains(&r)) {
                    b.static_position_ref = fallback;
                }
            }
        }

        for id in to_remove {
            self.boxes.remove(id);
        }
        self.stats.collapsed_whitespace += 1;
    }

    /// Get parent box.
    pub fn parent(&self, box_id: LayoutBoxId) -> Option<LayoutBoxId> {
        self.boxes.get(box_id).and_then(|b| b.parent)
    }

    /// Get children.
    pub fn children(&self, box_id: LayoutBoxId) -> &[LayoutBoxId] {
        self.boxes
            .get(box_id)
            .map(|b| b.children.as_slice())
            .unwrap_or(&[])
    }

    /// Get all boxes.
    pub fn iter(&self) -> impl Iterator<Item = (LayoutBoxId, &LayoutBox)> {
        self.boxes.iter()
    }

    /// Get number of boxes.
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Check if tree is empty.
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Pre-order walk starting at `from`.
    pub fn preorder(&self, from: LayoutBoxId) -> PreOrderIterator<'_> {
        PreOrderIterator {
            tree: self,
            stack: vec![from],
        }
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut BuildStats {
        &mut self.stats
    }

    /// A text box of nothing but whitespace, or a non-replaced inline box
    /// whose children all are.
    pub fn is_whitespace(&self, id: LayoutBoxId) -> bool {
        let Some(b) = self.boxes.get(id) else {
            return false;
        };
        if b.is_text() {
            return b.text.as_deref().map_or(true, |t| t.chars().all(char::is_whitespace));
        }
        if b.is_block() || b.is_replaced() || b.children.is_empty() {
            return false;
        }
        b.children.iter().all(|&child| self.is_whitespace(child))
    }

    /// All text below `id`, in tree order.
    pub fn text_content(&self, id: LayoutBoxId) -> String {
        self.preorder(id)
            .filter_map(|b| self.boxes.get(b).and_then(|b| b.text.clone()))
            .collect::<Vec<_>>()
            .concat()
    }

    /// Visibility after layout: `visibility` allows it and the absolute
    /// bounds meet those of the clip block.
    pub fn is_visible(&self, id: LayoutBoxId) -> bool {
        let Some(b) = self.boxes.get(id) else {
            return false;
        };
        let Some(clip) = self.boxes.get(b.clip_block) else {
            return false;
        };
        b.flags.contains(BoxFlags::VISIBLE) && clip.abs_bounds.intersects(&b.abs_bounds)
    }

    /// Check that the arena holds exactly one tree under the viewport.
    pub fn validate(&self) -> BoxTreeResult<()> {
        let viewport = self
            .viewport
            .ok_or_else(|| BoxTreeError::structure("tree has no viewport"))?;
        if self.parent(viewport).is_some() {
            return Err(BoxTreeError::structure("viewport has a parent"));
        }

        let mut seen = HashSet::with_capacity(self.boxes.len());
        let mut orders = HashSet::with_capacity(self.boxes.len());
        let mut stack = vec![viewport];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                return Err(BoxTreeError::structure(format!("{:?} reached twice", id)));
            }
            let b = self
                .boxes
                .get(id)
                .ok_or_else(|| BoxTreeError::structure(format!("dangling child {:?}", id)))?;
            if !orders.insert(b.order) {
                return Err(BoxTreeError::structure(format!("order {} assigned twice", b.order)));
            }
            for link in [b.containing_block, b.clip_block, b.viewport] {
                if !self.boxes.contains_key(link) {
                    return Err(BoxTreeError::structure(format!("{:?} links to a missing box", id)));
                }
            }
            if let Some(reference) = b.static_position_ref {
                if !self.boxes.contains_key(reference) {
                    return Err(BoxTreeError::structure(format!(
                        "{:?} has a missing static position reference",
                        id
                    )));
                }
            }
            for &child in &b.children {
                if self.parent(child) != Some(id) {
                    return Err(BoxTreeError::structure(format!(
                        "{:?} is listed under {:?} but points elsewhere",
                        child, id
                    )));
                }
                stack.push(child);
            }
        }

        if seen.len() != self.boxes.len() {
            return Err(BoxTreeError::structure(format!(
                "{} of {} boxes unreachable",
                self.boxes.len() - seen.len(),
                self.boxes.len()
            )));
        }
        Ok(())
    }
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<LayoutBoxId> for LayoutTree {
    type Output = LayoutBox;

    fn index(&self, id: LayoutBoxId) -> &LayoutBox {
        &self.boxes[id]
    }
}

impl IndexMut<LayoutBoxId> for LayoutTree {
    fn index_mut(&mut self, id: LayoutBoxId) -> &mut LayoutBox {
        &mut self.boxes[id]
    }
}

/// Pre-order traversal.
pub struct PreOrderIterator<'a> {
    tree: &'a LayoutTree,
    stack: Vec<LayoutBoxId>,
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = LayoutBoxId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        if let Some(layout_box) = self.tree.get(id) {
            // Add children in reverse order
            for &child in layout_box.children.iter().rev() {
                self.stack.push(child);
            }
        }
        Some(id)
    }
}
