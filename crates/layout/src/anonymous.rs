//! Anonymous box insertion.
//!
//! Runs on every finished box before the builder returns it. The generic
//! pass groups inline runs that sit next to block children into anonymous
//! blocks; the table passes give table parts the ancestors they require.

use crate::box_model::AnonymousKind;
use crate::factory::BoxFactory;
use crate::layout_box::{BoxFlags, LayoutBoxId};
use crate::tree::LayoutTree;
use smallvec::SmallVec;
use std::sync::Arc;
use style::computed::{ComputedStyle, Display};
use tracing::debug;

/// One table repair: runs of `target` children are wrapped in a `wrapper`
/// box unless the parent already is one of `containers`.
#[derive(Clone, Copy, Debug)]
pub struct TableFixup {
    pub target: Display,
    pub containers: &'static [Display],
    pub wrapper: AnonymousKind,
}

impl TableFixup {
    pub const CELLS_IN_ROW: TableFixup = TableFixup {
        target: Display::TableCell,
        containers: &[Display::TableRow],
        wrapper: AnonymousKind::TableRow,
    };

    pub const ROWS_IN_GROUP: TableFixup = TableFixup {
        target: Display::TableRow,
        containers: &[
            Display::TableRowGroup,
            Display::TableHeaderGroup,
            Display::TableFooterGroup,
        ],
        wrapper: AnonymousKind::TableRowGroup,
    };

    pub const GROUPS_IN_TABLE: TableFixup = TableFixup {
        target: Display::TableRowGroup,
        containers: &[Display::Table],
        wrapper: AnonymousKind::Table,
    };

    /// The passes in the order they are applied.
    pub const ALL: [TableFixup; 3] = [Self::CELLS_IN_ROW, Self::ROWS_IN_GROUP, Self::GROUPS_IN_TABLE];
}

/// Synthesizes the anonymous boxes a finished subtree needs.
#[derive(Clone, Copy)]
pub struct AnonymousBoxInserter<'a> {
    factory: BoxFactory<'a>,
    retain_whitespace: bool,
}

impl<'a> AnonymousBoxInserter<'a> {
    pub fn new(factory: BoxFactory<'a>, retain_whitespace: bool) -> Self {
        Self {
            factory,
            retain_whitespace,
        }
    }

    /// Run the generic pass and then every table pass on the children of
    /// `root`. Returns the number of boxes created.
    pub fn repair(&self, tree: &mut LayoutTree, root: LayoutBoxId) -> usize {
        let mut created = self.insert_anonymous_blocks(tree, root);
        for fixup in TableFixup::ALL {
            created += self.wrap_table_parts(tree, root, fixup);
        }
        created
    }

    /// Group runs of inline children of a block that also holds block
    /// children. Whitespace-only inline children are dropped unless the
    /// inserter was told to keep them.
    pub fn insert_anonymous_blocks(&self, tree: &mut LayoutTree, root: LayoutBoxId) -> usize {
        if !(tree[root].is_block() && tree[root].contains_blocks()) {
            return 0;
        }

        let children = tree[root].children.clone();
        let mut rebuilt: SmallVec<[LayoutBoxId; 8]> = SmallVec::with_capacity(children.len());
        let mut group: Option<LayoutBoxId> = None;
        let mut created = 0;

        for child in children {
            if tree[child].is_block() {
                group = None;
                rebuilt.push(child);
                continue;
            }
            if !self.retain_whitespace && tree.is_whitespace(child) {
                let fallback = group.or_else(|| rebuilt.last().copied());
                debug!(order = tree[child].order, "dropping whitespace between blocks");
                tree.discard(child, fallback);
                continue;
            }

            let anon = match group {
                Some(anon) => anon,
                None => {
                    let style = ComputedStyle::anonymous(Display::Block).inherit_from(&tree[root].style);
                    let anon = self
                        .factory
                        .create_anonymous(tree, AnonymousKind::Block, Arc::new(style));
                    let (containing, clip) = (tree[child].containing_block, tree[child].clip_block);
                    let a = &mut tree[anon];
                    a.containing_block = containing;
                    a.clip_block = clip;
                    a.flags.remove(BoxFlags::DISPLAYED);
                    rebuilt.push(anon);
                    group = Some(anon);
                    created += 1;
                    anon
                }
            };

            if tree[child].has_content() {
                let a = &mut tree[anon];
                a.flags.insert(BoxFlags::DISPLAYED);
                a.flags.remove(BoxFlags::EMPTY);
            }
            tree.append_child(anon, child);
            retarget_containing_block(tree, child, root, anon);
        }

        tree.set_children(root, rebuilt);
        if created > 0 {
            debug!(order = tree[root].order, created, "grouped inline runs in anonymous blocks");
        }
        created
    }

    /// Wrap runs of `fixup.target` children. Boxes holding text are left
    /// alone.
    pub fn wrap_table_parts(&self, tree: &mut LayoutTree, root: LayoutBoxId, fixup: TableFixup) -> usize {
        if fixup.containers.contains(&tree[root].style.display) {
            return 0;
        }
        let children = tree[root].children.clone();
        if children.iter().any(|&c| tree[c].is_text()) {
            return 0;
        }

        let mut rebuilt: SmallVec<[LayoutBoxId; 8]> = SmallVec::with_capacity(children.len());
        let mut wrapper: Option<LayoutBoxId> = None;
        let mut created = 0;

        for child in children {
            if tree[child].style.display != fixup.target {
                wrapper = None;
                rebuilt.push(child);
                continue;
            }

            let anon = match wrapper {
                Some(anon) => anon,
                None => {
                    let style = ComputedStyle::anonymous(fixup.wrapper.display());
                    let anon = self.factory.create_anonymous(tree, fixup.wrapper, Arc::new(style));
                    let (containing, clip) = (tree[child].containing_block, tree[child].clip_block);
                    let a = &mut tree[anon];
                    a.containing_block = containing;
                    a.clip_block = clip;
                    rebuilt.push(anon);
                    wrapper = Some(anon);
                    created += 1;
                    anon
                }
            };

            if tree[child].has_content() {
                tree[anon].flags.remove(BoxFlags::EMPTY);
            }
            tree[child].containing_block = anon;
            tree.append_child(anon, child);
        }

        if created > 0 {
            tree.set_children(root, rebuilt);
            debug!(
                order = tree[root].order,
                created,
                wrapper = fixup.wrapper.tag(),
                "wrapped table parts"
            );
        }
        created
    }
}

/// Move `member` and the descendants that shared its containing block `from`
/// over to `to`. Boxes with another containing block keep it, and so do
/// their subtrees.
fn retarget_containing_block(tree: &mut LayoutTree, member: LayoutBoxId, from: LayoutBoxId, to: LayoutBoxId) {
    let mut stack = vec![member];
    while let Some(id) = stack.pop() {
        if tree[id].containing_block != from {
            continue;
        }
        tree[id].containing_block = to;
        stack.extend(tree.children(id).iter().copied());
    }
}
