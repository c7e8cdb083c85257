//! Box creation.

use crate::box_model::{AnonymousKind, BoxKind};
use crate::config::BuildConfig;
use crate::context::BuildContext;
use crate::layout_box::{BoxFlags, LayoutBox, LayoutBoxId};
use crate::tree::LayoutTree;
use dom::element::TagName;
use dom::node::NodeId;
use std::sync::Arc;
use style::computed::{ComputedStyle, Display};
use tracing::trace;

/// Creates boxes, picking the kind from the computed style and stamping
/// each one with the next document-order index.
#[derive(Clone, Copy)]
pub struct BoxFactory<'a> {
    ctx: &'a BuildContext,
    config: &'a BuildConfig,
    viewport: LayoutBoxId,
}

impl<'a> BoxFactory<'a> {
    pub fn new(ctx: &'a BuildContext, config: &'a BuildConfig, viewport: LayoutBoxId) -> Self {
        Self {
            ctx,
            config,
            viewport,
        }
    }

    /// Create the viewport box and register it with the tree. It is its own
    /// containing and clip block.
    pub fn create_viewport(ctx: &BuildContext, tree: &mut LayoutTree) -> LayoutBoxId {
        let style = Arc::new(ComputedStyle::anonymous(Display::Block));
        let order = ctx.next_order();
        let id = tree.insert_with_key(|id| {
            let mut viewport = LayoutBox::new(id, BoxKind::Viewport, style, id, ctx.visual_context());
            viewport.order = order;
            viewport.flags = BoxFlags::DISPLAYED | BoxFlags::VISIBLE | BoxFlags::IN_FLOW;
            viewport.bounds = ctx.viewport();
            viewport.abs_bounds = ctx.viewport();
            viewport.base_url = ctx.base_url();
            viewport
        });
        tree.set_viewport(id);
        id
    }

    pub fn viewport(&self) -> LayoutBoxId {
        self.viewport
    }

    fn new_box(&self, id: LayoutBoxId, kind: BoxKind, style: Arc<ComputedStyle>) -> LayoutBox {
        let mut layout_box = LayoutBox::new(id, kind, style, self.viewport, self.ctx.visual_context());
        layout_box.order = self.ctx.next_order();
        layout_box.base_url = self.ctx.base_url();
        layout_box
    }

    /// Create a text box. Text has no style of its own and shares the one of
    /// its parent element.
    pub fn create_text_box(
        &self,
        tree: &mut LayoutTree,
        node: NodeId,
        text: &str,
        parent_style: Arc<ComputedStyle>,
    ) -> LayoutBoxId {
        let id = tree.insert_with_key(|id| {
            let mut text_box = self.new_box(id, BoxKind::Text, parent_style);
            text_box.node = Some(node);
            text_box.text = Some(Arc::from(text));
            text_box.flags = BoxFlags::DISPLAYED | BoxFlags::IN_FLOW;
            if text_box.style.is_visible() {
                text_box.flags.insert(BoxFlags::VISIBLE);
            }
            if text.trim().is_empty() {
                text_box.flags.insert(BoxFlags::EMPTY);
            }
            text_box
        });
        trace!(order = tree[id].order, len = text.len(), "text box");
        id
    }

    /// Create the box of an element. Without a resolved style the box gets
    /// a minimal one carrying only `fallback_display`.
    pub fn create_element_box(
        &self,
        tree: &mut LayoutTree,
        node: Option<NodeId>,
        tag: Option<&TagName>,
        style: Option<Arc<ComputedStyle>>,
        fallback_display: Display,
    ) -> LayoutBoxId {
        let style = style.unwrap_or_else(|| Arc::new(ComputedStyle::anonymous(fallback_display)));
        let replaced = tag.map_or(false, |t| self.config.is_replaced(t));

        let mut kind = if replaced {
            BoxKind::replaced(&style)
        } else {
            BoxKind::from_style(&style)
        };
        // Floats and absolutely positioned boxes are always block boxes.
        if style.is_out_of_flow() {
            kind = kind.promoted();
        }

        let mut flags = BoxFlags::empty();
        if style.display != Display::None {
            flags |= BoxFlags::DISPLAYED;
        }
        if style.is_visible() {
            flags |= BoxFlags::VISIBLE;
        }
        if !style.is_out_of_flow() {
            flags |= BoxFlags::IN_FLOW;
        }
        if !replaced {
            flags |= BoxFlags::EMPTY;
        }

        let id = tree.insert_with_key(|id| {
            let mut element_box = self.new_box(id, kind, style);
            element_box.node = node;
            element_box.tag = tag.cloned();
            element_box.flags = flags;
            element_box
        });
        trace!(order = tree[id].order, kind = kind.name(), tag = ?tag.map(|t| t.as_str()), "element box");
        id
    }

    /// Create a synthesized box. It starts out displayed, in flow and empty;
    /// the caller wires its links and content flags.
    pub fn create_anonymous(
        &self,
        tree: &mut LayoutTree,
        anonymous: AnonymousKind,
        style: Arc<ComputedStyle>,
    ) -> LayoutBoxId {
        let id = tree.insert_with_key(|id| {
            let mut anon = self.new_box(id, anonymous.box_kind(), style);
            anon.anonymous = Some(anonymous);
            anon.tag = Some(TagName::new(anonymous.tag()));
            anon.flags = BoxFlags::DISPLAYED | BoxFlags::VISIBLE | BoxFlags::IN_FLOW | BoxFlags::EMPTY;
            anon
        });

        let stats = tree.stats_mut();
        match anonymous {
            AnonymousKind::Inline => stats.anonymous_inline += 1,
            AnonymousKind::Block => stats.anonymous_block += 1,
            AnonymousKind::TableRow | AnonymousKind::TableRowGroup | AnonymousKind::Table => {
                stats.anonymous_table += 1
            }
        }
        trace!(order = tree[id].order, kind = ?anonymous, "anonymous box");
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::geometry::Rect;
    use style::computed::{Float, Position};

    fn setup() -> (BuildContext, BuildConfig) {
        (BuildContext::new(Rect::new(0.0, 0.0, 800.0, 600.0)), BuildConfig::default())
    }

    fn styled(display: Display) -> Arc<ComputedStyle> {
        let mut style = ComputedStyle::default_style();
        style.display = display;
        Arc::new(style)
    }

    #[test]
    fn test_viewport_links_to_itself() {
        let (ctx, _) = setup();
        let mut tree = LayoutTree::new();
        let viewport = BoxFactory::create_viewport(&ctx, &mut tree);

        let b = &tree[viewport];
        assert_eq!(b.kind, BoxKind::Viewport);
        assert_eq!(b.containing_block, viewport);
        assert_eq!(b.clip_block, viewport);
        assert_eq!(b.order, 0);
        assert_eq!(b.abs_bounds, Rect::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(tree.viewport(), Some(viewport));
    }

    #[test]
    fn test_kind_selection() {
        let (ctx, config) = setup();
        let mut tree = LayoutTree::new();
        let viewport = BoxFactory::create_viewport(&ctx, &mut tree);
        let factory = BoxFactory::new(&ctx, &config, viewport);

        let div = factory.create_element_box(&mut tree, None, None, Some(styled(Display::Block)), Display::Inline);
        let thead = factory.create_element_box(
            &mut tree,
            None,
            None,
            Some(styled(Display::TableHeaderGroup)),
            Display::Inline,
        );
        let span = factory.create_element_box(&mut tree, None, None, Some(styled(Display::Inline)), Display::Inline);

        assert_eq!(tree[div].kind, BoxKind::Block);
        assert_eq!(tree[thead].kind, BoxKind::TableRowGroup);
        assert_eq!(tree[span].kind, BoxKind::Inline);
        assert!(tree[span].is_empty());
        assert_eq!(tree[span].containing_block, viewport);
        assert!(tree[div].order < tree[thead].order && tree[thead].order < tree[span].order);
    }

    #[test]
    fn test_replaced_elements() {
        let (ctx, config) = setup();
        let mut tree = LayoutTree::new();
        let viewport = BoxFactory::create_viewport(&ctx, &mut tree);
        let factory = BoxFactory::new(&ctx, &config, viewport);
        let img = TagName::img();

        let inline = factory.create_element_box(&mut tree, None, Some(&img), Some(styled(Display::Inline)), Display::Inline);
        let block = factory.create_element_box(&mut tree, None, Some(&img), Some(styled(Display::Block)), Display::Inline);
        let table = factory.create_element_box(&mut tree, None, Some(&img), Some(styled(Display::Table)), Display::Inline);

        assert_eq!(tree[inline].kind, BoxKind::InlineReplaced);
        assert!(!tree[inline].is_empty());
        assert_eq!(tree[block].kind, BoxKind::BlockReplaced);
        assert_eq!(tree[table].kind, BoxKind::BlockReplaced);
    }

    #[test]
    fn test_missing_style_falls_back() {
        let (ctx, config) = setup();
        let mut tree = LayoutTree::new();
        let viewport = BoxFactory::create_viewport(&ctx, &mut tree);
        let factory = BoxFactory::new(&ctx, &config, viewport);

        let id = factory.create_element_box(&mut tree, None, None, None, Display::TableRow);
        assert_eq!(tree[id].kind, BoxKind::TableRow);
        assert!(tree[id].style.is_anonymous());
        assert!(tree[id].is_displayed());
    }

    #[test]
    fn test_out_of_flow_blockified() {
        let (ctx, config) = setup();
        let mut tree = LayoutTree::new();
        let viewport = BoxFactory::create_viewport(&ctx, &mut tree);
        let factory = BoxFactory::new(&ctx, &config, viewport);

        let mut floated = ComputedStyle::default_style();
        floated.float = Float::Left;
        let mut fixed = ComputedStyle::default_style();
        fixed.position = Position::Fixed;
        let mut relative = ComputedStyle::default_style();
        relative.position = Position::Relative;

        let a = factory.create_element_box(&mut tree, None, None, Some(Arc::new(floated)), Display::Inline);
        let b = factory.create_element_box(&mut tree, None, None, Some(Arc::new(fixed)), Display::Inline);
        let c = factory.create_element_box(&mut tree, None, None, Some(Arc::new(relative)), Display::Inline);

        assert_eq!(tree[a].kind, BoxKind::Block);
        assert!(!tree[a].is_in_flow());
        assert_eq!(tree[b].kind, BoxKind::Block);
        assert_eq!(tree[c].kind, BoxKind::Inline);
        assert!(tree[c].is_in_flow());
    }

    #[test]
    fn test_display_none_and_hidden() {
        let (ctx, config) = setup();
        let mut tree = LayoutTree::new();
        let viewport = BoxFactory::create_viewport(&ctx, &mut tree);
        let factory = BoxFactory::new(&ctx, &config, viewport);

        let mut hidden = ComputedStyle::default_style();
        hidden.visibility = style::computed::Visibility::Hidden;
        let none = factory.create_element_box(&mut tree, None, None, Some(styled(Display::None)), Display::Inline);
        let invisible = factory.create_element_box(&mut tree, None, None, Some(Arc::new(hidden)), Display::Inline);

        assert!(!tree[none].is_displayed());
        assert!(tree[invisible].is_displayed());
        assert!(!tree[invisible].flags.contains(BoxFlags::VISIBLE));
    }

    #[test]
    fn test_anonymous_and_text_boxes() {
        let (ctx, config) = setup();
        let mut tree = LayoutTree::new();
        let viewport = BoxFactory::create_viewport(&ctx, &mut tree);
        let factory = BoxFactory::new(&ctx, &config, viewport);

        let row = factory.create_anonymous(
            &mut tree,
            AnonymousKind::TableRow,
            Arc::new(ComputedStyle::anonymous(Display::TableRow)),
        );
        assert_eq!(tree[row].kind, BoxKind::TableRow);
        assert!(tree[row].is_anonymous());
        assert_eq!(tree[row].tag.as_ref().map(|t| t.as_str()), Some("tr"));
        assert_eq!(tree.stats().anonymous_table, 1);

        let mut dom = dom::tree::DomTree::new();
        let node = dom.append_text(dom.root(), "  ");
        let style = tree[viewport].style.clone();
        let blank = factory.create_text_box(&mut tree, node, "  ", style.clone());
        let word = factory.create_text_box(&mut tree, node, " hi ", style);
        assert!(tree[blank].is_empty());
        assert!(!tree[word].is_empty());
        assert!(tree[word].order > tree[row].order);
    }
}
