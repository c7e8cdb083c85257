//! Helpers shared by the unit tests.

use crate::anonymous::AnonymousBoxInserter;
use crate::config::BuildConfig;
use crate::context::BuildContext;
use crate::engine::BoxTreeEngine;
use crate::factory::BoxFactory;
use crate::layout_box::LayoutBoxId;
use crate::tree::LayoutTree;
use common::error::BoxTreeResult;
use common::geometry::Rect;
use dom::node::NodeId;
use dom::tree::DomTree;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use style::resolver::DocumentStyles;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Parse `markup` with html5ever. Unless the markup spells out its own
/// `<html>` element, only the contents of the implied body are kept, so the
/// first element of the fragment becomes the document element.
pub fn parse_html(markup: &str) -> DomTree {
    let parsed = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut markup.as_bytes())
        .expect("reading from memory");

    let mut dom = DomTree::new();
    let root = dom.root();
    let html = child_element(&parsed.document, "html").expect("html5ever always creates <html>");
    if markup.trim_start().to_ascii_lowercase().starts_with("<html") {
        copy_node(&mut dom, root, &html);
    } else if let Some(body) = child_element(&html, "body") {
        for child in body.children.borrow().iter() {
            copy_node(&mut dom, root, child);
        }
    }
    dom
}

fn child_element(parent: &Handle, tag: &str) -> Option<Handle> {
    parent
        .children
        .borrow()
        .iter()
        .find(|child| matches!(&child.data, NodeData::Element { name, .. } if &*name.local == tag))
        .cloned()
}

fn copy_node(dom: &mut DomTree, parent: NodeId, handle: &Handle) {
    match &handle.data {
        NodeData::Element { name, attrs, .. } => {
            let node = dom.append_element(parent, &name.local);
            if let Some(element) = dom.get_element_mut(node) {
                for attr in attrs.borrow().iter() {
                    element.set_attribute(&attr.name.local, &attr.value);
                }
            }
            for child in handle.children.borrow().iter() {
                copy_node(dom, node, child);
            }
        }
        NodeData::Text { contents } => {
            dom.append_text(parent, &contents.borrow());
        }
        NodeData::Comment { contents } => {
            let comment = dom.create_comment(contents.to_string());
            dom.append_child(parent, comment);
        }
        _ => {}
    }
}

pub fn parse_markup(markup: &str) -> (DomTree, DocumentStyles) {
    let dom = parse_html(markup);
    let styles = DocumentStyles::new();
    styles.resolve_document(&dom);
    (dom, styles)
}

/// A built tree together with the document it came from.
pub struct Built {
    pub dom: DomTree,
    pub styles: DocumentStyles,
    pub tree: LayoutTree,
    pub viewport: LayoutBoxId,
    /// Box of the document element.
    pub root: LayoutBoxId,
    pub config: BuildConfig,
}

impl Built {
    /// Box of the element with the given `id` attribute.
    pub fn by_id(&self, id: &str) -> LayoutBoxId {
        self.tree
            .iter()
            .find(|(_, b)| {
                b.node
                    .and_then(|n| self.dom.get_element(n))
                    .and_then(|e| e.id.as_deref())
                    == Some(id)
            })
            .map(|(box_id, _)| box_id)
            .unwrap_or_else(|| panic!("no box for #{}", id))
    }

    /// Run `f` with an inserter configured like the one used for the build.
    pub fn with_inserter<T>(
        &mut self,
        f: impl FnOnce(&AnonymousBoxInserter<'_>, &mut LayoutTree, LayoutBoxId) -> T,
    ) -> T {
        let ctx = BuildContext::new(self.tree[self.viewport].abs_bounds);
        let factory = BoxFactory::new(&ctx, &self.config, self.viewport);
        let inserter = AnonymousBoxInserter::new(factory, self.config.retain_whitespace);
        f(&inserter, &mut self.tree, self.root)
    }
}

pub fn try_build_markup_with(markup: &str, config: BuildConfig) -> BoxTreeResult<Built> {
    let (dom, styles) = parse_markup(markup);
    let tree = BoxTreeEngine::new(config.clone()).build(&dom, &styles, Rect::new(0.0, 0.0, 800.0, 600.0))?;
    let viewport = tree.viewport().unwrap();
    let root = tree.root().unwrap();
    Ok(Built {
        dom,
        styles,
        tree,
        viewport,
        root,
        config,
    })
}

pub fn build_markup(markup: &str) -> Built {
    try_build_markup_with(markup, BuildConfig::default()).unwrap()
}

/// First non-anonymous box with the given tag, in tree order.
pub fn find_tag(built: &Built, tag: &str) -> LayoutBoxId {
    built
        .tree
        .preorder(built.viewport)
        .find(|&id| {
            let b = &built.tree[id];
            !b.is_anonymous() && b.tag.as_ref().map_or(false, |t| t.as_str() == tag)
        })
        .unwrap_or_else(|| panic!("no <{}> box", tag))
}
