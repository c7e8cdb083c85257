//! Box-tree construction entry point.

use crate::builder::{ContainingBoxes, TreeBuilder};
use crate::config::BuildConfig;
use crate::context::{BuildContext, VisualContext};
use crate::factory::BoxFactory;
use crate::tree::LayoutTree;
use common::error::{BoxTreeError, BoxTreeResult};
use common::geometry::Rect;
use dom::traversal::DocumentTree;
use style::resolver::StyleResolver;
use tracing::{debug, debug_span};
use url::Url;

/// Builds box trees for documents.
pub struct BoxTreeEngine {
    config: BuildConfig,
    base_url: Option<Url>,
    visual_context: VisualContext,
}

impl BoxTreeEngine {
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            base_url: None,
            visual_context: VisualContext::default(),
        }
    }

    /// Base URL handed to every box for resolving relative references.
    pub fn with_base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    pub fn with_visual_context(mut self, ctx: VisualContext) -> Self {
        self.visual_context = ctx;
        self
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Build the box tree of `document` for a viewport of the given size.
    pub fn build<D, R>(&self, document: &D, styles: &R, viewport: Rect) -> BoxTreeResult<LayoutTree>
    where
        D: DocumentTree,
        R: StyleResolver,
    {
        let _span = debug_span!("box_tree", width = viewport.width, height = viewport.height).entered();

        let root_node = document
            .document_element()
            .ok_or(BoxTreeError::NoDocumentElement)?;

        let mut ctx = BuildContext::new(viewport).with_visual_context(self.visual_context.clone());
        if let Some(url) = &self.base_url {
            ctx = ctx.with_base_url(url.clone());
        }

        let mut tree = LayoutTree::new();
        let viewport_box = BoxFactory::create_viewport(&ctx, &mut tree);
        let factory = BoxFactory::new(&ctx, &self.config, viewport_box);
        let builder = TreeBuilder::new(document, styles, factory, &self.config);

        let root = builder.build(
            &mut tree,
            root_node,
            ContainingBoxes::uniform(viewport_box),
            Some(viewport_box),
        )?;
        tree.append_child(viewport_box, root);
        tree.set_root(root);

        let stats = tree.stats();
        debug!(
            boxes = stats.boxes_created,
            promotions = stats.promotions,
            out_of_flow = stats.out_of_flow,
            anonymous = stats.anonymous_total(),
            collapsed_whitespace = stats.collapsed_whitespace,
            "built box tree"
        );
        Ok(tree)
    }
}

impl Default for BoxTreeEngine {
    fn default() -> Self {
        Self::new(BuildConfig::default())
    }
}
