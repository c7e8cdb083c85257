//! Shared state of one box-tree build.

use common::geometry::Rect;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use url::Url;

/// Source of document-order indices.
///
/// Increments are atomic, so subtrees built on different threads still get
/// unique indices.
#[derive(Debug, Default)]
pub struct OrderCounter(AtomicUsize);

impl OrderCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next index.
    #[inline]
    pub fn next(&self) -> usize {
        self.0.fetch_add(1, Ordering::Relaxed)
    }

    /// Number of indices handed out so far.
    pub fn assigned(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }
}

/// Rendering metrics handed through to every box untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualContext {
    /// Font size in px used for `em` units.
    pub font_size: f32,
    /// Resolution in dots per inch.
    pub dpi: f32,
}

impl Default for VisualContext {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            dpi: 96.0,
        }
    }
}

/// Per-build values read by the factory.
#[derive(Debug)]
pub struct BuildContext {
    order: OrderCounter,
    base_url: Option<Arc<Url>>,
    visual_context: Arc<VisualContext>,
    viewport: Rect,
}

impl BuildContext {
    pub fn new(viewport: Rect) -> Self {
        Self {
            order: OrderCounter::new(),
            base_url: None,
            visual_context: Arc::new(VisualContext::default()),
            viewport,
        }
    }

    pub fn with_base_url(mut self, url: Url) -> Self {
        self.base_url = Some(Arc::new(url));
        self
    }

    pub fn with_visual_context(mut self, ctx: VisualContext) -> Self {
        self.visual_context = Arc::new(ctx);
        self
    }

    #[inline]
    pub fn next_order(&self) -> usize {
        self.order.next()
    }

    pub fn orders_assigned(&self) -> usize {
        self.order.assigned()
    }

    pub fn base_url(&self) -> Option<Arc<Url>> {
        self.base_url.clone()
    }

    pub fn visual_context(&self) -> Arc<VisualContext> {
        self.visual_context.clone()
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_order_counter_sequence() {
        let counter = OrderCounter::new();
        assert_eq!(counter.next(), 0);
        assert_eq!(counter.next(), 1);
        assert_eq!(counter.assigned(), 2);
    }

    #[test]
    fn test_order_counter_unique_across_threads() {
        let ctx = BuildContext::new(Rect::new(0.0, 0.0, 800.0, 600.0));

        let orders: Vec<usize> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| (0..250).map(|_| ctx.next_order()).collect::<Vec<_>>()))
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });

        let unique: HashSet<_> = orders.iter().copied().collect();
        assert_eq!(unique.len(), 1000);
        assert_eq!(ctx.orders_assigned(), 1000);
        assert_eq!(orders.iter().max(), Some(&999));
    }

    #[test]
    fn test_passthrough_values() {
        let url = Url::parse("https://example.com/docs/").unwrap();
        let ctx = BuildContext::new(Rect::new(0.0, 0.0, 320.0, 240.0))
            .with_base_url(url.clone())
            .with_visual_context(VisualContext { font_size: 12.0, dpi: 144.0 });

        assert_eq!(ctx.base_url().as_deref(), Some(&url));
        assert_eq!(ctx.visual_context().dpi, 144.0);
        assert_eq!(ctx.viewport().width, 320.0);
    }
}
