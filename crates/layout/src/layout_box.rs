//! Layout box representation.

use crate::box_model::{AnonymousKind, BoxKind};
use crate::context::VisualContext;
use bitflags::bitflags;
use common::geometry::Rect;
use dom::element::TagName;
use dom::node::NodeId;
use slotmap::new_key_type;
use smallvec::SmallVec;
use std::sync::Arc;
use style::computed::ComputedStyle;
use url::Url;

new_key_type! {
    /// Unique identifier for a layout box.
    pub struct LayoutBoxId;
}

bitflags! {
    /// Structural state of a box.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct BoxFlags: u16 {
        /// No visible non-empty content (yet).
        const EMPTY = 1 << 0;
        /// `display` is not `none`.
        const DISPLAYED = 1 << 1;
        /// `visibility` is `visible`.
        const VISIBLE = 1 << 2;
        /// Neither floated nor absolutely positioned.
        const IN_FLOW = 1 << 3;
        /// A continuation holds the rest of this box.
        const SPLIT = 1 << 4;
        /// At least one in-flow block-level child was found.
        const CONTAINS_BLOCKS = 1 << 5;
        /// At least one in-flow child was accepted.
        const ANY_IN_FLOW = 1 << 6;
    }
}

/// A box in the layout tree.
#[derive(Clone, Debug)]
pub struct LayoutBox {
    /// Unique ID.
    pub id: LayoutBoxId,
    /// Source DOM node, `None` for anonymous boxes and the viewport.
    pub node: Option<NodeId>,
    /// Element name, or the name an anonymous box is reported under.
    pub tag: Option<TagName>,
    /// Box kind.
    pub kind: BoxKind,
    /// Set on synthesized boxes.
    pub anonymous: Option<AnonymousKind>,
    /// Document-order index, assigned once at creation.
    pub order: usize,
    /// Computed style.
    pub style: Arc<ComputedStyle>,
    /// Character data (text boxes).
    pub text: Option<Arc<str>>,
    pub flags: BoxFlags,
    /// Parent box.
    pub parent: Option<LayoutBoxId>,
    /// Child boxes.
    pub children: SmallVec<[LayoutBoxId; 8]>,
    /// Box that percentages and offsets resolve against.
    pub containing_block: LayoutBoxId,
    /// Box whose bounds clip this one.
    pub clip_block: LayoutBoxId,
    /// Last in-flow sibling seen before an out-of-flow box was reparented.
    pub static_position_ref: Option<LayoutBoxId>,
    /// Rest of a box split across lines.
    pub continuation: Option<LayoutBoxId>,
    /// Bounds relative to the containing block, filled in by layout.
    pub bounds: Rect,
    /// Absolute bounds, filled in by layout.
    pub abs_bounds: Rect,
    pub viewport: LayoutBoxId,
    pub base_url: Option<Arc<Url>>,
    pub visual_context: Arc<VisualContext>,
}

impl LayoutBox {
    /// Create a box whose containing and clip block point at `viewport`
    /// until the builder assigns them.
    pub fn new(
        id: LayoutBoxId,
        kind: BoxKind,
        style: Arc<ComputedStyle>,
        viewport: LayoutBoxId,
        visual_context: Arc<VisualContext>,
    ) -> Self {
        Self {
            id,
            node: None,
            tag: None,
            kind,
            anonymous: None,
            order: 0,
            style,
            text: None,
            flags: BoxFlags::empty(),
            parent: None,
            children: SmallVec::new(),
            containing_block: viewport,
            clip_block: viewport,
            static_position_ref: None,
            continuation: None,
            bounds: Rect::ZERO,
            abs_bounds: Rect::ZERO,
            viewport,
            base_url: None,
            visual_context,
        }
    }

    #[inline]
    pub fn is_block(&self) -> bool {
        self.kind.is_block()
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        self.kind == BoxKind::Text
    }

    #[inline]
    pub fn is_replaced(&self) -> bool {
        self.kind.is_replaced()
    }

    #[inline]
    pub fn is_anonymous(&self) -> bool {
        self.anonymous.is_some()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flags.contains(BoxFlags::EMPTY)
    }

    #[inline]
    pub fn is_displayed(&self) -> bool {
        self.flags.contains(BoxFlags::DISPLAYED)
    }

    #[inline]
    pub fn is_in_flow(&self) -> bool {
        self.flags.contains(BoxFlags::IN_FLOW)
    }

    #[inline]
    pub fn contains_blocks(&self) -> bool {
        self.flags.contains(BoxFlags::CONTAINS_BLOCKS)
    }

    /// Block box that accepted at least one in-flow child.
    #[inline]
    pub fn has_in_flow_children(&self) -> bool {
        self.flags.contains(BoxFlags::ANY_IN_FLOW)
    }

    #[inline]
    pub fn is_split(&self) -> bool {
        self.flags.contains(BoxFlags::SPLIT)
    }

    /// Displayed with visible content.
    #[inline]
    pub fn has_content(&self) -> bool {
        self.is_displayed() && !self.is_empty()
    }

    /// Record the box holding the rest of this one after a line split.
    pub fn set_continuation(&mut self, rest: LayoutBoxId) {
        self.continuation = Some(rest);
        self.flags.insert(BoxFlags::SPLIT);
    }

    /// Read a style property of this box by CSS name.
    pub fn property_value(&self, name: &str) -> Option<String> {
        self.style.property_value(name)
    }

    /// Shrink the absolute bounds to `rect`. A box left with nothing inside
    /// the rectangle stops being displayed.
    pub fn clip_to_rect(&mut self, rect: &Rect) {
        let clipped = self.abs_bounds.clamped_intersection(rect);
        if clipped.width == 0.0 && clipped.height == 0.0 {
            self.flags.remove(BoxFlags::DISPLAYED);
        } else {
            self.abs_bounds = clipped;
        }
    }

    /// Block variant of this box with every other field kept.
    pub fn promoted(&self) -> LayoutBox {
        LayoutBox {
            kind: self.kind.promoted(),
            ..self.clone()
        }
    }
}
