//! Box-tree construction.
//!
//! Turns a document tree and its computed styles into the tree of boxes the
//! layout pass works on: picks a box kind per element, links every box to
//! its containing and clipping block, moves floats and absolutely
//! positioned boxes out of normal flow and synthesizes the anonymous boxes
//! that mixed inline/block content and incomplete tables require.

pub mod anonymous;
pub mod box_model;
pub mod builder;
pub mod config;
pub mod context;
pub mod engine;
pub mod factory;
pub mod layout_box;
pub mod snapshot;
pub mod tree;

#[cfg(test)]
mod test_support;

pub use anonymous::{AnonymousBoxInserter, TableFixup};
pub use box_model::{AnonymousKind, BoxKind};
pub use builder::{ContainingBoxes, TreeBuilder};
pub use config::BuildConfig;
pub use context::{BuildContext, VisualContext};
pub use engine::BoxTreeEngine;
pub use factory::BoxFactory;
pub use layout_box::{BoxFlags, LayoutBox, LayoutBoxId};
pub use snapshot::BoxSnapshot;
pub use tree::{BuildStats, LayoutTree};
