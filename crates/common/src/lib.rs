//! Common utilities and types used across the box-tree engine.

pub mod geometry;
pub mod error;

pub use geometry::Rect;
pub use error::{BoxTreeError, BoxTreeResult};
