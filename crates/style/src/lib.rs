//! Style computation system.
//!
//! This crate provides computed styles, inheritance, user-agent defaults and
//! the resolver interface consumed by the box-tree builder.

pub mod computed;
pub mod declarations;
pub mod inheritance;
pub mod resolver;
pub mod ua;

pub use computed::{ComputedStyle, Display, Float, Overflow, Position, Visibility, ANONYMOUS_CLASS};
pub use resolver::{DocumentStyles, StyleResolver};
