//! CSS Inheritance.

use crate::computed::ComputedStyle;

/// Properties whose computed value passes from parent to child by default.
pub const INHERITED_PROPERTIES: &[&str] = &[
    "visibility",
    "font-family",
    "font-size",
    "font-weight",
    "font-style",
    "line-height",
    "text-align",
    "white-space",
    "letter-spacing",
    "word-spacing",
    "list-style-type",
    "list-style-position",
];

/// Check if a property is inherited by default.
pub fn is_inherited(property: &str) -> bool {
    let property = property.trim().to_ascii_lowercase();
    INHERITED_PROPERTIES.contains(&property.as_str())
}

/// Starting point for an element's style: initial values for every
/// property, with the inherited ones taken from `parent`.
pub fn inherited_style(parent: Option<&ComputedStyle>) -> ComputedStyle {
    let initial = ComputedStyle::default_style();
    match parent {
        Some(parent) => initial.inherit_from(parent),
        None => initial,
    }
}
