//! DOM Attribute handling.

use indexmap::IndexMap;
use std::sync::Arc;

/// Map of element attributes preserving insertion order.
#[derive(Clone, Debug, Default)]
pub struct AttributeMap {
    attrs: IndexMap<Arc<str>, String>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self {
            attrs: IndexMap::new(),
        }
    }

    /// Set an attribute value.
    pub fn set(&mut self, name: &str, value: &str) {
        self.attrs.insert(Arc::from(name), value.to_string());
    }

    /// Get an attribute value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(|s| s.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Iterate over attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order() {
        let mut attrs = AttributeMap::new();
        attrs.set("style", "display: block");
        attrs.set("class", "a");
        attrs.set("style", "display: inline");

        let names: Vec<_> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["style", "class"]);
        assert_eq!(attrs.get("style"), Some("display: inline"));
        assert!(attrs.contains("class"));
        assert_eq!(attrs.len(), 2);
    }
}
