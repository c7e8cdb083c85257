//! Box-tree build configuration.

use dom::element::TagName;

/// Box-tree build configuration.
#[derive(Clone, Debug)]
pub struct BuildConfig {
    /// Deepest element nesting accepted before the build fails.
    pub max_depth: usize,
    /// Keep whitespace-only inline children when grouping inline runs.
    pub retain_whitespace: bool,
    /// Wrap text runs that sit among element siblings in anonymous inline boxes.
    pub wrap_text_runs: bool,
    /// Elements that produce replaced boxes.
    pub replaced_elements: Vec<TagName>,
}

impl BuildConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_retain_whitespace(mut self, retain: bool) -> Self {
        self.retain_whitespace = retain;
        self
    }

    pub fn with_wrap_text_runs(mut self, wrap: bool) -> Self {
        self.wrap_text_runs = wrap;
        self
    }

    /// Add an element to the replaced set.
    pub fn with_replaced_element(mut self, tag: &str) -> Self {
        let tag = TagName::new(tag);
        if !self.replaced_elements.contains(&tag) {
            self.replaced_elements.push(tag);
        }
        self
    }

    pub fn is_replaced(&self, tag: &TagName) -> bool {
        self.replaced_elements.contains(tag)
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_depth: 512,
            retain_whitespace: false,
            wrap_text_runs: true,
            replaced_elements: vec![TagName::img()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BuildConfig::new();
        assert_eq!(config.max_depth, 512);
        assert!(!config.retain_whitespace);
        assert!(config.wrap_text_runs);
        assert!(config.is_replaced(&TagName::new("IMG")));
        assert!(!config.is_replaced(&TagName::new("video")));
    }

    #[test]
    fn test_builders() {
        let config = BuildConfig::new()
            .with_max_depth(8)
            .with_retain_whitespace(true)
            .with_replaced_element("video")
            .with_replaced_element("video");

        assert_eq!(config.max_depth, 8);
        assert!(config.retain_whitespace);
        assert_eq!(config.replaced_elements.len(), 2);
        assert!(config.is_replaced(&TagName::new("video")));
    }
}
