//! Common error types.

use thiserror::Error;

/// Error type shared by the document, style and box-tree crates.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoxTreeError {
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error("Document has no element to build from")]
    NoDocumentElement,

    #[error("Nesting depth {depth} exceeds the limit of {limit}")]
    DepthLimitExceeded { depth: usize, limit: usize },

    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    #[error("Invalid value for {property}: {value}")]
    InvalidValue { property: String, value: String },

    #[error("Malformed box tree: {0}")]
    Structure(String),
}

pub type BoxTreeResult<T> = Result<T, BoxTreeError>;

impl BoxTreeError {
    pub fn unknown_node(msg: impl Into<String>) -> Self {
        Self::UnknownNode(msg.into())
    }

    pub fn unknown_property(name: impl Into<String>) -> Self {
        Self::UnknownProperty(name.into())
    }

    pub fn invalid_value(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            property: property.into(),
            value: value.into(),
        }
    }

    pub fn structure(msg: impl Into<String>) -> Self {
        Self::Structure(msg.into())
    }
}
