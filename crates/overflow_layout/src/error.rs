//! Layout error types

use thiserror::Error;

use crate::tree::LayoutNodeId;

/// Layout-related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// The layout engine rejected an operation
    #[error("Layout engine error: {0}")]
    Engine(String),

    /// A node id that is not (or no longer) part of the tree
    #[error("Unknown layout node: {0:?}")]
    UnknownNode(LayoutNodeId),
}

impl From<taffy::TaffyError> for LayoutError {
    fn from(err: taffy::TaffyError) -> Self {
        LayoutError::Engine(format!("{err:?}"))
    }
}

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;
