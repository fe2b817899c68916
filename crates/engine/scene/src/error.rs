//! Error types for the scene graph

use crate::NodeId;
use thiserror::Error;

/// Result type for scene graph operations
pub type Result<T> = std::result::Result<T, SceneError>;

/// Programming errors surfaced by scene graph operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// A node with this string id is already registered
    #[error("Duplicate object id: {0}")]
    DuplicateId(String),

    /// The handle does not refer to a live node
    #[error("Unknown node: {0:?}")]
    UnknownNode(NodeId),

    /// The child already belongs to another parent
    #[error("Node {child:?} already has parent {parent:?}")]
    AlreadyParented { child: NodeId, parent: NodeId },

    /// Attaching the child would close a loop in the hierarchy
    #[error("Adding {child:?} under {parent:?} would create a cycle")]
    CycleDetected { parent: NodeId, child: NodeId },

    /// A rotation axis with zero length
    #[error("Rotation axis has zero length")]
    DegenerateAxis,
}
