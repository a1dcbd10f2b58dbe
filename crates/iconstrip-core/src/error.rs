//! Error types for the scene tree.

use thiserror::Error;

use crate::scene::NodeId;

/// Errors produced by [`Scene`](crate::Scene) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// The node handle is stale or was never part of this scene.
    #[error("node {0:?} does not exist in the scene")]
    MissingNode(NodeId),

    /// The scene root cannot be destroyed or re-parented.
    #[error("the scene root cannot be destroyed or re-parented")]
    RootNode,

    /// Attaching would make a node its own ancestor.
    #[error("cannot add {child:?} beneath {parent:?}: it is an ancestor of the parent")]
    Cycle { parent: NodeId, child: NodeId },

    /// The two nodes belong to different trees, so no coordinate mapping exists.
    #[error("nodes {from:?} and {to:?} are not in the same tree")]
    Disjoint { from: NodeId, to: NodeId },

    /// A node's transform has no inverse (zero scale).
    #[error("transform of node {0:?} is not invertible")]
    SingularTransform(NodeId),
}

/// A specialized Result type for scene operations.
pub type Result<T> = std::result::Result<T, SceneError>;
