//! Graph import errors.

use thiserror::Error;

use super::id::{EdgeId, NodeId};

/// Invariant violations found while importing a [`GraphSnapshot`](super::GraphSnapshot).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node id {0} appears more than once")]
    DuplicateNodeId(NodeId),

    #[error("Edge id {0} appears more than once")]
    DuplicateEdgeId(EdgeId),

    #[error("Edge {edge} references missing node {node}")]
    DanglingEdge { edge: EdgeId, node: NodeId },

    #[error("Edge {0} connects a node to itself")]
    SelfLoop(EdgeId),

    #[error("Edge {0} duplicates an existing connection")]
    DuplicateConnection(EdgeId),

    #[error("Id '{0}' is above the largest importable id")]
    IdOutOfRange(String),
}

pub type GraphResult<T> = std::result::Result<T, GraphError>;
