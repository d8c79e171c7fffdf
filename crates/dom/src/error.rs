//! Error types for tree operations
//!
//! Simple, flat error hierarchy. The tree model only reports graph
//! violations; document rules (ids, emptiness) live one layer up.

use crate::types::NodeId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Node is not an element: {0}")]
    NotAnElement(NodeId),

    #[error("Node is not attached to the document: {0}")]
    Detached(NodeId),

    #[error("Node already has a parent: {0}")]
    AlreadyAttached(NodeId),

    #[error("Child index {index} out of range for node {parent} with {len} children")]
    ChildIndexOutOfRange {
        parent: NodeId,
        index: usize,
        len: usize,
    },

    #[error("Attaching node {node} under {parent} would create a cycle")]
    WouldCycle { node: NodeId, parent: NodeId },

    #[error("ID already exists in the document: {0}")]
    DuplicateId(String),

    #[error("IDs must contain no space characters and be non-empty: {0:?}")]
    InvalidId(String),

    #[error("{0}")]
    RootBoundary(&'static str),
}
