//! DOM operation errors

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node id does not exist in this tree
    #[error("Node not found: {0}")]
    NotFound(NodeId),

    /// Inserting a node into itself or one of its descendants
    #[error("Hierarchy request error: {child} cannot be inserted under {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    /// Operation needs an element but got another node type
    #[error("Node {0} is not an element")]
    NotAnElement(NodeId),

    /// Node cannot hold children (text, comment, doctype)
    #[error("Node {0} cannot have children")]
    InvalidParent(NodeId),

    /// Reference node is not a child of the given parent
    #[error("Node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },
}
