use thiserror::Error;

use crate::language::{NodeId, TreeError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// A node was located before its parent was. This is a traversal
    /// order defect in the caller, not a problem with the data.
    #[error("Missing precomputed coordinates for the parent {parent} of node {node}:\n{dump}")]
    MissingParentCoordinates {
        node: NodeId,
        parent: NodeId,
        dump: String,
    },
    #[error("Missing precomputed coordinates for the sibling {sibling} of node {node}:\n{dump}")]
    MissingSiblingCoordinates {
        node: NodeId,
        sibling: NodeId,
        dump: String,
    },
    #[error("Fragment of node {node} does not occur in its parent {parent} after offset {offset}:\n{dump}")]
    FragmentNotFound {
        node: NodeId,
        parent: NodeId,
        offset: usize,
        dump: String,
    },
    #[error(transparent)]
    Tree(#[from] TreeError),
}
