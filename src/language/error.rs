use std::{fmt, path::Path};

use thiserror::Error;

use super::types::NodeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingError<'i> {
    pub problem: String,
    pub details: String,
    pub filename: &'i Path,
}

impl<'i> fmt::Display for LoadingError<'i> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.problem, self.details)
    }
}

/// Problems building or querying a [`Tree`](super::Tree).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Node {0} is not part of this tree")]
    UnknownNode(NodeId),
    #[error("Node {child} already has parent {parent}")]
    AlreadyParented { child: NodeId, parent: NodeId },
}
