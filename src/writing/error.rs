use semver::Version;
use thiserror::Error;

use crate::language::{NodeKind, TreeError};

/// Failures while writing. None of these are worth retrying: the same tree
/// and the same strategies will fail the same way again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WritingError {
    /// No strategy is registered for a node kind, or for a tag of the
    /// embedded assembly dialect.
    #[error("Unable to find writer for {kind} node:\n{dump}")]
    StrategyNotFound { kind: String, dump: String },

    /// A strategy was registered against the wrong kind.
    #[error("Writer for {expected} was handed a {found} node:\n{dump}")]
    UnexpectedKind {
        expected: NodeKind,
        found: NodeKind,
        dump: String,
    },

    /// The node has no spelling in the targeted compiler version.
    #[error("{kind} is not available when targeting Solidity {target}:\n{dump}")]
    UnsupportedSyntax {
        kind: NodeKind,
        target: Version,
        dump: String,
    },

    #[error("{tag} node lacks a usable {field:?} attribute:\n{dump}")]
    MalformedAssembly {
        tag: String,
        field: String,
        dump: String,
    },

    #[error(transparent)]
    Tree(#[from] TreeError),
}
