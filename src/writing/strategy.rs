//! The table mapping each node kind to the strategy that writes it

use std::collections::HashMap;

use super::error::WritingError;
use super::writer::{Item, Writer};
use crate::language::{NodeId, NodeKind, Tree};

/// Knows how to turn one kind of node into a sequence of literal text and
/// child nodes. The writer takes care of writing the children and of
/// recording where they ended up.
pub trait Strategy: Send + Sync {
    fn items<'t>(
        &self,
        tree: &'t Tree,
        id: NodeId,
        writer: &Writer,
    ) -> Result<Vec<Item<'t>>, WritingError>;
}

impl<F> Strategy for F
where
    F: for<'t> Fn(&'t Tree, NodeId, &Writer) -> Result<Vec<Item<'t>>, WritingError> + Send + Sync,
{
    fn items<'t>(
        &self,
        tree: &'t Tree,
        id: NodeId,
        writer: &Writer,
    ) -> Result<Vec<Item<'t>>, WritingError> {
        self(tree, id, writer)
    }
}

#[derive(Default)]
pub struct Strategies {
    table: HashMap<NodeKind, Box<dyn Strategy>>,
}

impl Strategies {
    pub fn new() -> Strategies {
        Strategies {
            table: HashMap::new(),
        }
    }

    /// Register a strategy, replacing whatever was there for that kind.
    pub fn insert<S>(&mut self, kind: NodeKind, strategy: S)
    where
        S: Strategy + 'static,
    {
        self.table
            .insert(kind, Box::new(strategy));
    }

    pub fn remove(&mut self, kind: NodeKind) {
        self.table
            .remove(&kind);
    }

    pub fn get(&self, kind: NodeKind) -> Option<&dyn Strategy> {
        self.table
            .get(&kind)
            .map(|strategy| strategy.as_ref())
    }

    pub fn contains(&self, kind: NodeKind) -> bool {
        self.table
            .contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.table
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.table
            .is_empty()
    }
}
