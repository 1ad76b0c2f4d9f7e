use std::collections::HashMap;
use tracing::trace;

use super::node::YulNode;
use super::standard;
use crate::formatting::Layout;
use crate::writing::WritingError;

/// Writes one tag of the assembly dialect. `depth` is the indentation
/// level of the line the node starts on.
pub trait YulStrategy: Send + Sync {
    fn write(&self, node: &YulNode, writer: &YulWriter, depth: usize)
        -> Result<String, WritingError>;
}

impl<F> YulStrategy for F
where
    F: Fn(&YulNode, &YulWriter, usize) -> Result<String, WritingError> + Send + Sync,
{
    fn write(
        &self,
        node: &YulNode,
        writer: &YulWriter,
        depth: usize,
    ) -> Result<String, WritingError> {
        self(node, writer, depth)
    }
}

/// Strategies keyed by tag. Unlike the primary table this one is open
/// ended, since the dialect's tags are only strings.
#[derive(Default)]
pub struct YulStrategies {
    table: HashMap<String, Box<dyn YulStrategy>>,
}

impl YulStrategies {
    pub fn new() -> YulStrategies {
        YulStrategies {
            table: HashMap::new(),
        }
    }

    pub fn insert<S>(&mut self, tag: impl Into<String>, strategy: S)
    where
        S: YulStrategy + 'static,
    {
        self.table
            .insert(tag.into(), Box::new(strategy));
    }

    pub fn remove(&mut self, tag: &str) {
        self.table
            .remove(tag);
    }

    pub fn get(&self, tag: &str) -> Option<&dyn YulStrategy> {
        self.table
            .get(tag)
            .map(|strategy| strategy.as_ref())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.table
            .contains_key(tag)
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

pub struct YulWriter {
    strategies: YulStrategies,
    layout: Layout,
}

impl YulWriter {
    pub fn new(strategies: YulStrategies, layout: Layout) -> YulWriter {
        YulWriter { strategies, layout }
    }

    pub fn standard(layout: Layout) -> YulWriter {
        YulWriter::new(standard::strategies(), layout)
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn render(&self, node: &YulNode) -> Result<String, WritingError> {
        self.render_at(node, 0)
    }

    /// Write a node whose first line sits at the given indentation level,
    /// as when an assembly block is embedded in an indented function body.
    pub fn render_at(&self, node: &YulNode, depth: usize) -> Result<String, WritingError> {
        trace!(tag = %node.tag, depth);

        match self
            .strategies
            .get(&node.tag)
        {
            Some(strategy) => strategy.write(node, self, depth),
            None => Err(WritingError::StrategyNotFound {
                kind: node
                    .tag
                    .clone(),
                dump: node.dump(),
            }),
        }
    }

    /// Write each node, joined by the separator.
    pub fn render_all(
        &self,
        nodes: &[YulNode],
        depth: usize,
        separator: &str,
    ) -> Result<String, WritingError> {
        let mut parts = Vec::with_capacity(nodes.len());
        for node in nodes {
            parts.push(self.render_at(node, depth)?);
        }
        Ok(parts.join(separator))
    }
}
