//! Writer turning a tree back into Solidity source text

use semver::Version;
use std::borrow::Cow;
use tracing::{debug, trace};

use super::error::WritingError;
use super::options::Options;
use super::standard;
use super::strategy::Strategies;
use crate::assembly::YulWriter;
use crate::formatting::{Layout, Syntax};
use crate::language::{NodeId, NodeKind, Tree};
use crate::mapping::{span_length, FragmentMap, Range, RangeMap};

/// One piece of a node's written form, as produced by a strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item<'t> {
    /// Literal text, tagged with what kind of syntax it is.
    Text(Syntax, Cow<'t, str>),
    /// A child node, to be written in place.
    Node(NodeId),
    /// Optional syntax that is not there; contributes nothing.
    Absent,
}

impl<'t> Item<'t> {
    pub fn text(syntax: Syntax, content: impl Into<Cow<'t, str>>) -> Item<'t> {
        Item::Text(syntax, content.into())
    }
}

impl<'t> From<NodeId> for Item<'t> {
    fn from(id: NodeId) -> Item<'t> {
        Item::Node(id)
    }
}

impl<'t> From<Option<NodeId>> for Item<'t> {
    fn from(id: Option<NodeId>) -> Item<'t> {
        match id {
            Some(id) => Item::Node(id),
            None => Item::Absent,
        }
    }
}

/// Structured description of a node's written form: literal text
/// interleaved with each child node and that child's own description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Node(NodeId, Vec<Segment>),
}

pub type Description = Vec<Segment>;

/// Concatenate a description back into the text it describes.
pub fn flatten(description: &[Segment]) -> String {
    let mut output = String::new();
    for segment in description {
        match segment {
            Segment::Text(text) => output.push_str(text),
            Segment::Node(_, inner) => output.push_str(&flatten(inner)),
        }
    }
    output
}

pub struct Writer {
    strategies: Strategies,
    assembly: YulWriter,
    options: Options,
}

impl Writer {
    pub fn new(strategies: Strategies, assembly: YulWriter, options: Options) -> Writer {
        Writer {
            strategies,
            assembly,
            options,
        }
    }

    /// A writer with a strategy registered for every kind of node.
    pub fn standard(options: Options) -> Writer {
        let assembly = YulWriter::standard(
            options
                .layout
                .clone(),
        );
        Writer::new(standard::strategies(), assembly, options)
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn layout(&self) -> &Layout {
        &self
            .options
            .layout
    }

    /// Compiler version the output is written for.
    pub fn target(&self) -> &Version {
        &self
            .options
            .target
    }

    pub fn assembly(&self) -> &YulWriter {
        &self.assembly
    }

    /// Write a node and everything beneath it.
    pub fn render(&self, tree: &Tree, id: NodeId) -> Result<String, WritingError> {
        let mut ranges = RangeMap::new();
        self.write(tree, id, &mut ranges)
    }

    /// Write a node, and record into `ranges` where every node written
    /// lies. Each child's range is relative to the start of its parent's
    /// fragment; the root's is `(0, length)`. Nothing is recorded if
    /// writing fails.
    pub fn render_tracked(
        &self,
        tree: &Tree,
        id: NodeId,
        ranges: &mut RangeMap,
    ) -> Result<String, WritingError> {
        let mut recorded = RangeMap::new();
        let text = self.write(tree, id, &mut recorded)?;

        let length = self.span_length(tree.kind(id)?, &text);
        recorded.insert(id, Range::new(0, length));

        debug!("Wrote {} bytes, recorded {} ranges", text.len(), recorded.len());

        ranges.extend(recorded);
        Ok(text)
    }

    /// Write a node by way of the strategy registered for its kind.
    pub fn write(
        &self,
        tree: &Tree,
        id: NodeId,
        ranges: &mut RangeMap,
    ) -> Result<String, WritingError> {
        let items = self.items(tree, id)?;
        self.write_many(tree, ranges, items)
    }

    /// Concatenate items left to right. Every child node is written and
    /// its position within the text accumulated so far is recorded.
    pub fn write_many<'t, I>(
        &self,
        tree: &'t Tree,
        ranges: &mut RangeMap,
        items: I,
    ) -> Result<String, WritingError>
    where
        I: IntoIterator<Item = Item<'t>>,
    {
        let mut buffer = String::new();

        for item in items {
            match item {
                Item::Absent => {}
                Item::Text(_, text) => buffer.push_str(&text),
                Item::Node(child) => {
                    let text = self.write(tree, child, ranges)?;
                    let offset = buffer.len();
                    let length = self.span_length(tree.kind(child)?, &text);

                    ranges
                        .entry(child)
                        .or_insert(Range::new(offset, length));
                    buffer.push_str(&text);
                }
            }
        }

        Ok(buffer)
    }

    /// Describe how a node is written, as a nested sequence of text and
    /// child nodes.
    pub fn describe(&self, tree: &Tree, id: NodeId) -> Result<Description, WritingError> {
        let mut description = Vec::new();

        for item in self.items(tree, id)? {
            match item {
                Item::Absent => {}
                Item::Text(_, text) => description.push(Segment::Text(text.into_owned())),
                Item::Node(child) => {
                    description.push(Segment::Node(child, self.describe(tree, child)?));
                }
            }
        }

        Ok(description)
    }

    /// Write every node reachable from `root` on its own.
    pub fn fragments(&self, tree: &Tree, root: NodeId) -> Result<FragmentMap, WritingError> {
        let mut fragments = FragmentMap::new();

        for id in tree.walk(root) {
            let text = self.render(tree, id)?;
            fragments.insert(id, text);
        }

        Ok(fragments)
    }

    /// Write a node as a flat sequence of syntax-tagged text, for styling.
    pub fn tagged<'t>(
        &self,
        tree: &'t Tree,
        id: NodeId,
    ) -> Result<Vec<(Syntax, Cow<'t, str>)>, WritingError> {
        let mut fragments = Vec::new();
        self.append_tagged(tree, id, &mut fragments)?;
        Ok(fragments)
    }

    fn append_tagged<'t>(
        &self,
        tree: &'t Tree,
        id: NodeId,
        fragments: &mut Vec<(Syntax, Cow<'t, str>)>,
    ) -> Result<(), WritingError> {
        for item in self.items(tree, id)? {
            match item {
                Item::Absent => {}
                Item::Text(syntax, text) => fragments.push((syntax, text)),
                Item::Node(child) => self.append_tagged(tree, child, fragments)?,
            }
        }
        Ok(())
    }

    fn items<'t>(&self, tree: &'t Tree, id: NodeId) -> Result<Vec<Item<'t>>, WritingError> {
        let kind = tree.kind(id)?;
        trace!(node = %id, %kind);

        match self
            .strategies
            .get(kind)
        {
            Some(strategy) => strategy.items(tree, id, self),
            None => Err(WritingError::StrategyNotFound {
                kind: kind.to_string(),
                dump: tree.print(id),
            }),
        }
    }

    fn span_length(&self, kind: NodeKind, text: &str) -> usize {
        span_length(
            kind,
            text,
            self.options
                .terminator,
        )
    }
}
