//! Recover where each node sits in written text, given nothing more than
//! each node's own fragment.
//!
//! Every node is found by searching for its fragment inside its parent's
//! fragment. A parent can contain the same text more than once (think
//! `x + x`), so the search for a node resumes just past where its previous
//! sibling ended rather than at the start of the parent. This relies on
//! the tree being visited parents first and, among siblings, in order.

use tracing::{debug, trace};

use super::error::MappingError;
use super::range::{span_length, FragmentMap, Range, RangeMap};
use crate::language::{NodeId, Tree, TreeError};

pub struct SourceMapComputer {
    terminator: Option<char>,
}

impl Default for SourceMapComputer {
    fn default() -> Self {
        SourceMapComputer {
            terminator: Some(';'),
        }
    }
}

impl SourceMapComputer {
    /// Statements whose fragment ends with `terminator` are given a length
    /// that excludes it; `None` turns trimming off.
    pub fn new(terminator: Option<char>) -> SourceMapComputer {
        SourceMapComputer { terminator }
    }

    /// Compute the absolute range of every node reachable from `root`.
    /// Offsets are relative to the start of `root`'s fragment.
    pub fn compute(
        &self,
        tree: &Tree,
        root: NodeId,
        fragments: &FragmentMap,
    ) -> Result<RangeMap, MappingError> {
        let mut computed = RangeMap::new();

        for id in tree.walk(root) {
            let range = if id == root {
                let source = fragment(fragments, id);
                Range::new(0, span_length(tree.kind(id)?, source, self.terminator))
            } else {
                self.locate(tree, id, fragments, &computed)?
            };

            trace!(node = %id, offset = range.offset, length = range.length);
            computed.insert(id, range);
        }

        debug!("Computed {} ranges from {}", computed.len(), root);

        Ok(computed)
    }

    /// Locate one node. Its parent, and its previous sibling if it has one,
    /// must already be present in `computed`. A node without a parent is
    /// taken to be at the start of the text.
    pub fn locate(
        &self,
        tree: &Tree,
        id: NodeId,
        fragments: &FragmentMap,
        computed: &RangeMap,
    ) -> Result<Range, MappingError> {
        let source = fragment(fragments, id);
        let length = span_length(tree.kind(id)?, source, self.terminator);

        let Some(parent) = tree.parent(id) else {
            return Ok(Range::new(0, length));
        };

        let start = computed
            .get(&parent)
            .ok_or_else(|| MappingError::MissingParentCoordinates {
                node: id,
                parent,
                dump: tree.print(id),
            })?
            .offset;

        let outer = fragment(fragments, parent);

        let mut offset = 0;
        if let Some(sibling) = tree.previous_sibling(id) {
            let previous = computed
                .get(&sibling)
                .ok_or_else(|| MappingError::MissingSiblingCoordinates {
                    node: id,
                    sibling,
                    dump: tree.print(id),
                })?;

            offset = previous
                .end()
                .checked_sub(start)
                .ok_or_else(|| MappingError::FragmentNotFound {
                    node: id,
                    parent,
                    offset: previous.end(),
                    dump: tree.print(id),
                })?;
        }

        let index = outer
            .get(offset..)
            .and_then(|rest| rest.find(source))
            .ok_or_else(|| MappingError::FragmentNotFound {
                node: id,
                parent,
                offset,
                dump: tree.print(id),
            })?;

        Ok(Range::new(start + offset + index, length))
    }
}

// Nodes that are present in the tree but write nothing (an empty return
// parameter list, say) have no fragment; they are treated as empty.
fn fragment(fragments: &FragmentMap, id: NodeId) -> &str {
    fragments
        .get(&id)
        .map(String::as_str)
        .unwrap_or("")
}

/// Convert ranges recorded while writing, each relative to the start of
/// its parent's fragment, into ranges relative to the start of `root`.
/// Nodes that were never recorded are left out.
pub fn to_absolute(tree: &Tree, root: NodeId, relative: &RangeMap) -> Result<RangeMap, MappingError> {
    let mut absolute = RangeMap::new();

    for id in tree.walk(root) {
        let Some(range) = relative.get(&id) else {
            continue;
        };

        if id == root {
            absolute.insert(id, *range);
            continue;
        }

        let parent = tree
            .parent(id)
            .ok_or(TreeError::UnknownNode(id))?;
        let base = absolute
            .get(&parent)
            .ok_or_else(|| MappingError::MissingParentCoordinates {
                node: id,
                parent,
                dump: tree.print(id),
            })?;

        absolute.insert(id, Range::new(base.offset + range.offset, range.length));
    }

    Ok(absolute)
}
