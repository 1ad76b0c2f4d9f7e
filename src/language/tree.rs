//! Arena holding the primary tree. Nodes own nothing but handles; parent
//! links are handles too, so there are no reference cycles.

use super::error::TreeError;
use super::types::{Node, NodeId, NodeKind};

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    node: Node,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tree {
    entries: Vec<Entry>,
}

impl Tree {
    pub fn new() -> Tree {
        Tree {
            entries: Vec::new(),
        }
    }

    /// Build a tree from a flat list of nodes, in which each node refers
    /// to its children by position. Children must precede their parents.
    pub fn from_nodes(nodes: Vec<Node>) -> Result<Tree, TreeError> {
        let mut tree = Tree::new();
        for node in nodes {
            tree.add(node)?;
        }
        Ok(tree)
    }

    /// Add a node. Every child it refers to must already be in the tree and
    /// must not yet have a parent; those children are adopted by the new
    /// node.
    pub fn add(&mut self, node: Node) -> Result<NodeId, TreeError> {
        let id = NodeId(
            self.entries
                .len(),
        );
        let children = node.children();

        for (i, child) in children
            .iter()
            .enumerate()
        {
            let entry = self
                .entries
                .get(child.0)
                .ok_or(TreeError::UnknownNode(*child))?;

            if let Some(parent) = entry.parent {
                return Err(TreeError::AlreadyParented {
                    child: *child,
                    parent,
                });
            }

            if children[..i].contains(child) {
                return Err(TreeError::AlreadyParented { child: *child, parent: id });
            }
        }

        for child in &children {
            self.entries[child.0].parent = Some(id);
        }

        self.entries
            .push(Entry {
                node,
                parent: None,
                children,
            });

        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries
            .is_empty()
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, TreeError> {
        self.entries
            .get(id.0)
            .map(|entry| &entry.node)
            .ok_or(TreeError::UnknownNode(id))
    }

    pub fn kind(&self, id: NodeId) -> Result<NodeKind, TreeError> {
        self.node(id)
            .map(Node::kind)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.entries
            .get(id.0)
            .and_then(|entry| entry.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self
            .entries
            .get(id.0)
        {
            Some(entry) => &entry.children,
            None => &[],
        }
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let position = siblings
            .iter()
            .position(|sibling| *sibling == id)?;

        if position == 0 {
            None
        } else {
            Some(siblings[position - 1])
        }
    }

    /// Walk up from the given node's parent to the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Nodes without a parent.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| {
                entry
                    .parent
                    .is_none()
            })
            .map(|(i, _)| NodeId(i))
    }

    /// Every node reachable from `root`, parents strictly before their
    /// children and children in order.
    pub fn walk(&self, root: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut pending = vec![root];

        while let Some(id) = pending.pop() {
            result.push(id);
            pending.extend(
                self.children(id)
                    .iter()
                    .rev(),
            );
        }

        result
    }

    /// Human readable dump of a node and everything beneath it.
    pub fn print(&self, id: NodeId) -> String {
        let mut output = String::new();
        self.print_into(&mut output, id, 0);
        output
    }

    fn print_into(&self, output: &mut String, id: NodeId, depth: usize) {
        output.push_str(&"    ".repeat(depth));

        match self.node(id) {
            Ok(node) => {
                output.push_str(&format!("{} {}", node.kind(), id));
                if let Some(summary) = node.summary() {
                    output.push_str(" (");
                    output.push_str(&summary);
                    output.push(')');
                }
                output.push('\n');

                for child in self.children(id) {
                    self.print_into(output, *child, depth + 1);
                }
            }
            Err(_) => {
                output.push_str(&format!("<unknown> {}\n", id));
            }
        }
    }
}

pub struct Ancestors<'t> {
    tree: &'t Tree,
    next: Option<NodeId>,
}

impl<'t> Iterator for Ancestors<'t> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self
            .tree
            .parent(current);
        Some(current)
    }
}
