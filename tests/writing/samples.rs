//! Trees shared by the integration tests.

use std::path::Path;

use scrivener::language::{self, Document, LiteralKind, Node, NodeId, Tree};

pub fn load(name: &str) -> Document {
    let filename = format!("samples/golden/{}.json", name);
    language::load(Path::new(&filename))
        .unwrap_or_else(|e| panic!("Failed to load {}: {:?}", filename, e))
}

/// Adds nodes to a tree, children first.
pub struct Builder {
    pub tree: Tree,
}

impl Builder {
    pub fn new() -> Builder {
        Builder { tree: Tree::new() }
    }

    pub fn add(&mut self, node: Node) -> NodeId {
        self.tree
            .add(node)
            .unwrap()
    }

    pub fn identifier(&mut self, name: &str) -> NodeId {
        self.add(Node::Identifier {
            name: name.to_string(),
        })
    }

    pub fn number(&mut self, value: &str) -> NodeId {
        self.add(Node::Literal {
            kind: LiteralKind::Number,
            value: value.to_string(),
        })
    }

    pub fn returning(&mut self, expression: NodeId) -> NodeId {
        self.add(Node::Return {
            expression: Some(expression),
        })
    }

    pub fn block(&mut self, statements: Vec<NodeId>) -> NodeId {
        self.add(Node::Block { statements })
    }
}

/// A block of two return statements, `return 10;` and `return 20;`.
pub fn two_returns() -> (Tree, NodeId, NodeId, NodeId) {
    let mut builder = Builder::new();
    let ten = builder.number("10");
    let first = builder.returning(ten);
    let twenty = builder.number("20");
    let second = builder.returning(twenty);
    let block = builder.block(vec![first, second]);
    (builder.tree, block, first, second)
}
