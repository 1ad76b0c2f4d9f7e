// Types representing the syntax tree consumed by the writer

mod error;
mod tree;
mod types;

// Re-export all public symbols
pub use error::*;
pub use tree::*;
pub use types::*;

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// A tree together with the node to start writing from.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub tree: Tree,
    pub root: NodeId,
}

// Interchange form: a flat list of nodes, children before parents, each
// referring to its children by position in the list.
#[derive(Deserialize)]
struct Listing {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

/// Read a file containing a tree in its JSON interchange form.
pub fn load(filename: &Path) -> Result<Document, LoadingError<'_>> {
    match std::fs::read_to_string(filename) {
        Ok(content) => parse(filename, &content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}

/// Build a Document from JSON text. If the listing does not name its root
/// then it must have exactly one parentless node.
pub fn parse<'i>(filename: &'i Path, content: &str) -> Result<Document, LoadingError<'i>> {
    let listing: Listing = serde_json::from_str(content).map_err(|error| LoadingError {
        problem: "Malformed tree".to_string(),
        details: error.to_string(),
        filename,
    })?;

    let tree = Tree::from_nodes(listing.nodes).map_err(|error| LoadingError {
        problem: "Inconsistent tree".to_string(),
        details: error.to_string(),
        filename,
    })?;

    let root = match listing.root {
        Some(root) => {
            tree.node(root)
                .map_err(|error| LoadingError {
                    problem: "Invalid root".to_string(),
                    details: error.to_string(),
                    filename,
                })?;
            root
        }
        None => {
            let roots: Vec<NodeId> = tree
                .roots()
                .collect();
            match roots.as_slice() {
                [root] => *root,
                _ => {
                    return Err(LoadingError {
                        problem: "Ambiguous root".to_string(),
                        details: format!("found {} parentless nodes", roots.len()),
                        filename,
                    })
                }
            }
        }
    };

    debug!("Loaded {} nodes, root {}", tree.len(), root);

    Ok(Document { tree, root })
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn parse_listing() {
        let filename = Path::new("inline.json");
        let document = parse(
            filename,
            r#"{ "nodes": [
                { "nodeType": "Identifier", "name": "x" },
                { "nodeType": "ExpressionStatement", "expression": 0 }
            ] }"#,
        )
        .unwrap();

        assert_eq!(document.root, NodeId(1));
        assert_eq!(document.tree.len(), 2);
    }

    #[test]
    fn parse_ambiguous_root() {
        let filename = Path::new("inline.json");
        let result = parse(
            filename,
            r#"{ "nodes": [
                { "nodeType": "Identifier", "name": "x" },
                { "nodeType": "Identifier", "name": "y" }
            ] }"#,
        );

        let error = result.unwrap_err();
        assert_eq!(error.problem, "Ambiguous root");
    }

    #[test]
    fn parse_forward_reference() {
        let filename = Path::new("inline.json");
        let result = parse(
            filename,
            r#"{ "nodes": [
                { "nodeType": "ExpressionStatement", "expression": 1 },
                { "nodeType": "Identifier", "name": "x" }
            ] }"#,
        );

        let error = result.unwrap_err();
        assert_eq!(error.problem, "Inconsistent tree");
    }
}
