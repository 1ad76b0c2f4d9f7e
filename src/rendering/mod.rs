//! Highlighted output. Writing happens in two passes: first the writer
//! turns the tree into a sequence of (Syntax, text) fragments, then a
//! style is applied to each fragment and the results are combined.

mod terminal;

pub use terminal::Terminal;

use crate::formatting::Render;
use crate::language::{NodeId, Tree};
use crate::writing::{Writer, WritingError};

pub fn render(
    renderer: &impl Render,
    writer: &Writer,
    tree: &Tree,
    id: NodeId,
) -> Result<String, WritingError> {
    // Pass 1: tree to tagged fragments
    let fragments = writer.tagged(tree, id)?;

    // Pass 2: apply markup to each fragment and combine
    let mut output = String::new();
    for (syntax, content) in fragments {
        output.push_str(&renderer.style(syntax, &content));
    }

    Ok(output)
}
