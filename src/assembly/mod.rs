//! Writer for the assembly dialect embedded in `assembly { ... }` blocks.
//! Its nodes are keyed by tag string and carry no positions.

mod node;
mod standard;
mod writer;

pub use node::*;
pub use standard::strategies;
pub use writer::*;
