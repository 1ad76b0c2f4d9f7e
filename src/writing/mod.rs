//! The primary writer: turns a tree back into source text by dispatching
//! each node to the strategy registered for its kind.

mod error;
mod options;
mod standard;
mod strategy;
mod writer;

pub use error::*;
pub use options::*;
pub use standard::{escape, nesting, strategies};
pub use strategy::*;
pub use writer::*;
