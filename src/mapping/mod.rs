//! Source maps: where each node's fragment lies in written text

mod computer;
mod error;
mod range;

pub use computer::*;
pub use error::*;
pub use range::*;
