//! Style providers consulted by the writers

mod layout;
mod syntax;

pub use layout::*;
pub use syntax::*;
