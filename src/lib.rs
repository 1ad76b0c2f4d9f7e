pub mod assembly;
pub mod formatting;
pub mod language;
pub mod mapping;
pub mod rendering;
pub mod writing;
