//! Spacing used when laying out written code

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indent {
    Spaces(u8),
    Tabs,
}

/// Indentation and line separator. Writers only ever read these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Layout {
    pub indent: Indent,
    pub newline: String,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            indent: Indent::Spaces(4),
            newline: "\n".to_string(),
        }
    }
}

impl Layout {
    pub fn indent(&self, depth: usize) -> String {
        match self.indent {
            Indent::Spaces(width) => " ".repeat(width as usize * depth),
            Indent::Tabs => "\t".repeat(depth),
        }
    }

    pub fn newline(&self) -> &str {
        &self.newline
    }
}
