//! Settings for the writer

use semver::Version;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::formatting::Layout;
use crate::language::LoadingError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Options {
    #[serde(flatten)]
    pub layout: Layout,

    /// Character that statements' source locations stop short of. The
    /// reference compiler leaves a statement's closing `;` outside its
    /// range; `None` keeps the full length.
    pub terminator: Option<char>,

    /// Version of the compiler the written source must be accepted by.
    /// Strategies consult it where syntax changed between releases.
    pub target: Version,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            layout: Layout::default(),
            terminator: Some(';'),
            target: Version::new(0, 8, 30),
        }
    }
}

impl Options {
    pub fn load(filename: &Path) -> Result<Options, LoadingError<'_>> {
        let content = std::fs::read_to_string(filename).map_err(|error| {
            debug!(?error);
            LoadingError {
                problem: "Failed reading configuration".to_string(),
                details: error
                    .kind()
                    .to_string(),
                filename,
            }
        })?;

        serde_json::from_str(&content).map_err(|error| LoadingError {
            problem: "Malformed configuration".to_string(),
            details: error.to_string(),
            filename,
        })
    }
}
