//! Positions of written fragments

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::language::{NodeId, NodeKind};

/// Where a node's fragment sits within some containing text, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Range {
    pub offset: usize,
    pub length: usize,
}

impl Range {
    pub fn new(offset: usize, length: usize) -> Range {
        Range { offset, length }
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// Whether `other` lies entirely within this range.
    pub fn contains(&self, other: &Range) -> bool {
        self.offset <= other.offset && other.end() <= self.end()
    }

    pub fn location(&self, source: Option<usize>) -> SourceLocation {
        SourceLocation {
            offset: self.offset,
            length: self.length,
            source,
        }
    }
}

pub type RangeMap = HashMap<NodeId, Range>;

pub type FragmentMap = HashMap<NodeId, String>;

/// The length a node's fragment occupies in a source map. Statements stop
/// short of their trailing terminator, if they have one; the text itself
/// is not altered.
pub fn span_length(kind: NodeKind, text: &str, terminator: Option<char>) -> usize {
    match terminator {
        Some(c) if kind.is_statement() && text.ends_with(c) => text.len() - c.len_utf8(),
        _ => text.len(),
    }
}

/// A range in the compiler's `start:length:sourceIndex` notation. An
/// absent source index is written as `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub offset: usize,
    pub length: usize,
    pub source: Option<usize>,
}

impl SourceLocation {
    pub fn range(&self) -> Range {
        Range::new(self.offset, self.length)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            Some(index) => write!(f, "{}:{}:{}", self.offset, self.length, index),
            None => write!(f, "{}:{}:-1", self.offset, self.length),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid source location {0:?}, expected start:length:sourceIndex")]
pub struct LocationError(pub String);

impl FromStr for SourceLocation {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<SourceLocation, LocationError> {
        let invalid = || LocationError(s.to_string());

        let mut parts = s.split(':');
        let (Some(offset), Some(length), Some(source), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let offset = offset
            .parse::<usize>()
            .map_err(|_| invalid())?;
        let length = length
            .parse::<usize>()
            .map_err(|_| invalid())?;
        let source = match source {
            "-1" => None,
            index => Some(
                index
                    .parse::<usize>()
                    .map_err(|_| invalid())?,
            ),
        };

        Ok(SourceLocation {
            offset,
            length,
            source,
        })
    }
}
