//! Input blocks and source identity
//!
//! A block is one embedded documentation region extracted from a source
//! file. One file may host several blocks at different offsets, so every
//! block carries its own URI and starting line, and every diagnostic points
//! back through a [`Location`].

use super::range::Range;
use serde::Serialize;
use std::fmt;

/// One embedded documentation region.
#[derive(Debug, Clone, Serialize)]
pub struct Block {
    /// Identity of the hosting source file.
    pub uri: String,
    /// Line of the hosting file where this block starts.
    pub line: usize,
    /// Raw text of the region.
    pub data: String,
}

impl Block {
    pub fn new(uri: impl Into<String>, line: usize, data: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            line,
            data: data.into(),
        }
    }
}

/// A range within an identified source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Location {
    pub uri: String,
    pub range: Range,
}

impl Location {
    pub fn new(uri: impl Into<String>, range: Range) -> Self {
        Self {
            uri: uri.into(),
            range,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.uri, self.range.start)
    }
}
