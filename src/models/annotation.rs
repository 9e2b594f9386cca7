use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A bracket-delimited speaker marker found in transcript text
///
/// `start`/`end` are byte offsets of the content between the brackets, so
/// `&text[start..end] == inner`. Offsets go stale as soon as the text is
/// rewritten; re-scan instead of reusing them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Content between the brackets
    pub inner: String,
    /// Byte offset of the first content byte
    pub start: usize,
    /// Byte offset one past the last content byte
    pub end: usize,
}

impl Annotation {
    /// Byte offset of the opening bracket
    pub fn outer_start(&self) -> usize {
        self.start - 1
    }

    /// Byte offset one past the closing bracket
    pub fn outer_end(&self) -> usize {
        self.end + 1
    }

    /// Byte range of the full `[...]` span
    pub fn outer_range(&self) -> Range<usize> {
        self.outer_start()..self.outer_end()
    }
}
