//! Line/column ranges for locations handed back to editors.

use super::LineCol;

/// A line/column range in source code (0-indexed for LSP compatibility)
///
/// `end` is exclusive: it is the position just after the last character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineRange {
    pub start: LineCol,
    pub end: LineCol,
}

impl LineRange {
    pub fn new(start: LineCol, end: LineCol) -> Self {
        Self { start, end }
    }
}
