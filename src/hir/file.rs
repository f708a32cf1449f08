//! A parsed source file with its coordinate table.

use smol_str::SmolStr;

use crate::base::{FileId, LineIndex, LineRange, TextRange};
use crate::parser::{self, Parse, SourceFile, SyntaxError};

/// One file of a compilation unit: syntax tree (comments retained), parse
/// errors, and the line index used to translate offsets into line/column
/// coordinates.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFile {
    file: FileId,
    uri: SmolStr,
    parse: Parse,
    line_index: LineIndex,
}

impl ParsedFile {
    pub fn new(file: FileId, uri: impl Into<SmolStr>, text: &str) -> Self {
        Self {
            file,
            uri: uri.into(),
            parse: parser::parse(text),
            line_index: LineIndex::new(text),
        }
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn tree(&self) -> SourceFile {
        self.parse.tree()
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.parse.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.parse.ok()
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Whether any import spec of this file names `path`.
    pub fn imports(&self, path: &str) -> bool {
        self.tree()
            .imports()
            .any(|spec| spec.path().is_some_and(|p| p == path))
    }

    /// Translate a byte range into a line/column range.
    pub fn map_range(&self, range: TextRange) -> Option<LineRange> {
        let start = self.line_index.line_col(range.start())?;
        let end = self.line_index.line_col(range.end())?;
        Some(LineRange::new(start, end))
    }
}
