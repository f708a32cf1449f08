//! Salsa database definition and queries.

use std::sync::Arc;

use crate::base::FileId;

use super::file::ParsedFile;

// ============================================================================
// INPUTS
// ============================================================================

/// Input: The raw text content of a file.
///
/// Set this explicitly when a file is opened or changed.
#[salsa::input]
pub struct FileText {
    pub file: FileId,
    #[return_ref]
    pub uri: String,
    #[return_ref]
    pub text: String,
}

// ============================================================================
// DATABASE
// ============================================================================

/// The root Salsa database.
///
/// Memoizes parsing. Parse results are invalidated automatically when
/// their `FileText` input changes.
#[salsa::db]
#[derive(Default, Clone)]
pub struct RootDatabase {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for RootDatabase {
    fn salsa_event(&self, _event: &dyn Fn() -> salsa::Event) {
        // Default no-op implementation
    }
}

impl RootDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// TRACKED QUERIES
// ============================================================================

/// Parse a file, keeping comments in the tree.
///
/// This is a tracked Salsa query - results are memoized and automatically
/// invalidated when the input `FileText` changes.
#[salsa::tracked]
pub fn parse_file(db: &dyn salsa::Database, file_text: FileText) -> Arc<ParsedFile> {
    let file = file_text.file(db);
    let uri = file_text.uri(db);
    let text = file_text.text(db);
    Arc::new(ParsedFile::new(file, uri.as_str(), text))
}
